// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use hackquiz::error::{AppError, AuthError};

#[test]
fn test_firebase_codes_map_to_auth_errors() {
    assert_eq!(
        AuthError::from_firebase_code("INVALID_LOGIN_CREDENTIALS"),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        AuthError::from_firebase_code("EMAIL_NOT_FOUND"),
        AuthError::InvalidCredentials
    );
    assert_eq!(
        AuthError::from_firebase_code("EMAIL_EXISTS"),
        AuthError::EmailInUse
    );
    assert_eq!(
        AuthError::from_firebase_code("TOO_MANY_ATTEMPTS_TRY_LATER : Access disabled"),
        AuthError::TooManyAttempts
    );
}

#[test]
fn test_weak_password_keeps_detail() {
    let err = AuthError::from_firebase_code(
        "WEAK_PASSWORD : Password should be at least 6 characters",
    );
    assert_eq!(
        err,
        AuthError::WeakPassword("Password should be at least 6 characters".to_string())
    );
    assert!(err.to_string().contains("at least 6 characters"));
}

#[test]
fn test_unknown_code_is_provider_error() {
    let err = AuthError::from_firebase_code("OPERATION_NOT_ALLOWED");
    assert_eq!(err, AuthError::Provider("OPERATION_NOT_ALLOWED".to_string()));
}

#[test]
fn test_database_error_display() {
    let err = AppError::Database("unavailable".to_string());
    assert_eq!(err.to_string(), "Database error: unavailable");
}
