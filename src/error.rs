// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types.

/// Authentication failure, displayed inline on the login/signup screens.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please fill in every field")]
    MissingFields,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailInUse,

    #[error("Password is too weak: {0}")]
    WeakPassword(String),

    #[error("Email address is not valid")]
    InvalidEmail,

    #[error("Too many attempts, try again later")]
    TooManyAttempts,

    #[error("This account has been disabled")]
    UserDisabled,

    #[error("Could not reach the authentication service: {0}")]
    Network(String),

    #[error("Authentication failed: {0}")]
    Provider(String),
}

impl AuthError {
    /// Map a Firebase Auth error code (`error.message` in the REST response).
    ///
    /// Codes may carry a detail suffix, e.g. `WEAK_PASSWORD : Password should be ...`.
    pub fn from_firebase_code(message: &str) -> Self {
        let (code, detail) = match message.split_once(':') {
            Some((code, detail)) => (code.trim(), detail.trim()),
            None => (message.trim(), ""),
        };

        match code {
            "EMAIL_NOT_FOUND" | "INVALID_PASSWORD" | "INVALID_LOGIN_CREDENTIALS" => {
                AuthError::InvalidCredentials
            }
            "EMAIL_EXISTS" => AuthError::EmailInUse,
            "WEAK_PASSWORD" => AuthError::WeakPassword(detail.to_string()),
            "INVALID_EMAIL" | "MISSING_EMAIL" => AuthError::InvalidEmail,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthError::TooManyAttempts,
            "USER_DISABLED" => AuthError::UserDisabled,
            _ => AuthError::Provider(message.to_string()),
        }
    }
}

/// Persistence error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),
}
