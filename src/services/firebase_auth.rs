// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firebase Authentication over the Identity Toolkit REST API.
//!
//! Handles:
//! - Email/password sign-in and account creation
//! - Session restore from a stored refresh token
//! - Background ID token refresh; a failed refresh ends the session
//! - Publishing session changes on a watch channel

use crate::error::AuthError;
use crate::models::Identity;
use crate::services::auth::AuthAdapter;
use crate::time_utils::{parse_expires_in, refresh_delay};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const SECURE_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
/// Used when the provider omits or garbles `expiresIn`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

/// Tokens of the live session.
#[derive(Clone)]
struct SessionTokens {
    refresh_token: String,
}

struct Inner {
    http: reqwest::Client,
    api_key: String,
    identity_url: String,
    token_url: String,
    session: watch::Sender<Option<Identity>>,
    tokens: Mutex<Option<SessionTokens>>,
    refresh_task: Mutex<Option<JoinHandle<()>>>,
}

/// Firebase Authentication client implementing `AuthAdapter`.
#[derive(Clone)]
pub struct FirebaseAuth {
    inner: Arc<Inner>,
}

impl FirebaseAuth {
    pub fn new(api_key: String) -> Self {
        Self::with_urls(api_key, IDENTITY_TOOLKIT_URL, SECURE_TOKEN_URL)
    }

    /// Client against custom endpoints (e.g. the Auth emulator).
    pub fn with_urls(
        api_key: String,
        identity_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        let (session, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                http: reqwest::Client::new(),
                api_key,
                identity_url: identity_url.into(),
                token_url: token_url.into(),
                session,
                tokens: Mutex::new(None),
                refresh_task: Mutex::new(None),
            }),
        }
    }

    /// Use the Firebase Auth emulator when `FIREBASE_AUTH_EMULATOR_HOST` is set.
    pub fn from_env_or(api_key: String) -> Self {
        match std::env::var("FIREBASE_AUTH_EMULATOR_HOST") {
            Ok(host) => {
                tracing::info!(host = %host, "Using Firebase Auth emulator");
                Self::with_urls(
                    api_key,
                    format!("http://{}/identitytoolkit.googleapis.com/v1", host),
                    format!("http://{}/securetoken.googleapis.com/v1", host),
                )
            }
            Err(_) => Self::new(api_key),
        }
    }

    /// Restore a session from a refresh token saved by an earlier run.
    pub async fn restore(&self, refresh_token: &str) -> Result<Identity, AuthError> {
        let refreshed = self.inner.refresh(refresh_token).await?;
        let lookup: LookupResponse = self
            .inner
            .post_json(
                "accounts:lookup",
                &json!({ "idToken": refreshed.id_token }),
            )
            .await?;

        let user = lookup
            .users
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::Provider("USER_NOT_FOUND".to_string()))?;
        let identity = Identity::new(
            user.local_id,
            user.display_name.as_deref(),
            user.email.unwrap_or_default(),
        );

        tracing::info!(uid = %identity.uid, "Restored session");
        self.inner.establish(
            identity.clone(),
            SessionTokens {
                refresh_token: refreshed.refresh_token,
            },
            lifetime(&refreshed.expires_in),
        );
        Ok(identity)
    }

}

#[async_trait]
impl AuthAdapter for FirebaseAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let response: SignInResponse = self
            .inner
            .post_json(
                "accounts:signInWithPassword",
                &json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true
                }),
            )
            .await?;

        let identity = Identity::new(
            response.local_id.clone(),
            response.display_name.as_deref(),
            response.email.clone().unwrap_or_else(|| email.to_string()),
        );
        tracing::info!(uid = %identity.uid, "Signed in");
        self.inner
            .establish(identity.clone(), response.tokens(), lifetime(&response.expires_in));
        Ok(identity)
    }

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let response: SignInResponse = self
            .inner
            .post_json(
                "accounts:signUp",
                &json!({
                    "email": email,
                    "password": password,
                    "returnSecureToken": true
                }),
            )
            .await?;

        // The account exists at this point; a missing display name only
        // affects how results are labelled.
        let update: Result<serde_json::Value, AuthError> = self
            .inner
            .post_json(
                "accounts:update",
                &json!({
                    "idToken": response.id_token,
                    "displayName": name,
                    "returnSecureToken": false
                }),
            )
            .await;
        if let Err(e) = update {
            tracing::warn!(error = %e, uid = %response.local_id, "Failed to set display name");
        }

        let identity = Identity::new(
            response.local_id.clone(),
            Some(name),
            response.email.clone().unwrap_or_else(|| email.to_string()),
        );
        tracing::info!(uid = %identity.uid, "Account created");
        self.inner
            .establish(identity.clone(), response.tokens(), lifetime(&response.expires_in));
        Ok(identity)
    }

    async fn sign_out(&self) {
        self.inner.clear();
        tracing::info!("Signed out");
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.inner.session.subscribe()
    }
}

impl Inner {
    /// POST a JSON body to an Identity Toolkit method.
    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, AuthError> {
        let url = format!("{}/{}", self.identity_url, method);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        check_response_json(response).await
    }

    /// Exchange a refresh token for a fresh ID token.
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshResponse, AuthError> {
        let url = format!("{}/token", self.token_url);
        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        check_response_json(response).await
    }

    /// Store the session, publish it, and schedule its refresh.
    fn establish(self: &Arc<Self>, identity: Identity, tokens: SessionTokens, lifetime: Duration) {
        *lock(&self.tokens) = Some(tokens);
        self.session.send_replace(Some(identity));
        self.schedule_refresh(lifetime);
    }

    fn clear(&self) {
        if let Some(task) = lock(&self.refresh_task).take() {
            task.abort();
        }
        *lock(&self.tokens) = None;
        self.session.send_replace(None);
    }

    fn schedule_refresh(self: &Arc<Self>, lifetime: Duration) {
        let weak = Arc::downgrade(self);
        let task = tokio::spawn(refresh_loop(weak, lifetime));
        if let Some(previous) = lock(&self.refresh_task).replace(task) {
            previous.abort();
        }
    }
}

/// Keep the ID token fresh; end the session when a refresh fails.
async fn refresh_loop(inner: Weak<Inner>, mut lifetime: Duration) {
    loop {
        tokio::time::sleep(refresh_delay(lifetime)).await;

        let Some(inner) = inner.upgrade() else {
            return;
        };
        let Some(refresh_token) = lock(&inner.tokens)
            .as_ref()
            .map(|tokens| tokens.refresh_token.clone())
        else {
            return;
        };

        match inner.refresh(&refresh_token).await {
            Ok(refreshed) => {
                lifetime = self::lifetime(&refreshed.expires_in);
                *lock(&inner.tokens) = Some(SessionTokens {
                    refresh_token: refreshed.refresh_token,
                });
                tracing::debug!("ID token refreshed");
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, ending session");
                *lock(&inner.tokens) = None;
                inner.session.send_replace(None);
                return;
            }
        }
    }
}

fn lifetime(expires_in: &str) -> Duration {
    parse_expires_in(expires_in).unwrap_or(DEFAULT_TOKEN_LIFETIME)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Check response status and parse JSON body, mapping Firebase error codes.
async fn check_response_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AuthError> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(match serde_json::from_str::<ErrorResponse>(&body) {
            Ok(err) => AuthError::from_firebase_code(&err.error.message),
            Err(_) => AuthError::Provider(format!("HTTP {}: {}", status, body)),
        });
    }

    response
        .json()
        .await
        .map_err(|e| AuthError::Provider(format!("JSON parse error: {}", e)))
}

/// `signInWithPassword` / `signUp` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: String,
}

impl SignInResponse {
    fn tokens(&self) -> SessionTokens {
        SessionTokens {
            refresh_token: self.refresh_token.clone(),
        }
    }
}

/// Secure Token API response (snake_case, unlike Identity Toolkit).
#[derive(Debug, Clone, Deserialize)]
struct RefreshResponse {
    id_token: String,
    refresh_token: String,
    #[serde(default)]
    expires_in: String,
}

#[derive(Debug, Clone, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    users: Vec<LookupUser>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LookupUser {
    local_id: String,
    email: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_sign_in_response() {
        let body = r#"{
            "kind": "identitytoolkit#VerifyPasswordResponse",
            "localId": "abc123",
            "email": "ada@ldce.ac.in",
            "displayName": "",
            "idToken": "id.token.value",
            "registered": true,
            "refreshToken": "refresh-value",
            "expiresIn": "3600"
        }"#;
        let response: SignInResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.local_id, "abc123");
        assert_eq!(lifetime(&response.expires_in), Duration::from_secs(3600));

        let identity = Identity::new(
            response.local_id.clone(),
            response.display_name.as_deref(),
            response.email.clone().unwrap(),
        );
        assert_eq!(identity.display_name, "ada");
    }

    #[test]
    fn parses_error_response() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#;
        let err: ErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            AuthError::from_firebase_code(&err.error.message),
            AuthError::EmailInUse
        );
    }

    #[test]
    fn missing_expiry_uses_default_lifetime() {
        assert_eq!(lifetime(""), DEFAULT_TOKEN_LIFETIME);
    }

    #[tokio::test]
    async fn new_client_has_no_session() {
        let auth = FirebaseAuth::new("key".to_string());
        assert!(auth.current().is_none());
        assert!(lock(&auth.inner.tokens).is_none());
    }

    #[tokio::test]
    async fn sign_out_publishes_none() {
        let auth = FirebaseAuth::new("key".to_string());
        auth.inner.establish(
            Identity::new("u1", Some("Ada"), "ada@ldce.ac.in"),
            SessionTokens {
                refresh_token: "refresh".to_string(),
            },
            Duration::from_secs(3600),
        );
        let mut sessions = auth.subscribe();
        assert!(lock(&auth.inner.tokens).is_some());

        auth.sign_out().await;
        sessions.changed().await.unwrap();
        assert!(sessions.borrow().is_none());
        assert!(lock(&auth.inner.tokens).is_none());
    }
}
