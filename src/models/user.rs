//! User identity and profile models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Role stored on every profile created by signup.
pub const DEFAULT_ROLE: &str = "student";

/// Authenticated user, as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Identity {
    /// Provider user ID (Firebase `localId`)
    pub uid: String,
    /// Name shown on screens and stored with results
    pub display_name: String,
    /// Sign-in email
    pub email: String,
}

impl Identity {
    /// Build an identity, deriving a display name from the email when the
    /// provider has none.
    pub fn new(uid: impl Into<String>, display_name: Option<&str>, email: impl Into<String>) -> Self {
        let email = email.into();
        let display_name = match display_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => email_local_part(&email).to_string(),
        };
        Self {
            uid: uid.into(),
            display_name,
            email,
        }
    }
}

fn email_local_part(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// User profile stored in Firestore at signup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    /// When the account was created (RFC 3339)
    pub created_at: String,
    pub role: String,
}
