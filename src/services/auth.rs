//! Authentication adapter interface.

use crate::error::AuthError;
use crate::models::Identity;
use async_trait::async_trait;
use tokio::sync::watch;

/// Session identity and account management, backed by an external provider.
///
/// Session changes (sign-in, sign-out, expiry) are published on a watch
/// channel so the view controller can react to them without holding a
/// reference to provider state.
#[async_trait]
pub trait AuthAdapter: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError>;

    /// Create an account and sign it in.
    async fn sign_up(&self, name: &str, email: &str, password: &str)
        -> Result<Identity, AuthError>;

    async fn sign_out(&self);

    /// Subscribe to session changes; the current value is the live session.
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;

    /// Identity of the live session, if any.
    fn current(&self) -> Option<Identity> {
        self.subscribe().borrow().clone()
    }
}
