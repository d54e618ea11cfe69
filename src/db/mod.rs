//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

use crate::error::AppError;
use crate::models::{ResultRecord, UserProfile};
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    /// User profiles (keyed by auth uid)
    pub const USERS: &str = "users";
    /// One document per completed quiz
    pub const QUIZ_RESULTS: &str = "quiz_results";
}

/// Write-only persistence used by the view controller.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn save_result(&self, record: &ResultRecord) -> Result<(), AppError>;

    async fn save_user_profile(&self, uid: &str, profile: &UserProfile) -> Result<(), AppError>;
}
