//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use crate::quiz::QuizSettings;
use std::env;
use std::time::Duration;

/// Seconds allowed per question.
pub const DEFAULT_QUESTION_SECS: u32 = 30;
/// Pause after a manual answer so the player sees correctness feedback.
pub const DEFAULT_FEEDBACK_DELAY_MS: u64 = 1500;
/// Gemini model used for question generation.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Firebase Web API key (Identity Toolkit)
    pub firebase_api_key: String,
    /// Gemini API key; without it the fallback question set is always used
    pub gemini_api_key: Option<String>,
    /// Gemini model name
    pub gemini_model: String,
    /// Countdown per question, in seconds
    pub question_secs: u32,
    /// Feedback pause after a manual answer, in milliseconds
    pub feedback_delay_ms: u64,
    /// Refresh token of a previous session, restored at startup
    pub refresh_token: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            gcp_project_id: "test-project".to_string(),
            firebase_api_key: "test_firebase_key".to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            question_secs: DEFAULT_QUESTION_SECS,
            feedback_delay_ms: DEFAULT_FEEDBACK_DELAY_MS,
            refresh_token: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            firebase_api_key: env::var("FIREBASE_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FIREBASE_API_KEY"))?,
            gemini_api_key: optional_var("GEMINI_API_KEY"),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            question_secs: env::var("QUIZ_QUESTION_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_QUESTION_SECS),
            feedback_delay_ms: env::var("QUIZ_FEEDBACK_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FEEDBACK_DELAY_MS),
            refresh_token: optional_var("FIREBASE_REFRESH_TOKEN"),
        })
    }

    /// Timer settings for quiz sessions.
    pub fn quiz_settings(&self) -> QuizSettings {
        QuizSettings {
            question_secs: self.question_secs,
            feedback_delay: Duration::from_millis(self.feedback_delay_ms),
        }
    }
}

/// Read a variable, treating unset and blank the same.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
