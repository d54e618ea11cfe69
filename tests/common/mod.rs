// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use hackquiz::config::Config;
use hackquiz::db::{FirestoreDb, ResultStore};
use hackquiz::error::{AppError, AuthError};
use hackquiz::models::{Identity, Question, ResultRecord, UserProfile};
use hackquiz::services::{AuthAdapter, QuestionGenerator, QuestionSource, QuestionSourceError};
use hackquiz::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

// ─── Auth ────────────────────────────────────────────────────────

/// In-memory auth provider with Firebase-like error behavior.
#[allow(dead_code)]
pub struct FakeAuth {
    session: watch::Sender<Option<Identity>>,
    /// email -> (password, identity)
    accounts: Mutex<HashMap<String, (String, Identity)>>,
}

#[allow(dead_code)]
impl FakeAuth {
    pub fn new() -> Arc<Self> {
        let (session, _) = watch::channel(None);
        Arc::new(Self {
            session,
            accounts: Mutex::new(HashMap::new()),
        })
    }

    /// Register an account up front.
    pub fn with_account(self: Arc<Self>, name: &str, email: &str, password: &str) -> Arc<Self> {
        let identity = Identity::new(format!("uid-{}", email), Some(name), email);
        self.accounts
            .lock()
            .unwrap()
            .insert(email.to_string(), (password.to_string(), identity));
        self
    }

    /// Start with a live session for `identity`.
    pub fn signed_in(identity: Identity) -> Arc<Self> {
        let auth = Self::new();
        auth.session.send_replace(Some(identity));
        auth
    }

    /// Simulate the provider expiring the session.
    pub fn expire_session(&self) {
        self.session.send_replace(None);
    }
}

#[async_trait]
impl AuthAdapter for FakeAuth {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity, AuthError> {
        let identity = match self.accounts.lock().unwrap().get(email) {
            Some((stored, identity)) if stored == password => identity.clone(),
            _ => return Err(AuthError::InvalidCredentials),
        };
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        if password.len() < 6 {
            return Err(AuthError::WeakPassword(
                "Password should be at least 6 characters".to_string(),
            ));
        }
        let identity = {
            let mut accounts = self.accounts.lock().unwrap();
            if accounts.contains_key(email) {
                return Err(AuthError::EmailInUse);
            }
            let identity = Identity::new(format!("uid-{}", email), Some(name), email);
            accounts.insert(email.to_string(), (password.to_string(), identity.clone()));
            identity
        };
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) {
        self.session.send_replace(None);
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}

// ─── Store ───────────────────────────────────────────────────────

/// Store that keeps every write in memory, or fails them all when asked to.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingStore {
    pub results: Mutex<Vec<ResultRecord>>,
    pub profiles: Mutex<Vec<(String, UserProfile)>>,
    fail: AtomicBool,
}

#[allow(dead_code)]
impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let store = Self::new();
        store.fail.store(true, Ordering::SeqCst);
        store
    }

    pub fn results(&self) -> Vec<ResultRecord> {
        self.results.lock().unwrap().clone()
    }

    pub fn profiles(&self) -> Vec<(String, UserProfile)> {
        self.profiles.lock().unwrap().clone()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::Database("unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ResultStore for RecordingStore {
    async fn save_result(&self, record: &ResultRecord) -> Result<(), AppError> {
        self.check()?;
        self.results.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn save_user_profile(&self, uid: &str, profile: &UserProfile) -> Result<(), AppError> {
        self.check()?;
        self.profiles
            .lock()
            .unwrap()
            .push((uid.to_string(), profile.clone()));
        Ok(())
    }
}

// ─── Questions ───────────────────────────────────────────────────

/// Generator returning a fixed list, counting calls.
#[allow(dead_code)]
pub struct StaticGenerator {
    questions: Vec<Question>,
    pub calls: Mutex<usize>,
}

#[allow(dead_code)]
impl StaticGenerator {
    pub fn new(questions: Vec<Question>) -> Arc<Self> {
        Arc::new(Self {
            questions,
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl QuestionGenerator for StaticGenerator {
    async fn generate(&self, _count: usize) -> Result<Vec<Question>, QuestionSourceError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.questions.clone())
    }
}

/// Generator that always fails like an unreachable endpoint.
#[allow(dead_code)]
pub struct FailingGenerator;

#[async_trait]
impl QuestionGenerator for FailingGenerator {
    async fn generate(&self, _count: usize) -> Result<Vec<Question>, QuestionSourceError> {
        Err(QuestionSourceError::Network("connection refused".to_string()))
    }
}

/// Five valid questions whose correct answer is always the first option.
#[allow(dead_code)]
pub fn numbered_questions() -> Vec<Question> {
    (1..=5)
        .map(|n| {
            let right = format!("right {}", n);
            Question::new(
                format!("Question {}", n),
                [right.as_str(), "wrong a", "wrong b", "wrong c"],
                right.clone(),
                format!("Explanation {}", n),
            )
        })
        .collect()
}

#[allow(dead_code)]
pub fn ada() -> Identity {
    Identity::new("uid-ada", Some("Ada"), "ada@ldce.ac.in")
}

/// Build shared state over the given fakes.
#[allow(dead_code)]
pub fn create_test_state(
    auth: Arc<FakeAuth>,
    store: Arc<RecordingStore>,
    questions: QuestionSource,
) -> Arc<AppState> {
    Arc::new(AppState {
        config: Config::default(),
        auth,
        store,
        questions,
    })
}
