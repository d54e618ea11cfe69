// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Top-level view state machine.
//!
//! Exactly one screen is active at a time, and a quiz session exists only
//! while the `Quiz` screen is active. Inputs that are not valid for the
//! current screen leave it unchanged.

use crate::error::AuthError;
use crate::models::user::DEFAULT_ROLE;
use crate::models::{Identity, ResultSummary, UserProfile, View};
use crate::quiz::{QuizEvent, QuizHandle};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Owns the active screen, the signed-in identity and the live quiz session.
pub struct ViewController {
    state: Arc<AppState>,
    view: View,
    identity: Option<Identity>,
    last_result: Option<ResultSummary>,
    quiz: Option<QuizHandle>,
    pending_save: Option<JoinHandle<()>>,
}

impl ViewController {
    /// Create the controller, entering the quiz directly when the auth
    /// adapter already has a live session.
    pub async fn new(state: Arc<AppState>) -> Self {
        let existing = state.auth.current();
        let mut controller = Self {
            state,
            view: View::Login,
            identity: None,
            last_result: None,
            quiz: None,
            pending_save: None,
        };

        if let Some(identity) = existing {
            tracing::info!(uid = %identity.uid, "Existing session found");
            controller.identity = Some(identity);
            controller.enter_quiz().await;
        }

        controller
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Summary shown on the result screen.
    pub fn last_result(&self) -> Option<&ResultSummary> {
        self.last_result.as_ref()
    }

    pub fn has_quiz(&self) -> bool {
        self.quiz.is_some()
    }

    // ─── Login / Signup ──────────────────────────────────────────

    /// Sign in from the login screen.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<View, AuthError> {
        if self.view != View::Login {
            return Ok(self.view);
        }
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let identity = self.state.auth.sign_in(email, password).await?;
        self.identity = Some(identity);
        self.enter_quiz().await;
        Ok(self.view)
    }

    /// Create an account from the signup screen and sign it in.
    ///
    /// The profile document is written best-effort; the account is usable
    /// without it.
    pub async fn signup(
        &mut self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<View, AuthError> {
        if self.view != View::Signup {
            return Ok(self.view);
        }
        let (name, email) = (name.trim(), email.trim());
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        let identity = self.state.auth.sign_up(name, email, password).await?;

        let profile = UserProfile {
            name: name.to_string(),
            email: email.to_string(),
            created_at: format_utc_rfc3339(Utc::now()),
            role: DEFAULT_ROLE.to_string(),
        };
        if let Err(e) = self
            .state
            .store
            .save_user_profile(&identity.uid, &profile)
            .await
        {
            tracing::error!(error = %e, uid = %identity.uid, "Error saving user profile");
        }

        self.identity = Some(identity);
        self.enter_quiz().await;
        Ok(self.view)
    }

    pub fn show_signup(&mut self) -> View {
        if self.view == View::Login {
            self.view = View::Signup;
        }
        self.view
    }

    pub fn show_login(&mut self) -> View {
        if self.view == View::Signup {
            self.view = View::Login;
        }
        self.view
    }

    // ─── Quiz ────────────────────────────────────────────────────

    /// Forward an answer for the question at `index` to the live quiz.
    /// Returns `false` when no quiz is running.
    pub fn answer(&self, index: usize, option: &str) -> bool {
        match &self.quiz {
            Some(quiz) => {
                quiz.answer(index, option);
                true
            }
            None => false,
        }
    }

    /// Next event of the live quiz; `None` immediately when there is none.
    ///
    /// A `Completed` event moves the controller to the result screen before
    /// it is returned.
    pub async fn next_quiz_event(&mut self) -> Option<QuizEvent> {
        let event = self.quiz.as_mut()?.next_event().await;

        match &event {
            Some(QuizEvent::Completed(outcome)) => {
                self.complete_quiz(outcome.score, outcome.total);
            }
            Some(_) => {}
            None => {
                tracing::error!("Quiz session ended without completing");
                self.sign_out_to_login().await;
            }
        }
        event
    }

    /// Show the result screen for a finished quiz and save the result.
    pub fn complete_quiz(&mut self, score: u32, total: u32) -> View {
        if self.view != View::Quiz {
            return self.view;
        }

        self.quiz = None;
        let summary = ResultSummary::new(score, total);
        self.last_result = Some(summary);
        self.view = View::Result;
        self.save_result(summary);
        self.view
    }

    /// Start a fresh quiz from the result screen.
    pub async fn retake(&mut self) -> View {
        if self.view == View::Result {
            self.enter_quiz().await;
        }
        self.view
    }

    // ─── Session ─────────────────────────────────────────────────

    /// Sign out from any screen.
    pub async fn logout(&mut self) -> View {
        self.sign_out_to_login().await;
        self.view
    }

    /// React to a session change published by the auth adapter.
    pub fn session_changed(&mut self, identity: Option<Identity>) -> View {
        match identity {
            None => {
                if self.identity.is_some() || !matches!(self.view, View::Login | View::Signup) {
                    tracing::warn!(view = %self.view, "Session ended, returning to login");
                    self.reset_to_login();
                }
            }
            Some(identity) => {
                if matches!(self.view, View::Quiz | View::Result) {
                    self.identity = Some(identity);
                }
            }
        }
        self.view
    }

    /// Wait for an in-flight result write to finish.
    pub async fn wait_for_pending_save(&mut self) {
        if let Some(task) = self.pending_save.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Result save task failed");
            }
        }
    }

    async fn sign_out_to_login(&mut self) {
        self.state.auth.sign_out().await;
        self.reset_to_login();
    }

    fn reset_to_login(&mut self) {
        self.quiz = None;
        self.identity = None;
        self.last_result = None;
        self.view = View::Login;
    }

    async fn enter_quiz(&mut self) {
        self.quiz = None;
        let questions = self.state.questions.fetch().await;

        match QuizHandle::spawn(questions.into_questions(), self.state.config.quiz_settings()) {
            Ok(handle) => {
                self.quiz = Some(handle);
                self.view = View::Quiz;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to start quiz");
            }
        }
        debug_assert_eq!(self.quiz.is_some(), self.view == View::Quiz);
    }

    fn save_result(&mut self, summary: ResultSummary) {
        let Some(identity) = &self.identity else {
            tracing::debug!("No signed-in user, result not saved");
            return;
        };

        let record = summary.to_record(identity, Utc::now());
        let store = self.state.store.clone();
        self.pending_save = Some(tokio::spawn(async move {
            if let Err(e) = store.save_result(&record).await {
                tracing::error!(error = %e, user_id = %record.user_id, "Error saving score");
            }
        }));
    }
}
