// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - external providers and question sourcing.

pub mod auth;
pub mod firebase_auth;
pub mod gemini;
pub mod questions;

pub use auth::AuthAdapter;
pub use firebase_auth::FirebaseAuth;
pub use gemini::GeminiClient;
pub use questions::{
    QuestionGenerator, QuestionSet, QuestionSource, QuestionSourceError, QUESTION_COUNT,
};
