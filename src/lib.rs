// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Hackathon Quiz: a short timed React quiz with AI-generated questions
//!
//! This crate provides the quiz engine and view state machine, plus adapters
//! for Firebase Auth, Firestore result storage and Gemini question generation.

pub mod config;
pub mod controller;
pub mod db;
pub mod error;
pub mod models;
pub mod quiz;
pub mod services;
pub mod terminal;
pub mod time_utils;

use config::Config;
use db::ResultStore;
use services::{AuthAdapter, QuestionSource};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth: Arc<dyn AuthAdapter>,
    pub store: Arc<dyn ResultStore>,
    pub questions: QuestionSource,
}
