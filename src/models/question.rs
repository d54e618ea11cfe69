// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quiz question model.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question.
///
/// Field names follow the JSON shape requested from the generator
/// (`question`, `options`, `correctAnswer`, `explanation`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_answer_choices"))]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Question {
    /// Question prompt shown to the player
    #[serde(rename = "question")]
    #[validate(length(min = 1))]
    pub text: String,
    /// Answer options, in display order
    #[validate(length(equal = 4))]
    pub options: Vec<String>,
    /// Must equal one of `options` exactly
    pub correct_answer: String,
    /// Shown after the question is answered
    pub explanation: String,
}

impl Question {
    pub fn new(
        text: impl Into<String>,
        options: [&str; OPTION_COUNT],
        correct_answer: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer: correct_answer.into(),
            explanation: explanation.into(),
        }
    }

    /// Whether `option` is the correct answer.
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }

    /// Option at a zero-based display position.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

fn validate_answer_choices(question: &Question) -> Result<(), ValidationError> {
    if question.text.trim().is_empty() {
        return Err(ValidationError::new("blank_question"));
    }

    let mut seen = HashSet::new();
    for option in &question.options {
        if option.trim().is_empty() {
            return Err(ValidationError::new("blank_option"));
        }
        if !seen.insert(option.as_str()) {
            return Err(ValidationError::new("duplicate_option"));
        }
    }

    if !seen.contains(question.correct_answer.as_str()) {
        return Err(ValidationError::new("answer_not_in_options"));
    }

    Ok(())
}
