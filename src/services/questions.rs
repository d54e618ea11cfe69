// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Question source with a built-in fallback set.
//!
//! Generation is fallible internally (`QuestionGenerator` returns a `Result`),
//! but `QuestionSource::fetch` never fails: any error or invalid payload is
//! logged and replaced by the fixed fallback questions.

use crate::models::Question;
use async_trait::async_trait;
use std::sync::Arc;
use validator::Validate;

/// Number of questions in every quiz.
pub const QUESTION_COUNT: usize = 5;

/// Question generation errors.
#[derive(Debug, thiserror::Error)]
pub enum QuestionSourceError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Question {index} failed validation: {reason}")]
    Invalid { index: usize, reason: String },

    #[error("Expected {expected} questions, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// Remote question generator.
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, count: usize) -> Result<Vec<Question>, QuestionSourceError>;
}

/// A validated, non-empty list of questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Accept `questions` only if there are exactly `expected` and each one
    /// passes validation.
    pub fn validated(questions: Vec<Question>, expected: usize) -> Result<Self, QuestionSourceError> {
        if questions.len() != expected || expected == 0 {
            return Err(QuestionSourceError::WrongCount {
                expected,
                actual: questions.len(),
            });
        }

        for (index, question) in questions.iter().enumerate() {
            question
                .validate()
                .map_err(|e| QuestionSourceError::Invalid {
                    index,
                    reason: e.to_string(),
                })?;
        }

        Ok(Self { questions })
    }

    /// The fixed fallback set.
    pub fn fallback() -> Self {
        Self {
            questions: fallback_questions(),
        }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn into_questions(self) -> Vec<Question> {
        self.questions
    }
}

/// Where quiz questions come from.
#[derive(Clone, Default)]
pub struct QuestionSource {
    generator: Option<Arc<dyn QuestionGenerator>>,
}

impl QuestionSource {
    pub fn new(generator: Arc<dyn QuestionGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A source that always serves the fallback set.
    pub fn fallback_only() -> Self {
        Self { generator: None }
    }

    /// Fetch a question set, falling back on any generation failure.
    pub async fn fetch(&self) -> QuestionSet {
        let Some(generator) = &self.generator else {
            tracing::debug!("No question generator configured, using fallback set");
            return QuestionSet::fallback();
        };

        let generated = generator
            .generate(QUESTION_COUNT)
            .await
            .and_then(|questions| QuestionSet::validated(questions, QUESTION_COUNT));

        match generated {
            Ok(set) => {
                tracing::info!(count = set.len(), "Using generated questions");
                set
            }
            Err(e) => {
                tracing::warn!(error = %e, "Question generation failed, using fallback set");
                QuestionSet::fallback()
            }
        }
    }
}

fn fallback_questions() -> Vec<Question> {
    vec![
        Question::new(
            "What is the purpose of useEffect hook in React?",
            [
                "Manage state",
                "Perform side effects",
                "Direct DOM manipulation",
                "Context creation",
            ],
            "Perform side effects",
            "useEffect allows you to synchronize a component with an external system.",
        ),
        Question::new(
            "Which hook is used to access the previous value of a prop or state?",
            ["useRef", "useMemo", "usePrevious", "useState"],
            "useRef",
            "useRef can store values across renders without triggering a re-render.",
        ),
        Question::new(
            "What does the 'virtual DOM' refer to in React?",
            [
                "A direct copy of the HTML",
                "A server-side rendering tool",
                "A lightweight representation of the real DOM in memory",
                "The shadow DOM",
            ],
            "A lightweight representation of the real DOM in memory",
            "React uses it to batch updates efficiently.",
        ),
        Question::new(
            "How do you pass data from a child component to its parent?",
            [
                "Using Redux only",
                "Via callbacks/functions passed as props",
                "Using context",
                "Children cannot pass data to parents",
            ],
            "Via callbacks/functions passed as props",
            "This is a standard pattern for lifting state up.",
        ),
        Question::new(
            "What is React.memo() used for?",
            [
                "State management",
                "Component memoization to prevent unnecessary re-renders",
                "Memory management",
                "Caching API results",
            ],
            "Component memoization to prevent unnecessary re-renders",
            "It performs a shallow comparison of props.",
        ),
    ]
}
