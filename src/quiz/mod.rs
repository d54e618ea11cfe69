//! Timed quiz sessions: the engine state machine, its timers, and the task
//! that drives them.

pub mod engine;
pub mod runner;
pub mod timer;

pub use engine::{AnswerFeedback, QuizEngine, QuizError, QuizOutcome, Response, URGENT_SECS};
pub use runner::{QuestionView, QuizEvent, QuizHandle, QuizInput};

use crate::config::{DEFAULT_FEEDBACK_DELAY_MS, DEFAULT_QUESTION_SECS};
use std::time::Duration;

/// Timing parameters of a quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    /// Countdown per question, in seconds
    pub question_secs: u32,
    /// Pause between a manual answer and the next question
    pub feedback_delay: Duration,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            question_secs: DEFAULT_QUESTION_SECS,
            feedback_delay: Duration::from_millis(DEFAULT_FEEDBACK_DELAY_MS),
        }
    }
}
