// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quiz state machine.
//!
//! The engine is synchronous and clock-free: the runner feeds it answers,
//! one-second ticks and feedback-delay expiry, and acts on what it returns.
//! Each question ends exactly once, either by a manual answer (followed by
//! `finish_feedback`) or by the countdown reaching zero.

use crate::models::Question;

/// Seconds at or below which the countdown is flagged as urgent.
pub const URGENT_SECS: u32 = 5;

/// Quiz engine errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Completed,
}

/// What happened to one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Option the player picked; `None` when the question timed out
    pub selected: Option<String>,
    pub correct: bool,
}

/// Final outcome of a quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: u32,
    pub total: u32,
    /// One entry per question, in order
    pub responses: Vec<Response>,
}

/// Feedback for a manual answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerFeedback {
    pub index: usize,
    pub selected: String,
    pub correct: bool,
    pub correct_answer: String,
    pub explanation: String,
}

/// Result of moving past a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Now showing the question at this index
    Next(usize),
    Completed(QuizOutcome),
}

/// Result of a one-second tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// Not counting (idle, answered, or completed)
    Ignored,
    Counting { time_left: u32 },
    /// Countdown hit zero; the question was skipped without credit
    Expired(Advance),
}

/// Quiz session state.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    duration: u32,
    phase: Phase,
    questions: Vec<Question>,
    current_index: usize,
    score: u32,
    selected_option: Option<String>,
    answered: bool,
    time_left: u32,
    responses: Vec<Response>,
}

impl QuizEngine {
    /// Create an idle engine with a per-question countdown of `duration` seconds.
    pub fn new(duration: u32) -> Self {
        Self {
            duration,
            phase: Phase::Idle,
            questions: Vec::new(),
            current_index: 0,
            score: 0,
            selected_option: None,
            answered: false,
            time_left: duration,
            responses: Vec::new(),
        }
    }

    /// Start a fresh session over `questions`, discarding any previous state.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), QuizError> {
        if questions.is_empty() {
            return Err(QuizError::InvalidInput(
                "cannot start a quiz without questions".to_string(),
            ));
        }
        if self.duration == 0 {
            return Err(QuizError::InvalidInput(
                "question duration must be positive".to_string(),
            ));
        }

        self.responses = Vec::with_capacity(questions.len());
        self.questions = questions;
        self.current_index = 0;
        self.score = 0;
        self.selected_option = None;
        self.answered = false;
        self.time_left = self.duration;
        self.phase = Phase::Running;
        Ok(())
    }

    /// Record a manual answer for the current question.
    ///
    /// Returns `None` (and changes nothing) unless the session is running, the
    /// current question is still open and `option` is one of its options.
    pub fn submit_answer(&mut self, option: &str) -> Option<AnswerFeedback> {
        if self.phase != Phase::Running || self.answered {
            return None;
        }

        let question = &self.questions[self.current_index];
        if !question.options.iter().any(|o| o == option) {
            return None;
        }
        let correct = question.is_correct(option);
        let feedback = AnswerFeedback {
            index: self.current_index,
            selected: option.to_string(),
            correct,
            correct_answer: question.correct_answer.clone(),
            explanation: question.explanation.clone(),
        };

        self.selected_option = Some(option.to_string());
        self.answered = true;
        if correct {
            self.score += 1;
        }
        self.responses.push(Response {
            selected: Some(option.to_string()),
            correct,
        });

        Some(feedback)
    }

    /// Count down one second on an open question.
    pub fn tick(&mut self) -> Tick {
        if self.phase != Phase::Running || self.answered {
            return Tick::Ignored;
        }

        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left > 0 {
            return Tick::Counting {
                time_left: self.time_left,
            };
        }

        self.responses.push(Response {
            selected: None,
            correct: false,
        });
        Tick::Expired(self.advance())
    }

    /// Move on after the feedback pause that follows a manual answer.
    pub fn finish_feedback(&mut self) -> Option<Advance> {
        if self.phase != Phase::Running || !self.answered {
            return None;
        }
        Some(self.advance())
    }

    fn advance(&mut self) -> Advance {
        if self.current_index + 1 >= self.questions.len() {
            self.phase = Phase::Completed;
            return Advance::Completed(QuizOutcome {
                score: self.score,
                total: self.total(),
                responses: self.responses.clone(),
            });
        }

        self.current_index += 1;
        self.time_left = self.duration;
        self.selected_option = None;
        self.answered = false;
        Advance::Next(self.current_index)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_completed(&self) -> bool {
        self.phase == Phase::Completed
    }

    /// Question currently shown, if the session has started.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::Idle => None,
            _ => self.questions.get(self.current_index),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> u32 {
        self.questions.len() as u32
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selected_option(&self) -> Option<&str> {
        self.selected_option.as_deref()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Fraction of the countdown remaining, in `[0, 1]`.
    pub fn time_progress(&self) -> f64 {
        f64::from(self.time_left) / f64::from(self.duration.max(1))
    }

    pub fn is_urgent(&self) -> bool {
        self.time_left <= URGENT_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("Question {}", i),
                    ["right", "wrong-1", "wrong-2", "wrong-3"],
                    "right",
                    "explanation",
                )
            })
            .collect()
    }

    fn started(n: usize, duration: u32) -> QuizEngine {
        let mut engine = QuizEngine::new(duration);
        engine.start(questions(n)).unwrap();
        engine
    }

    #[test]
    fn start_rejects_empty_list() {
        let mut engine = QuizEngine::new(30);
        let err = engine.start(Vec::new()).unwrap_err();
        assert!(matches!(err, QuizError::InvalidInput(_)));
        assert!(!engine.is_running());
    }

    #[test]
    fn start_initializes_state() {
        let engine = started(3, 30);
        assert!(engine.is_running());
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.time_left(), 30);
        assert!(!engine.is_answered());
        assert_eq!(engine.selected_option(), None);
    }

    #[test]
    fn submit_before_start_is_noop() {
        let mut engine = QuizEngine::new(30);
        assert!(engine.submit_answer("right").is_none());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.tick(), Tick::Ignored);
    }

    #[test]
    fn correct_answer_scores() {
        let mut engine = started(2, 30);
        let feedback = engine.submit_answer("right").unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.index, 0);
        assert_eq!(engine.score(), 1);
        assert!(engine.is_answered());
    }

    #[test]
    fn second_submit_has_no_effect() {
        let mut engine = started(2, 30);
        engine.submit_answer("wrong-1").unwrap();
        assert!(engine.submit_answer("right").is_none());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.selected_option(), Some("wrong-1"));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut engine = started(2, 30);
        assert!(engine.submit_answer("maybe").is_none());
        assert!(!engine.is_answered());
        assert_eq!(engine.selected_option(), None);

        // The question stays open for a real answer.
        assert!(engine.submit_answer("right").is_some());
    }

    #[test]
    fn ticks_after_answer_are_ignored() {
        let mut engine = started(2, 30);
        engine.tick();
        engine.submit_answer("right").unwrap();
        assert_eq!(engine.tick(), Tick::Ignored);
        assert_eq!(engine.time_left(), 29);
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn timeout_advances_once_without_credit() {
        let mut engine = started(3, 3);
        assert_eq!(engine.tick(), Tick::Counting { time_left: 2 });
        assert_eq!(engine.tick(), Tick::Counting { time_left: 1 });
        assert_eq!(engine.tick(), Tick::Expired(Advance::Next(1)));
        assert_eq!(engine.current_index(), 1);
        assert_eq!(engine.time_left(), 3);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn finish_feedback_requires_answer() {
        let mut engine = started(2, 30);
        assert!(engine.finish_feedback().is_none());
        engine.submit_answer("right").unwrap();
        assert_eq!(engine.finish_feedback(), Some(Advance::Next(1)));
        assert_eq!(engine.selected_option(), None);
        assert!(!engine.is_answered());
        // The new question is open, so another finish is a no-op.
        assert!(engine.finish_feedback().is_none());
    }

    #[test]
    fn last_question_completes() {
        let mut engine = started(2, 30);
        engine.submit_answer("right").unwrap();
        engine.finish_feedback().unwrap();
        engine.submit_answer("wrong-2").unwrap();

        let outcome = match engine.finish_feedback() {
            Some(Advance::Completed(outcome)) => outcome,
            other => panic!("expected completion, got {:?}", other),
        };
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.responses.len(), 2);
        assert_eq!(outcome.responses[1].selected.as_deref(), Some("wrong-2"));
        assert!(engine.is_completed());
        assert_eq!(engine.current_index(), 1);
    }

    #[test]
    fn inputs_after_completion_are_noops() {
        let mut engine = started(1, 1);
        assert!(matches!(engine.tick(), Tick::Expired(Advance::Completed(_))));
        assert!(engine.submit_answer("right").is_none());
        assert_eq!(engine.tick(), Tick::Ignored);
        assert!(engine.finish_feedback().is_none());
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn restart_resets_everything() {
        let mut engine = started(1, 30);
        engine.submit_answer("right").unwrap();
        engine.finish_feedback().unwrap();
        assert!(engine.is_completed());

        engine.start(questions(2)).unwrap();
        assert!(engine.is_running());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.time_left(), 30);
    }

    #[test]
    fn urgency_and_progress() {
        let mut engine = started(1, 10);
        assert!(!engine.is_urgent());
        for _ in 0..5 {
            engine.tick();
        }
        assert!(engine.is_urgent());
        assert!((engine.time_progress() - 0.5).abs() < f64::EPSILON);
    }
}
