// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Quiz session task.
//!
//! A `QuizHandle` owns one spawned task that drives a `QuizEngine`. All inputs
//! (answers, countdown ticks, feedback expiry) arrive on a single channel and
//! are applied one at a time. Dropping the handle aborts the task, and with it
//! every timer the session started.

use crate::models::Question;
use crate::quiz::engine::{Advance, AnswerFeedback, QuizEngine, QuizError, QuizOutcome, Tick};
use crate::quiz::timer::{Countdown, FeedbackDelay};
use crate::quiz::QuizSettings;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Input to a running quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizInput {
    /// Player picked an option for the question at `index`
    Answer { index: usize, option: String },
    /// One second elapsed on the question with this epoch
    Tick { epoch: u64 },
    /// Feedback pause for the question with this epoch is over
    FeedbackElapsed { epoch: u64 },
}

/// Snapshot of a question as it is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub index: usize,
    pub total: usize,
    pub question: Question,
    pub time_left: u32,
    pub duration: u32,
}

impl QuestionView {
    /// Position in the quiz as a fraction, counting the shown question.
    pub fn progress(&self) -> f64 {
        (self.index + 1) as f64 / self.total.max(1) as f64
    }
}

/// Output of a running quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    /// A new question is open
    Question(QuestionView),
    /// Countdown moved on the open question
    Countdown { time_left: u32, urgent: bool },
    /// The open question was answered; advancing after the feedback pause
    Answered(AnswerFeedback),
    /// The open question ran out of time
    TimedOut { index: usize },
    /// Session finished; no further events follow
    Completed(QuizOutcome),
}

/// Handle to a live quiz session.
pub struct QuizHandle {
    inputs: UnboundedSender<QuizInput>,
    events: UnboundedReceiver<QuizEvent>,
    task: JoinHandle<()>,
}

impl QuizHandle {
    /// Start a session over `questions` on a new task.
    ///
    /// Fails with `QuizError::InvalidInput` when `questions` is empty.
    pub fn spawn(questions: Vec<Question>, settings: QuizSettings) -> Result<Self, QuizError> {
        let mut engine = QuizEngine::new(settings.question_secs);
        engine.start(questions)?;

        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let runner = Runner {
            engine,
            settings,
            epoch: 0,
            countdown: Countdown::default(),
            feedback: FeedbackDelay::default(),
            inputs: input_tx.clone(),
            events: event_tx,
        };
        let task = tokio::spawn(runner.run(input_rx));

        Ok(Self {
            inputs: input_tx,
            events: event_rx,
            task,
        })
    }

    /// Submit an answer for the question at `index`.
    ///
    /// Ignored unless that question is still open and `option` is one of its
    /// options.
    pub fn answer(&self, index: usize, option: impl Into<String>) {
        // A closed channel means the session already finished.
        let _ = self.inputs.send(QuizInput::Answer {
            index,
            option: option.into(),
        });
    }

    /// Wait for the next session event; `None` once the session has ended.
    pub async fn next_event(&mut self) -> Option<QuizEvent> {
        self.events.recv().await
    }
}

impl Drop for QuizHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct Runner {
    engine: QuizEngine,
    settings: QuizSettings,
    /// Incremented for every question shown; tags timer inputs
    epoch: u64,
    countdown: Countdown,
    feedback: FeedbackDelay,
    inputs: UnboundedSender<QuizInput>,
    events: UnboundedSender<QuizEvent>,
}

impl Runner {
    async fn run(mut self, mut inputs: UnboundedReceiver<QuizInput>) {
        tracing::debug!(total = self.engine.total(), "Quiz session started");
        self.open_question();

        while let Some(input) = inputs.recv().await {
            if self.handle(input) {
                break;
            }
        }

        self.countdown.stop();
        self.feedback.cancel();
    }

    /// Apply one input. Returns `true` once the session is complete.
    fn handle(&mut self, input: QuizInput) -> bool {
        match input {
            QuizInput::Answer { index, option } if index == self.engine.current_index() => {
                if let Some(feedback) = self.engine.submit_answer(&option) {
                    self.countdown.stop();
                    tracing::debug!(
                        index = feedback.index,
                        correct = feedback.correct,
                        "Question answered"
                    );
                    self.emit(QuizEvent::Answered(feedback));
                    self.feedback
                        .schedule(self.settings.feedback_delay, self.epoch, self.inputs.clone());
                }
                false
            }
            QuizInput::Tick { epoch } if epoch == self.epoch => {
                let index = self.engine.current_index();
                match self.engine.tick() {
                    Tick::Ignored => false,
                    Tick::Counting { time_left } => {
                        self.emit(QuizEvent::Countdown {
                            time_left,
                            urgent: self.engine.is_urgent(),
                        });
                        false
                    }
                    Tick::Expired(advance) => {
                        self.countdown.stop();
                        tracing::debug!(index, "Question timed out");
                        self.emit(QuizEvent::TimedOut { index });
                        self.apply(advance)
                    }
                }
            }
            QuizInput::FeedbackElapsed { epoch } if epoch == self.epoch => {
                match self.engine.finish_feedback() {
                    Some(advance) => self.apply(advance),
                    None => false,
                }
            }
            stale => {
                tracing::trace!(
                    ?stale,
                    current_epoch = self.epoch,
                    current_index = self.engine.current_index(),
                    "Ignoring stale input"
                );
                false
            }
        }
    }

    fn apply(&mut self, advance: Advance) -> bool {
        match advance {
            Advance::Next(_) => {
                self.epoch += 1;
                self.open_question();
                false
            }
            Advance::Completed(outcome) => {
                self.countdown.stop();
                self.feedback.cancel();
                tracing::info!(
                    score = outcome.score,
                    total = outcome.total,
                    "Quiz session completed"
                );
                self.emit(QuizEvent::Completed(outcome));
                true
            }
        }
    }

    fn open_question(&mut self) {
        if let Some(question) = self.engine.current_question() {
            let view = QuestionView {
                index: self.engine.current_index(),
                total: self.engine.total() as usize,
                question: question.clone(),
                time_left: self.engine.time_left(),
                duration: self.engine.duration(),
            };
            self.emit(QuizEvent::Question(view));
            self.countdown.start(self.epoch, self.inputs.clone());
        }
    }

    fn emit(&self, event: QuizEvent) {
        // The handle may have stopped listening; the session keeps its own state.
        let _ = self.events.send(event);
    }
}
