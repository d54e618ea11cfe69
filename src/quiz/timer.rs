// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cancellable timers feeding the quiz runner.
//!
//! Both timers are spawned tokio tasks that post a `QuizInput` tagged with the
//! question epoch they were started for. Stopping or dropping a timer aborts
//! its task, so nothing is delivered after cancellation.

use crate::quiz::runner::QuizInput;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic one-second countdown for the current question.
#[derive(Debug, Default)]
pub struct Countdown {
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    /// Start ticking for `epoch`, replacing any countdown already running.
    ///
    /// The first tick arrives one period after the call.
    pub fn start(&mut self, epoch: u64, inputs: UnboundedSender<QuizInput>) {
        self.stop();

        self.task = Some(tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if inputs.send(QuizInput::Tick { epoch }).is_err() {
                    break;
                }
            }
        }));
    }

    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.stop();
    }
}

/// One-shot delay between a manual answer and advancing to the next question.
#[derive(Debug, Default)]
pub struct FeedbackDelay {
    task: Option<JoinHandle<()>>,
}

impl FeedbackDelay {
    /// Post `FeedbackElapsed { epoch }` after `delay`, replacing any pending delay.
    pub fn schedule(&mut self, delay: Duration, epoch: u64, inputs: UnboundedSender<QuizInput>) {
        self.cancel();

        self.task = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            // The runner may already be gone; nothing to deliver then.
            let _ = inputs.send(QuizInput::FeedbackElapsed { epoch });
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for FeedbackDelay {
    fn drop(&mut self) {
        self.cancel();
    }
}
