// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Terminal front end: command parsing and screen rendering.
//!
//! Rendering functions return strings so the binary decides where they go.

use crate::models::{ResultSummary, View};
use crate::quiz::{QuestionView, QuizEvent};
use std::fmt::Write as _;

const BAR_WIDTH: usize = 30;
const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

/// A line of user input, interpreted for the active screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { email: String, password: String },
    ShowSignup,
    Signup { name: String, email: String, password: String },
    ShowLogin,
    /// Zero-based option position
    Answer(usize),
    Retake,
    Logout,
    Quit,
}

/// Parse `line` for `view`. Returns `None` for input the screen does not accept.
pub fn parse_command(view: View, line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let head = words.next()?.to_ascii_lowercase();

    match head.as_str() {
        "quit" | "exit" => return Some(Command::Quit),
        "logout" => return Some(Command::Logout),
        _ => {}
    }

    match (view, head.as_str()) {
        (View::Login, "login") => {
            let email = words.next().unwrap_or_default().to_string();
            let password = words.next().unwrap_or_default().to_string();
            Some(Command::Login { email, password })
        }
        (View::Login, "signup") => Some(Command::ShowSignup),
        (View::Signup, "create") => {
            let email = words.next().unwrap_or_default().to_string();
            let password = words.next().unwrap_or_default().to_string();
            let name = words.collect::<Vec<_>>().join(" ");
            Some(Command::Signup {
                name,
                email,
                password,
            })
        }
        (View::Signup, "login") => Some(Command::ShowLogin),
        (View::Quiz, choice) => parse_choice(choice).map(Command::Answer),
        (View::Result, "retake") => Some(Command::Retake),
        _ => None,
    }
}

fn parse_choice(choice: &str) -> Option<usize> {
    match choice {
        "a" | "1" => Some(0),
        "b" | "2" => Some(1),
        "c" | "3" => Some(2),
        "d" | "4" => Some(3),
        _ => None,
    }
}

/// Static screens and their accepted commands.
pub fn render_view(view: View) -> String {
    match view {
        View::Login => "\n== LDCE Hackathon :: Sign In ==\n  \
             login <email> <password>\n  \
             signup                      (create an account)\n"
            .to_string(),
        View::Signup => "\n== LDCE Hackathon :: Create Account ==\n  \
             create <email> <password> <full name>\n  \
             login                       (back to sign in)\n"
            .to_string(),
        View::Quiz => "\n== Hackathon Quiz ==  answer with a-d\n".to_string(),
        View::Result => "\n  retake | logout\n".to_string(),
    }
}

pub fn render_loading() -> String {
    "Generating Hackathon Challenge... (connecting to Gemini)".to_string()
}

pub fn render_event(event: &QuizEvent) -> String {
    match event {
        QuizEvent::Question(view) => render_question(view),
        QuizEvent::Countdown { time_left, urgent } => {
            if *urgent {
                format!("  !! {}s left", time_left)
            } else {
                format!("  {}s left", time_left)
            }
        }
        QuizEvent::Answered(feedback) => {
            let mut out = String::new();
            if feedback.correct {
                let _ = writeln!(out, "  Correct!");
            } else {
                let _ = writeln!(
                    out,
                    "  Wrong: you picked \"{}\", the answer is \"{}\"",
                    feedback.selected, feedback.correct_answer
                );
            }
            let _ = write!(out, "  Tip: {}", feedback.explanation);
            out
        }
        QuizEvent::TimedOut { index } => format!("  Time's up on question {}!", index + 1),
        QuizEvent::Completed(outcome) => {
            format!("Quiz Completed! {}/{}", outcome.score, outcome.total)
        }
    }
}

fn render_question(view: &QuestionView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\nQuestion {} of {}  [{}]",
        view.index + 1,
        view.total,
        progress_bar(view.progress(), BAR_WIDTH)
    );
    let _ = writeln!(out, "{}", view.question.text);
    for (label, option) in OPTION_LABELS.iter().zip(&view.question.options) {
        let _ = writeln!(out, "  {}) {}", label, option);
    }
    let _ = write!(out, "  {}s to answer", view.time_left);
    out
}

pub fn render_result(summary: &ResultSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n== Quiz Completed! ==");
    let _ = writeln!(
        out,
        "  {}/{} correct answers ({}%)",
        summary.score, summary.total, summary.percentage
    );
    let _ = writeln!(
        out,
        "  [{}]",
        progress_bar(f64::from(summary.percentage) / 100.0, BAR_WIDTH)
    );
    let _ = write!(out, "  {}", summary.grade().message());
    out
}

/// Text progress bar for a fraction in `[0, 1]`.
pub fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}
