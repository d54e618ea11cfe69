// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Hackathon Quiz terminal client
//!
//! Signs the player in with Firebase, runs a timed five-question React quiz
//! and stores the score in Firestore.

use anyhow::Context;
use hackquiz::{
    config::Config,
    controller::ViewController,
    db::FirestoreDb,
    models::View,
    quiz::{QuestionView, QuizEvent},
    services::{FirebaseAuth, GeminiClient, QuestionSource},
    terminal::{self, Command},
    AppState,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured JSON logs on stderr; stdout belongs to the quiz screens
    init_logging()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        project = %config.gcp_project_id,
        question_secs = config.question_secs,
        "Starting Hackathon Quiz"
    );

    let store = FirestoreDb::new(&config.gcp_project_id)
        .await
        .context("Failed to connect to Firestore")?;

    let auth = FirebaseAuth::from_env_or(config.firebase_api_key.clone());
    if let Some(token) = &config.refresh_token {
        if let Err(e) = auth.restore(token).await {
            tracing::warn!(error = %e, "Could not restore previous session");
        }
    }

    let questions = match &config.gemini_api_key {
        Some(key) => {
            let gemini = GeminiClient::new(key.clone(), config.gemini_model.clone());
            tracing::info!(model = %config.gemini_model, "Gemini question generation enabled");
            QuestionSource::new(Arc::new(gemini))
        }
        None => {
            tracing::info!("No Gemini API key, using the built-in question set");
            QuestionSource::fallback_only()
        }
    };

    let state = Arc::new(AppState {
        config,
        auth: Arc::new(auth),
        store: Arc::new(store),
        questions,
    });

    let mut sessions = state.auth.subscribe();
    sessions.mark_unchanged();

    let restored = state.auth.current().is_some();
    if restored {
        println!("{}", terminal::render_loading());
    }
    let mut controller = ViewController::new(state.clone()).await;
    println!("{}", terminal::render_view(controller.view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut open_question: Option<QuestionView> = None;

    loop {
        tokio::select! {
            event = controller.next_quiz_event(), if controller.has_quiz() => {
                match event {
                    Some(event) => {
                        if let QuizEvent::Question(view) = &event {
                            open_question = Some(view.clone());
                        }
                        println!("{}", terminal::render_event(&event));
                        if matches!(event, QuizEvent::Completed(_)) {
                            open_question = None;
                            show(&controller);
                        }
                    }
                    None => show(&controller),
                }
            }
            Ok(()) = sessions.changed() => {
                let identity = sessions.borrow_and_update().clone();
                let before = controller.view();
                if controller.session_changed(identity) != before {
                    open_question = None;
                    println!("Your session has ended. Please sign in again.");
                    show(&controller);
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                match terminal::parse_command(controller.view(), &line) {
                    Some(Command::Quit) => break,
                    Some(command) => {
                        run_command(&mut controller, command, open_question.as_ref()).await;
                    }
                    None if line.trim().is_empty() => {}
                    None => println!("Unrecognized command on the {} screen", controller.view()),
                }
            }
        }
    }

    controller.wait_for_pending_save().await;
    tracing::info!("Shutting down");
    Ok(())
}

async fn run_command(
    controller: &mut ViewController,
    command: Command,
    open_question: Option<&QuestionView>,
) {
    let before = controller.view();

    match command {
        Command::Login { email, password } => {
            println!("{}", terminal::render_loading());
            if let Err(e) = controller.login(&email, &password).await {
                println!("Error: {}", e);
            }
        }
        Command::Signup {
            name,
            email,
            password,
        } => {
            println!("{}", terminal::render_loading());
            if let Err(e) = controller.signup(&name, &email, &password).await {
                println!("Error: {}", e);
            }
        }
        Command::ShowSignup => {
            controller.show_signup();
        }
        Command::ShowLogin => {
            controller.show_login();
        }
        Command::Answer(index) => {
            if let Some(view) = open_question {
                if let Some(option) = view.question.option(index) {
                    controller.answer(view.index, option);
                }
            }
        }
        Command::Retake => {
            println!("{}", terminal::render_loading());
            controller.retake().await;
        }
        Command::Logout => {
            controller.logout().await;
        }
        Command::Quit => {}
    }

    let after = controller.view();
    if after != before || after == View::Result {
        show(controller);
    }
}

fn show(controller: &ViewController) {
    if controller.view() == View::Result {
        if let Some(summary) = controller.last_result() {
            println!("{}", terminal::render_result(summary));
        }
    }
    println!("{}", terminal::render_view(controller.view()));
}

/// Initialize structured JSON logging on stderr.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hackquiz=info".parse()?)
                .add_directive("warn".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
