//! A login form for the terminal

/// The "functional core" to the main module's "imperative shell"
mod app;

/// Validating JSON from stdin without the form
mod check;

/// Configuration and argument parsing
mod config;

/// Tab-order helpers for form inputs
mod form_fields;

/// Where logs go
mod logging;

use app::App;
use clap::Parser;
use config::Command;
use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::{io, process::ExitCode};
use tokio::{
    sync::mpsc::{unbounded_channel, UnboundedSender},
    task::JoinHandle,
};

#[tokio::main]
async fn main() -> io::Result<ExitCode> {
    let config = config::Config::parse();

    if config.command == Some(Command::Check) {
        logging::init_stderr();
        return Ok(check::run());
    }

    let _log_guard = logging::init_file(&config.log_dir())?;
    tracing::info!("starting login form");

    let mut terminal = ratatui::init();
    terminal.clear()?;
    let res = run(terminal, config.email).await;
    ratatui::restore();

    if let Err(err) = &res {
        tracing::error!(?err, "terminal error");
    }

    res
}

/// Manage the lifecycle of the app
async fn run(mut terminal: DefaultTerminal, email: Option<String>) -> io::Result<ExitCode> {
    let mut app = App::new(email);

    // Side effects (like submitting the form) run as async tasks. Once those
    // tasks are done, we read their results off of a channel. We keep track of
    // outstanding effects so we can exit cleanly.
    let (effect_tx, mut effect_rx) = unbounded_channel();
    let mut outstanding_effects: Vec<JoinHandle<()>> = Vec::with_capacity(1);

    terminal.draw(|frame| app.render(frame))?;

    let mut event_stream = EventStream::new();

    loop {
        // Wait for either external input or the result of an effect. This is
        // an `Option<_>` because we don't need to pay attention to every
        // single terminal event (e.g. mouse movement or resizes.)
        let next_action_opt = tokio::select! {
            event_opt = event_stream.next() => {
                match event_opt {
                    Some(Ok(Event::Key(key_event))) => {
                        Some(app::Action::Key(key_event))
                    }
                    Some(Err(err)) => {
                        Some(app::Action::Problem(err.to_string()))
                    }
                    _ => None,
                }
            },

            effect_opt = effect_rx.recv() => {
                effect_opt
            }
        };

        if let Some(action) = next_action_opt {
            for effect in app.handle(action) {
                outstanding_effects.push(spawn_effect_task(effect_tx.clone(), effect));
            }
        }

        terminal.draw(|frame| app.render(frame))?;

        // The list is pruned on every pass, so a full scan is fine.
        outstanding_effects.retain(|handle| !handle.is_finished());

        // If the app wants to exit, let any in-flight effects finish first so
        // submissions aren't cut off halfway.
        if let Some(code) = app.should_exit() {
            for effect in outstanding_effects.drain(..) {
                if let Err(err) = effect.await {
                    tracing::error!(?err, "effect task failed during shutdown");
                }
            }

            tracing::info!("exiting");
            return Ok(code);
        }
    }
}

/// Spawn a task to run an effect and send the next action to the app.
fn spawn_effect_task(effect_tx: UnboundedSender<app::Action>, effect: app::Effect) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(next_action) = effect.run().await {
            // A closed channel means the event loop is gone and we're shutting
            // down, so there's nobody left to tell.
            if effect_tx.send(next_action).is_err() {
                tracing::trace!("dropped action after shutdown");
            }
        }
    })
}
