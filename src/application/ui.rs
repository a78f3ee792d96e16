use std::io;
use std::io::IsTerminal;
use std::io::Write;

use anyhow::Result;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use super::render::Render;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::ChatEvent;
use crate::domain::models::Event;
use crate::domain::models::Preferences;
use crate::domain::models::TurnStatus;
use crate::domain::services::AppState;
use crate::domain::services::PreferenceStore;

fn print_notices(render: &Render, app_state: &mut AppState) {
    for notice in app_state.take_notices() {
        println!("{}", render.notice(&notice, app_state));
    }
}

async fn save_preferences(store: &PreferenceStore, app_state: &mut AppState) {
    if !app_state.preferences_changed {
        return;
    }

    app_state.preferences_changed = false;
    if let Err(err) = store.save(&app_state.preferences).await {
        tracing::error!(error = ?err, "Failed to save preferences");
        println!("Unable to save preferences: {err}");
    }
}

fn print_event(render: &Render, app_state: &mut AppState, event: Event) -> Result<()> {
    let text_delta = match &event {
        Event::ChatStream(ChatEvent::Text { content }) => Some(content.to_string()),
        _ => None,
    };
    let is_chat_end = matches!(event, Event::ChatFinished() | Event::ChatFailed(_));
    let is_execution_end = matches!(
        event,
        Event::ExecutionCompleted(_) | Event::ExecutionFailed(_)
    );

    app_state.handle_event(event);

    if let Some(content) = text_delta {
        print!("{content}");
        io::stdout().flush()?;
    }

    if is_chat_end {
        println!();
        if app_state.chat.status() == TurnStatus::Error {
            if let Some(error) = &app_state.chat.error {
                println!("{}", render.error(&format!("Sorry, I encountered an error: {error}")));
            }
        } else if let Some(last) = app_state.chat.conversation.last() {
            if !last.references.is_empty() {
                println!("\n{}", render.references(&last.references));
            }
        }
    }

    if is_execution_end {
        match app_state.execution.status() {
            TurnStatus::Success => {
                if let Some(output) = &app_state.execution.output {
                    println!("{}", render.execution_result(output));
                }
            }
            TurnStatus::Error => {
                if let Some(error) = &app_state.execution.error {
                    println!("{}", render.error(error));
                }
            }
            _ => {}
        }
    }

    print_notices(render, app_state);

    return Ok(());
}

async fn start_loop(
    app_state: &mut AppState,
    render: &Render,
    store: &PreferenceStore,
    tx: mpsc::UnboundedSender<Action>,
    rx: &mut mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                if app_state.handle_input(input, &tx).await? {
                    break;
                }

                print_notices(render, app_state);
                save_preferences(store, app_state).await;
            }
            event = rx.recv() => {
                let Some(event) = event else {
                    break;
                };
                print_event(render, app_state, event)?;
            }
        }
    }

    return Ok(());
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let store = PreferenceStore::default();
    let preferences = match store.load().await {
        Ok(preferences) => preferences,
        Err(err) => {
            tracing::warn!(error = ?err, "Failed to load preferences, using defaults");
            Preferences::default()
        }
    };

    let mut app_state = AppState::new(&Config::get(ConfigKey::Language), preferences);
    let render = Render::new(io::stdout().is_terminal());

    println!(
        "codedeck {}. Language: {}. Type /help for commands, anything else is sent to the assistant.",
        env!("CARGO_PKG_VERSION"),
        app_state.execution.language
    );

    let res = start_loop(&mut app_state, &render, &store, tx, &mut rx).await;
    save_preferences(&store, &mut app_state).await;

    return res;
}
