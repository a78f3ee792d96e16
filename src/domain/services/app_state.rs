#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;

use super::ChatPanel;
use super::ExecutionPanel;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Languages;
use crate::domain::models::Panel;
use crate::domain::models::Preferences;
use crate::domain::models::SlashCommand;
use crate::domain::models::FONT_SIZES;
use crate::domain::models::THEMES;

/// Something the console should print after handling input or an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
    Help,
    Languages,
    History,
    Files,
}

pub struct AppState {
    pub execution: ExecutionPanel,
    pub chat: ChatPanel,
    pub preferences: Preferences,
    pub preferences_changed: bool,
    notices: Vec<Notice>,
}

impl AppState {
    /// Restores the active editor file, if any, into the execution panel.
    pub fn new(language: &str, preferences: Preferences) -> AppState {
        let mut execution = ExecutionPanel::new(language);
        if let Some(file) = preferences.active_file() {
            execution.language = file.language.to_string();
            execution.source = file.content.to_string();
        }

        return AppState {
            execution,
            chat: ChatPanel::default(),
            preferences,
            preferences_changed: false,
            notices: vec![],
        };
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        return std::mem::take(&mut self.notices);
    }

    fn info(&mut self, text: &str) {
        self.notices.push(Notice::Info(text.to_string()));
    }

    fn error(&mut self, err: anyhow::Error) {
        self.notices.push(Notice::Error(err.to_string()));
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::ChatStream(chat_event) => {
                if let Err(err) = self.chat.handle_stream(chat_event) {
                    tracing::error!(error = ?err, "Failed to apply chat event");
                    self.error(err);
                }
            }
            Event::ChatFinished() => {
                self.chat.handle_finished();
            }
            Event::ChatFailed(message) => {
                self.chat.handle_failed(&message);
            }
            Event::ExecutionCompleted(result) => {
                self.execution.handle_completed(result);
            }
            Event::ExecutionFailed(message) => {
                self.execution.handle_failed(&message);
            }
            Event::Notice(text) => {
                self.info(&text);
            }
        }
    }

    /// Handles one line of console input. Returns true when the session
    /// should end.
    pub async fn handle_input(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        let (should_break, should_continue) = self.handle_slash_commands(input, tx).await?;
        if should_break {
            return Ok(true);
        }
        if should_continue {
            return Ok(false);
        }

        if input.trim_start().starts_with('/') {
            let command = input.split_whitespace().next().unwrap_or_default();
            self.notices.push(Notice::Error(format!(
                "Unknown command {command}. Run /help to list commands."
            )));
            return Ok(false);
        }

        if let Err(err) = self.chat.submit(input, tx) {
            self.error(err);
        }

        return Ok(false);
    }

    /// Returns `(should_break, should_continue)`. `should_continue` is true
    /// when the input was a command and must not be sent to the chat.
    pub async fn handle_slash_commands(
        &mut self,
        input: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        let Some(command) = SlashCommand::parse(input) else {
            return Ok((false, false));
        };

        if command.is_quit() {
            return Ok((true, false));
        }

        if command.is_help() {
            self.notices.push(Notice::Help);
        } else if command.is_languages() {
            self.notices.push(Notice::Languages);
        } else if command.is_runtimes() {
            tx.send(Action::ListRuntimes())?;
        } else if command.is_language() {
            self.set_language(&command.rest());
        } else if command.is_load() {
            self.load_file(command.raw_rest()).await;
        } else if command.is_files() {
            self.notices.push(Notice::Files);
        } else if command.is_open() {
            self.open_file(command.raw_rest());
        } else if command.is_stdin() {
            self.execution.stdin = command.raw_rest().replace("\\n", "\n");
            self.info("Updated stdin.");
        } else if command.is_args() {
            self.execution.args = command.args.clone();
            self.info(&format!("Updated args to {:?}.", self.execution.args));
        } else if command.is_run() {
            self.run(tx);
        } else if command.is_history() {
            self.notices.push(Notice::History);
        } else if command.is_cancel() {
            self.cancel(tx)?;
        } else if command.is_clear() {
            self.clear();
        } else if command.is_new_conversation() {
            match self.chat.new_conversation() {
                Ok(_) => self.info("Started a new conversation."),
                Err(err) => self.error(err),
            }
        } else if command.is_theme() {
            self.set_theme(&command.rest());
        } else if command.is_font() {
            self.set_font_size(&command.rest());
        }

        return Ok((false, true));
    }

    fn set_language(&mut self, identifier: &str) {
        let Some(lang) = Languages::resolve(identifier) else {
            self.notices.push(Notice::Error(format!(
                "{identifier} is not a supported language. Run /languages to list them."
            )));
            return;
        };

        self.execution.language = lang.name.to_string();
        self.info(&format!(
            "Language set to {} {}.",
            lang.display_name, lang.version
        ));
    }

    async fn load_file(&mut self, file_path: &str) {
        if file_path.is_empty() {
            self.notices
                .push(Notice::Error("A file path is required.".to_string()));
            return;
        }

        let file_path = path::PathBuf::from(file_path);
        let content = match fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(err) => {
                self.notices.push(Notice::Error(format!(
                    "Unable to read {}: {err}",
                    file_path.display()
                )));
                return;
            }
        };

        let extension = file_path
            .extension()
            .map(|ext| return ext.to_string_lossy().to_string())
            .unwrap_or_default();
        if let Some(lang) = Languages::from_extension(&extension) {
            self.execution.language = lang.name.to_string();
        }

        self.execution.source = content;
        self.preferences.upsert_file(
            &file_path.to_string_lossy(),
            &self.execution.language,
            &self.execution.source,
        );
        self.preferences_changed = true;
        self.info(&format!(
            "Loaded {} as {}.",
            file_path.display(),
            self.execution.language
        ));
    }

    fn open_file(&mut self, id_or_name: &str) {
        let Some(file) = self.preferences.find_file(id_or_name).cloned() else {
            self.notices.push(Notice::Error(format!(
                "No saved file named {id_or_name}. Run /files to list them."
            )));
            return;
        };

        self.execution.language = file.language.to_string();
        self.execution.source = file.content.to_string();
        self.preferences.set_active(&file.id);
        self.preferences_changed = true;
        self.info(&format!("Opened {}.", file.name));
    }

    fn run(&mut self, tx: &mpsc::UnboundedSender<Action>) {
        if let Err(err) = self.execution.submit(tx) {
            self.error(err);
        }
    }

    fn cancel(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        let mut cancelled = false;
        if self.execution.is_busy() {
            tx.send(Action::Cancel(Panel::Execution))?;
            cancelled = true;
        }
        if self.chat.is_busy() {
            tx.send(Action::Cancel(Panel::Chat))?;
            cancelled = true;
        }

        if !cancelled {
            self.info("Nothing to cancel.");
        }

        return Ok(());
    }

    fn clear(&mut self) {
        let res = self.execution.clear().and_then(|_| return self.chat.clear());
        match res {
            Ok(_) => self.info("Cleared."),
            Err(err) => self.error(err),
        }
    }

    fn set_theme(&mut self, theme: &str) {
        if !THEMES.contains(&theme) {
            self.notices.push(Notice::Error(format!(
                "Unknown theme {theme}. Available themes: {}.",
                THEMES.join(", ")
            )));
            return;
        }

        self.preferences.theme = theme.to_string();
        self.preferences_changed = true;
        self.info(&format!("Theme set to {theme}."));
    }

    fn set_font_size(&mut self, size: &str) {
        let font_size = match size.parse::<u16>() {
            Ok(font_size) if FONT_SIZES.contains(&font_size) => font_size,
            _ => {
                self.notices.push(Notice::Error(format!(
                    "Font size must be a number between {} and {}.",
                    FONT_SIZES.start(),
                    FONT_SIZES.end()
                )));
                return;
            }
        };

        self.preferences.font_size = font_size;
        self.preferences_changed = true;
        self.info(&format!("Font size set to {font_size}."));
    }
}
