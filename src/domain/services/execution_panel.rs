#[cfg(test)]
#[path = "execution_panel_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use super::RequestComposer;
use crate::domain::models::Action;
use crate::domain::models::ClientError;
use crate::domain::models::ExecutionResult;
use crate::domain::models::History;
use crate::domain::models::HistoryEntry;
use crate::domain::models::Turn;
use crate::domain::models::TurnStatus;

/// State behind the code runner. `output` and `error` are never both set.
pub struct ExecutionPanel {
    pub language: String,
    pub source: String,
    pub stdin: String,
    pub args: Vec<String>,
    pub output: Option<ExecutionResult>,
    pub error: Option<String>,
    pub history: History,
    turn: Turn,
}

impl ExecutionPanel {
    pub fn new(language: &str) -> ExecutionPanel {
        return ExecutionPanel {
            language: language.to_string(),
            source: "".to_string(),
            stdin: "".to_string(),
            args: vec![],
            output: None,
            error: None,
            history: History::default(),
            turn: Turn::default(),
        };
    }

    pub fn status(&self) -> TurnStatus {
        return self.turn.status();
    }

    pub fn is_busy(&self) -> bool {
        return self.turn.is_busy();
    }

    pub fn submit(&mut self, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.turn.is_busy() {
            return Err(ClientError::Busy.into());
        }

        let req = match RequestComposer::compose(&self.language, &self.source, &self.stdin, &self.args)
        {
            Ok(req) => req,
            Err(err) => {
                self.output = None;
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        self.turn.begin()?;
        self.error = None;
        tx.send(Action::ExecutionRequest(req))?;

        return Ok(());
    }

    pub fn handle_completed(&mut self, result: ExecutionResult) {
        if !self.turn.succeed() {
            tracing::warn!(language = %result.language, "Dropping result for a settled turn");
            return;
        }

        self.history.push(HistoryEntry::new(result.clone()));
        self.error = None;
        self.output = Some(result);
    }

    pub fn handle_failed(&mut self, message: &str) {
        if !self.turn.fail() {
            tracing::warn!(error = message, "Dropping failure for a settled turn");
            return;
        }

        self.output = None;
        self.error = Some(message.to_string());
    }

    /// Returns the panel to idle. History is kept.
    pub fn clear(&mut self) -> Result<()> {
        if self.turn.is_busy() {
            return Err(ClientError::Busy.into());
        }

        self.output = None;
        self.error = None;
        self.turn.clear();

        return Ok(());
    }
}
