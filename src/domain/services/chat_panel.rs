#[cfg(test)]
#[path = "chat_panel_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::ChatEvent;
use crate::domain::models::ChatMessage;
use crate::domain::models::ChatRequest;
use crate::domain::models::ClientError;
use crate::domain::models::Conversation;
use crate::domain::models::Role;
use crate::domain::models::StreamSignal;
use crate::domain::models::Turn;
use crate::domain::models::TurnStatus;

#[derive(Default)]
pub struct ChatPanel {
    pub conversation: Conversation,
    pub error: Option<String>,
    turn: Turn,
    saw_done: bool,
    stream_error: Option<String>,
}

impl ChatPanel {
    pub fn status(&self) -> TurnStatus {
        return self.turn.status();
    }

    pub fn is_busy(&self) -> bool {
        return self.turn.is_busy();
    }

    pub fn submit(&mut self, text: &str, tx: &mpsc::UnboundedSender<Action>) -> Result<()> {
        if self.turn.is_busy() {
            return Err(ClientError::Busy.into());
        }

        let text = text.trim();
        if text.is_empty() {
            return Err(ClientError::MissingField("message").into());
        }

        let history = self.conversation.history();
        self.conversation.push(ChatMessage::new(Role::User, text));
        self.turn.begin()?;
        self.error = None;
        self.saw_done = false;
        self.stream_error = None;

        tx.send(Action::ChatRequest(ChatRequest {
            message: text.to_string(),
            conversation_id: self.conversation.id.clone(),
            history,
        }))?;

        return Ok(());
    }

    pub fn handle_stream(&mut self, event: ChatEvent) -> Result<()> {
        if !self.turn.stream() {
            tracing::warn!(event = ?event, "Dropping chat event for a settled turn");
            return Ok(());
        }

        match self.conversation.apply(event)? {
            StreamSignal::Continue => {}
            StreamSignal::Done => {
                self.saw_done = true;
            }
            StreamSignal::Failed(message) => {
                tracing::warn!(error = %message, "Chat stream reported an error");
                self.stream_error = Some(message);
            }
        }

        return Ok(());
    }

    /// Called once the stream has been read to the end. A stream that ended
    /// without `done` keeps its partial content but settles as an error.
    pub fn handle_finished(&mut self) {
        if !self.turn.is_busy() {
            return;
        }

        if self.saw_done {
            self.turn.succeed();
            return;
        }

        let message = self
            .stream_error
            .take()
            .unwrap_or_else(|| return "The response ended before it was complete".to_string());
        self.fail_with_apology(&message);
    }

    pub fn handle_failed(&mut self, message: &str) {
        if !self.turn.is_busy() {
            tracing::warn!(error = message, "Dropping failure for a settled turn");
            return;
        }

        self.fail_with_apology(message);
    }

    fn fail_with_apology(&mut self, message: &str) {
        self.conversation.discard_empty_assistant();
        self.conversation.close_open_assistant();
        self.conversation.push(ChatMessage::new_complete(
            Role::Assistant,
            &format!("Sorry, I encountered an error: {message}"),
        ));
        self.error = Some(message.to_string());
        self.turn.fail();
    }

    pub fn clear(&mut self) -> Result<()> {
        if self.turn.is_busy() {
            return Err(ClientError::Busy.into());
        }

        self.error = None;
        self.turn.clear();

        return Ok(());
    }

    /// Drops every message and the server id so the next message starts a new
    /// conversation.
    pub fn new_conversation(&mut self) -> Result<()> {
        self.clear()?;
        self.conversation = Conversation::default();

        return Ok(());
    }
}
