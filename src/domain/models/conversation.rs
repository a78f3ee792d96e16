#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use anyhow::Result;

use super::ChatEvent;
use super::ChatMessage;
use super::Role;

/// What a streamed event means for the turn that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StreamSignal {
    Continue,
    Done,
    Failed(String),
}

#[derive(Clone, Debug, Default)]
pub struct Conversation {
    /// Assigned by the server on the first streamed response. `None` means the
    /// conversation has not been saved yet.
    pub id: Option<String>,
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        return self.messages.last();
    }

    /// Returns the assistant message currently receiving streamed content,
    /// opening a new one when none is in progress.
    fn open_assistant(&mut self) -> &mut ChatMessage {
        let is_open = self
            .messages
            .last()
            .map(|msg| return msg.is_open_assistant())
            .unwrap_or(false);

        if !is_open {
            self.messages.push(ChatMessage::new(Role::Assistant, ""));
        }

        let last_idx = self.messages.len() - 1;
        return &mut self.messages[last_idx];
    }

    /// Marks any in-progress assistant message as complete. Returns whether
    /// one was open.
    pub fn close_open_assistant(&mut self) -> bool {
        if let Some(msg) = self.messages.last_mut() {
            if msg.is_open_assistant() {
                msg.finish();
                return true;
            }
        }

        return false;
    }

    /// Removes a trailing assistant message that never received any content.
    pub fn discard_empty_assistant(&mut self) {
        let is_empty_open = self
            .messages
            .last()
            .map(|msg| {
                return msg.is_open_assistant()
                    && msg.content.is_empty()
                    && msg.references.is_empty();
            })
            .unwrap_or(false);

        if is_empty_open {
            self.messages.pop();
        }
    }

    /// Prior turns in wire order, excluding the message currently being sent.
    pub fn history(&self) -> Vec<(Role, String)> {
        let mut messages = self
            .messages
            .iter()
            .filter(|msg| return msg.is_complete() && !msg.content.is_empty())
            .map(|msg| return (msg.role, msg.content.to_string()))
            .collect::<Vec<(Role, String)>>();

        if let Some((Role::User, _)) = messages.last() {
            messages.pop();
        }

        return messages;
    }

    pub fn apply(&mut self, event: ChatEvent) -> Result<StreamSignal> {
        match event {
            ChatEvent::ConversationId { conversation_id } => {
                self.id = Some(conversation_id);
            }
            ChatEvent::Text { content } => {
                self.open_assistant().append(&content)?;
            }
            ChatEvent::References { references } => {
                self.open_assistant().set_references(references)?;
            }
            ChatEvent::Done => {
                self.close_open_assistant();
                return Ok(StreamSignal::Done);
            }
            ChatEvent::Error { error } => {
                return Ok(StreamSignal::Failed(error));
            }
            ChatEvent::Unknown => {}
        }

        return Ok(StreamSignal::Continue);
    }
}
