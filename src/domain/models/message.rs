#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub references: Vec<Reference>,
    complete: bool,
}

impl ChatMessage {
    /// User and system messages are complete on creation. Assistant messages
    /// stay open for streamed text until `finish` is called.
    pub fn new(role: Role, content: &str) -> ChatMessage {
        return ChatMessage {
            role,
            content: content.to_string(),
            references: vec![],
            complete: role != Role::Assistant,
        };
    }

    pub fn new_complete(role: Role, content: &str) -> ChatMessage {
        let mut msg = ChatMessage::new(role, content);
        msg.complete = true;
        return msg;
    }

    pub fn is_complete(&self) -> bool {
        return self.complete;
    }

    pub fn is_open_assistant(&self) -> bool {
        return self.role == Role::Assistant && !self.complete;
    }

    pub fn append(&mut self, text: &str) -> Result<()> {
        if self.complete {
            bail!("Cannot append to a completed {} message", self.role);
        }

        self.content += text;
        return Ok(());
    }

    /// References arrive as a complete, ordered set per turn, so they replace
    /// whatever was there before.
    pub fn set_references(&mut self, references: Vec<Reference>) -> Result<()> {
        if self.complete {
            bail!("Cannot update references on a completed {} message", self.role);
        }

        self.references = references;
        return Ok(());
    }

    pub fn finish(&mut self) {
        self.complete = true;
    }
}
