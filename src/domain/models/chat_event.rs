#[cfg(test)]
#[path = "chat_event_test.rs"]
mod tests;

use serde_derive::Deserialize;

use super::Reference;

const DATA_PREFIX: &str = "data:";

/// One framed event from the streaming chat endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    ConversationId {
        conversation_id: String,
    },
    Text {
        #[serde(alias = "delta")]
        content: String,
    },
    References {
        #[serde(default)]
        references: Vec<Reference>,
    },
    Done,
    Error {
        #[serde(default, alias = "message", alias = "detail")]
        error: String,
    },
    #[serde(other)]
    Unknown,
}

impl ChatEvent {
    /// Parses a single complete line of the stream. Lines without the `data:`
    /// prefix, blank payloads, malformed JSON and unknown event types yield
    /// `None`.
    pub fn parse_line(line: &str) -> Option<ChatEvent> {
        let payload = line.trim().strip_prefix(DATA_PREFIX)?.trim();
        if payload.is_empty() {
            return None;
        }

        match serde_json::from_str::<ChatEvent>(payload) {
            Ok(ChatEvent::Unknown) => {
                tracing::warn!(line = payload, "Skipping unknown chat event type");
                return None;
            }
            Ok(event) => {
                return Some(event);
            }
            Err(err) => {
                tracing::warn!(error = ?err, line = payload, "Skipping malformed chat event");
                return None;
            }
        }
    }
}
