#[cfg(test)]
#[path = "chat_stream_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;
use tokio_util::sync::CancellationToken;

use super::http::cancellable;
use super::http::check_status;
use super::http::convert_err;
use super::http::transport_error;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatBackend;
use crate::domain::models::ChatEvent;
use crate::domain::models::ChatRequest;
use crate::domain::models::ClientError;
use crate::domain::models::Event;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct MessageRequest {
    role: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StreamRequest {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    conversation_id: Option<String>,
    history: Vec<MessageRequest>,
}

pub struct StreamingChat {
    url: String,
    token: String,
}

impl Default for StreamingChat {
    fn default() -> StreamingChat {
        return StreamingChat {
            url: Config::get(ConfigKey::ChatURL),
            token: Config::get(ConfigKey::ChatToken),
        };
    }
}

#[async_trait]
impl ChatBackend for StreamingChat {
    #[allow(clippy::implicit_return)]
    async fn stream_chat<'a>(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()> {
        let req = StreamRequest {
            message: request.message,
            conversation_id: request.conversation_id,
            history: request
                .history
                .iter()
                .map(|(role, content)| {
                    return MessageRequest {
                        role: role.to_string(),
                        content: content.to_string(),
                    };
                })
                .collect(),
        };

        let mut builder = reqwest::Client::new()
            .post(format!("{url}/api/chat/stream", url = self.url))
            .header("Accept", "text/event-stream")
            .json(&req);
        if !self.token.is_empty() {
            builder = builder.bearer_auth(&self.token);
        }

        let res = cancellable(&cancel, async {
            let res = builder
                .send()
                .await
                .map_err(|err| return transport_error(err, None))?;
            return check_status(res).await;
        })
        .await?;

        // Lines are buffered across chunk boundaries by the reader, so a JSON
        // payload split mid-object is parsed once its newline arrives. Lines
        // are split as raw bytes so one undecodable line cannot end the stream.
        let stream = res.bytes_stream().map_err(convert_err);
        let mut lines_reader = StreamReader::new(stream).split(b'\n');

        loop {
            let line = tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    return Err(ClientError::Cancelled.into());
                }
                line = lines_reader.next_segment() => {
                    line.map_err(|err| return ClientError::Network(err.to_string()))?
                }
            };

            let Some(line) = line else {
                tracing::debug!("Chat stream ended without a done event");
                break;
            };

            let line = match String::from_utf8(line) {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!(error = ?err, "Skipping chat stream line that is not valid UTF-8");
                    continue;
                }
            };

            let Some(event) = ChatEvent::parse_line(&line) else {
                continue;
            };

            tracing::debug!(event = ?event, "Chat stream event");
            let done = event == ChatEvent::Done;
            tx.send(Event::ChatStream(event))?;

            if done {
                break;
            }
        }

        return Ok(());
    }
}
