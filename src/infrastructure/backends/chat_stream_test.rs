use std::io::Write;

use anyhow::bail;
use anyhow::Result;
use mockito::Matcher;
use serde_json::json;
use test_utils::chat_stream_fixture;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::StreamingChat;
use crate::domain::models::ChatBackend;
use crate::domain::models::ChatEvent;
use crate::domain::models::ChatRequest;
use crate::domain::models::ClientError;
use crate::domain::models::Event;
use crate::domain::models::Role;

impl StreamingChat {
    fn with_url(url: String) -> StreamingChat {
        return StreamingChat {
            url,
            token: "abc".to_string(),
        };
    }
}

fn request() -> ChatRequest {
    return ChatRequest {
        message: "Say hello".to_string(),
        conversation_id: None,
        history: vec![(Role::User, "Hi".to_string()), (Role::Assistant, "Hey".to_string())],
    };
}

fn to_chat_event(event: Option<Event>) -> Result<ChatEvent> {
    let res = match event {
        Some(Event::ChatStream(res)) => res,
        _ => bail!("Wrong type from recv"),
    };

    return Ok(res);
}

fn drain(rx: &mut mpsc::UnboundedReceiver<Event>) -> Result<Vec<ChatEvent>> {
    let mut events = vec![];
    while let Ok(event) = rx.try_recv() {
        events.push(to_chat_event(Some(event))?);
    }

    return Ok(events);
}

#[tokio::test]
async fn it_streams_events() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/stream")
        .match_header("authorization", "Bearer abc")
        .match_body(Matcher::Json(json!({
            "message": "Say hello",
            "history": [
                {"role": "user", "content": "Hi"},
                {"role": "assistant", "content": "Hey"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(chat_stream_fixture())
        .create_async()
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let backend = StreamingChat::with_url(server.url());
    backend
        .stream_chat(request(), CancellationToken::new(), &tx)
        .await?;
    mock.assert_async().await;

    let events = drain(&mut rx)?;
    assert_eq!(events.len(), 6);
    assert_eq!(
        events[0],
        ChatEvent::ConversationId {
            conversation_id: "conv-42".to_string()
        }
    );
    assert_eq!(
        events[1],
        ChatEvent::Text {
            content: "Hel".to_string()
        }
    );
    assert_eq!(
        events[2],
        ChatEvent::Text {
            content: "lo".to_string()
        }
    );
    assert_eq!(events[5], ChatEvent::Done);

    return Ok(());
}

#[tokio::test]
async fn it_buffers_lines_split_across_chunks() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/stream")
        .with_status(200)
        .with_chunked_body(|w| {
            w.write_all(b"data: {\"type\": \"text\", \"con")?;
            w.flush()?;
            w.write_all("tent\": \"H\u{e9}".as_bytes())?;
            w.flush()?;
            w.write_all(b"llo\"}\ndata: {\"type\": \"done\"}\n")?;
            return Ok(());
        })
        .create_async()
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let backend = StreamingChat::with_url(server.url());
    backend
        .stream_chat(request(), CancellationToken::new(), &tx)
        .await?;
    mock.assert_async().await;

    let events = drain(&mut rx)?;
    assert_eq!(
        events,
        vec![
            ChatEvent::Text {
                content: "H\u{e9}llo".to_string()
            },
            ChatEvent::Done
        ]
    );

    return Ok(());
}

#[tokio::test]
async fn it_skips_invalid_utf8_lines() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/stream")
        .with_status(200)
        .with_chunked_body(|w| {
            w.write_all(b"data: {\"type\": \"text\", \"content\": \"Hi\"}\n")?;
            w.flush()?;
            w.write_all(b"data: \xff\xfe garbage\n")?;
            w.flush()?;
            w.write_all(b"data: {\"type\": \"text\", \"content\": \" there\"}\n")?;
            w.write_all(b"data: {\"type\": \"done\"}\n")?;
            return Ok(());
        })
        .create_async()
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let backend = StreamingChat::with_url(server.url());
    backend
        .stream_chat(request(), CancellationToken::new(), &tx)
        .await?;
    mock.assert_async().await;

    let events = drain(&mut rx)?;
    assert_eq!(
        events,
        vec![
            ChatEvent::Text {
                content: "Hi".to_string()
            },
            ChatEvent::Text {
                content: " there".to_string()
            },
            ChatEvent::Done
        ]
    );

    return Ok(());
}

#[tokio::test]
async fn it_stops_reading_after_done() -> Result<()> {
    let body = [
        r#"data: {"type": "text", "content": "Hi"}"#,
        r#"data: {"type": "done"}"#,
        r#"data: {"type": "text", "content": "ignored"}"#,
    ]
    .join("\n");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/stream")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let backend = StreamingChat::with_url(server.url());
    backend
        .stream_chat(request(), CancellationToken::new(), &tx)
        .await?;
    mock.assert_async().await;

    let events = drain(&mut rx)?;
    assert_eq!(events.len(), 2);
    assert_eq!(events[1], ChatEvent::Done);

    return Ok(());
}

#[tokio::test]
async fn it_forwards_errors_and_keeps_reading() -> Result<()> {
    let body = [
        r#"data: {"type": "text", "content": "Part"}"#,
        r#"data: {"type": "error", "error": "upstream hiccup"}"#,
        r#"data: {not json}"#,
        r#"data: {"type": "text", "content": "ial"}"#,
    ]
    .join("\n");

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/stream")
        .with_status(200)
        .with_body(body)
        .create_async()
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let backend = StreamingChat::with_url(server.url());
    backend
        .stream_chat(request(), CancellationToken::new(), &tx)
        .await?;
    mock.assert_async().await;

    let events = drain(&mut rx)?;
    assert_eq!(events.len(), 3);
    assert_eq!(
        events[1],
        ChatEvent::Error {
            error: "upstream hiccup".to_string()
        }
    );
    assert_eq!(
        events[2],
        ChatEvent::Text {
            content: "ial".to_string()
        }
    );

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_http_errors() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/stream")
        .with_status(401)
        .with_body(r#"{"detail": "invalid token"}"#)
        .create_async()
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel::<Event>();
    let backend = StreamingChat::with_url(server.url());
    let err = backend
        .stream_chat(request(), CancellationToken::new(), &tx)
        .await
        .unwrap_err();
    mock.assert_async().await;

    assert_eq!(
        err.downcast_ref::<ClientError>(),
        Some(&ClientError::Http {
            status: 401,
            detail: "invalid token".to_string()
        })
    );
    assert!(rx.try_recv().is_err());

    return Ok(());
}

#[tokio::test]
async fn it_stops_when_cancelled() -> Result<()> {
    let server = mockito::Server::new_async().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let (tx, _rx) = mpsc::unbounded_channel::<Event>();
    let backend = StreamingChat::with_url(server.url());
    let err = backend.stream_chat(request(), cancel, &tx).await.unwrap_err();

    assert_eq!(
        err.downcast_ref::<ClientError>(),
        Some(&ClientError::Cancelled)
    );

    return Ok(());
}
