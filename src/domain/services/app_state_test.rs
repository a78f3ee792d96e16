use std::env;
use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use tokio::fs;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::AppState;
use super::Notice;
use crate::domain::models::Action;
use crate::domain::models::ChatEvent;
use crate::domain::models::Event;
use crate::domain::models::ExecutionResult;
use crate::domain::models::Panel;
use crate::domain::models::Preferences;
use crate::domain::models::Reference;
use crate::domain::models::TurnStatus;

impl Default for AppState {
    fn default() -> AppState {
        return AppState::new("python", Preferences::default());
    }
}

fn reference(title: &str) -> Reference {
    return Reference {
        title: title.to_string(),
        url: format!("https://example.com/{title}"),
        kind: None,
    };
}

fn failed_run() -> ExecutionResult {
    return ExecutionResult {
        language: "python".to_string(),
        version: "3.10.0".to_string(),
        exit_code: Some(1),
        signal: None,
        stdout: "".to_string(),
        stderr: "ValueError: nope\n".to_string(),
        compile_output: None,
        raw_output: "ValueError: nope\n".to_string(),
        execution_time: Duration::from_millis(40),
    };
}

mod handle_event {
    use super::*;

    #[tokio::test]
    async fn it_joins_streamed_text() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.handle_input("Say hello", &tx).await?;

        for content in ["Hel", "lo"] {
            app_state.handle_event(Event::ChatStream(ChatEvent::Text {
                content: content.to_string(),
            }));
        }
        app_state.handle_event(Event::ChatStream(ChatEvent::Done));
        app_state.handle_event(Event::ChatFinished());

        assert_eq!(app_state.chat.conversation.last().unwrap().content, "Hello");
        assert_eq!(app_state.chat.status(), TurnStatus::Success);

        return Ok(());
    }

    #[tokio::test]
    async fn it_keeps_only_the_latest_references() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.handle_input("Sources?", &tx).await?;

        app_state.handle_event(Event::ChatStream(ChatEvent::References {
            references: vec![reference("first"), reference("second")],
        }));
        app_state.handle_event(Event::ChatStream(ChatEvent::References {
            references: vec![reference("third")],
        }));

        let last = app_state.chat.conversation.last().unwrap();
        assert_eq!(last.references, vec![reference("third")]);

        return Ok(());
    }

    #[tokio::test]
    async fn it_clears_output_on_http_errors() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.execution.source = "print(1)".to_string();

        app_state.handle_input("/run", &tx).await?;
        app_state.handle_event(Event::ExecutionCompleted(failed_run()));
        assert!(app_state.execution.output.is_some());

        app_state.handle_input("/run", &tx).await?;
        app_state.handle_event(Event::ExecutionFailed(
            "Request failed with status 500: boom".to_string(),
        ));

        assert!(app_state.execution.output.is_none());
        assert!(app_state.execution.error.as_ref().unwrap().contains("boom"));
        assert_eq!(app_state.execution.status(), TurnStatus::Error);

        return Ok(());
    }

    #[tokio::test]
    async fn it_treats_non_zero_exits_as_results() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.execution.source = "raise ValueError('nope')".to_string();

        app_state.handle_input("/run", &tx).await?;
        app_state.handle_event(Event::ExecutionCompleted(failed_run()));

        let output = app_state.execution.output.as_ref().unwrap();
        assert_eq!(output.exit_code, Some(1));
        assert!(output.stderr.contains("ValueError"));
        assert!(app_state.execution.error.is_none());
        assert_eq!(app_state.execution.status(), TurnStatus::Success);
        assert_eq!(app_state.execution.history.iter().count(), 1);

        return Ok(());
    }

    #[test]
    fn it_queues_backend_notices() {
        let mut app_state = AppState::default();
        app_state.handle_event(Event::Notice("- python 3.10.0".to_string()));

        assert_eq!(
            app_state.take_notices(),
            vec![Notice::Info("- python 3.10.0".to_string())]
        );
        assert!(app_state.take_notices().is_empty());
    }
}

mod handle_input {
    use super::*;

    #[tokio::test]
    async fn it_breaks_on_quit() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        assert!(app_state.handle_input("/q", &tx).await?);
        assert!(app_state.handle_input("/exit", &tx).await?);

        return Ok(());
    }

    #[tokio::test]
    async fn it_sends_plain_text_to_chat() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        assert!(!app_state.handle_input("What is a borrow?", &tx).await?);

        match rx.try_recv()? {
            Action::ChatRequest(req) => {
                assert_eq!(req.message, "What is a borrow?");
            }
            _ => bail!("Wrong action"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_rejects_a_second_message_while_streaming() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_input("First", &tx).await?;
        app_state.handle_event(Event::ChatStream(ChatEvent::Text {
            content: "Partial".to_string(),
        }));
        app_state.handle_input("Second", &tx).await?;

        rx.try_recv()?;
        assert!(rx.try_recv().is_err());
        match app_state.take_notices().as_slice() {
            [Notice::Error(msg)] => assert!(msg.contains("already in progress")),
            notices => bail!("Unexpected notices {notices:?}"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_sends_the_resolved_language() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.execution.source = "print(1)".to_string();

        app_state.handle_input("/lang py", &tx).await?;
        app_state.handle_input("/run", &tx).await?;

        match rx.try_recv()? {
            Action::ExecutionRequest(req) => {
                assert_eq!(req.runtime, "python");
                assert_eq!(req.version, "3.10.0");
            }
            _ => bail!("Wrong action"),
        }

        return Ok(());
    }

    #[tokio::test]
    async fn it_rejects_unknown_languages() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_input("/lang cobol", &tx).await?;

        assert_eq!(app_state.execution.language, "python");
        assert_eq!(
            app_state.take_notices(),
            vec![Notice::Error(
                "cobol is not a supported language. Run /languages to list them.".to_string()
            )]
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_sets_stdin_and_args() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_input("/stdin 3\\n4", &tx).await?;
        app_state.handle_input("/args --fast  7", &tx).await?;

        assert_eq!(app_state.execution.stdin, "3\n4");
        assert_eq!(
            app_state.execution.args,
            vec!["--fast".to_string(), "7".to_string()]
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_cancels_busy_panels() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.execution.source = "print(1)".to_string();

        app_state.handle_input("/run", &tx).await?;
        rx.try_recv()?;
        app_state.handle_input("/cancel", &tx).await?;

        match rx.try_recv()? {
            Action::Cancel(panel) => assert_eq!(panel, Panel::Execution),
            _ => bail!("Wrong action"),
        }
        assert!(rx.try_recv().is_err());

        return Ok(());
    }

    #[tokio::test]
    async fn it_lists_runtimes_through_the_backend() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_input("/runtimes", &tx).await?;

        assert!(matches!(rx.try_recv()?, Action::ListRuntimes()));

        return Ok(());
    }

    #[tokio::test]
    async fn it_reports_unknown_commands() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_input("/frobnicate now", &tx).await?;

        assert!(rx.try_recv().is_err());
        assert_eq!(
            app_state.take_notices(),
            vec![Notice::Error(
                "Unknown command /frobnicate. Run /help to list commands.".to_string()
            )]
        );

        return Ok(());
    }

    #[tokio::test]
    async fn it_loads_and_reopens_files() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let dir = env::temp_dir().join(format!("codedeck-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).await?;
        let file_path = dir.join("hello.rb");
        fs::write(&file_path, "puts 'hi'\n").await?;

        let mut app_state = AppState::default();
        app_state
            .handle_input(&format!("/load {}", file_path.display()), &tx)
            .await?;

        assert_eq!(app_state.execution.language, "ruby");
        assert_eq!(app_state.execution.source, "puts 'hi'\n");
        assert!(app_state.preferences_changed);
        assert_eq!(app_state.preferences.active_file().unwrap().name, "hello.rb");

        app_state.execution.source = "".to_string();
        app_state.execution.language = "python".to_string();
        app_state.handle_input("/open hello.rb", &tx).await?;

        assert_eq!(app_state.execution.language, "ruby");
        assert_eq!(app_state.execution.source, "puts 'hi'\n");

        fs::remove_dir_all(dir).await?;
        return Ok(());
    }

    #[tokio::test]
    async fn it_keeps_loaded_files_apart_by_path() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let dir = env::temp_dir().join(format!("codedeck-{}", Uuid::new_v4()));
        fs::create_dir_all(dir.join("a")).await?;
        fs::create_dir_all(dir.join("b")).await?;
        let first = dir.join("a").join("main.py");
        let second = dir.join("b").join("main.py");
        fs::write(&first, "print('a')\n").await?;
        fs::write(&second, "print('b')\n").await?;

        let mut app_state = AppState::default();
        app_state
            .handle_input(&format!("/load {}", first.display()), &tx)
            .await?;
        app_state
            .handle_input(&format!("/load {}", second.display()), &tx)
            .await?;

        assert_eq!(app_state.preferences.files.len(), 2);
        assert_eq!(app_state.preferences.files[0].content, "print('a')\n");

        app_state
            .handle_input(&format!("/open {}", first.display()), &tx)
            .await?;
        assert_eq!(app_state.execution.source, "print('a')\n");

        fs::remove_dir_all(dir).await?;
        return Ok(());
    }

    #[tokio::test]
    async fn it_keeps_stdin_spacing() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_input("/stdin a    b\\n  c", &tx).await?;

        assert_eq!(app_state.execution.stdin, "a    b\n  c");

        return Ok(());
    }

    #[tokio::test]
    async fn it_validates_theme_and_font() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();

        app_state.handle_input("/theme hc-black", &tx).await?;
        app_state.handle_input("/font 18", &tx).await?;
        assert_eq!(app_state.preferences.theme, "hc-black");
        assert_eq!(app_state.preferences.font_size, 18);
        app_state.take_notices();

        app_state.handle_input("/theme neon", &tx).await?;
        app_state.handle_input("/font 400", &tx).await?;
        assert_eq!(app_state.preferences.theme, "hc-black");
        assert_eq!(app_state.preferences.font_size, 18);
        assert_eq!(app_state.take_notices().len(), 2);

        return Ok(());
    }

    #[tokio::test]
    async fn it_clears_settled_panels() -> Result<()> {
        let (tx, _rx) = mpsc::unbounded_channel::<Action>();
        let mut app_state = AppState::default();
        app_state.execution.source = "print(1)".to_string();

        app_state.handle_input("/run", &tx).await?;
        app_state.handle_event(Event::ExecutionFailed("Request was cancelled".to_string()));
        app_state.handle_input("/clear", &tx).await?;

        assert_eq!(app_state.execution.status(), TurnStatus::Idle);
        assert!(app_state.execution.error.is_none());

        return Ok(());
    }
}

#[test]
fn it_restores_the_active_file() {
    let mut preferences = Preferences::default();
    preferences.upsert_file("main.go", "go", "package main\n");

    let app_state = AppState::new("python", preferences);

    assert_eq!(app_state.execution.language, "go");
    assert_eq!(app_state.execution.source, "package main\n");
}
