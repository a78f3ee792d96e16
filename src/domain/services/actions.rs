#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::domain::models::Action;
use crate::domain::models::ChatRequest;
use crate::domain::models::Event;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::Panel;
use crate::infrastructure::backends::Backends;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /lang (/l) [LANGUAGE] - Sets the language used by /run. Accepts names and aliases such as py, js or c++.
- /languages (/ll) - Lists the supported languages and their runtime versions.
- /runtimes - Lists the runtimes installed on the execution service.
- /load [PATH] - Loads a source file to run. The language is picked from the file extension.
- /files (/f) - Lists the saved editor files.
- /open (/o) [FILE_ID,FILE_NAME] - Opens a saved editor file.
- /stdin [TEXT] - Sets the stdin passed to the program. Use \n for new lines.
- /args [ARGS...] - Sets the arguments passed to the program.
- /run (/r) - Runs the loaded source.
- /history (/hi) - Shows the most recent runs, newest first.
- /cancel (/x) - Cancels in progress requests.
- /clear (/c) - Clears output and errors from both panels.
- /new (/n) - Starts a new chat conversation.
- /theme [NAME] - Sets the saved editor theme.
- /font [SIZE] - Sets the saved editor font size.
- /quit /exit (/q) - Exit codedeck.
- /help (/h) - Provides this help menu.

Anything that is not a command is sent to the chat assistant.
        "#;

    return text.trim().to_string();
}

fn run_execution(
    backends: &Backends,
    tx: &mpsc::UnboundedSender<Event>,
    request: ExecutionRequest,
    cancel: CancellationToken,
) {
    let executor = backends.executor.clone();
    let worker_tx = tx.clone();

    tokio::spawn(async move {
        let event = match executor.execute(request, cancel).await {
            Ok(res) => Event::ExecutionCompleted(res),
            Err(err) => {
                tracing::error!(error = ?err, "Execution request failed");
                Event::ExecutionFailed(err.to_string())
            }
        };

        return worker_tx.send(event);
    });
}

fn run_chat(
    backends: &Backends,
    tx: &mpsc::UnboundedSender<Event>,
    request: ChatRequest,
    cancel: CancellationToken,
) {
    let chat = backends.chat.clone();
    let worker_tx = tx.clone();

    tokio::spawn(async move {
        let event = match chat.stream_chat(request, cancel, &worker_tx).await {
            Ok(_) => Event::ChatFinished(),
            Err(err) => {
                tracing::error!(error = ?err, "Chat request failed");
                Event::ChatFailed(err.to_string())
            }
        };

        return worker_tx.send(event);
    });
}

fn list_runtimes(backends: &Backends, tx: &mpsc::UnboundedSender<Event>) {
    let executor = backends.executor.clone();
    let worker_tx = tx.clone();

    tokio::spawn(async move {
        let text = match executor.runtimes().await {
            Ok(runtimes) => runtimes
                .iter()
                .map(|runtime| {
                    return format!("- {} {}", runtime.language, runtime.version);
                })
                .collect::<Vec<String>>()
                .join("\n"),
            Err(err) => format!("Unable to list runtimes: {err}"),
        };

        return worker_tx.send(Event::Notice(text));
    });
}

pub struct ActionsService {}

impl ActionsService {
    /// Serves actions until the UI drops its sender. Each submission runs on
    /// its own worker so a slow stream never blocks a cancel.
    pub async fn start(
        backends: Backends,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        let mut execution_cancel = CancellationToken::new();
        let mut chat_cancel = CancellationToken::new();

        while let Some(action) = rx.recv().await {
            match action {
                Action::Cancel(panel) => {
                    tracing::debug!(panel = %panel, "Cancelling request");
                    match panel {
                        Panel::Execution => execution_cancel.cancel(),
                        Panel::Chat => chat_cancel.cancel(),
                    }
                }
                Action::ExecutionRequest(request) => {
                    execution_cancel = CancellationToken::new();
                    run_execution(&backends, &tx, request, execution_cancel.clone());
                }
                Action::ChatRequest(request) => {
                    chat_cancel = CancellationToken::new();
                    run_chat(&backends, &tx, request, chat_cancel.clone());
                }
                Action::ListRuntimes() => {
                    list_runtimes(&backends, &tx);
                }
            }
        }

        return Ok(());
    }
}
