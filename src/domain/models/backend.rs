use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use super::AnalysisRequest;
use super::AnalysisResult;
use super::Event;
use super::ExecutionRequest;
use super::ExecutionResult;
use super::Role;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
    pub conversation_id: Option<String>,
    pub history: Vec<(Role, String)>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Runtime {
    pub language: String,
    pub version: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[async_trait]
pub trait Executor {
    /// Lists the runtimes the execution service has installed.
    async fn runtimes(&self) -> Result<Vec<Runtime>>;

    /// Runs a request to completion. A program exiting non-zero is a
    /// successful call; only transport failures and explicit service errors
    /// are returned as errors.
    async fn execute(
        &self,
        request: ExecutionRequest,
        cancel: CancellationToken,
    ) -> Result<ExecutionResult>;
}

#[async_trait]
pub trait ChatBackend {
    /// Streams a chat turn. Every parsed event is forwarded through the
    /// channel as it arrives. Returns once the server signals `done`, the body
    /// ends, or the token is cancelled.
    async fn stream_chat<'a>(
        &self,
        request: ChatRequest,
        cancel: CancellationToken,
        tx: &'a mpsc::UnboundedSender<Event>,
    ) -> Result<()>;
}

#[async_trait]
pub trait Analyzer {
    async fn analyze(
        &self,
        request: AnalysisRequest,
        cancel: CancellationToken,
    ) -> Result<AnalysisResult>;
}

pub type ExecutorBox = Arc<dyn Executor + Send + Sync>;
pub type ChatBackendBox = Arc<dyn ChatBackend + Send + Sync>;
pub type AnalyzerBox = Arc<dyn Analyzer + Send + Sync>;
