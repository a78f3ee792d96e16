#[cfg(test)]
#[path = "piston_test.rs"]
mod tests;

use std::time::Duration;
use std::time::Instant;

use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use tokio_util::sync::CancellationToken;

use super::http::cancellable;
use super::http::check_status;
use super::http::transport_error;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ClientError;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::ExecutionResult;
use crate::domain::models::Executor;
use crate::domain::models::Runtime;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ExecuteFile {
    name: String,
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ExecuteRequest {
    language: String,
    version: String,
    files: Vec<ExecuteFile>,
    stdin: String,
    args: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct StageResponse {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    #[serde(default)]
    output: String,
    code: Option<i32>,
    signal: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ExecuteResponse {
    #[serde(default)]
    language: String,
    #[serde(default)]
    version: String,
    run: Option<StageResponse>,
    compile: Option<StageResponse>,
    message: Option<String>,
    error: Option<String>,
}

impl ExecuteRequest {
    fn from_request(request: &ExecutionRequest) -> ExecuteRequest {
        return ExecuteRequest {
            language: request.runtime.to_string(),
            version: request.version.to_string(),
            files: vec![ExecuteFile {
                name: request.file_name.to_string(),
                content: request.source.to_string(),
            }],
            stdin: request.stdin.to_string(),
            args: request.args.clone(),
        };
    }
}

impl ExecuteResponse {
    fn into_result(
        self,
        request: &ExecutionRequest,
        execution_time: Duration,
    ) -> Result<ExecutionResult> {
        let mut language = request.language.to_string();
        if language.is_empty() {
            language = self.language.to_string();
        }
        let mut version = self.version.to_string();
        if version.is_empty() {
            version = request.version.to_string();
        }

        let compile_failed = self
            .compile
            .as_ref()
            .map(|stage| return stage.code.unwrap_or(0) != 0 || stage.signal.is_some())
            .unwrap_or(false);
        let compile_output = self
            .compile
            .as_ref()
            .map(|stage| return stage.output.to_string())
            .filter(|output| return !output.is_empty());

        let stage = match (self.run, self.compile) {
            (Some(run), _) if !compile_failed => run,
            (_, Some(compile)) if compile_failed => compile,
            _ => {
                let detail = self
                    .message
                    .or(self.error)
                    .unwrap_or_else(|| return "No run output was returned".to_string());
                return Err(ClientError::Remote(detail).into());
            }
        };

        return Ok(ExecutionResult {
            language,
            version,
            exit_code: stage.code,
            signal: stage.signal,
            stdout: stage.stdout,
            stderr: stage.stderr,
            compile_output,
            raw_output: stage.output,
            execution_time,
        });
    }
}

pub struct Piston {
    url: String,
    timeout: String,
}

impl Default for Piston {
    fn default() -> Piston {
        return Piston {
            url: Config::get(ConfigKey::ExecutionURL),
            timeout: Config::get(ConfigKey::ExecutionTimeout),
        };
    }
}

impl Piston {
    fn timeout(&self) -> Result<Duration> {
        return Ok(Duration::from_millis(self.timeout.parse::<u64>()?));
    }
}

#[async_trait]
impl Executor for Piston {
    #[allow(clippy::implicit_return)]
    async fn runtimes(&self) -> Result<Vec<Runtime>> {
        let timeout = self.timeout()?;
        let res = reqwest::Client::new()
            .get(format!("{url}/runtimes", url = self.url))
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| return transport_error(err, Some(timeout)))?;

        let mut runtimes = check_status(res)
            .await?
            .json::<Vec<Runtime>>()
            .await
            .map_err(|err| return transport_error(err, Some(timeout)))?;

        runtimes.sort_by(|a, b| return a.language.cmp(&b.language));

        return Ok(runtimes);
    }

    #[allow(clippy::implicit_return)]
    async fn execute(
        &self,
        request: ExecutionRequest,
        cancel: CancellationToken,
    ) -> Result<ExecutionResult> {
        let timeout = self.timeout()?;
        let req = ExecuteRequest::from_request(&request);
        tracing::debug!(
            language = %req.language,
            version = %req.version,
            "Execution request"
        );

        let started = Instant::now();
        let body = cancellable(&cancel, async {
            let res = reqwest::Client::new()
                .post(format!("{url}/execute", url = self.url))
                .timeout(timeout)
                .json(&req)
                .send()
                .await
                .map_err(|err| return transport_error(err, Some(timeout)))?;

            let body = check_status(res)
                .await?
                .json::<ExecuteResponse>()
                .await
                .map_err(|err| return transport_error(err, Some(timeout)))?;

            return Ok::<ExecuteResponse, anyhow::Error>(body);
        })
        .await?;

        tracing::debug!(body = ?body, "Execution response");

        return body.into_result(&request, started.elapsed());
    }
}
