#[cfg(test)]
#[path = "execution_test.rs"]
mod tests;

use std::time::Duration;

use chrono::DateTime;
use chrono::Local;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Canonical language name, used for history and display.
    pub language: String,
    /// Execution service language id.
    pub runtime: String,
    pub version: String,
    pub file_name: String,
    pub source: String,
    pub stdin: String,
    pub args: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionResult {
    pub language: String,
    pub version: String,
    /// Missing when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub signal: Option<String>,
    pub stdout: String,
    pub stderr: String,
    pub compile_output: Option<String>,
    pub raw_output: String,
    pub execution_time: Duration,
}

impl ExecutionResult {
    /// A program that ran and exited non-zero is still a result, not an error.
    pub fn succeeded(&self) -> bool {
        return self.exit_code == Some(0) && self.signal.is_none();
    }

    pub fn status_label(&self) -> String {
        if let Some(code) = self.exit_code {
            return code.to_string();
        }
        if let Some(signal) = &self.signal {
            return format!("killed by {signal}");
        }

        return "unknown".to_string();
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub language: String,
    pub result: ExecutionResult,
    pub timestamp: DateTime<Local>,
}

impl HistoryEntry {
    pub fn new(result: ExecutionResult) -> HistoryEntry {
        return HistoryEntry {
            language: result.language.to_string(),
            result,
            timestamp: Local::now(),
        };
    }
}
