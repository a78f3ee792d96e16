#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::domain::models::ClientError;

const DETAIL_FIELDS: [&str; 3] = ["detail", "message", "error"];

pub fn convert_err(err: reqwest::Error) -> std::io::Error {
    let err_msg = err.to_string();
    return std::io::Error::new(std::io::ErrorKind::Interrupted, err_msg);
}

pub fn transport_error(err: reqwest::Error, timeout: Option<Duration>) -> ClientError {
    if err.is_timeout() {
        return ClientError::Timeout(timeout.unwrap_or_default());
    }

    return ClientError::Network(err.to_string());
}

/// Pulls a human readable detail out of an error body. Known string fields
/// win, otherwise the body is returned verbatim.
pub fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(trimmed) {
        for field in DETAIL_FIELDS {
            if let Some(Value::String(detail)) = obj.get(field) {
                return detail.to_string();
            }
        }
    }

    return trimmed.to_string();
}

/// Turns non-2xx responses into `ClientError::Http`, keeping the server's
/// detail.
pub async fn check_status(res: reqwest::Response) -> Result<reqwest::Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let body = res.text().await.unwrap_or_default();
    tracing::error!(status = status.as_u16(), body = %body, "Request failed");

    return Err(ClientError::Http {
        status: status.as_u16(),
        detail: error_detail(&body),
    }
    .into());
}

/// Runs a future unless the token is cancelled first.
pub async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    tokio::select! {
        biased;

        _ = cancel.cancelled() => {
            return Err(ClientError::Cancelled.into());
        }
        res = fut => {
            return res;
        }
    }
}
