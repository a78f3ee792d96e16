use std::time::Duration;

use thiserror::Error;

/// Failures surfaced to a panel. Validation variants are raised before any
/// network call is made, the rest come back from a transport.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{0} is not a supported language")]
    UnsupportedLanguage(String),
    #[error("A {0} is required")]
    MissingField(&'static str),
    #[error("A request is already in progress, wait for it to finish or cancel it")]
    Busy,
    #[error("Request failed with status {status}: {detail}")]
    Http { status: u16, detail: String },
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),
    #[error("Unable to reach the service: {0}")]
    Network(String),
    #[error("The service returned an error: {0}")]
    Remote(String),
    #[error("Request was cancelled")]
    Cancelled,
}
