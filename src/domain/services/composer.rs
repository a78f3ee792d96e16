#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::ClientError;
use crate::domain::models::ExecutionRequest;
use crate::domain::models::Languages;

pub struct RequestComposer {}

impl RequestComposer {
    /// Builds an execution payload from a language name or alias. Fails
    /// before any network call when the language is unknown or there is no
    /// source to run.
    pub fn compose(
        language: &str,
        source: &str,
        stdin: &str,
        args: &[String],
    ) -> Result<ExecutionRequest> {
        let Some(lang) = Languages::resolve(language) else {
            return Err(ClientError::UnsupportedLanguage(language.trim().to_string()).into());
        };

        if source.trim().is_empty() {
            return Err(ClientError::MissingField("source").into());
        }

        return Ok(ExecutionRequest {
            language: lang.name.to_string(),
            runtime: lang.runtime.to_string(),
            version: lang.version.to_string(),
            file_name: lang.file_name(),
            source: source.to_string(),
            stdin: stdin.to_string(),
            args: args.to_vec(),
        });
    }
}
