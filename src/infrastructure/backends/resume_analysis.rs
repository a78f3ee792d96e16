#[cfg(test)]
#[path = "resume_analysis_test.rs"]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use tokio_util::sync::CancellationToken;

use super::http::cancellable;
use super::http::check_status;
use super::http::transport_error;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnalysisRequest;
use crate::domain::models::AnalysisResult;
use crate::domain::models::Analyzer;
use crate::domain::models::ClientError;

pub struct ResumeAnalysis {
    url: String,
}

impl Default for ResumeAnalysis {
    fn default() -> ResumeAnalysis {
        return ResumeAnalysis {
            url: Config::get(ConfigKey::AnalysisURL),
        };
    }
}

#[async_trait]
impl Analyzer for ResumeAnalysis {
    #[allow(clippy::implicit_return)]
    async fn analyze(
        &self,
        request: AnalysisRequest,
        cancel: CancellationToken,
    ) -> Result<AnalysisResult> {
        if request.resume.is_empty() {
            return Err(ClientError::MissingField("resume file").into());
        }
        if request.job_description.trim().is_empty() {
            return Err(ClientError::MissingField("job description").into());
        }

        let form = Form::new()
            .part(
                "resume",
                Part::bytes(request.resume).file_name(request.file_name),
            )
            .text("job_description", request.job_description);

        let res = cancellable(&cancel, async {
            let res = reqwest::Client::new()
                .post(format!("{url}/api/analyze", url = self.url))
                .multipart(form)
                .send()
                .await
                .map_err(|err| return transport_error(err, None))?;

            let body = check_status(res)
                .await?
                .json::<AnalysisResult>()
                .await
                .map_err(|err| return transport_error(err, None))?;

            return Ok::<AnalysisResult, anyhow::Error>(body);
        })
        .await?;

        tracing::debug!(body = ?res, "Analysis response");

        return Ok(res);
    }
}
