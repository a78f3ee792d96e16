use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Clone, Debug)]
pub struct AnalysisRequest {
    pub file_name: String,
    pub resume: Vec<u8>,
    pub job_description: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default)]
    pub ats_score: f64,
    #[serde(default)]
    pub readiness_score: f64,
    #[serde(default)]
    pub match_percentage: f64,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}
