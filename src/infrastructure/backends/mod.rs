mod chat_stream;
mod http;
mod piston;
mod resume_analysis;

use std::sync::Arc;

pub use chat_stream::*;
pub use piston::*;
pub use resume_analysis::*;

use crate::domain::models::AnalyzerBox;
use crate::domain::models::ChatBackendBox;
use crate::domain::models::ExecutorBox;

pub struct Backends {
    pub executor: ExecutorBox,
    pub chat: ChatBackendBox,
    pub analyzer: AnalyzerBox,
}

pub struct BackendManager {}

impl BackendManager {
    /// Builds the remote clients from the loaded configuration.
    pub fn get() -> Backends {
        return Backends {
            executor: Arc::<Piston>::default(),
            chat: Arc::<StreamingChat>::default(),
            analyzer: Arc::<ResumeAnalysis>::default(),
        };
    }
}
