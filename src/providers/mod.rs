/// Analysis service providers: the remote HTTP endpoint and the offline fixture
pub mod analysis;
pub mod mock;

use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

use crate::error::AnalysisError;

pub use analysis::{audio_mime_for, HttpAnalysisClient};
pub use mock::MockAnalysisService;

/// A validated submission ready to be sent for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub audio_path: PathBuf,
    pub candidate_name: String,
    pub role: String,
}

impl AnalysisRequest {
    /// File name sent with the upload; falls back to a generic name.
    pub fn file_name(&self) -> String {
        self.audio_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "recording".to_string())
    }
}

/// Something that turns a recording into a raw result payload.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalysisError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}
