use std::path::PathBuf;
use thiserror::Error;

/// Failures talking to the analysis service. All of them leave the session
/// store untouched and may be retried by the user.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read audio file {path}: {source}")]
    AudioRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("analysis request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analysis service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("analysis service returned an unreadable body: {0}")]
    InvalidBody(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize result: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("Missing Information: please fill in all fields and upload an audio file (missing: {})", .0.join(", "))]
    MissingInformation(Vec<&'static str>),

    #[error("an interview is already being processed")]
    AlreadyPending,

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SubmissionError {
    /// Whether the user can simply fix the input or try again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SubmissionError::Store(_))
    }
}
