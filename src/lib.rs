//! Interview review client.
//!
//! Submits interview recordings to a remote analysis service, keeps the
//! returned result for the session, and turns it (current or legacy payload
//! shape) into a normalized report with risk bands.

/// Safely truncate a UTF-8 string to a maximum number of characters
pub fn truncate_utf8_safe(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Session-scoped result storage
pub mod cache;

/// Runtime configuration from env and JSON file
pub mod config;

pub mod error;

/// Tracing subscriber setup for binaries
pub mod logging;

/// Report text and status messages
pub mod messages;

/// Analysis service providers (HTTP and mock)
pub mod providers;

pub mod report;

/// Payload decoding and normalization
pub mod result;

pub mod risk;

pub mod rotator;

pub mod submission;

pub mod view;

// Re-export commonly used types for convenience
pub use cache::SessionStore;
pub use config::Config;
pub use error::{AnalysisError, StoreError, SubmissionError};
pub use providers::{AnalysisRequest, AnalysisService, HttpAnalysisClient, MockAnalysisService};
pub use result::{normalize, normalize_value, NormalizedQuestion, NormalizedResult, RawResult};
pub use risk::{classify, RiskBand};
pub use rotator::{spawn_rotation, MessageRotator, RotationHandle, RotatorFrame};
pub use submission::{SubmissionForm, SubmissionReceipt, Submitter};
pub use view::{QuestionView, ResultsView};
