//! Submission flow: validate the form, run the analysis call with the status
//! rotator alongside it, and persist the result only on success.
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::cache::SessionStore;
use crate::error::SubmissionError;
use crate::providers::{AnalysisRequest, AnalysisService};
use crate::rotator::{spawn_rotation, MessageRotator, RotatorFrame, DEFAULT_FADE, DEFAULT_INTERVAL};

/// Fields the reviewer fills in before analysis.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub audio_file: Option<PathBuf>,
    pub candidate_name: String,
    pub role: String,
}

impl SubmissionForm {
    /// Every field is required; names and roles are trimmed.
    pub fn validate(&self) -> Result<AnalysisRequest, SubmissionError> {
        let mut missing = Vec::new();
        if self.audio_file.is_none() {
            missing.push("audio file");
        }
        if self.candidate_name.trim().is_empty() {
            missing.push("candidate name");
        }
        if self.role.trim().is_empty() {
            missing.push("role");
        }
        match &self.audio_file {
            Some(path) if missing.is_empty() => Ok(AnalysisRequest {
                audio_path: path.clone(),
                candidate_name: self.candidate_name.trim().to_string(),
                role: self.role.trim().to_string(),
            }),
            _ => Err(SubmissionError::MissingInformation(missing)),
        }
    }
}

/// Where a successful submission left its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub stored_at: PathBuf,
    pub processed_at: String,
}

/// Runs one submission at a time against an analysis service.
pub struct Submitter {
    service: Arc<dyn AnalysisService>,
    store: SessionStore,
    interval: Duration,
    fade: Duration,
    pending: AtomicBool,
}

// Clears the pending flag however the submission ends
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Submitter {
    pub fn new(service: Arc<dyn AnalysisService>, store: SessionStore) -> Self {
        Self {
            service,
            store,
            interval: DEFAULT_INTERVAL,
            fade: DEFAULT_FADE,
            pending: AtomicBool::new(false),
        }
    }

    pub fn with_rotation(mut self, interval: Duration, fade: Duration) -> Self {
        self.interval = interval;
        self.fade = fade;
        self
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Submit `form`. Status frames go to `on_frame` while the call is
    /// outstanding; rotation is always cancelled before this returns.
    pub async fn submit<F>(&self, form: &SubmissionForm, on_frame: F) -> Result<SubmissionReceipt, SubmissionError>
    where
        F: FnMut(RotatorFrame) + Send + 'static,
    {
        let request = form.validate()?;
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(SubmissionError::AlreadyPending);
        }
        let _guard = PendingGuard(&self.pending);

        tracing::info!(
            candidate = %request.candidate_name,
            role = %request.role,
            service = self.service.name(),
            "submitting interview for analysis"
        );

        let rotation = spawn_rotation(MessageRotator::with_timing(self.interval, self.fade), on_frame);
        let outcome = self.service.analyze(&request).await;
        rotation.stop().await;

        let mut raw = match outcome {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "analysis failed; nothing stored");
                return Err(e.into());
            }
        };

        let processed_at = chrono::Utc::now().to_rfc3339();
        stamp_metadata(&mut raw, &request.file_name(), &processed_at);
        let stored_at = self.store.save_result(&raw)?;
        tracing::info!(path = %stored_at.display(), "analysis result stored");

        Ok(SubmissionReceipt {
            stored_at,
            processed_at,
        })
    }
}

fn stamp_metadata(raw: &mut Value, file_name: &str, processed_at: &str) {
    if let Value::Object(map) = raw {
        map.insert("fileName".into(), json!(file_name));
        map.insert("processedAt".into(), json!(processed_at));
    }
}
