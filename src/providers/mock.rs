// Offline analysis service backed by a recorded fixture
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::time::Duration;

use super::{AnalysisRequest, AnalysisService};
use crate::error::AnalysisError;

static FIXTURE: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("fixtures/harry.json"))
        .unwrap_or_else(|_| Value::Object(Map::new()))
});

/// The recorded current-variant payload used by the mock path.
pub fn fixture() -> &'static Value {
    &FIXTURE
}

/// Returns the fixture after a simulated processing delay. The submitted
/// candidate name and role replace the fixture's own.
pub struct MockAnalysisService {
    delay: Duration,
}

impl MockAnalysisService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for MockAnalysisService {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        // Same precondition as the HTTP path: the recording must be readable
        tokio::fs::metadata(&request.audio_path)
            .await
            .map_err(|source| AnalysisError::AudioRead {
                path: request.audio_path.clone(),
                source,
            })?;

        tracing::info!(delay_ms = self.delay.as_millis() as u64, "mock analysis in progress");
        tokio::time::sleep(self.delay).await;

        let mut value = fixture().clone();
        if let Value::Object(map) = &mut value {
            map.insert("candidate".into(), json!(request.candidate_name));
            map.insert("role".into(), json!(request.role));
        }
        Ok(value)
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
