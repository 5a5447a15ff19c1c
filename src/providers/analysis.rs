//! HTTP client for the remote interview analysis service
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;

use super::{AnalysisRequest, AnalysisService};
use crate::config::Config;
use crate::error::AnalysisError;

// Error bodies are echoed to the user; keep them short
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Posts recordings as multipart form data and returns the JSON result.
pub struct HttpAnalysisClient {
    client: Client,
    endpoint: String,
}

impl HttpAnalysisClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<Value, AnalysisError> {
        let audio_read = |source: std::io::Error| AnalysisError::AudioRead {
            path: request.audio_path.clone(),
            source,
        };
        let file = File::open(&request.audio_path).await.map_err(audio_read)?;
        let size = file.metadata().await.map_err(audio_read)?.len();

        // Streamed from disk, never buffered whole
        let audio = Part::stream_with_length(Body::from(file), size)
            .file_name(request.file_name())
            .mime_str(audio_mime_for(&request.audio_path))?;
        let form = Form::new()
            .part("audio_file", audio)
            .text("candidate_name", request.candidate_name.clone())
            .text("role", request.role.clone());

        tracing::info!(endpoint = %self.endpoint, bytes = size, "uploading recording for analysis");
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                body: crate::truncate_utf8_safe(body.trim(), MAX_ERROR_BODY_CHARS),
            });
        }

        let text = response.text().await?;
        match serde_json::from_str::<Value>(&text) {
            Ok(value @ Value::Object(_)) => Ok(value),
            Ok(_) => Err(AnalysisError::InvalidBody("expected a JSON object".to_string())),
            Err(e) => Err(AnalysisError::InvalidBody(e.to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// MIME type for an audio upload, from the file extension.
pub fn audio_mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" | "mp4" => "audio/mp4",
        "ogg" | "oga" => "audio/ogg",
        "webm" => "audio/webm",
        "flac" => "audio/flac",
        _ => "application/octet-stream",
    }
}
