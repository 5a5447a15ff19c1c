use anyhow::{Context, Result};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/analyze";
pub const DEFAULT_CONFIG_FILE: &str = ".lizzy-config.json";

pub const REQUEST_TIMEOUT_RANGE: RangeInclusive<u64> = 10..=600;
pub const CONNECT_TIMEOUT_RANGE: RangeInclusive<u64> = 5..=120;

/// Runtime configuration for the client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub endpoint: String,
    pub session_dir: PathBuf,
    pub mock: bool,
    pub mock_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub rotate_interval_ms: u64,
    pub fade_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            session_dir: default_session_dir(),
            mock: false,
            mock_delay_ms: 3000,
            // Transcription of a full interview is slow
            request_timeout_secs: 120,
            connect_timeout_secs: 30,
            rotate_interval_ms: 2500,
            fade_ms: 300,
        }
    }
}

pub fn default_session_dir() -> PathBuf {
    std::env::temp_dir().join("lizzy-session")
}

impl Config {
    /// [`Config::load`] followed by [`Config::validate`].
    pub fn from_env() -> Result<Self> {
        let cfg = Self::load()?;
        cfg.validate().with_context(|| "Configuration validation failed")?;
        Ok(cfg)
    }

    /// Load from `.env`, the environment, then the optional JSON config file
    /// (`LIZZY_CONFIG_FILE`, default `.lizzy-config.json`). Not validated, so
    /// callers can layer overrides first.
    pub fn load() -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), ".env loaded"),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!(error = %e, "failed to load .env"),
        }

        let mut cfg = Config::default();

        if let Ok(val) = std::env::var("LIZZY_ENDPOINT") {
            cfg.endpoint = val.trim().to_string();
        }
        if let Ok(val) = std::env::var("LIZZY_SESSION_DIR") {
            if !val.trim().is_empty() {
                cfg.session_dir = PathBuf::from(val.trim());
            }
        }
        if let Ok(val) = std::env::var("LIZZY_MOCK") {
            cfg.mock = parse_bool(&val).unwrap_or(cfg.mock);
        }
        cfg.mock_delay_ms = env_clamped("LIZZY_MOCK_DELAY_MS", cfg.mock_delay_ms, 0, 60_000);
        cfg.request_timeout_secs = env_in_range("REQUEST_TIMEOUT_SECS", cfg.request_timeout_secs, REQUEST_TIMEOUT_RANGE);
        cfg.connect_timeout_secs = env_in_range("CONNECT_TIMEOUT_SECS", cfg.connect_timeout_secs, CONNECT_TIMEOUT_RANGE);
        cfg.rotate_interval_ms = env_clamped("LIZZY_ROTATE_INTERVAL_MS", cfg.rotate_interval_ms, 500, 60_000);
        cfg.fade_ms = env_clamped("LIZZY_FADE_MS", cfg.fade_ms, 0, 5_000);

        let cfg_path = std::env::var("LIZZY_CONFIG_FILE")
            .ok()
            .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
        cfg.apply_json_file(Path::new(&cfg_path))?;
        Ok(cfg)
    }

    /// Override fields from a JSON file. A missing file is not an error.
    pub fn apply_json_file(&mut self, path: &Path) -> Result<()> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e).with_context(|| format!("Failed to read config file {}", path.display())),
        };
        let json: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Invalid JSON in config file {}", path.display()))?;

        if let Some(v) = json.get("endpoint").and_then(|v| v.as_str()) {
            self.endpoint = v.trim().to_string();
        }
        if let Some(v) = json.get("session_dir").and_then(|v| v.as_str()) {
            self.session_dir = PathBuf::from(v);
        }
        if let Some(v) = json.get("mock").and_then(|v| v.as_bool()) {
            self.mock = v;
        }
        if let Some(v) = json.get("mock_delay_ms").and_then(|v| v.as_u64()) {
            self.mock_delay_ms = v.min(60_000);
        }
        if let Some(v) = json.get("request_timeout_secs").and_then(|v| v.as_u64()) {
            self.request_timeout_secs = clamp_to(v, &REQUEST_TIMEOUT_RANGE);
        }
        if let Some(v) = json.get("connect_timeout_secs").and_then(|v| v.as_u64()) {
            self.connect_timeout_secs = clamp_to(v, &CONNECT_TIMEOUT_RANGE);
        }
        if let Some(v) = json.get("rotate_interval_ms").and_then(|v| v.as_u64()) {
            self.rotate_interval_ms = v.clamp(500, 60_000);
        }
        if let Some(v) = json.get("fade_ms").and_then(|v| v.as_u64()) {
            self.fade_ms = v.min(5_000);
        }
        tracing::debug!(path = %path.display(), "config file applied");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.mock {
            let url = url::Url::parse(&self.endpoint)
                .with_context(|| format!("Invalid analysis endpoint: {}", self.endpoint))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(anyhow::anyhow!("Analysis endpoint must be http(s): {}", self.endpoint));
            }
        }

        if self.session_dir.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("Session directory cannot be empty"));
        }

        if self.fade_ms >= self.rotate_interval_ms {
            return Err(anyhow::anyhow!(
                "fade_ms ({}) must be shorter than rotate_interval_ms ({})",
                self.fade_ms,
                self.rotate_interval_ms
            ));
        }

        // Struct literals bypass the clamping done while loading
        for (name, value, range) in [
            ("request_timeout_secs", self.request_timeout_secs, REQUEST_TIMEOUT_RANGE),
            ("connect_timeout_secs", self.connect_timeout_secs, CONNECT_TIMEOUT_RANGE),
        ] {
            if !range.contains(&value) {
                return Err(anyhow::anyhow!(
                    "{} must be between {} and {} (got {})",
                    name,
                    range.start(),
                    range.end(),
                    value
                ));
            }
        }

        Ok(())
    }
}

fn env_in_range(key: &str, default: u64, range: RangeInclusive<u64>) -> u64 {
    env_clamped(key, default, *range.start(), *range.end())
}

fn clamp_to(value: u64, range: &RangeInclusive<u64>) -> u64 {
    value.clamp(*range.start(), *range.end())
}

fn env_clamped(key: &str, default: u64, min: u64, max: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
        .clamp(min, max)
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
