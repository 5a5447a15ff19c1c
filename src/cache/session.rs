use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

/// Fixed key the current result is stored under.
pub const RESULT_KEY: &str = "lizzy-result";

/// Session-scoped storage for the latest analysis result.
///
/// Holds at most one result, overwritten by each submission (last writer
/// wins). Readers get the raw payload back as a plain value so normalization
/// never depends on where its input came from.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn result_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", RESULT_KEY))
    }

    /// Persist `raw`, replacing any earlier result.
    pub fn save_result(&self, raw: &Value) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let contents = serde_json::to_string_pretty(raw)?;
        let path = self.result_path();
        // Write-then-rename so a reader never sees a half-written file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "stored analysis result");
        Ok(path)
    }

    /// Read the stored payload for a results view.
    ///
    /// A missing file, unparsable JSON or a non-object value all mean
    /// "nothing to show" and yield `None`.
    pub fn read_once(&self) -> Option<Value> {
        let path = self.result_path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no stored result");
                return None;
            }
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(value @ Value::Object(_)) => Some(value),
            Ok(_) => {
                tracing::debug!(path = %path.display(), "stored result is not an object");
                None
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "stored result is malformed");
                None
            }
        }
    }

    /// End the session: remove the stored result. Returns whether one existed.
    pub fn clear(&self) -> Result<bool, StoreError> {
        let path = self.result_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}
