//! Persistence for the single application-state document.

use chrono::Utc;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

use crate::defaults::LAST_SAVED_FIELD;
use crate::error::{AppError, AppResult};

/// JSON file-backed store for the client's state document.
///
/// There is no locking: concurrent saves race and the last rename wins.
/// Each save goes through its own temp file, so a reader never sees a
/// partially written document.
#[derive(Debug, Clone)]
pub struct StateStore {
    file_path: PathBuf,
    /// Returned whenever nothing usable is on disk.
    default_state: Arc<Value>,
}

impl StateStore {
    /// Create a store for `file_path` falling back to `default_state`.
    pub fn new(file_path: impl AsRef<Path>, default_state: Arc<Value>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            default_state,
        }
    }

    /// Path of the persisted document.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Stamp `document` with the current time and write it to disk,
    /// replacing any previous copy.
    ///
    /// Returns the timestamp (milliseconds since the Unix epoch) that was
    /// written into the document.
    ///
    /// # Errors
    /// `BadRequest` if the document is not a JSON object, otherwise the
    /// underlying serialization or I/O failure.
    pub async fn save(&self, mut document: Value) -> AppResult<i64> {
        let saved_at = Utc::now().timestamp_millis();

        // Invalid input rather than a storage failure, so 400.
        let fields = document.as_object_mut().ok_or_else(|| {
            AppError::BadRequest("State document must be a JSON object".to_string())
        })?;
        fields.insert(LAST_SAVED_FIELD.to_string(), Value::from(saved_at));

        let content = serde_json::to_string_pretty(&document)?;

        // Ensure parent directory exists
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Unique per save so overlapping writers never share a temp file.
        let temp_path = self
            .file_path
            .with_extension(format!("json.{}.tmp", Uuid::new_v4().simple()));

        if let Err(e) = write_and_rename(&temp_path, &self.file_path, content.as_bytes()).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.file_path.display(),
            bytes = content.len(),
            saved_at,
            "Saved state document"
        );
        Ok(saved_at)
    }

    /// Read the persisted document.
    ///
    /// `Ok(None)` means no document has been saved yet. A file that exists
    /// but does not parse surfaces as [`AppError::Json`].
    pub async fn read(&self) -> AppResult<Option<Value>> {
        let content = match tokio::fs::read_to_string(&self.file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        Ok(Some(serde_json::from_str(&content)?))
    }

    /// Load the persisted document, or the default state if there is none.
    ///
    /// Unreadable or corrupt files are logged and treated as absent.
    pub async fn load(&self) -> Value {
        match self.read().await {
            Ok(Some(document)) => document,
            Ok(None) => {
                tracing::debug!(path = %self.file_path.display(), "No saved state, using default");
                self.default_state.as_ref().clone()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.file_path.display(),
                    error = %e,
                    "Saved state is unreadable, using default"
                );
                self.default_state.as_ref().clone()
            }
        }
    }
}

async fn write_and_rename(temp_path: &Path, target: &Path, content: &[u8]) -> std::io::Result<()> {
    tokio::fs::write(temp_path, content).await?;
    tokio::fs::rename(temp_path, target).await
}
