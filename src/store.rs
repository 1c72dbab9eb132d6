use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::models::SavedPassword;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("A label is required to save a password")]
    EmptyLabel,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Saved passwords kept as one JSON array on disk. Every operation reads or
/// writes the whole file.
pub struct PasswordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl PasswordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Vec<SavedPassword> {
        let _guard = self.lock.lock().await;
        self.read_all().await
    }

    pub async fn get(&self, index: usize) -> Option<SavedPassword> {
        self.load().await.into_iter().nth(index)
    }

    /// Appends a record stamped with the current local time and returns the
    /// full list as written.
    pub async fn save(&self, password: &str, label: &str) -> Result<Vec<SavedPassword>, StoreError> {
        if label.trim().is_empty() {
            return Err(StoreError::EmptyLabel);
        }

        let record = SavedPassword {
            password: password.to_owned(),
            label: label.to_owned(),
            created_at: chrono::Local::now().format(TIMESTAMP_FORMAT).to_string(),
        };

        let _guard = self.lock.lock().await;
        let mut saved = self.read_all().await;
        saved.push(record);
        self.write_all(&saved).await?;

        info!(label, total = saved.len(), "Saved password");
        Ok(saved)
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                info!(path = %self.path.display(), "Cleared saved passwords");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn read_all(&self) -> Vec<SavedPassword> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No store file yet");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Unreadable store file, treating as empty");
                return Vec::new();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Unparseable store file, treating as empty");
            Vec::new()
        })
    }

    async fn write_all(&self, saved: &[SavedPassword]) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(saved, &mut ser)?;

        tokio::fs::write(&self.path, buf).await?;
        Ok(())
    }
}
