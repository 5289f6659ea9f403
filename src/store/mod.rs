//! Credential store module
//!
//! Persists the single account record as a JSON document on disk. Pure
//! data access: no business rules live here. A missing or malformed file
//! degrades to "no account" rather than an error, so a corrupt document
//! can never block startup.

pub mod models;

use crate::error::{AuthError, Result};
use models::UserRecord;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed store for the account record
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted record, or `None` when absent.
    ///
    /// Unreadable or unparseable content, and records missing any identity
    /// field, are all treated as absent.
    pub fn load(&self) -> Option<UserRecord> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("Failed to read credential file: {}", e);
                return None;
            }
        };

        match serde_json::from_slice::<UserRecord>(&data) {
            Ok(record) if record.is_complete() => Some(record),
            Ok(_) => {
                tracing::warn!("Credential file incomplete, treating as no account");
                None
            }
            Err(e) => {
                tracing::warn!("Credential file unparseable, treating as no account: {}", e);
                None
            }
        }
    }

    /// Persist the full record, atomically replacing any prior content.
    pub fn save(&self, record: &UserRecord) -> Result<()> {
        let data = serde_json::to_vec_pretty(record)
            .map_err(|e| AuthError::Storage(format!("failed to serialize record: {}", e)))?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AuthError::Storage(format!("failed to create data directory: {}", e))
                })?;
            }
        }

        // Write to a sibling temp file first so the rename is atomic and a
        // crash mid-write cannot leave a truncated document behind.
        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, &data)
            .map_err(|e| AuthError::Storage(format!("failed to write record: {}", e)))?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| AuthError::Storage(format!("failed to replace record: {}", e)))?;

        Ok(())
    }

    /// Remove the persisted record entirely. Idempotent.
    pub fn delete(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::Storage(format!("failed to delete record: {}", e))),
        }
    }
}
