//! Core record types shared by the tree builder, run monitoring and the CLI.

use serde::{Deserialize, Serialize};

/// FileId: backend identifier of a produced backup file
pub type FileId = u64;

/// RunId: backend identifier of a backup run
pub type RunId = u64;

/// One file produced by a backup run, as returned by `/backup-runs/{id}/files`.
///
/// Exactly one of `local_path` / `remote_path` is expected to be set. When both
/// are set the local path wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: FileId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Older backend builds report the size under this name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
}

impl FileRecord {
    /// Record with a remote path only.
    pub fn remote(id: FileId, path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id,
            remote_path: Some(path.into()),
            size_bytes: Some(size_bytes),
            ..Self::default()
        }
    }

    /// Record with a local path only.
    pub fn local(id: FileId, path: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id,
            local_path: Some(path.into()),
            size_bytes: Some(size_bytes),
            ..Self::default()
        }
    }

    /// The path the tree is built from: trimmed local path when non-empty,
    /// otherwise the trimmed remote path. `None` when neither carries text.
    pub fn source_path(&self) -> Option<&str> {
        let local = self.local_path.as_deref().map(str::trim).unwrap_or("");
        if !local.is_empty() {
            return Some(local);
        }
        let remote = self.remote_path.as_deref().map(str::trim).unwrap_or("");
        if remote.is_empty() {
            None
        } else {
            Some(remote)
        }
    }

    /// Size in bytes, 0 when the backend did not report one.
    pub fn size(&self) -> u64 {
        self.size_bytes.or(self.file_size).unwrap_or(0)
    }
}
