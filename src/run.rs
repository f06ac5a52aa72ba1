//! Backup runs: the run record, its status and run logs.

use crate::types::{FileRecord, RunId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Status of a backup run as reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RunStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Success,
    Failed,
    Error,
    /// Any status string this client does not know.
    Unknown(String),
}

impl RunStatus {
    /// Parse a backend status string, case-insensitively.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "pending" => RunStatus::Pending,
            "running" => RunStatus::Running,
            "completed" => RunStatus::Completed,
            "success" => RunStatus::Success,
            "failed" => RunStatus::Failed,
            "error" => RunStatus::Error,
            _ => RunStatus::Unknown(value.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Success => "success",
            RunStatus::Failed => "failed",
            RunStatus::Error => "error",
            RunStatus::Unknown(s) => s,
        }
    }

    /// Only running runs are polled.
    pub fn is_active(&self) -> bool {
        matches!(self, RunStatus::Running)
    }

    pub fn is_successful(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Success)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, RunStatus::Failed | RunStatus::Error)
    }

    /// Badge text. Unknown statuses display as pending.
    pub fn label(&self) -> &'static str {
        match self {
            RunStatus::Pending | RunStatus::Unknown(_) => "Pending",
            RunStatus::Running => "Running",
            RunStatus::Completed => "Completed",
            RunStatus::Success => "Success",
            RunStatus::Failed => "Failed",
            RunStatus::Error => "Error",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for RunStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RunStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(RunStatus::parse(&value))
    }
}

/// One execution of a backup profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupRun {
    pub id: RunId,
    #[serde(default)]
    pub backup_profile_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_backup_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_files: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_size_bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_files: Option<Vec<FileRecord>>,
}

impl BackupRun {
    /// Files attached to the run record, if the backend embedded them.
    pub fn files(&self) -> &[FileRecord] {
        self.backup_files.as_deref().unwrap_or(&[])
    }
}

/// One log line of a backup run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackupRunLog {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_run_id: Option<RunId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}
