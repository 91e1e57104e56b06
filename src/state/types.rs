use chrono::{DateTime, Utc};

use crate::types::{OperationResult, OperationType};

/// Events posted by background workers to the thread that owns `AppState`.
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    StatusChecked {
        package: String,
        installed: bool,
    },
    StatusCheckFinished,
    BatchStarted {
        package: String,
        operation: OperationType,
        position: usize,
        total: usize,
    },
    OutputLine {
        line: String,
    },
    OperationFinished {
        result: OperationResult,
    },
    BatchFinished {
        operation: OperationType,
        cancelled: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Default)]
pub enum PackageStatus {
    #[default]
    Unknown,
    Installed,
    NotInstalled,
}

impl PackageStatus {
    pub fn from_installed(installed: bool) -> Self {
        if installed {
            PackageStatus::Installed
        } else {
            PackageStatus::NotInstalled
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PackageStatus::Unknown => "Unknown",
            PackageStatus::Installed => "Inst",
            PackageStatus::NotInstalled => "NotInst",
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BatchProgress {
    pub operation: Option<OperationType>,
    pub total: usize,
    pub completed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub current: Option<String>,
}

impl BatchProgress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OperationStatus {
    InProgress,
    Success,
    Failed,
}

#[derive(Clone, Debug)]
pub struct OperationRecord {
    pub package_name: String,
    pub operation_type: OperationType,
    pub status: OperationStatus,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl OperationRecord {
    pub fn duration_seconds(&self) -> Option<i64> {
        self.completed_at
            .map(|completed| completed.signed_duration_since(self.started_at).num_seconds())
    }
}

/// One rendered table row: catalog entry joined with its current status.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackageRow {
    pub app: String,
    pub pack: String,
    pub desc: String,
    pub status: PackageStatus,
    pub selected: bool,
}
