use std::collections::{HashMap, HashSet};

use crate::state::types::{AppMessage, BatchProgress, OperationRecord, PackageRow, PackageStatus};
use crate::types::{OperationResult, PackageEntry};

const DEFAULT_OPERATION_HISTORY: usize = 50;

/// Application state owned by the orchestrating thread. Workers never touch
/// it; they post `AppMessage`s that are applied through `handle_message`.
#[derive(Default)]
pub struct AppState {
    pub(crate) packages: Vec<PackageEntry>,
    pub(crate) statuses: HashMap<String, PackageStatus>,
    pub(crate) selected: HashSet<String>,
    pub(crate) status_check_in_progress: bool,
    pub(crate) progress: BatchProgress,
    pub(crate) batch_in_progress: bool,
    pub(crate) output_log: Vec<String>,
    pub(crate) results: Vec<OperationResult>,
    pub(crate) operation_history: Vec<OperationRecord>,
    pub(crate) max_operation_history: usize,
    pub(crate) refresh_requested: bool,
}

impl AppState {
    pub fn new(packages: Vec<PackageEntry>) -> Self {
        Self {
            packages,
            max_operation_history: DEFAULT_OPERATION_HISTORY,
            ..Self::default()
        }
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.max_operation_history = limit;
        self
    }

    pub fn packages(&self) -> &[PackageEntry] {
        &self.packages
    }

    pub fn package_names(&self) -> Vec<String> {
        self.packages.iter().map(|entry| entry.app.clone()).collect()
    }

    pub fn status(&self, package: &str) -> PackageStatus {
        self.statuses.get(package).copied().unwrap_or_default()
    }

    pub fn progress(&self) -> &BatchProgress {
        &self.progress
    }

    pub fn output_log(&self) -> &[String] {
        &self.output_log
    }

    pub fn results(&self) -> &[OperationResult] {
        &self.results
    }

    pub fn is_busy(&self) -> bool {
        self.batch_in_progress || self.status_check_in_progress
    }

    /// True once after a batch completes, so the caller can schedule a re-check.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    pub fn rows(&self) -> Vec<PackageRow> {
        self.packages
            .iter()
            .map(|entry| PackageRow {
                app: entry.app.clone(),
                pack: entry.pack.clone(),
                desc: entry.desc.clone(),
                status: self.status(&entry.app),
                selected: self.selected.contains(&entry.app),
            })
            .collect()
    }

    pub fn select(&mut self, package: &str) -> bool {
        if self.packages.iter().any(|entry| entry.app == package) {
            self.selected.insert(package.to_string());
            true
        } else {
            false
        }
    }

    pub fn deselect(&mut self, package: &str) {
        self.selected.remove(package);
    }

    pub fn select_all(&mut self) {
        self.selected = self.packages.iter().map(|entry| entry.app.clone()).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected packages in catalog order.
    pub fn selected_packages(&self) -> Vec<String> {
        self.packages
            .iter()
            .filter(|entry| self.selected.contains(&entry.app))
            .map(|entry| entry.app.clone())
            .collect()
    }

    /// Marks a status refresh as started. Previous results stay visible until
    /// replaced.
    pub fn begin_status_check(&mut self) {
        self.status_check_in_progress = true;
    }

    pub fn begin_batch(&mut self, total: usize) {
        self.batch_in_progress = true;
        self.output_log.clear();
        self.results.clear();
        self.progress = BatchProgress {
            total,
            ..BatchProgress::default()
        };
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::StatusChecked { package, installed } => {
                self.statuses
                    .insert(package, PackageStatus::from_installed(installed));
            }
            AppMessage::StatusCheckFinished => {
                self.status_check_in_progress = false;
            }
            AppMessage::BatchStarted {
                package,
                operation,
                total,
                ..
            } => {
                self.batch_in_progress = true;
                self.progress.operation = Some(operation);
                self.progress.total = self.progress.total.max(total);
                self.progress.current = Some(package.clone());
                self.start_operation_tracking(package, operation);
            }
            AppMessage::OutputLine { line } => {
                self.output_log.push(line);
            }
            AppMessage::OperationFinished { result } => {
                self.progress.completed += 1;
                if result.success {
                    self.progress.succeeded += 1;
                } else {
                    self.progress.failed += 1;
                }
                self.progress.current = None;
                self.complete_operation_tracking(&result);
                self.results.push(result);
            }
            AppMessage::BatchFinished { .. } => {
                self.batch_in_progress = false;
                self.progress.current = None;
                self.refresh_requested = true;
            }
        }
    }
}
