use chrono::Utc;

use crate::state::app::AppState;
use crate::state::types::{OperationRecord, OperationStatus};
use crate::types::{OperationResult, OperationType};

impl AppState {
    /// Start tracking a new package operation
    pub(crate) fn start_operation_tracking(
        &mut self,
        package_name: String,
        operation_type: OperationType,
    ) {
        self.operation_history.push(OperationRecord {
            package_name,
            operation_type,
            status: OperationStatus::InProgress,
            started_at: Utc::now(),
            completed_at: None,
        });

        // Keep only the most recent N operations (default 50)
        let max = if self.max_operation_history == 0 {
            50
        } else {
            self.max_operation_history
        };

        if self.operation_history.len() > max {
            let current_len = self.operation_history.len();
            self.operation_history.drain(0..current_len - max);
        }
    }

    /// Complete an operation and update its status
    pub(crate) fn complete_operation_tracking(&mut self, result: &OperationResult) {
        // Find the most recent in-progress operation for this package
        if let Some(operation) = self.operation_history.iter_mut().rev().find(|op| {
            op.package_name == result.package && op.status == OperationStatus::InProgress
        }) {
            operation.completed_at = Some(Utc::now());
            operation.status = if result.success {
                OperationStatus::Success
            } else {
                OperationStatus::Failed
            };
        }
    }

    /// Get the most recent operation for a specific package
    pub fn recent_operation(&self, package_name: &str) -> Option<&OperationRecord> {
        self.operation_history
            .iter()
            .rev()
            .find(|op| op.package_name == package_name)
    }

    /// Get all operations, most recent first
    #[cfg(test)]
    pub(crate) fn all_operations(&self) -> Vec<OperationRecord> {
        let mut ops = self.operation_history.clone();
        ops.reverse();
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_bounded_and_completed_in_place() {
        let mut state = AppState::new(Vec::new()).with_history_limit(2);
        for package in ["aprx", "chirp", "klog"] {
            state.start_operation_tracking(package.to_string(), OperationType::Remove);
        }
        state.complete_operation_tracking(&OperationResult {
            package: "klog".to_string(),
            success: false,
        });

        let names: Vec<_> = state
            .all_operations()
            .into_iter()
            .map(|op| op.package_name)
            .collect();
        assert_eq!(names, vec!["klog", "chirp"]);

        let klog = state.recent_operation("klog").expect("klog tracked");
        assert_eq!(klog.status, OperationStatus::Failed);
        assert!(klog.completed_at.is_some());
        assert!(state.recent_operation("aprx").is_none());
    }
}
