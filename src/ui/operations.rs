use hapmgr::locale::Translate;
use hapmgr::state::{BatchProgress, OperationRecord, OperationStatus};
use hapmgr::types::{OperationResult, OperationType};

const SEPARATOR_WIDTH: usize = 50;

pub(crate) fn format_package_banner(package: &str, tr: &dyn Translate) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    format!("\n{separator}\n{}: {package}\n{separator}", tr.translate("Processing"))
}

pub(crate) fn format_result_line(
    result: &OperationResult,
    progress: &BatchProgress,
    tr: &dyn Translate,
) -> String {
    let (mark, message) = if result.success {
        ("✓", tr.translate("Operation completed"))
    } else {
        ("✗", tr.translate("Operation failed"))
    };
    let percent = (progress.fraction() * 100.0).round() as u32;
    format!(
        "\n{} {}: {} [{}/{} {}%]",
        mark, result.package, message, progress.completed, progress.total, percent
    )
}

pub(crate) fn format_batch_summary(progress: &BatchProgress, tr: &dyn Translate) -> String {
    format!(
        "{}: {}, {}: {}",
        tr.translate("Succeeded"),
        progress.succeeded,
        tr.translate("Failed"),
        progress.failed
    )
}

pub(crate) fn format_operation_title(operation: &OperationRecord, tr: &dyn Translate) -> String {
    let op_type = match operation.operation_type {
        OperationType::Install => tr.translate("Installed"),
        OperationType::Remove => tr.translate("Removed"),
    };

    format!("{} {}", op_type, operation.package_name)
}

pub(crate) fn format_operation_subtitle(
    operation: &OperationRecord,
    tr: &dyn Translate,
) -> String {
    let mut parts = Vec::new();

    let local_time = operation.started_at.with_timezone(&chrono::Local);
    parts.push(local_time.format("%b %d, %Y at %I:%M %p").to_string());

    if let Some(duration) = operation.duration_seconds() {
        parts.push(format!("{}s", duration));
    }

    match operation.status {
        OperationStatus::InProgress => parts.push(tr.translate("In progress…")),
        OperationStatus::Failed => parts.push(tr.translate("Failed")),
        OperationStatus::Success => {}
    }

    parts.join(" • ")
}
