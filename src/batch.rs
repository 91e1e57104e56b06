use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use crate::apt::{CommandFactory, run_streaming};
use crate::state::AppMessage;
use crate::types::{OperationResult, OperationType};

/// Applies `operation` to each package strictly one after another, streaming
/// the package manager's output as it is produced. A failure never stops the
/// batch; `cancel` is only honoured between packages.
pub fn run_batch(
    packages: &[String],
    operation: OperationType,
    factory: &dyn CommandFactory,
    sender: &mpsc::Sender<AppMessage>,
    cancel: &AtomicBool,
) {
    let total = packages.len();
    let mut cancelled = false;

    for (position, package) in packages.iter().enumerate() {
        if cancel.load(Ordering::SeqCst) {
            tracing::info!(remaining = total - position, "batch cancelled");
            cancelled = true;
            break;
        }

        let _ = sender.send(AppMessage::BatchStarted {
            package: package.clone(),
            operation,
            position,
            total,
        });

        let command = factory.command(package, operation);
        let success = match run_streaming(command, |line| {
            let _ = sender.send(AppMessage::OutputLine { line });
        }) {
            Ok(code) => {
                let success = code == Some(0);
                if !success {
                    tracing::warn!(
                        package = %package,
                        code = ?code,
                        "{} failed",
                        operation.verb()
                    );
                }
                success
            }
            Err(err) => {
                tracing::warn!(package = %package, "{} failed: {}", operation.verb(), err);
                let _ = sender.send(AppMessage::OutputLine {
                    line: format!("Error: {}", err),
                });
                false
            }
        };

        let _ = sender.send(AppMessage::OperationFinished {
            result: OperationResult {
                package: package.clone(),
                success,
            },
        });
    }

    let _ = sender.send(AppMessage::BatchFinished {
        operation,
        cancelled,
    });
}

pub fn spawn_batch<F>(
    packages: Vec<String>,
    operation: OperationType,
    factory: F,
    sender: mpsc::Sender<AppMessage>,
    cancel: Arc<AtomicBool>,
) -> JoinHandle<()>
where
    F: CommandFactory + Send + 'static,
{
    thread::spawn(move || run_batch(&packages, operation, &factory, &sender, &cancel))
}
