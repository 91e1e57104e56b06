use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use crate::apt::StatusProbe;
use crate::state::AppMessage;

/// Checks each package in order, posting a result as soon as it is known and
/// a single `StatusCheckFinished` at the end. A failed probe counts as not
/// installed for that package only.
pub fn check_statuses(
    packages: &[String],
    probe: &dyn StatusProbe,
    sender: &mpsc::Sender<AppMessage>,
) {
    for package in packages {
        let installed = match probe.is_installed(package) {
            Ok(installed) => installed,
            Err(err) => {
                tracing::debug!(package = %package, "status check failed: {}", err);
                false
            }
        };
        let _ = sender.send(AppMessage::StatusChecked {
            package: package.clone(),
            installed,
        });
    }
    let _ = sender.send(AppMessage::StatusCheckFinished);
}

pub fn spawn_status_check<P>(
    packages: Vec<String>,
    probe: P,
    sender: mpsc::Sender<AppMessage>,
) -> JoinHandle<()>
where
    P: StatusProbe + Send + 'static,
{
    thread::spawn(move || check_statuses(&packages, &probe, &sender))
}
