use std::io::{self, BufRead, BufReader};
use std::process::{Command, Stdio};

use crate::types::OperationType;

/// Builds the child process that applies one operation to one package.
pub trait CommandFactory {
    fn command(&self, package: &str, operation: OperationType) -> Command;
}

/// `<elevation> <manager> install|remove -y <package>`, non-interactive.
#[derive(Clone, Debug)]
pub struct AptCommands {
    elevation: Option<String>,
    manager: String,
}

impl AptCommands {
    pub fn new(elevation: &str, manager: &str) -> Self {
        let elevation = elevation.trim();
        Self {
            elevation: (!elevation.is_empty()).then(|| elevation.to_string()),
            manager: manager.trim().to_string(),
        }
    }

    /// The command line as shown to the user.
    pub fn describe(&self, package: &str, operation: OperationType) -> String {
        let mut parts = Vec::new();
        if let Some(elevation) = &self.elevation {
            parts.push(elevation.as_str());
        }
        parts.extend([self.manager.as_str(), operation.verb(), "-y", package]);
        parts.join(" ")
    }
}

impl CommandFactory for AptCommands {
    fn command(&self, package: &str, operation: OperationType) -> Command {
        let mut command = match &self.elevation {
            Some(elevation) => {
                let mut command = Command::new(elevation);
                command.arg(&self.manager);
                command
            }
            None => Command::new(&self.manager),
        };
        command.args([operation.verb(), "-y", package]);
        command.env("DEBIAN_FRONTEND", "noninteractive");
        command
    }
}

/// Runs `command` with stdout and stderr joined on one pipe, handing every
/// non-empty line to `on_line` as the child writes it. Returns the exit code.
pub(crate) fn run_streaming(
    mut command: Command,
    mut on_line: impl FnMut(String),
) -> Result<Option<i32>, String> {
    let program = command.get_program().to_string_lossy().to_string();

    let (reader, writer) = io::pipe()
        .map_err(|err| format!("Failed to open output pipe for {}: {}", program, err))?;
    let error_writer = writer
        .try_clone()
        .map_err(|err| format!("Failed to open output pipe for {}: {}", program, err))?;

    command.stdin(Stdio::null());
    command.stdout(writer);
    command.stderr(error_writer);

    let spawned = command.spawn();
    // The command still owns the write ends; the reader only sees EOF once they are gone.
    drop(command);
    let mut child = spawned.map_err(|err| format!("Failed to launch {}: {}", program, err))?;

    let mut reader = BufReader::new(reader);
    let mut buffer = Vec::new();
    loop {
        buffer.clear();
        match reader.read_until(b'\n', &mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buffer);
                let text = text.trim_end_matches(['\n', '\r']);
                if !text.is_empty() {
                    on_line(text.to_string());
                }
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::debug!("Stopped reading output of {}: {}", program, err);
                break;
            }
        }
    }

    let status = child
        .wait()
        .map_err(|err| format!("Failed to wait for {}: {}", program, err))?;

    Ok(status.code())
}
