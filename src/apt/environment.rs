use sudo::RunningAs;
use thiserror::Error;

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum EnvironmentIssue {
    #[error("{program} was not found; the operating system is not Debian compatible")]
    MissingPackageManager { program: String },
    #[error("not running as superuser; install and remove require elevation")]
    NotSuperuser,
}

impl EnvironmentIssue {
    /// Missing tooling blocks every operation; lacking root only limits some.
    pub fn is_blocking(&self) -> bool {
        matches!(self, EnvironmentIssue::MissingPackageManager { .. })
    }
}

pub fn check_environment(package_manager: &str) -> Vec<EnvironmentIssue> {
    let mut issues = Vec::new();

    if which::which(package_manager).is_err() {
        issues.push(EnvironmentIssue::MissingPackageManager {
            program: package_manager.to_string(),
        });
    }

    if !matches!(sudo::check(), RunningAs::Root) {
        issues.push(EnvironmentIssue::NotSuperuser);
    }

    issues
}
