use hapmgr::apt::EnvironmentIssue;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Severity {
    Blocking,
    Warning,
}

/// Lacking root is always surfaced, and only stops a command that changes
/// packages when no elevation program is configured.
pub(crate) fn issue_severity(
    issue: &EnvironmentIssue,
    elevation_configured: bool,
    needs_privilege: bool,
) -> Severity {
    if issue.is_blocking() {
        return Severity::Blocking;
    }
    match issue {
        EnvironmentIssue::NotSuperuser if needs_privilege && !elevation_configured => {
            Severity::Blocking
        }
        _ => Severity::Warning,
    }
}

/// Untranslated title and detail shown for `issue`.
pub(crate) fn issue_messages(issue: &EnvironmentIssue) -> (&'static str, &'static str) {
    match issue {
        EnvironmentIssue::MissingPackageManager { .. } => (
            "Critical error!",
            "Operating system is not debian compatible",
        ),
        EnvironmentIssue::NotSuperuser => (
            "Superuser not detected!",
            "Some functions requires super user capabilities",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_superuser_is_reported_for_read_only_commands() {
        let issue = EnvironmentIssue::NotSuperuser;
        assert_eq!(issue_severity(&issue, true, false), Severity::Warning);
        assert_eq!(issue_severity(&issue, false, false), Severity::Warning);
        assert_eq!(issue_severity(&issue, true, true), Severity::Warning);
        assert_eq!(
            issue_messages(&issue),
            (
                "Superuser not detected!",
                "Some functions requires super user capabilities"
            )
        );
    }

    #[test]
    fn missing_superuser_blocks_changes_without_elevation() {
        assert_eq!(
            issue_severity(&EnvironmentIssue::NotSuperuser, false, true),
            Severity::Blocking
        );
    }

    #[test]
    fn missing_package_manager_always_blocks() {
        let issue = EnvironmentIssue::MissingPackageManager {
            program: "apt-get".to_string(),
        };
        for needs_privilege in [false, true] {
            assert_eq!(issue_severity(&issue, true, needs_privilege), Severity::Blocking);
        }
    }
}
