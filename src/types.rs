use serde::{Deserialize, Serialize};

/// One installable application in the catalog.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PackageEntry {
    pub app: String,
    pub pack: String,
    pub desc: String,
}

impl PackageEntry {
    pub(crate) fn sort_key(&self) -> String {
        self.app.to_lowercase()
    }
}

/// Fields read from one `show` query.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PackageDetails {
    pub name: String,
    pub description: Option<String>,
    pub is_metapackage: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DependencyRecord {
    pub depends: Vec<String>,
    pub recommends: Vec<String>,
}

impl DependencyRecord {
    /// Depends first, then recommends; both count as graph edges.
    pub fn into_names(self) -> Vec<String> {
        let mut names = self.depends;
        names.extend(self.recommends);
        names
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Install,
    Remove,
}

impl OperationType {
    pub fn verb(self) -> &'static str {
        match self {
            OperationType::Install => "install",
            OperationType::Remove => "remove",
        }
    }

    pub fn progress_label(self) -> &'static str {
        match self {
            OperationType::Install => "Installing",
            OperationType::Remove => "Removing",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperationResult {
    pub package: String,
    pub success: bool,
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub(crate) fn success(&self) -> bool {
        self.code.unwrap_or(-1) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_record_keeps_depends_before_recommends() {
        let record = DependencyRecord {
            depends: vec!["fldigi".to_string()],
            recommends: vec!["flrig".to_string()],
        };
        assert_eq!(record.into_names(), vec!["fldigi", "flrig"]);
    }

    #[test]
    fn command_result_without_code_is_failure() {
        let result = CommandResult {
            code: None,
            stdout: String::new(),
            stderr: String::new(),
        };
        assert!(!result.success());
    }
}
