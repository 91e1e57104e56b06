use std::process::{Command, Stdio};

use crate::types::{CommandResult, PackageDetails};

use super::parser::{parse_depends_output, parse_dpkg_status, parse_show_output};

/// Read-only view of the package index used while building the catalog.
pub trait PackageIndex {
    /// Dependency and recommendation names of `package`, empty when the lookup fails.
    fn dependency_tree(&self, package: &str) -> Vec<String>;

    /// Name, description and metapackage flag of `package`, `None` when not found.
    fn package_info(&self, package: &str) -> Option<PackageDetails>;
}

/// Answers installed/not-installed for one package.
pub trait StatusProbe {
    fn is_installed(&self, package: &str) -> Result<bool, String>;
}

#[derive(Clone, Debug)]
pub struct AptCache {
    program: String,
}

impl AptCache {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn query(&self, args: &[&str]) -> Result<CommandResult, String> {
        run_read_only(&self.program, args)
    }
}

impl Default for AptCache {
    fn default() -> Self {
        Self::new("apt-cache")
    }
}

impl PackageIndex for AptCache {
    fn dependency_tree(&self, package: &str) -> Vec<String> {
        match self.query(&["depends", package]) {
            Ok(result) if result.success() => parse_depends_output(&result.stdout).into_names(),
            Ok(result) => {
                tracing::debug!(
                    package,
                    code = ?result.code,
                    "dependency query failed: {}",
                    result.stderr.trim()
                );
                Vec::new()
            }
            Err(err) => {
                tracing::debug!(package, "dependency query failed: {}", err);
                Vec::new()
            }
        }
    }

    fn package_info(&self, package: &str) -> Option<PackageDetails> {
        match self.query(&["show", package]) {
            Ok(result) if result.success() => parse_show_output(&result.stdout),
            Ok(result) => {
                tracing::debug!(
                    package,
                    code = ?result.code,
                    "package query failed: {}",
                    result.stderr.trim()
                );
                None
            }
            Err(err) => {
                tracing::debug!(package, "package query failed: {}", err);
                None
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct DpkgProbe {
    program: String,
}

impl DpkgProbe {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DpkgProbe {
    fn default() -> Self {
        Self::new("dpkg")
    }
}

impl StatusProbe for DpkgProbe {
    fn is_installed(&self, package: &str) -> Result<bool, String> {
        let result = run_read_only(&self.program, &["-l", package])?;
        Ok(result.success() && parse_dpkg_status(&result.stdout, package))
    }
}

/// Runs a query tool with the locale pinned so field names parse deterministically.
fn run_read_only(program: &str, args: &[&str]) -> Result<CommandResult, String> {
    let output = Command::new(program)
        .args(args)
        .env("LC_ALL", "C")
        .stdin(Stdio::null())
        .output()
        .map_err(|err| format!("Failed to launch {}: {}", program, err))?;

    Ok(CommandResult {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_index_tool_degrades_to_empty_results() {
        let index = AptCache::new("hapmgr-test-missing-apt-cache");
        assert!(index.dependency_tree("hamradio-all").is_empty());
        assert!(index.package_info("fldigi").is_none());
    }

    #[test]
    fn missing_status_tool_reports_error() {
        let probe = DpkgProbe::new("hapmgr-test-missing-dpkg");
        assert!(probe.is_installed("fldigi").is_err());
    }

    #[test]
    fn failing_status_tool_is_not_installed() {
        let probe = DpkgProbe::new("false");
        assert_eq!(probe.is_installed("fldigi"), Ok(false));
    }
}
