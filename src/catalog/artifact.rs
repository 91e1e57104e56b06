use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::PackageEntry;

pub const CATALOG_ARTIFACT_PATH: &str = "data/generated/packages.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogArtifact {
    #[serde(default)]
    pub packages: Vec<PackageEntry>,
}

/// Pretty JSON with a trailing newline. Holds no timestamps, so an unchanged
/// catalog renders to the same bytes.
pub fn render_catalog(packages: &[PackageEntry]) -> Result<String, String> {
    let artifact = CatalogArtifact {
        packages: packages.to_vec(),
    };
    let mut data = serde_json::to_string_pretty(&artifact)
        .map_err(|err| format!("Failed to serialize catalog: {}", err))?;
    data.push('\n');
    Ok(data)
}

pub fn write_catalog(path: &Path, packages: &[PackageEntry]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("Failed to create catalog directory: {}", err))?;
        }
    }

    let data = render_catalog(packages)?;
    fs::write(path, data)
        .map_err(|err| format!("Failed to write {}: {}", path.display(), err))
}

pub fn read_catalog(path: &Path) -> Result<Vec<PackageEntry>, String> {
    let content = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read {}: {}", path.display(), err))?;
    let artifact: CatalogArtifact = serde_json::from_str(&content)
        .map_err(|err| format!("Failed to parse {}: {}", path.display(), err))?;
    Ok(artifact.packages)
}

/// Outcome of [`replace_catalog`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CatalogUpdate {
    Written { previous: Option<usize> },
    Unchanged,
    /// The build came back empty; the existing catalog was left in place.
    KeptPrevious { previous: usize },
}

/// Writes `packages` over the artifact at `path`, except when an empty build
/// would replace a non-empty catalog. An unreadable previous artifact counts as absent.
pub fn replace_catalog(path: &Path, packages: &[PackageEntry]) -> Result<CatalogUpdate, String> {
    let previous = read_catalog(path).ok();
    match previous {
        Some(previous) if packages.is_empty() && !previous.is_empty() => {
            Ok(CatalogUpdate::KeptPrevious {
                previous: previous.len(),
            })
        }
        Some(previous) if previous == packages => Ok(CatalogUpdate::Unchanged),
        previous => {
            write_catalog(path, packages)?;
            Ok(CatalogUpdate::Written {
                previous: previous.map(|entries| entries.len()),
            })
        }
    }
}
