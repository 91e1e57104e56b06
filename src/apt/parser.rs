use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DependencyRecord, PackageDetails};

pub(crate) const METAPACKAGE_SECTION: &str = "metapackages";
pub(crate) const CATEGORY_PREFIX: &str = "hamradio-";

const INSTALLED_MARKER: &str = "ii";

static ANNOTATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*").expect("valid regex"));

/// Parses `apt-cache depends` output. Lines look like `  Depends: libc6`,
/// ` |Depends: foo` for alternatives, or `  Recommends: <virtual>`.
pub(crate) fn parse_depends_output(output: &str) -> DependencyRecord {
    let mut record = DependencyRecord::default();

    for line in output.lines() {
        let trimmed = line.trim().trim_start_matches('|');
        if let Some(value) = trimmed.strip_prefix("Depends:") {
            if let Some(name) = dependency_name(value) {
                record.depends.push(name);
            }
        } else if let Some(value) = trimmed.strip_prefix("Recommends:") {
            if let Some(name) = dependency_name(value) {
                record.recommends.push(name);
            }
        }
    }

    record
}

fn dependency_name(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let name = strip_arch_qualifier(value);
    if name.is_empty() || name == "<>" {
        None
    } else {
        Some(name)
    }
}

/// `foo:amd64` becomes `foo`; `<python3:any>` keeps its brackets as `<python3>`.
pub(crate) fn strip_arch_qualifier(value: &str) -> String {
    if let Some(inner) = value.strip_prefix('<').and_then(|v| v.strip_suffix('>')) {
        let base = inner.split(':').next().unwrap_or(inner).trim();
        return format!("<{}>", base);
    }
    value.split(':').next().unwrap_or(value).trim().to_string()
}

pub(crate) fn is_virtual(name: &str) -> bool {
    name.len() >= 2 && name.starts_with('<') && name.ends_with('>')
}

/// Parses the first stanza of `apt-cache show` output.
pub(crate) fn parse_show_output(output: &str) -> Option<PackageDetails> {
    let mut name: Option<String> = None;
    let mut description: Option<String> = None;
    let mut section: Option<String> = None;

    for line in output.lines() {
        if line.trim().is_empty() {
            if name.is_some() {
                break;
            }
            continue;
        }

        if let Some(value) = line.strip_prefix("Package:") {
            name = Some(value.trim().to_string());
        } else if let Some(value) = line
            .strip_prefix("Description-en:")
            .or_else(|| line.strip_prefix("Description:"))
        {
            if description.is_none() {
                description = clean_description(value);
            }
        } else if let Some(value) = line.strip_prefix("Section:") {
            section = Some(value.trim().to_string());
        }
    }

    let name = name.filter(|value| !value.is_empty())?;
    let is_metapackage = section
        .as_deref()
        .map(|value| value.rsplit('/').next().unwrap_or(value) == METAPACKAGE_SECTION)
        .unwrap_or(false);

    Some(PackageDetails {
        name,
        description,
        is_metapackage,
    })
}

/// First line only, with `(metapackage)`-style annotations dropped.
pub(crate) fn clean_description(raw: &str) -> Option<String> {
    let first_line = raw.lines().next().unwrap_or_default();
    let stripped = ANNOTATION_REGEX.replace_all(first_line, " ");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// True when `dpkg -l` lists `package` with the installed status marker.
pub(crate) fn parse_dpkg_status(output: &str, package: &str) -> bool {
    output.lines().any(|line| {
        let mut tokens = line.split_whitespace();
        let Some(marker) = tokens.next() else {
            return false;
        };
        let Some(listed) = tokens.next() else {
            return false;
        };
        let listed = listed.split(':').next().unwrap_or(listed);
        marker == INSTALLED_MARKER && listed == package
    })
}

/// Short category label for a metapackage, e.g. `antenna` for `hamradio-antenna`.
pub(crate) fn category_label(metapackage: &str) -> String {
    metapackage
        .rsplit(CATEGORY_PREFIX)
        .next()
        .unwrap_or(metapackage)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPENDS_OUTPUT: &str = "hamradio-datamodes
  Depends: fldigi
  Depends: <libfoo:any>
 |Depends: wsjtx:amd64
  Depends: js8call
  Recommends: hamradio-sdr
  Suggests: flrig
  Conflicts: hamradio-old
";

    const SHOW_OUTPUT: &str = "Package: hamradio-datamodes
Version: 0.7
Section: metapackages
Description-en: Digital modes packages (metapackage)
 This metapackage will install packages useful for digital modes.
Description-md5: 0123456789abcdef

Package: hamradio-datamodes
Version: 0.6
Section: misc
Description-en: Older stanza
";

    #[test]
    fn depends_output_collects_depends_and_recommends() {
        let record = parse_depends_output(DEPENDS_OUTPUT);
        assert_eq!(
            record.depends,
            vec!["fldigi", "<libfoo>", "wsjtx", "js8call"]
        );
        assert_eq!(record.recommends, vec!["hamradio-sdr"]);
    }

    #[test]
    fn depends_output_without_edges_is_empty() {
        let record = parse_depends_output("fldigi\n  Suggests: flrig\n");
        assert!(record.depends.is_empty());
        assert!(record.recommends.is_empty());
    }

    #[test]
    fn virtual_names_are_detected() {
        assert!(is_virtual("<libfoo>"));
        assert!(!is_virtual("libfoo"));
        assert!(!is_virtual("<"));
    }

    #[test]
    fn show_output_reads_first_stanza() {
        let details = parse_show_output(SHOW_OUTPUT).expect("parse show output");
        assert_eq!(details.name, "hamradio-datamodes");
        assert_eq!(details.description.as_deref(), Some("Digital modes packages"));
        assert!(details.is_metapackage);
    }

    #[test]
    fn show_output_accepts_plain_description_field() {
        let output = "Package: fldigi\nSection: universe/hamradio\nDescription: digital modem program for hamradio operators\n";
        let details = parse_show_output(output).expect("parse show output");
        assert_eq!(
            details.description.as_deref(),
            Some("digital modem program for hamradio operators")
        );
        assert!(!details.is_metapackage);
    }

    #[test]
    fn show_output_handles_area_prefixed_metapackage_section() {
        let output = "Package: hamradio-all\nSection: universe/metapackages\nDescription: All packages\n";
        assert!(parse_show_output(output).expect("parse").is_metapackage);
    }

    #[test]
    fn show_output_without_package_is_none() {
        assert!(parse_show_output("N: Unable to locate package nope\n").is_none());
    }

    #[test]
    fn description_annotation_is_removed_inside_text() {
        assert_eq!(
            clean_description("Tools (metapackage) for radio").as_deref(),
            Some("Tools for radio")
        );
        assert_eq!(clean_description("  (metapackage)  "), None);
    }

    #[test]
    fn dpkg_status_requires_installed_marker_for_exact_name() {
        let output = "Desired=Unknown/Install/Remove/Purge/Hold
||/ Name           Version      Architecture Description
+++-==============-============-============-====================
ii  fldigi:amd64   4.1.23-1     amd64        digital modem program
rc  flrig          2.0.04-1     amd64        transceiver control
";
        assert!(parse_dpkg_status(output, "fldigi"));
        assert!(!parse_dpkg_status(output, "flrig"));
        assert!(!parse_dpkg_status(output, "fldig"));
    }

    #[test]
    fn category_label_strips_prefix() {
        assert_eq!(category_label("hamradio-antenna"), "antenna");
        assert_eq!(category_label("hamradio-all"), "all");
        assert_eq!(category_label("ham-tools"), "ham-tools");
    }
}
