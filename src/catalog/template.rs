use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::PackageEntry;

pub const TEMPLATE_PATH: &str = "locale/messages.pot";

const TEMPLATE_HEADER: &str = r#"msgid ""
msgstr ""
"Project-Id-Version: 1.0\n"
"MIME-Version: 1.0\n"
"Content-Type: text/plain; charset=UTF-8\n"
"Content-Transfer-Encoding: 8bit\n"
"#;

static MSGID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^msgid "((?:[^"\\]|\\.)*)"\s*$"#).expect("valid regex")
});

pub(crate) fn existing_msgids(content: &str) -> HashSet<String> {
    MSGID_REGEX
        .captures_iter(content)
        .filter_map(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
        .filter(|msgid| !msgid.is_empty())
        .collect()
}

pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            other => escaped.push(other),
        }
    }
    escaped
}

pub(crate) fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

/// Strings a catalog contributes to the template: every description in
/// catalog order, then the distinct category labels.
pub(crate) fn translatable_strings(packages: &[PackageEntry]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut strings = Vec::new();
    for entry in packages {
        if seen.insert(entry.desc.clone()) {
            strings.push(entry.desc.clone());
        }
    }
    let categories: BTreeSet<&str> = packages.iter().map(|entry| entry.pack.as_str()).collect();
    for category in categories {
        if seen.insert(category.to_string()) {
            strings.push(category.to_string());
        }
    }
    strings
}

/// Appends a stub for each string not already in `content`. Returns the new
/// content and how many stubs were added.
pub(crate) fn append_stubs(content: &str, strings: &[String]) -> (String, usize) {
    let mut known = existing_msgids(content);
    let mut updated = content.to_string();
    let mut added = 0;

    for msgid in strings {
        if msgid.is_empty() || !known.insert(msgid.clone()) {
            continue;
        }
        if !updated.is_empty() && !updated.ends_with('\n') {
            updated.push('\n');
        }
        updated.push_str(&format!("\nmsgid \"{}\"\nmsgstr \"\"\n", escape(msgid)));
        added += 1;
    }

    (updated, added)
}

/// Brings the template at `path` up to date with `packages`. Existing stubs
/// and translator edits are preserved.
pub fn update_template(path: &Path, packages: &[PackageEntry]) -> Result<usize, String> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => TEMPLATE_HEADER.to_string(),
        Err(err) => return Err(format!("Failed to read {}: {}", path.display(), err)),
    };

    let (updated, added) = append_stubs(&content, &translatable_strings(packages));
    if added == 0 && path.exists() {
        return Ok(0);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("Failed to create template directory: {}", err))?;
        }
    }
    fs::write(path, updated).map_err(|err| format!("Failed to write {}: {}", path.display(), err))?;
    Ok(added)
}
