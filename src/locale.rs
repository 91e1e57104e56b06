use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::catalog::template::unescape;

pub const LOCALE_DIR: &str = "locale";
pub const DEFAULT_LANGUAGE: &str = "en";
const DOMAIN_FILE: &str = "messages.po";

/// Message lookup handed to anything that renders user-facing text.
pub trait Translate {
    fn translate(&self, msgid: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, msgid: &str) -> String {
        self(msgid)
    }
}

/// Returns every message unchanged.
pub struct Untranslated;

impl Translate for Untranslated {
    fn translate(&self, msgid: &str) -> String {
        msgid.to_string()
    }
}

#[derive(Debug, Default, Clone)]
pub struct Translations {
    language: String,
    messages: HashMap<String, String>,
}

impl Translations {
    /// Loads `<dir>/<language>/LC_MESSAGES/messages.po`. A missing or
    /// unreadable catalog yields an identity translator.
    pub fn load(dir: &Path, language: &str) -> Self {
        let path = dir.join(language).join("LC_MESSAGES").join(DOMAIN_FILE);
        let messages = match fs::read_to_string(&path) {
            Ok(content) => parse_po(&content),
            Err(err) => {
                if language != DEFAULT_LANGUAGE {
                    tracing::debug!("No translations at {}: {}", path.display(), err);
                }
                HashMap::new()
            }
        };
        tracing::debug!(language, messages = messages.len(), "translations loaded");
        Self {
            language: language.to_string(),
            messages,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translate for Translations {
    fn translate(&self, msgid: &str) -> String {
        self.messages
            .get(msgid)
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| msgid.to_string())
    }
}

#[derive(Clone, Copy, PartialEq)]
enum PoField {
    None,
    Id,
    Str,
}

/// Reads msgid/msgstr pairs, including continuation lines. Untranslated
/// entries and the header are dropped.
pub(crate) fn parse_po(content: &str) -> HashMap<String, String> {
    let mut messages = HashMap::new();
    let mut field = PoField::None;
    let mut msgid = String::new();
    let mut msgstr = String::new();

    let mut flush = |msgid: &mut String, msgstr: &mut String| {
        if !msgid.is_empty() && !msgstr.is_empty() {
            messages.insert(std::mem::take(msgid), std::mem::take(msgstr));
        }
        msgid.clear();
        msgstr.clear();
    };

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("msgid ") {
            flush(&mut msgid, &mut msgstr);
            msgid.push_str(&quoted(rest));
            field = PoField::Id;
        } else if let Some(rest) = trimmed.strip_prefix("msgstr ") {
            msgstr.push_str(&quoted(rest));
            field = PoField::Str;
        } else if trimmed.starts_with('"') {
            match field {
                PoField::Id => msgid.push_str(&quoted(trimmed)),
                PoField::Str => msgstr.push_str(&quoted(trimmed)),
                PoField::None => {}
            }
        }
    }
    flush(&mut msgid, &mut msgstr);

    messages
}

fn quoted(text: &str) -> String {
    let inner = text
        .trim()
        .strip_prefix('"')
        .and_then(|value| value.strip_suffix('"'))
        .unwrap_or_default();
    unescape(inner)
}

/// Verbose language names some platforms report instead of ISO codes.
const VERBOSE_LANGUAGES: [(&str, &str); 5] = [
    ("Italian", "it"),
    ("English", "en"),
    ("French", "fr"),
    ("German", "de"),
    ("Spanish", "es"),
];

/// Picks a language code from the usual locale variables, in priority order.
pub fn detect_language(lookup: impl Fn(&str) -> Option<String>) -> String {
    ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| lookup(key))
        .find_map(|value| language_from_locale(&value))
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}

pub fn detect_system_language() -> String {
    detect_language(|key| std::env::var(key).ok())
}

/// `it_IT.UTF-8` gives `it`; `Italian_Italy.1252` gives `it`; `C` and `POSIX` give nothing.
pub(crate) fn language_from_locale(value: &str) -> Option<String> {
    let base = value
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }

    let language = base.split(['_', '-']).next().unwrap_or(base);
    if language.is_empty() {
        return None;
    }

    if language.chars().any(|c| c.is_ascii_uppercase()) {
        return VERBOSE_LANGUAGES
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(language))
            .map(|(_, code)| code.to_string());
    }

    Some(language.to_string())
}

/// Language codes with a compiled catalog under `dir`.
pub fn available_languages(dir: &Path) -> Vec<String> {
    let mut languages = BTreeSet::new();
    languages.insert(DEFAULT_LANGUAGE.to_string());

    for entry in WalkDir::new(dir)
        .min_depth(3)
        .max_depth(3)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && e.file_name() == DOMAIN_FILE)
    {
        let language = entry
            .path()
            .parent()
            .and_then(|p| p.parent())
            .and_then(|p| p.file_name())
            .map(|name| name.to_string_lossy().to_string());
        if let Some(language) = language {
            languages.insert(language);
        }
    }

    languages.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PO: &str = r#"# Italian translations
msgid ""
msgstr ""
"Project-Id-Version: 1.0\n"

msgid "Satellite tracking program"
msgstr "Programma di tracciamento satellitare"

msgid "Untranslated"
msgstr ""

msgid ""
"Long "
"message"
msgstr "Messaggio "
"lungo"
"#;

    fn env_from(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn po_parsing_keeps_translated_entries_only() {
        let messages = parse_po(PO);
        assert_eq!(messages.len(), 2);
        assert_eq!(
            messages.get("Satellite tracking program").map(String::as_str),
            Some("Programma di tracciamento satellitare")
        );
        assert_eq!(
            messages.get("Long message").map(String::as_str),
            Some("Messaggio lungo")
        );
    }

    #[test]
    fn translations_fall_back_to_msgid() {
        let dir = tempfile::tempdir().expect("tempdir");
        let po_dir = dir.path().join("it").join("LC_MESSAGES");
        fs::create_dir_all(&po_dir).expect("create po dir");
        fs::write(po_dir.join(DOMAIN_FILE), PO).expect("write po");

        let translations = Translations::load(dir.path(), "it");
        assert_eq!(translations.language(), "it");
        assert_eq!(
            translations.translate("Satellite tracking program"),
            "Programma di tracciamento satellitare"
        );
        assert_eq!(translations.translate("Untranslated"), "Untranslated");

        let missing = Translations::load(dir.path(), "de");
        assert!(missing.is_empty());
        assert_eq!(missing.translate("Ready"), "Ready");

        assert_eq!(available_languages(dir.path()), vec!["en", "it"]);
    }

    #[test]
    fn closures_act_as_translators() {
        let upper = |msgid: &str| msgid.to_uppercase();
        assert_eq!(upper.translate("ready"), "READY");
        assert_eq!(Untranslated.translate("ready"), "ready");
    }

    #[test]
    fn locale_values_map_to_language_codes() {
        assert_eq!(language_from_locale("it_IT.UTF-8").as_deref(), Some("it"));
        assert_eq!(language_from_locale("de_DE@euro").as_deref(), Some("de"));
        assert_eq!(language_from_locale("fr").as_deref(), Some("fr"));
        assert_eq!(language_from_locale("Italian_Italy.1252").as_deref(), Some("it"));
        assert_eq!(language_from_locale("Klingon_Space").as_deref(), None);
        assert_eq!(language_from_locale("C.UTF-8"), None);
        assert_eq!(language_from_locale("POSIX"), None);
    }

    #[test]
    fn detection_prefers_lc_all_then_falls_back() {
        assert_eq!(
            detect_language(env_from(&[("LC_ALL", "es_ES.UTF-8"), ("LANG", "it_IT.UTF-8")])),
            "es"
        );
        assert_eq!(
            detect_language(env_from(&[("LC_ALL", "C"), ("LANG", "it_IT.UTF-8")])),
            "it"
        );
        assert_eq!(detect_language(env_from(&[])), DEFAULT_LANGUAGE);
    }
}
