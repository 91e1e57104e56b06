use crate::locale::Translate;
use crate::types::PackageEntry;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/catalog_data.rs"));
}

fn row_entry(row: &(&str, &str, &str), translator: &dyn Translate) -> PackageEntry {
    let (app, pack, desc) = *row;
    PackageEntry {
        app: app.to_string(),
        pack: translator.translate(pack),
        desc: translator.translate(desc),
    }
}

/// The catalog compiled into the binary, in catalog order, with category and
/// description run through `translator`.
pub fn catalog(translator: &dyn Translate) -> Vec<PackageEntry> {
    generated::CATALOG_ROWS
        .iter()
        .map(|row| row_entry(row, translator))
        .collect()
}

pub fn lookup(app: &str, translator: &dyn Translate) -> Option<PackageEntry> {
    let position = generated::CATALOG_INDEX.get(app).copied()?;
    generated::CATALOG_ROWS
        .get(position)
        .map(|row| row_entry(row, translator))
}

pub fn contains(app: &str) -> bool {
    generated::CATALOG_INDEX.contains_key(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::Untranslated;

    #[test]
    fn embedded_catalog_is_sorted_and_unique() {
        let entries = catalog(&Untranslated);
        let keys: Vec<String> = entries.iter().map(|e| e.app.to_lowercase()).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn lookup_matches_catalog_rows() {
        for entry in catalog(&Untranslated) {
            assert!(contains(&entry.app));
            assert_eq!(lookup(&entry.app, &Untranslated), Some(entry));
        }
        assert!(!contains("not-a-hamradio-package"));
    }

    #[test]
    fn translator_applies_to_category_and_description() {
        let shout = |msgid: &str| msgid.to_uppercase();
        for (plain, translated) in catalog(&Untranslated).iter().zip(catalog(&shout)) {
            assert_eq!(translated.app, plain.app);
            assert_eq!(translated.pack, plain.pack.to_uppercase());
            assert_eq!(translated.desc, plain.desc.to_uppercase());
        }
    }
}
