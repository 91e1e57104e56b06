use std::collections::{HashSet, VecDeque};

use crate::apt::{PackageIndex, category_label, is_virtual};
use crate::types::PackageEntry;

pub const DEFAULT_SEED_METAPACKAGE: &str = "hamradio-all";

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct CatalogBuild {
    /// Sorted by lower-cased `app`, unique on `app`.
    pub packages: Vec<PackageEntry>,
    /// Metapackages in the order they were expanded.
    pub expanded: Vec<String>,
}

struct MetaQueue {
    pending: VecDeque<String>,
    queued: HashSet<String>,
    done: HashSet<String>,
}

impl MetaQueue {
    fn new(seed: &str) -> Self {
        let mut queue = Self {
            pending: VecDeque::new(),
            queued: HashSet::new(),
            done: HashSet::new(),
        };
        queue.push(seed);
        queue
    }

    fn push(&mut self, meta: &str) -> bool {
        if self.done.contains(meta) || self.queued.contains(meta) {
            return false;
        }
        self.queued.insert(meta.to_string());
        self.pending.push_back(meta.to_string());
        true
    }

    fn pop(&mut self) -> Option<String> {
        let meta = self.pending.pop_front()?;
        self.queued.remove(&meta);
        self.done.insert(meta.clone());
        Some(meta)
    }
}

/// Breadth-first expansion of the metapackage tree rooted at `seed`.
pub fn build_catalog(index: &dyn PackageIndex, seed: &str) -> CatalogBuild {
    let mut queue = MetaQueue::new(seed);
    let mut seen_apps: HashSet<String> = HashSet::new();
    let mut build = CatalogBuild::default();

    while let Some(meta) = queue.pop() {
        let category = category_label(&meta);
        let dependencies = index.dependency_tree(&meta);
        tracing::debug!(
            metapackage = %meta,
            dependencies = dependencies.len(),
            "expanding metapackage"
        );

        for dependency in dependencies {
            if is_virtual(&dependency) {
                continue;
            }

            let Some(details) = index.package_info(&dependency) else {
                continue;
            };
            if details.name.is_empty() {
                continue;
            }

            if details.is_metapackage {
                if queue.push(&details.name) {
                    tracing::debug!(parent = %meta, metapackage = %details.name, "queued metapackage");
                }
                continue;
            }

            let Some(description) = details.description else {
                continue;
            };
            if !seen_apps.insert(details.name.clone()) {
                continue;
            }
            build.packages.push(PackageEntry {
                app: details.name,
                pack: category.clone(),
                desc: description,
            });
        }

        build.expanded.push(meta);
    }

    build.packages.sort_by_cached_key(PackageEntry::sort_key);

    tracing::info!(
        packages = build.packages.len(),
        metapackages = build.expanded.len(),
        "catalog built from {}",
        seed
    );

    build
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;

    use super::*;
    use crate::types::PackageDetails;

    #[derive(Default)]
    struct FakeIndex {
        depends: HashMap<String, Vec<String>>,
        info: HashMap<String, PackageDetails>,
        expansions: RefCell<Vec<String>>,
    }

    impl FakeIndex {
        fn meta(mut self, name: &str, deps: &[&str]) -> Self {
            self.depends.insert(
                name.to_string(),
                deps.iter().map(|dep| dep.to_string()).collect(),
            );
            self.info.insert(
                name.to_string(),
                PackageDetails {
                    name: name.to_string(),
                    description: Some(format!("{name} metapackage")),
                    is_metapackage: true,
                },
            );
            self
        }

        fn app(mut self, name: &str, desc: &str) -> Self {
            self.info.insert(
                name.to_string(),
                PackageDetails {
                    name: name.to_string(),
                    description: Some(desc.to_string()),
                    is_metapackage: false,
                },
            );
            self
        }
    }

    impl PackageIndex for FakeIndex {
        fn dependency_tree(&self, package: &str) -> Vec<String> {
            self.expansions.borrow_mut().push(package.to_string());
            self.depends.get(package).cloned().unwrap_or_default()
        }

        fn package_info(&self, package: &str) -> Option<PackageDetails> {
            self.info.get(package).cloned()
        }
    }

    fn entry(app: &str, pack: &str, desc: &str) -> PackageEntry {
        PackageEntry {
            app: app.to_string(),
            pack: pack.to_string(),
            desc: desc.to_string(),
        }
    }

    #[test]
    fn skips_virtual_records_app_and_queues_sub_metapackage() {
        let index = FakeIndex::default()
            .meta("hamradio-all", &["<virtual>", "libfoo", "hamradio-sub"])
            .meta("hamradio-sub", &[])
            .app("libfoo", "Foo library");

        let build = build_catalog(&index, "hamradio-all");

        assert_eq!(build.packages, vec![entry("libfoo", "all", "Foo library")]);
        assert_eq!(build.expanded, vec!["hamradio-all", "hamradio-sub"]);
    }

    #[test]
    fn cyclic_metapackages_are_expanded_once() {
        let index = FakeIndex::default()
            .meta("hamradio-all", &["hamradio-a", "hamradio-b"])
            .meta("hamradio-a", &["hamradio-b", "hamradio-all", "fldigi"])
            .meta("hamradio-b", &["hamradio-a", "hamradio-b", "wsjtx"])
            .app("fldigi", "digital modem program")
            .app("wsjtx", "weak signal communication");

        let build = build_catalog(&index, "hamradio-all");

        assert_eq!(build.expanded, vec!["hamradio-all", "hamradio-a", "hamradio-b"]);
        assert_eq!(
            index.expansions.borrow().as_slice(),
            ["hamradio-all", "hamradio-a", "hamradio-b"]
        );
        assert_eq!(build.packages.len(), 2);
    }

    #[test]
    fn first_seen_category_wins_for_duplicate_apps() {
        let index = FakeIndex::default()
            .meta("hamradio-all", &["hamradio-logging", "hamradio-contest"])
            .meta("hamradio-logging", &["tlf", "cqrlog"])
            .meta("hamradio-contest", &["tlf"])
            .app("tlf", "console based contest logger")
            .app("cqrlog", "logging program");

        let build = build_catalog(&index, "hamradio-all");

        assert_eq!(
            build.packages,
            vec![
                entry("cqrlog", "logging", "logging program"),
                entry("tlf", "logging", "console based contest logger"),
            ]
        );
    }

    #[test]
    fn entries_sort_case_insensitively() {
        let index = FakeIndex::default()
            .meta("hamradio-all", &["zApp", "Bapp", "aardvark"])
            .app("zApp", "z")
            .app("Bapp", "b")
            .app("aardvark", "a");

        let build = build_catalog(&index, "hamradio-all");
        let apps: Vec<_> = build.packages.iter().map(|p| p.app.as_str()).collect();

        assert_eq!(apps, vec!["aardvark", "Bapp", "zApp"]);
    }

    #[test]
    fn unresolved_and_description_less_packages_are_skipped() {
        let mut index = FakeIndex::default()
            .meta("hamradio-all", &["ghost", "nodesc", "flrig"])
            .app("flrig", "transceiver control");
        index.info.insert(
            "nodesc".to_string(),
            PackageDetails {
                name: "nodesc".to_string(),
                description: None,
                is_metapackage: false,
            },
        );

        let build = build_catalog(&index, "hamradio-all");

        assert_eq!(
            build.packages,
            vec![entry("flrig", "all", "transceiver control")]
        );
    }

    #[test]
    fn unknown_seed_yields_empty_catalog() {
        let index = FakeIndex::default();
        let build = build_catalog(&index, "hamradio-all");
        assert!(build.packages.is_empty());
        assert_eq!(build.expanded, vec!["hamradio-all"]);
    }

    #[test]
    fn rebuilding_an_unchanged_graph_is_identical() {
        let index = FakeIndex::default()
            .meta("hamradio-all", &["hamradio-sdr", "gpredict"])
            .meta("hamradio-sdr", &["gqrx-sdr", "gnuradio"])
            .app("gpredict", "Satellite tracking program")
            .app("gqrx-sdr", "Software defined radio receiver")
            .app("gnuradio", "GNU Radio Software Radio Toolkit");

        let first = build_catalog(&index, "hamradio-all");
        let second = build_catalog(&index, "hamradio-all");

        assert_eq!(first, second);
    }
}
