use std::collections::HashSet;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Deserialize)]
struct CatalogArtifact {
    packages: Vec<CatalogEntry>,
}

#[derive(Deserialize)]
struct CatalogEntry {
    app: String,
    pack: String,
    desc: String,
}

const CATALOG_PATH: &str = "data/generated/packages.json";

fn main() {
    println!("cargo:rerun-if-changed={CATALOG_PATH}");
    generate_catalog();
}

fn generate_catalog() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR set by Cargo"));
    let dest_path = out_dir.join("catalog_data.rs");

    let catalog_path = Path::new(CATALOG_PATH);
    let raw = fs::read_to_string(catalog_path);

    let mut file = File::create(&dest_path).expect("create catalog_data.rs");

    let mut rows = Vec::new();
    if let Ok(raw) = raw {
        match serde_json::from_str::<CatalogArtifact>(&raw) {
            Ok(data) => {
                let mut seen = HashSet::new();
                for entry in data.packages {
                    let app = entry.app.trim().to_string();
                    if app.is_empty() || !seen.insert(app.clone()) {
                        continue;
                    }
                    rows.push((app, entry.pack, entry.desc));
                }
            }
            Err(err) => {
                eprintln!("Failed to parse catalog artifact: {}", err);
            }
        }
    } else if let Err(err) = raw {
        eprintln!(
            "Failed to read catalog artifact {}: {}",
            catalog_path.display(),
            err
        );
    }

    let mut index_builder = phf_codegen::Map::new();
    for (position, (app, _, _)) in rows.iter().enumerate() {
        index_builder.entry(app.as_str(), position.to_string());
    }

    writeln!(
        &mut file,
        "pub(super) static CATALOG_ROWS: &[(&str, &str, &str)] = &["
    )
    .expect("write catalog_data.rs");
    for (app, pack, desc) in &rows {
        writeln!(&mut file, "    ({app:?}, {pack:?}, {desc:?}),").expect("write catalog_data.rs");
    }
    writeln!(&mut file, "];").expect("write catalog_data.rs");

    writeln!(
        &mut file,
        "pub(super) static CATALOG_INDEX: phf::Map<&'static str, usize> = {};",
        index_builder.build()
    )
    .expect("write catalog_data.rs");
}
