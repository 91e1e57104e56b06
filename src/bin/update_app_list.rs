use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

use hapmgr::apt::AptCache;
use hapmgr::catalog::{
    CATALOG_ARTIFACT_PATH, CatalogUpdate, TEMPLATE_PATH, build_catalog, replace_catalog,
    update_template,
};
use hapmgr::settings::load_app_settings;

fn main() -> Result<()> {
    hapmgr::init_logging();

    let settings = load_app_settings();
    let index = AptCache::new(settings.index_tool.clone());
    let build = build_catalog(&index, &settings.seed_metapackage);

    let catalog_path = Path::new(CATALOG_ARTIFACT_PATH);
    let update = replace_catalog(catalog_path, &build.packages)
        .map_err(|err| anyhow!(err))
        .context("failed to write the generated catalog")?;

    match update {
        CatalogUpdate::KeptPrevious { previous } => {
            bail!(
                "{} produced no packages; kept the existing {} entries in {}. Is the package index available?",
                settings.seed_metapackage,
                previous,
                catalog_path.display()
            );
        }
        CatalogUpdate::Unchanged => {
            println!("Catalog unchanged at {}", catalog_path.display());
        }
        CatalogUpdate::Written { .. } => {
            if build.packages.is_empty() {
                tracing::warn!(
                    "{} produced no packages; is the package index available?",
                    settings.seed_metapackage
                );
            }
            println!(
                "Wrote {} packages from {} metapackages to {}",
                build.packages.len(),
                build.expanded.len(),
                catalog_path.display()
            );
        }
    }

    let template_path = Path::new(TEMPLATE_PATH);
    let added = update_template(template_path, &build.packages)
        .map_err(|err| anyhow!(err))
        .context("failed to update the translation template")?;
    println!(
        "Added {} new entries to {}",
        added,
        template_path.display()
    );

    Ok(())
}
