mod artifact;
mod builder;
mod embedded;
pub(crate) mod template;

pub use artifact::{CATALOG_ARTIFACT_PATH, CatalogUpdate, replace_catalog};
pub use builder::{CatalogBuild, DEFAULT_SEED_METAPACKAGE, build_catalog};
pub use embedded::{catalog, contains, lookup};
pub use template::{TEMPLATE_PATH, update_template};
