//! Item catalog loading.
//!
//! Catalogs are TOML files of `[[item]]` tables, kept in file order:
//!
//! ```toml
//! null_item = 99
//!
//! [[item]]
//! id = 10
//! name = "Axe"
//! icon = "axe.png"
//! prefab = "axe"
//! components = [1, 2]
//! chance = 60
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tinker_common::{ItemId, TinkerError, TinkerResult};
use tinker_gameplay::{ItemCatalog, ItemSpec};
use tracing::{debug, info, warn};

/// Catalog shipped with the binary, used when no catalog file is found.
pub const BUILTIN_CATALOG: &str = include_str!("../assets/items.toml");

/// A catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Fallback item spawned for items without a prefab; required if any exist.
    #[serde(default)]
    pub null_item: Option<ItemId>,
    /// Items in catalog order.
    #[serde(default)]
    pub item: Vec<ItemSpec>,
}

/// Parses and validates catalog TOML.
pub fn parse_catalog(source: &str) -> TinkerResult<ItemCatalog> {
    let file: CatalogFile =
        toml::from_str(source).map_err(|e| TinkerError::Serialization(e.to_string()))?;
    debug!("Parsed catalog: {} items", file.item.len());
    ItemCatalog::from_specs(file.item, file.null_item)
        .map_err(|e| TinkerError::InvalidData(e.to_string()))
}

/// Loads a catalog file.
pub fn load_catalog(path: &Path) -> TinkerResult<ItemCatalog> {
    let source = fs::read_to_string(path)?;
    let catalog = parse_catalog(&source)?;
    info!("Loaded {} items from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Loads a catalog file, falling back to the built-in catalog if it is missing.
///
/// A file that exists but fails to parse or validate is still an error.
pub fn load_or_builtin(path: &Path) -> TinkerResult<ItemCatalog> {
    if path.exists() {
        return load_catalog(path);
    }
    warn!(
        "Catalog {} not found, using built-in catalog",
        path.display()
    );
    parse_catalog(BUILTIN_CATALOG)
}
