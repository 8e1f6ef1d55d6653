//! Item definitions and the static item catalog.
//!
//! Definitions are loaded once at startup and shared read-only through
//! [`ItemRef`]. Identity is by [`ItemId`]: two slots hold the same item type
//! when their definitions share an id.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tinker_common::ItemId;
use tracing::debug;

/// Highest allowed success chance.
pub const MAX_CHANCE: u8 = 100;

/// Catalog error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Two definitions share an id
    #[error("Duplicate item id: {0}")]
    DuplicateId(ItemId),
    /// Definition has an empty name
    #[error("Item {0} has an empty name")]
    EmptyName(ItemId),
    /// Success chance above 100
    #[error("Item {id} has chance {chance}, maximum is 100")]
    ChanceOutOfRange {
        /// Offending item
        id: ItemId,
        /// Declared chance
        chance: u8,
    },
    /// Recipe component references an id not in the catalog
    #[error("Item {id} uses unknown component {component}")]
    UnknownComponent {
        /// Recipe result
        id: ItemId,
        /// Missing component
        component: ItemId,
    },
    /// Recipe declares a number of components other than zero or two
    #[error("Item {id} declares {count} components, expected 0 or 2")]
    ComponentCount {
        /// Recipe result
        id: ItemId,
        /// Declared count
        count: usize,
    },
    /// Two recipes share the same unordered component pair
    #[error("Items {first} and {second} share the same recipe")]
    DuplicateRecipe {
        /// Earlier definition in catalog order
        first: ItemId,
        /// Later definition in catalog order
        second: ItemId,
    },
    /// The configured fallback item is not in the catalog
    #[error("Null item {0} is not in the catalog")]
    UnknownNullItem(ItemId),
    /// An item without a prefab could never be put back into the world
    #[error("Item {0} has no prefab and no null item with a prefab is configured")]
    NoWorldFallback(ItemId),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Display tier of a success chance, used for colouring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChanceTier {
    /// 25% or less
    Low,
    /// Between the other two tiers
    Medium,
    /// 75% or more
    High,
}

impl ChanceTier {
    /// Classifies a chance.
    #[must_use]
    pub const fn of(chance: u8) -> Self {
        if chance >= 75 {
            Self::High
        } else if chance > 25 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// An immutable item definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Catalog identity
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Icon asset reference
    pub icon: Option<String>,
    /// World prefab reference
    pub prefab: Option<String>,
    /// First recipe component
    pub component_a: Option<ItemId>,
    /// Second recipe component
    pub component_b: Option<ItemId>,
    /// Craft success chance (0-100)
    pub success_chance: u8,
}

impl PartialEq for ItemDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ItemDefinition {}

impl ItemDefinition {
    /// Returns the recipe pair if both components are defined.
    #[must_use]
    pub fn recipe(&self) -> Option<(ItemId, ItemId)> {
        self.component_a.zip(self.component_b)
    }

    /// Checks whether `{a, b}` equals this item's component pair, in either order.
    #[must_use]
    pub fn is_made_from(&self, a: ItemId, b: ItemId) -> bool {
        match self.recipe() {
            Some((x, y)) => (x == a && y == b) || (x == b && y == a),
            None => false,
        }
    }

    /// Returns the chance display tier.
    #[must_use]
    pub const fn chance_tier(&self) -> ChanceTier {
        ChanceTier::of(self.success_chance)
    }
}

/// Shared handle to a catalog definition.
pub type ItemRef = Arc<ItemDefinition>;

const fn default_chance() -> u8 {
    MAX_CHANCE
}

/// Authoring form of an item, as written in catalog files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Item id
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Icon asset reference
    #[serde(default)]
    pub icon: Option<String>,
    /// World prefab reference
    #[serde(default)]
    pub prefab: Option<String>,
    /// Recipe component ids
    #[serde(default)]
    pub components: Vec<ItemId>,
    /// Craft success chance (0-100)
    #[serde(default = "default_chance")]
    pub chance: u8,
}

impl ItemSpec {
    /// Creates a spec with no recipe and full chance.
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            icon: None,
            prefab: None,
            components: Vec::new(),
            chance: MAX_CHANCE,
        }
    }

    /// Sets the icon reference.
    #[must_use]
    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the prefab reference.
    #[must_use]
    pub fn prefab(mut self, prefab: impl Into<String>) -> Self {
        self.prefab = Some(prefab.into());
        self
    }

    /// Declares the two recipe components and the success chance.
    #[must_use]
    pub fn recipe(mut self, a: u32, b: u32, chance: u8) -> Self {
        self.components = vec![ItemId::new(a), ItemId::new(b)];
        self.chance = chance;
        self
    }

    fn into_definition(self) -> CatalogResult<ItemDefinition> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(self.id));
        }
        if self.chance > MAX_CHANCE {
            return Err(CatalogError::ChanceOutOfRange {
                id: self.id,
                chance: self.chance,
            });
        }
        let (component_a, component_b) = match self.components.as_slice() {
            [] => (None, None),
            [a, b] => (Some(*a), Some(*b)),
            other => {
                return Err(CatalogError::ComponentCount {
                    id: self.id,
                    count: other.len(),
                })
            },
        };
        Ok(ItemDefinition {
            id: self.id,
            name: self.name,
            icon: self.icon,
            prefab: self.prefab,
            component_a,
            component_b,
            success_chance: self.chance,
        })
    }
}

/// The static, ordered item catalog.
///
/// Catalog order is the tie-break for recipe lookup.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<ItemRef>,
    index: AHashMap<ItemId, usize>,
    null_item: Option<ItemRef>,
}

impl ItemCatalog {
    /// Builds and validates a catalog from authored specs, keeping their order.
    ///
    /// Items without a prefab are only accepted when `null_item` names an item
    /// that has one, so every item can be dropped into the world.
    pub fn from_specs(specs: Vec<ItemSpec>, null_item: Option<ItemId>) -> CatalogResult<Self> {
        let mut items: Vec<ItemRef> = Vec::with_capacity(specs.len());
        let mut index = AHashMap::with_capacity(specs.len());

        for spec in specs {
            let def = spec.into_definition()?;
            if index.insert(def.id, items.len()).is_some() {
                return Err(CatalogError::DuplicateId(def.id));
            }
            items.push(Arc::new(def));
        }

        for (position, item) in items.iter().enumerate() {
            let Some((a, b)) = item.recipe() else {
                continue;
            };
            for component in [a, b] {
                if !index.contains_key(&component) {
                    return Err(CatalogError::UnknownComponent {
                        id: item.id,
                        component,
                    });
                }
            }
            if let Some(earlier) = items[..position].iter().find(|e| e.is_made_from(a, b)) {
                return Err(CatalogError::DuplicateRecipe {
                    first: earlier.id,
                    second: item.id,
                });
            }
        }

        let null_item = match null_item {
            Some(id) => {
                let slot = index.get(&id).ok_or(CatalogError::UnknownNullItem(id))?;
                Some(Arc::clone(&items[*slot]))
            },
            None => None,
        };
        let has_fallback = null_item.as_ref().is_some_and(|n| n.prefab.is_some());
        if !has_fallback {
            if let Some(item) = items.iter().find(|i| i.prefab.is_none()) {
                return Err(CatalogError::NoWorldFallback(item.id));
            }
        }

        debug!(
            "Built item catalog: {} items, {} recipes",
            items.len(),
            items.iter().filter(|i| i.recipe().is_some()).count()
        );

        Ok(Self {
            items,
            index,
            null_item,
        })
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up a definition by id.
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&ItemRef> {
        self.index.get(&id).map(|&i| &self.items[i])
    }

    /// Iterates all definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.iter()
    }

    /// Iterates definitions that declare a two-component recipe.
    pub fn recipes(&self) -> impl Iterator<Item = &ItemRef> {
        self.items.iter().filter(|i| i.recipe().is_some())
    }

    /// Finds the first recipe whose unordered component pair is `{a, b}`.
    #[must_use]
    pub fn find_recipe(&self, a: ItemId, b: ItemId) -> Option<&ItemRef> {
        self.items.iter().find(|item| item.is_made_from(a, b))
    }

    /// Fallback definition spawned for items without a prefab.
    #[must_use]
    pub fn null_item(&self) -> Option<&ItemRef> {
        self.null_item.as_ref()
    }
}
