//! Recipe book listing.

use serde::{Deserialize, Serialize};
use tinker_common::ItemId;

use crate::item::ItemCatalog;

/// One listed recipe: two component icons and the result icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeRow {
    /// First component
    pub first: ItemId,
    /// Second component
    pub second: ItemId,
    /// Result
    pub result: ItemId,
    /// First component icon
    pub first_icon: Option<String>,
    /// Second component icon
    pub second_icon: Option<String>,
    /// Result icon
    pub result_icon: Option<String>,
}

/// Side panel listing every catalog recipe while open.
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    open: bool,
    rows: Vec<RecipeRow>,
}

impl RecipeBook {
    /// Creates a closed, empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks whether the book is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    /// Rows rendered while open.
    #[must_use]
    pub fn rows(&self) -> &[RecipeRow] {
        &self.rows
    }

    /// Opens the book, listing recipes in catalog order.
    ///
    /// Returns false if it was already open.
    pub fn open(&mut self, catalog: &ItemCatalog) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.rows = catalog
            .recipes()
            .filter_map(|item| {
                let (a, b) = item.recipe()?;
                Some(RecipeRow {
                    first: a,
                    second: b,
                    result: item.id,
                    first_icon: catalog.get(a).and_then(|i| i.icon.clone()),
                    second_icon: catalog.get(b).and_then(|i| i.icon.clone()),
                    result_icon: item.icon.clone(),
                })
            })
            .collect();
        true
    }

    /// Closes the book and discards its rows.
    pub fn close(&mut self) {
        self.open = false;
        self.rows.clear();
    }
}
