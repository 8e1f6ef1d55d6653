//! # Tinker Gameplay
//!
//! Gameplay rules for Tinker.
//!
//! This crate provides the inventory and crafting rules engine:
//! - Item catalog with two-component recipes
//! - Slot model shared by inventory and crafting slots
//! - Equipment (inventory slots, crafting slots, hand, throw zone)
//! - Timed, probabilistic two-slot crafting
//! - Recipe book listing
//! - World item pickup
//! - Host hooks and an event bus for inter-system communication

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod crafting;
pub mod equipment;
pub mod events;
pub mod hooks;
pub mod interaction;
pub mod item;
pub mod recipe_book;
pub mod session;
pub mod settings;
pub mod slot;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crafting::*;
    pub use crate::equipment::*;
    pub use crate::events::*;
    pub use crate::hooks::*;
    pub use crate::interaction::*;
    pub use crate::item::*;
    pub use crate::recipe_book::*;
    pub use crate::session::*;
    pub use crate::settings::*;
    pub use crate::slot::*;
}

pub use prelude::*;
