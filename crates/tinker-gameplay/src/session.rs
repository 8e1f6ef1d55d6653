//! Game session: every gameplay system plus the host hooks, wired together.
//!
//! The host constructs one session at startup and forwards input events and
//! frame ticks to it. The session keeps the crafting candidate in step with the
//! crafting slots and routes hooks to whichever system needs them.

use std::sync::Arc;

use tinker_common::Vec3;
use tracing::{debug, info};

use crate::crafting::{ChanceRoll, Crafting, CraftingError, CraftingResult};
use crate::equipment::{AddOutcome, Equipment, ToggleOutcome};
use crate::events::GameEvent;
use crate::hooks::Hooks;
use crate::interaction::{CollectOutcome, PlayerInteraction, WorldItem};
use crate::item::{ItemCatalog, ItemDefinition, ItemRef};
use crate::settings::GameplaySettings;
use crate::slot::{SlotClick, SlotId};

/// What a primary click did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Applied to the focused slot
    Slot(SlotClick),
    /// Threw the held item
    Thrown(ItemRef),
    /// Nothing under the pointer
    Nothing,
}

/// A running game session.
#[derive(Debug)]
pub struct GameSession {
    catalog: Arc<ItemCatalog>,
    settings: GameplaySettings,
    equipment: Equipment,
    crafting: Crafting,
    interaction: PlayerInteraction,
    hooks: Hooks,
}

impl GameSession {
    /// Creates a session with an entropy-seeded craft roller.
    #[must_use]
    pub fn new(catalog: Arc<ItemCatalog>, settings: GameplaySettings, hooks: Hooks) -> Self {
        Self::with_roller(catalog, settings, hooks, Box::new(fastrand::Rng::new()))
    }

    /// Creates a session drawing craft rolls from `roller`.
    #[must_use]
    pub fn with_roller(
        catalog: Arc<ItemCatalog>,
        mut settings: GameplaySettings,
        hooks: Hooks,
        roller: Box<dyn ChanceRoll>,
    ) -> Self {
        settings.sanitize();
        let equipment = Equipment::new(settings.clone(), catalog.null_item().cloned());
        let crafting = Crafting::with_roller(Arc::clone(&catalog), &settings, roller);
        let interaction = PlayerInteraction::new(&settings);
        info!(
            "Session started: {} items, {} inventory slots",
            catalog.len(),
            settings.inventory_size
        );
        Self {
            catalog,
            settings,
            equipment,
            crafting,
            interaction,
            hooks,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Item catalog.
    #[must_use]
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Effective settings.
    #[must_use]
    pub fn settings(&self) -> &GameplaySettings {
        &self.settings
    }

    /// Inventory, crafting slots and hand.
    #[must_use]
    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// Crafting engine.
    #[must_use]
    pub fn crafting(&self) -> &Crafting {
        &self.crafting
    }

    /// Mutable crafting engine, for registering callbacks.
    pub fn crafting_mut(&mut self) -> &mut Crafting {
        &mut self.crafting
    }

    /// World items and pickup.
    #[must_use]
    pub fn interaction(&self) -> &PlayerInteraction {
        &self.interaction
    }

    /// Drains gameplay events published since the last call.
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.hooks.events.drain()
    }

    // ------------------------------------------------------------------------
    // World
    // ------------------------------------------------------------------------

    /// Moves the player.
    pub fn set_player_position(&mut self, position: Vec3) {
        self.interaction.set_position(position);
        self.equipment.set_player_position(position);
    }

    /// Places a collectable item in the world.
    pub fn place_world_item(&mut self, item: ItemRef, position: Vec3) {
        self.interaction.place(WorldItem::new(item, position));
    }

    /// Collects the item in range.
    pub fn collect(&mut self) -> CollectOutcome {
        self.interaction.collect(&mut self.equipment, &mut self.hooks)
    }

    /// Adds an item straight to the inventory.
    pub fn add_item(&mut self, item: ItemRef, spawn_on_overflow: bool) -> AddOutcome {
        self.equipment.add_item(item, spawn_on_overflow, &mut self.hooks)
    }

    // ------------------------------------------------------------------------
    // Inventory input
    // ------------------------------------------------------------------------

    /// Opens or closes the inventory window.
    pub fn toggle_inventory(&mut self, force_close: bool) -> ToggleOutcome {
        let outcome =
            self.equipment
                .toggle_inventory(force_close, self.crafting.is_busy(), &mut self.hooks);
        if outcome == ToggleOutcome::Closed {
            self.crafting.close_recipe_book(&mut self.hooks);
        }
        self.sync_crafting();
        outcome
    }

    /// Pointer entered a slot.
    pub fn pointer_enter(&mut self, id: SlotId) {
        self.equipment.pointer_enter(id);
    }

    /// Pointer left a slot.
    pub fn pointer_exit(&mut self, id: SlotId) {
        self.equipment.pointer_exit(id);
    }

    /// Pointer entered the throw zone.
    pub fn enter_throw_zone(&mut self) {
        self.equipment.enter_throw_zone();
    }

    /// Pointer left the throw zone.
    pub fn exit_throw_zone(&mut self) {
        self.equipment.exit_throw_zone();
    }

    /// Primary click at the pointer.
    pub fn primary_click(&mut self) -> ClickOutcome {
        if self.equipment.is_throw_zone_focused() {
            return match self.equipment.click_throw_zone(&mut self.hooks) {
                Some(item) => ClickOutcome::Thrown(item),
                None => ClickOutcome::Nothing,
            };
        }
        let outcome = match self.equipment.click_focused() {
            Some(click) => ClickOutcome::Slot(click),
            None => ClickOutcome::Nothing,
        };
        self.sync_crafting();
        outcome
    }

    /// Primary click on a specific slot.
    pub fn click_slot(&mut self, id: SlotId) -> SlotClick {
        let click = self.equipment.click_slot(id);
        self.sync_crafting();
        click
    }

    /// Takes an item from a slot into the hand; see [`Equipment::pick_item`].
    pub fn pick_item(&mut self, item: &ItemDefinition, id: SlotId) -> bool {
        let picked = self.equipment.pick_item(item, id);
        self.sync_crafting();
        picked
    }

    /// Opens the recipe book.
    pub fn open_recipe_book(&mut self) {
        self.crafting.open_recipe_book(&mut self.hooks);
    }

    /// Closes the recipe book.
    pub fn close_recipe_book(&mut self) {
        self.crafting.close_recipe_book(&mut self.hooks);
    }

    // ------------------------------------------------------------------------
    // Crafting
    // ------------------------------------------------------------------------

    /// Crafts the displayed candidate.
    pub fn craft(&mut self) -> CraftingResult<()> {
        let item = self
            .crafting
            .candidate()
            .map(|candidate| Arc::clone(candidate.item()))
            .ok_or(if self.crafting.is_busy() {
                CraftingError::Busy
            } else {
                CraftingError::NoCandidate
            })?;
        self.craft_item(&item)
    }

    /// Crafts `result`, which must be the displayed candidate.
    pub fn craft_item(&mut self, result: &ItemDefinition) -> CraftingResult<()> {
        self.crafting
            .craft(result, &mut self.equipment, &mut self.hooks)
    }

    // ------------------------------------------------------------------------
    // Frame
    // ------------------------------------------------------------------------

    /// Advances one frame.
    pub fn update(&mut self, dt: f32) {
        self.crafting
            .update(dt, &mut self.equipment, &mut self.hooks);
        self.sync_crafting();
        self.interaction.scan(&self.equipment, &mut self.hooks);
        self.hooks.notifier.tick(dt);
    }

    /// Tears the session down, forfeiting any running craft.
    pub fn shutdown(&mut self) -> Option<ItemRef> {
        let forfeited = self.crafting.interrupt(&mut self.hooks);
        self.crafting.close_recipe_book(&mut self.hooks);
        debug!("Session shut down");
        forfeited
    }

    fn sync_crafting(&mut self) {
        if self.equipment.take_crafting_changed() {
            self.crafting.refresh(&self.equipment);
        }
    }
}
