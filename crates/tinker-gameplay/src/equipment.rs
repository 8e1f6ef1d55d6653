//! Equipment: the slot-based inventory, the crafting slot pair and the hand.
//!
//! Every slot an item can sit in lives here, together with the single item
//! held by the cursor. All item movement between them goes through this type,
//! so an item is always in exactly one slot, in the hand, or out in the world.
//!
//! Slots, the hand and the throw zone only take input while the window is
//! open.
//!
//! Changes to the crafting slots raise a flag the crafting engine picks up with
//! [`Equipment::take_crafting_changed`] to re-resolve its recipe candidate.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tinker_common::Vec3;
use tracing::{debug, warn};

use crate::events::GameEvent;
use crate::hooks::{AudioCue, Hooks};
use crate::item::{ItemDefinition, ItemRef};
use crate::settings::GameplaySettings;
use crate::slot::{CraftingSlotId, Slot, SlotClick, SlotId};

/// Message shown when an item does not fit.
pub const INVENTORY_FULL_MESSAGE: &str = "Inventory is full!";

/// Prefix of the tooltip shown over the throw zone.
pub const THROW_TOOLTIP_PREFIX: &str = "Throw: ";

/// Open/closed state of the inventory window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InventoryState {
    /// Window hidden
    #[default]
    Closed,
    /// Window shown
    Opened,
}

/// Where a tooltip is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAnchor {
    /// Next to a slot
    Slot(SlotId),
    /// At the pointer
    Cursor,
}

/// Tooltip currently shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    /// Tooltip text
    pub text: String,
    /// Anchor
    pub anchor: TooltipAnchor,
}

/// Result of [`Equipment::add_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Stored in this slot
    Stored(SlotId),
    /// Inventory full; item dropped into the world
    Dropped,
    /// Inventory full; item not spawned
    Rejected,
}

/// Result of [`Equipment::toggle_inventory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Crafting in progress; nothing changed
    Blocked,
    /// Window now open
    Opened,
    /// Window now closed and loose items returned
    Closed,
}

/// Slot storage plus the hand.
#[derive(Debug, Clone)]
pub struct Equipment {
    slots: Vec<Slot>,
    crafting_slots: [Slot; 2],
    hand: Option<ItemRef>,
    state: InventoryState,
    tooltip: Option<Tooltip>,
    throw_zone_focused: bool,
    crafting_changed: bool,
    player_position: Vec3,
    null_item: Option<ItemRef>,
    settings: GameplaySettings,
}

impl Equipment {
    /// Creates equipment with `settings.inventory_size` empty slots.
    ///
    /// `null_item` is spawned in place of items that have no prefab.
    #[must_use]
    pub fn new(settings: GameplaySettings, null_item: Option<ItemRef>) -> Self {
        let slots = (0..settings.inventory_size)
            .map(|i| Slot::new(SlotId::Inventory(i as u32)))
            .collect();
        Self {
            slots,
            crafting_slots: [
                Slot::new(SlotId::Crafting(CraftingSlotId::First)),
                Slot::new(SlotId::Crafting(CraftingSlotId::Second)),
            ],
            hand: None,
            state: InventoryState::Closed,
            tooltip: None,
            throw_zone_focused: false,
            crafting_changed: false,
            player_position: Vec3::ZERO,
            null_item,
            settings,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Inventory slots in construction order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Looks up any slot by id.
    #[must_use]
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        match id {
            SlotId::Inventory(index) => self.slots.get(index as usize),
            SlotId::Crafting(which) => Some(&self.crafting_slots[crafting_index(which)]),
        }
    }

    fn slot_mut(&mut self, id: SlotId) -> Option<&mut Slot> {
        match id {
            SlotId::Inventory(index) => self.slots.get_mut(index as usize),
            SlotId::Crafting(which) => Some(&mut self.crafting_slots[crafting_index(which)]),
        }
    }

    /// Returns a crafting slot.
    #[must_use]
    pub fn crafting_slot(&self, which: CraftingSlotId) -> &Slot {
        &self.crafting_slots[crafting_index(which)]
    }

    /// Contents of both crafting slots.
    #[must_use]
    pub fn crafting_contents(&self) -> (Option<&ItemRef>, Option<&ItemRef>) {
        (self.crafting_slots[0].get(), self.crafting_slots[1].get())
    }

    /// Item currently held by the cursor.
    #[must_use]
    pub fn picked_item(&self) -> Option<&ItemRef> {
        self.hand.as_ref()
    }

    /// Checks whether the cursor holds an item.
    #[must_use]
    pub fn has_picked_item(&self) -> bool {
        self.hand.is_some()
    }

    /// Window state.
    #[must_use]
    pub const fn state(&self) -> InventoryState {
        self.state
    }

    /// Checks whether the window is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state == InventoryState::Opened
    }

    /// Tooltip currently shown.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Checks whether the pointer is over the throw zone with an item in hand.
    #[must_use]
    pub const fn is_throw_zone_focused(&self) -> bool {
        self.throw_zone_focused
    }

    /// Slot under the pointer.
    #[must_use]
    pub fn focused_slot(&self) -> Option<SlotId> {
        self.slots
            .iter()
            .chain(self.crafting_slots.iter())
            .find(|slot| slot.is_focused())
            .map(Slot::id)
    }

    /// Updates where world drops originate.
    pub fn set_player_position(&mut self, position: Vec3) {
        self.player_position = position;
    }

    /// Returns and clears the crafting-slots-changed flag.
    pub fn take_crafting_changed(&mut self) -> bool {
        std::mem::take(&mut self.crafting_changed)
    }

    // ------------------------------------------------------------------------
    // Placement rules
    // ------------------------------------------------------------------------

    /// First empty inventory slot in construction order.
    #[must_use]
    pub fn find_available_slot(&self) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.is_empty())
    }

    /// Stores an item in the first free slot.
    ///
    /// When nothing is free the item is dropped at the player if
    /// `spawn_on_overflow` is set; the "full" message is shown either way.
    pub fn add_item(&mut self, item: ItemRef, spawn_on_overflow: bool, hooks: &mut Hooks) -> AddOutcome {
        let Some(id) = self.find_available_slot().map(Slot::id) else {
            hooks.publish(GameEvent::InventoryFull { item: item.id });
            let outcome = if spawn_on_overflow && self.spawn_in_world(&item, hooks) {
                hooks.publish(GameEvent::ItemDroppedOnOverflow { item: item.id });
                AddOutcome::Dropped
            } else {
                AddOutcome::Rejected
            };
            debug!("Inventory full, {} -> {:?}", item.name, outcome);
            hooks
                .notifier
                .show_message(INVENTORY_FULL_MESSAGE, self.settings.message_seconds);
            return outcome;
        };

        let item_id = item.id;
        if let Some(slot) = self.slot_mut(id) {
            slot.assign(item);
        }
        hooks.publish(GameEvent::ItemCollected { item: item_id, slot: id });
        hooks
            .audio
            .play_cue(AudioCue::Collect, self.settings.volumes.collect);
        AddOutcome::Stored(id)
    }

    /// Spawns an item at the player, substituting the null item for missing prefabs.
    fn spawn_in_world(&self, item: &ItemRef, hooks: &mut Hooks) -> bool {
        let spawned = if item.prefab.is_some() {
            item
        } else if let Some(null_item) = &self.null_item {
            null_item
        } else {
            debug!("{} has no prefab and no null item is configured", item.name);
            return false;
        };
        hooks.spawner.spawn_item(
            spawned,
            self.player_position,
            self.settings.drop_impulse,
            self.settings.drop_radius,
        );
        true
    }

    /// Takes `item` out of slot `id` into the hand.
    ///
    /// Does nothing unless the window is open, that slot currently holds that
    /// item and the hand is empty. Returns whether the pick happened.
    pub fn pick_item(&mut self, item: &ItemDefinition, id: SlotId) -> bool {
        if !self.is_open() {
            debug!("pick_item({}, {id}) ignored: inventory closed", item.name);
            return false;
        }
        if self.hand.is_some() {
            debug!("pick_item({}, {id}) ignored: hand is occupied", item.name);
            return false;
        }
        let Some(slot) = self.slot_mut(id).filter(|slot| slot.holds(item)) else {
            debug!("pick_item({}, {id}) ignored: no such slot/item pair", item.name);
            return false;
        };
        let taken = slot.remove();
        self.hand = taken;
        if id.is_crafting() {
            self.crafting_changed = true;
        }
        self.tooltip = None;
        true
    }

    /// Clears the hand, returning what it held.
    pub fn remove_picked_item(&mut self) -> Option<ItemRef> {
        self.hand.take()
    }

    /// Applies a primary click to a slot: pick up, place, swap or nothing.
    pub fn click_slot(&mut self, id: SlotId) -> SlotClick {
        if !self.is_open() {
            return SlotClick::Ignore;
        }
        let Some(slot) = self.slot(id) else {
            return SlotClick::Ignore;
        };
        let click = SlotClick::resolve(self.hand.as_ref(), slot.get());
        match click {
            SlotClick::Ignore => return click,
            SlotClick::PickUp => {
                if let Some(item) = slot.get().map(Arc::clone) {
                    self.pick_item(&item, id);
                }
                return click;
            },
            SlotClick::Place | SlotClick::Swap => {},
        }

        if let Some(held) = self.hand.take() {
            // The displaced item goes straight into the hand.
            let displaced = self.slot_mut(id).and_then(|slot| slot.assign(held));
            self.hand = displaced;
        }
        if id.is_crafting() {
            self.crafting_changed = true;
        }
        if self.hand.is_some() {
            self.tooltip = None;
        }
        click
    }

    /// Applies a primary click to whichever slot has pointer focus.
    pub fn click_focused(&mut self) -> Option<SlotClick> {
        self.focused_slot().map(|id| self.click_slot(id))
    }

    /// Empties both crafting slots, returning their contents.
    pub fn take_crafting_items(&mut self) -> [Option<ItemRef>; 2] {
        self.crafting_changed = true;
        [
            self.crafting_slots[0].remove(),
            self.crafting_slots[1].remove(),
        ]
    }

    // ------------------------------------------------------------------------
    // Window
    // ------------------------------------------------------------------------

    /// Opens or closes the window; `force_close` always closes.
    ///
    /// Blocked while `crafting_busy`. Closing returns the hand item and both
    /// crafting-slot items to the inventory (dropping them into the world if it
    /// is full). An item that can be neither stored nor dropped stays where it
    /// was.
    pub fn toggle_inventory(&mut self, force_close: bool, crafting_busy: bool, hooks: &mut Hooks) -> ToggleOutcome {
        if crafting_busy {
            debug!("Inventory toggle blocked while crafting");
            return ToggleOutcome::Blocked;
        }

        self.state = match (force_close, self.state) {
            (true, _) | (false, InventoryState::Opened) => InventoryState::Closed,
            (false, InventoryState::Closed) => InventoryState::Opened,
        };

        let outcome = if self.state == InventoryState::Opened {
            hooks.publish(GameEvent::InventoryOpened);
            ToggleOutcome::Opened
        } else {
            if let Some(item) = self.remove_picked_item() {
                self.hand = self.return_to_inventory(item, hooks);
            }
            for index in 0..self.crafting_slots.len() {
                if let Some(item) = self.crafting_slots[index].remove() {
                    self.crafting_changed = true;
                    if let Some(kept) = self.return_to_inventory(item, hooks) {
                        self.crafting_slots[index].assign(kept);
                    }
                }
            }
            for slot in self.slots.iter_mut().chain(self.crafting_slots.iter_mut()) {
                slot.set_focused(false);
            }
            self.throw_zone_focused = false;
            self.hide_tooltip();
            hooks.publish(GameEvent::InventoryClosed);
            ToggleOutcome::Closed
        };

        hooks
            .audio
            .play_cue(AudioCue::Inventory, self.settings.volumes.inventory);
        outcome
    }

    /// Stores or drops `item`, handing it back if neither is possible.
    fn return_to_inventory(&mut self, item: ItemRef, hooks: &mut Hooks) -> Option<ItemRef> {
        match self.add_item(Arc::clone(&item), true, hooks) {
            AddOutcome::Rejected => {
                warn!("{} could not be returned; keeping it in place", item.name);
                Some(item)
            },
            AddOutcome::Stored(_) | AddOutcome::Dropped => None,
        }
    }

    // ------------------------------------------------------------------------
    // Pointer focus, tooltips, throw zone
    // ------------------------------------------------------------------------

    /// Pointer entered a slot.
    pub fn pointer_enter(&mut self, id: SlotId) {
        if !self.is_open() {
            return;
        }
        let Some(slot) = self.slot_mut(id) else {
            return;
        };
        slot.set_focused(true);
        if let Some(item) = slot.get().map(Arc::clone) {
            self.show_tooltip(&item, TooltipAnchor::Slot(id));
        }
    }

    /// Pointer left a slot.
    pub fn pointer_exit(&mut self, id: SlotId) {
        if let Some(slot) = self.slot_mut(id) {
            slot.set_focused(false);
        }
        self.hide_tooltip();
    }

    fn show_tooltip(&mut self, item: &ItemDefinition, anchor: TooltipAnchor) {
        let throwing = anchor == TooltipAnchor::Cursor;
        if !throwing && self.hand.is_some() {
            self.hide_tooltip();
            return;
        }
        let prefix = if throwing { THROW_TOOLTIP_PREFIX } else { "" };
        self.tooltip = Some(Tooltip {
            text: format!("{prefix}{}", item.name),
            anchor,
        });
    }

    /// Hides the tooltip.
    pub fn hide_tooltip(&mut self) {
        self.tooltip = None;
    }

    /// Pointer entered the throw zone.
    pub fn enter_throw_zone(&mut self) {
        if !self.is_open() {
            return;
        }
        if let Some(item) = self.hand.clone() {
            self.throw_zone_focused = true;
            self.show_tooltip(&item, TooltipAnchor::Cursor);
        }
    }

    /// Pointer left the throw zone.
    pub fn exit_throw_zone(&mut self) {
        self.throw_zone_focused = false;
        self.hide_tooltip();
    }

    /// Primary click while over the throw zone: throws the held item.
    ///
    /// The item stays in the hand if it cannot be spawned.
    pub fn click_throw_zone(&mut self, hooks: &mut Hooks) -> Option<ItemRef> {
        if !self.is_open() || !self.throw_zone_focused {
            return None;
        }
        let item = self.remove_picked_item()?;
        if !self.throw_item(&item, hooks) {
            self.hand = Some(item);
            return None;
        }
        self.hide_tooltip();
        Some(item)
    }

    /// Throws an item into the world at the player.
    ///
    /// Returns false when nothing could be spawned (no prefab and no null item).
    pub fn throw_item(&self, item: &ItemRef, hooks: &mut Hooks) -> bool {
        let thrown = self.spawn_in_world(item, hooks);
        if thrown {
            hooks.publish(GameEvent::ItemThrown { item: item.id });
        }
        thrown
    }
}

const fn crafting_index(which: CraftingSlotId) -> usize {
    match which {
        CraftingSlotId::First => 0,
        CraftingSlotId::Second => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::recording;
    use crate::item::fixtures;
    use tinker_common::ItemId;

    const FIRST: SlotId = SlotId::Crafting(CraftingSlotId::First);
    const SECOND: SlotId = SlotId::Crafting(CraftingSlotId::Second);

    fn equipment_with(size: usize) -> Equipment {
        let catalog = fixtures::catalog();
        let settings = GameplaySettings {
            inventory_size: size,
            ..GameplaySettings::default()
        };
        Equipment::new(settings, catalog.null_item().cloned())
    }

    /// Equipment with its window already open.
    fn opened(size: usize) -> Equipment {
        let mut equipment = equipment_with(size);
        let (mut hooks, _) = recording::hooks();
        equipment.toggle_inventory(false, false, &mut hooks);
        equipment
    }

    fn ids(equipment: &Equipment) -> Vec<Option<u32>> {
        equipment
            .slots()
            .iter()
            .map(|s| s.get().map(|i| i.id.raw()))
            .collect()
    }

    #[test]
    fn test_default_inventory_has_24_slots() {
        let equipment = Equipment::new(GameplaySettings::default(), None);
        assert_eq!(equipment.slots().len(), 24);
        assert_eq!(
            equipment.find_available_slot().map(Slot::id),
            Some(SlotId::Inventory(0))
        );
    }

    #[test]
    fn test_add_item_fills_lowest_free_slot() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let mut equipment = opened(3);

        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);
        equipment.add_item(fixtures::item(&catalog, 2), false, &mut hooks);
        equipment.pick_item(&fixtures::item(&catalog, 1), SlotId::Inventory(0));
        equipment.remove_picked_item();

        let outcome = equipment.add_item(fixtures::item(&catalog, 3), false, &mut hooks);
        assert_eq!(outcome, AddOutcome::Stored(SlotId::Inventory(0)));
        assert_eq!(ids(&equipment), vec![Some(3), Some(2), None]);
        assert_eq!(recorder.cues(), vec![AudioCue::Collect; 3]);
    }

    #[test]
    fn test_overflow_with_spawn() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let mut equipment = equipment_with(1);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);
        let before = ids(&equipment);

        let outcome = equipment.add_item(fixtures::item(&catalog, 2), true, &mut hooks);

        assert_eq!(outcome, AddOutcome::Dropped);
        assert_eq!(ids(&equipment), before);
        assert_eq!(recorder.spawned(), vec![ItemId::new(2)]);
        assert_eq!(recorder.messages(), vec![INVENTORY_FULL_MESSAGE.to_string()]);
    }

    #[test]
    fn test_overflow_without_spawn() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let mut equipment = equipment_with(1);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);
        hooks.events.drain();

        let outcome = equipment.add_item(fixtures::item(&catalog, 2), false, &mut hooks);

        assert_eq!(outcome, AddOutcome::Rejected);
        assert!(recorder.spawned().is_empty());
        assert_eq!(recorder.messages(), vec![INVENTORY_FULL_MESSAGE.to_string()]);
        assert_eq!(
            hooks.events.drain(),
            vec![GameEvent::InventoryFull { item: ItemId::new(2) }]
        );
    }

    #[test]
    fn test_overflow_spawns_null_item_without_prefab() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let mut equipment = equipment_with(0);

        // Herb (3) has no prefab.
        let outcome = equipment.add_item(fixtures::item(&catalog, 3), true, &mut hooks);
        assert_eq!(outcome, AddOutcome::Dropped);
        assert_eq!(recorder.spawned(), vec![ItemId::new(99)]);
    }

    #[test]
    fn test_pick_item_mismatch_is_noop() {
        let catalog = fixtures::catalog();
        let (mut hooks, _) = recording::hooks();
        let mut equipment = opened(2);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);

        assert!(!equipment.pick_item(&fixtures::item(&catalog, 2), SlotId::Inventory(0)));
        assert!(!equipment.pick_item(&fixtures::item(&catalog, 1), SlotId::Inventory(1)));
        assert!(!equipment.pick_item(&fixtures::item(&catalog, 1), SlotId::Inventory(40)));
        assert!(!equipment.has_picked_item());
        assert_eq!(ids(&equipment), vec![Some(1), None]);
    }

    #[test]
    fn test_click_pick_place_and_swap() {
        let catalog = fixtures::catalog();
        let (mut hooks, _) = recording::hooks();
        let mut equipment = opened(2);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);
        equipment.add_item(fixtures::item(&catalog, 2), false, &mut hooks);

        assert_eq!(equipment.click_slot(SlotId::Inventory(0)), SlotClick::PickUp);
        assert_eq!(equipment.picked_item().map(|i| i.id.raw()), Some(1));
        assert_eq!(ids(&equipment), vec![None, Some(2)]);

        assert_eq!(equipment.click_slot(SlotId::Inventory(1)), SlotClick::Swap);
        assert_eq!(equipment.picked_item().map(|i| i.id.raw()), Some(2));
        assert_eq!(ids(&equipment), vec![None, Some(1)]);

        assert_eq!(equipment.click_slot(SlotId::Inventory(0)), SlotClick::Place);
        assert!(!equipment.has_picked_item());
        assert_eq!(ids(&equipment), vec![Some(2), Some(1)]);

        assert_eq!(equipment.click_slot(FIRST), SlotClick::Ignore);
    }

    #[test]
    fn test_click_same_item_is_noop() {
        let catalog = fixtures::catalog();
        let (mut hooks, _) = recording::hooks();
        let mut equipment = opened(2);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);

        equipment.click_slot(SlotId::Inventory(0));
        assert_eq!(equipment.click_slot(SlotId::Inventory(1)), SlotClick::Ignore);
        assert_eq!(equipment.picked_item().map(|i| i.id.raw()), Some(1));
        assert_eq!(ids(&equipment), vec![None, Some(1)]);
    }

    #[test]
    fn test_crafting_slot_changes_raise_flag() {
        let catalog = fixtures::catalog();
        let (mut hooks, _) = recording::hooks();
        let mut equipment = opened(2);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);

        equipment.click_slot(SlotId::Inventory(0));
        assert!(!equipment.take_crafting_changed());

        equipment.click_slot(SECOND);
        assert!(equipment.take_crafting_changed());
        assert!(!equipment.take_crafting_changed());
        assert_eq!(
            equipment.crafting_slot(CraftingSlotId::Second).get().map(|i| i.id.raw()),
            Some(1)
        );

        equipment.click_slot(SECOND);
        assert!(equipment.take_crafting_changed());
        assert!(equipment.has_picked_item());
    }

    #[test]
    fn test_toggle_close_returns_loose_items() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let mut equipment = equipment_with(4);
        assert_eq!(
            equipment.toggle_inventory(false, false, &mut hooks),
            ToggleOutcome::Opened
        );

        for id in [1, 2, 3] {
            equipment.add_item(fixtures::item(&catalog, id), false, &mut hooks);
        }
        equipment.click_slot(SlotId::Inventory(0));
        equipment.click_slot(FIRST);
        equipment.click_slot(SlotId::Inventory(1));
        equipment.click_slot(SECOND);
        equipment.click_slot(SlotId::Inventory(2));
        assert_eq!(ids(&equipment), vec![None, None, None, None]);

        assert_eq!(
            equipment.toggle_inventory(false, false, &mut hooks),
            ToggleOutcome::Closed
        );
        assert!(!equipment.has_picked_item());
        assert_eq!(equipment.crafting_contents(), (None, None));
        assert_eq!(ids(&equipment), vec![Some(3), Some(1), Some(2), None]);
        assert!(recorder.cues().contains(&AudioCue::Inventory));
    }

    #[test]
    fn test_toggle_blocked_while_crafting() {
        let (mut hooks, recorder) = recording::hooks();
        let mut equipment = equipment_with(1);

        assert_eq!(
            equipment.toggle_inventory(false, true, &mut hooks),
            ToggleOutcome::Blocked
        );
        assert_eq!(equipment.state(), InventoryState::Closed);
        assert!(recorder.cues().is_empty());
    }

    #[test]
    fn test_force_close() {
        let (mut hooks, _) = recording::hooks();
        let mut equipment = equipment_with(1);
        equipment.toggle_inventory(false, false, &mut hooks);
        assert!(equipment.is_open());
        equipment.toggle_inventory(true, false, &mut hooks);
        assert!(!equipment.is_open());
        equipment.toggle_inventory(true, false, &mut hooks);
        assert!(!equipment.is_open());
    }

    #[test]
    fn test_tooltips_follow_focus_and_hand() {
        let catalog = fixtures::catalog();
        let (mut hooks, _) = recording::hooks();
        let mut equipment = opened(2);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);
        equipment.add_item(fixtures::item(&catalog, 2), false, &mut hooks);

        equipment.pointer_enter(SlotId::Inventory(0));
        assert_eq!(equipment.focused_slot(), Some(SlotId::Inventory(0)));
        assert_eq!(
            equipment.tooltip(),
            Some(&Tooltip {
                text: "Wood".to_string(),
                anchor: TooltipAnchor::Slot(SlotId::Inventory(0)),
            })
        );

        assert_eq!(equipment.click_focused(), Some(SlotClick::PickUp));
        assert!(equipment.tooltip().is_none());
        equipment.pointer_exit(SlotId::Inventory(0));

        equipment.pointer_enter(SlotId::Inventory(1));
        assert!(equipment.tooltip().is_none());
        equipment.pointer_exit(SlotId::Inventory(1));
        assert_eq!(equipment.focused_slot(), None);
    }

    #[test]
    fn test_throw_zone() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let mut equipment = opened(1);
        equipment.set_player_position(Vec3::new(1.0, 0.0, 2.0));

        equipment.enter_throw_zone();
        assert!(equipment.click_throw_zone(&mut hooks).is_none());
        equipment.exit_throw_zone();

        equipment.add_item(fixtures::item(&catalog, 10), false, &mut hooks);
        equipment.click_slot(SlotId::Inventory(0));
        equipment.enter_throw_zone();
        assert_eq!(
            equipment.tooltip().map(|t| t.text.as_str()),
            Some("Throw: Axe")
        );

        let thrown = equipment.click_throw_zone(&mut hooks);
        assert_eq!(thrown.map(|i| i.id.raw()), Some(10));
        assert!(!equipment.has_picked_item());
        assert!(equipment.tooltip().is_none());
        assert_eq!(recorder.spawned(), vec![ItemId::new(10)]);
        assert_eq!(
            recorder.0.borrow().spawns[0].1,
            Vec3::new(1.0, 0.0, 2.0)
        );
    }

    #[test]
    fn test_closed_inventory_ignores_input() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let mut equipment = equipment_with(2);
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);

        assert_eq!(equipment.click_slot(SlotId::Inventory(0)), SlotClick::Ignore);
        assert!(!equipment.pick_item(&fixtures::item(&catalog, 1), SlotId::Inventory(0)));
        equipment.pointer_enter(SlotId::Inventory(0));
        assert_eq!(equipment.click_focused(), None);
        assert!(equipment.tooltip().is_none());
        assert_eq!(equipment.click_slot(FIRST), SlotClick::Ignore);

        assert!(!equipment.has_picked_item());
        assert_eq!(ids(&equipment), vec![Some(1), None]);
        assert_eq!(equipment.crafting_contents(), (None, None));
        assert!(!equipment.take_crafting_changed());

        // Opening, picking up and closing leaves nothing for the throw zone.
        equipment.toggle_inventory(false, false, &mut hooks);
        equipment.click_slot(SlotId::Inventory(0));
        equipment.enter_throw_zone();
        equipment.toggle_inventory(false, false, &mut hooks);
        assert!(!equipment.is_throw_zone_focused());
        equipment.enter_throw_zone();
        assert!(equipment.click_throw_zone(&mut hooks).is_none());
        assert!(recorder.spawned().is_empty());
        assert_eq!(ids(&equipment), vec![Some(1), None]);
    }

    #[test]
    fn test_close_keeps_items_that_cannot_leave() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let settings = GameplaySettings {
            inventory_size: 1,
            ..GameplaySettings::default()
        };
        let mut equipment = Equipment::new(settings, None);
        equipment.toggle_inventory(false, false, &mut hooks);

        // Herb (3) has no prefab and there is no null item.
        equipment.add_item(fixtures::item(&catalog, 3), false, &mut hooks);
        equipment.click_slot(SlotId::Inventory(0));
        equipment.add_item(fixtures::item(&catalog, 1), false, &mut hooks);

        assert_eq!(
            equipment.toggle_inventory(false, false, &mut hooks),
            ToggleOutcome::Closed
        );
        assert_eq!(equipment.picked_item().map(|i| i.id.raw()), Some(3));
        assert_eq!(ids(&equipment), vec![Some(1)]);
        assert!(recorder.spawned().is_empty());

        equipment.toggle_inventory(false, false, &mut hooks);
        equipment.enter_throw_zone();
        assert!(equipment.click_throw_zone(&mut hooks).is_none());
        assert_eq!(equipment.picked_item().map(|i| i.id.raw()), Some(3));
    }

    #[test]
    fn test_throw_without_prefab_or_null_item() {
        let catalog = fixtures::catalog();
        let (mut hooks, recorder) = recording::hooks();
        let equipment = Equipment::new(GameplaySettings::default(), None);

        assert!(!equipment.throw_item(&fixtures::item(&catalog, 3), &mut hooks));
        assert!(equipment.throw_item(&fixtures::item(&catalog, 1), &mut hooks));
        assert_eq!(recorder.spawned(), vec![ItemId::new(1)]);
        assert_eq!(
            hooks.events.drain(),
            vec![GameEvent::ItemThrown { item: ItemId::new(1) }]
        );
    }
}
