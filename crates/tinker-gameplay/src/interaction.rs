//! Player interaction with collectable items placed in the world.
//!
//! The player scans for world items in range every frame. The last item found
//! becomes the interaction target and drives the on-screen prompt. Collecting
//! moves a copy of the item into the inventory and respawns the world item at a
//! random spot inside the respawn area.

use tinker_common::{Bounds, Vec3};
use tracing::{debug, trace};

use crate::equipment::{AddOutcome, Equipment, INVENTORY_FULL_MESSAGE};
use crate::hooks::Hooks;
use crate::item::ItemRef;
use crate::settings::GameplaySettings;
use crate::slot::SlotId;

/// Prompt prefix shown while an item is in range.
pub const COLLECT_HINT_PREFIX: &str = "Press [E] to collect: ";

/// Message prefix shown after collecting an item.
pub const NEW_ITEM_PREFIX: &str = "New item: ";

/// A collectable item placed in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldItem {
    /// Item type
    pub item: ItemRef,
    /// World position
    pub position: Vec3,
}

impl WorldItem {
    /// Places an item at a position.
    #[must_use]
    pub fn new(item: ItemRef, position: Vec3) -> Self {
        Self { item, position }
    }
}

/// Result of [`PlayerInteraction::collect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectOutcome {
    /// Item stored in this slot and the world item respawned
    Collected(SlotId),
    /// No free slot; the world item stays put
    InventoryFull,
    /// Nothing in range
    NothingInRange,
    /// Inventory window is open
    Blocked,
}

/// Scans for and collects world items around the player.
#[derive(Debug)]
pub struct PlayerInteraction {
    items: Vec<WorldItem>,
    position: Vec3,
    target: Option<usize>,
    hint: String,
    detection_range: f32,
    respawn_area: Bounds,
    respawn_height: f32,
    message_seconds: f32,
    rng: fastrand::Rng,
}

impl PlayerInteraction {
    /// Creates an interaction system with no world items.
    #[must_use]
    pub fn new(settings: &GameplaySettings) -> Self {
        Self::with_rng(settings, fastrand::Rng::new())
    }

    /// Creates an interaction system drawing respawn positions from `rng`.
    #[must_use]
    pub fn with_rng(settings: &GameplaySettings, rng: fastrand::Rng) -> Self {
        Self {
            items: Vec::new(),
            position: Vec3::ZERO,
            target: None,
            hint: String::new(),
            detection_range: settings.detection_range,
            respawn_area: settings.respawn_area,
            respawn_height: settings.respawn_height,
            message_seconds: settings.message_seconds,
            rng,
        }
    }

    /// Places an item in the world.
    pub fn place(&mut self, item: WorldItem) {
        trace!("Placed {} at {:?}", item.item.name, item.position);
        self.items.push(item);
    }

    /// Items currently in the world.
    #[must_use]
    pub fn items(&self) -> &[WorldItem] {
        &self.items
    }

    /// Player position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.position
    }

    /// Moves the player.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Current interaction target.
    #[must_use]
    pub fn target(&self) -> Option<&WorldItem> {
        self.target.and_then(|index| self.items.get(index))
    }

    /// Prompt currently shown (empty when hidden).
    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Re-scans for items in range and updates the prompt.
    ///
    /// Does nothing while the inventory window is open.
    pub fn scan(&mut self, equipment: &Equipment, hooks: &mut Hooks) -> Option<&WorldItem> {
        if equipment.is_open() {
            return None;
        }
        let range_sq = self.detection_range * self.detection_range;
        self.target = self
            .items
            .iter()
            .rposition(|world| world.position.distance_squared(self.position) <= range_sq);

        let hint = self
            .target()
            .map(|world| format!("{COLLECT_HINT_PREFIX}{}", world.item.name))
            .unwrap_or_default();
        if hint != self.hint {
            hooks.notifier.set_interaction_hint(&hint);
            self.hint = hint;
        }
        self.target()
    }

    /// Collects the current target into the inventory.
    pub fn collect(&mut self, equipment: &mut Equipment, hooks: &mut Hooks) -> CollectOutcome {
        if equipment.is_open() {
            return CollectOutcome::Blocked;
        }
        let Some(index) = self.target.filter(|&i| i < self.items.len()) else {
            return CollectOutcome::NothingInRange;
        };
        if equipment.find_available_slot().is_none() {
            hooks
                .notifier
                .show_message(INVENTORY_FULL_MESSAGE, self.message_seconds);
            return CollectOutcome::InventoryFull;
        }

        let item = self.items[index].item.clone();
        let AddOutcome::Stored(slot) = equipment.add_item(item.clone(), false, hooks) else {
            return CollectOutcome::InventoryFull;
        };
        hooks
            .notifier
            .show_message(&format!("{NEW_ITEM_PREFIX}{}", item.name), self.message_seconds);

        let respawn = self
            .respawn_area
            .lerp_xz(self.rng.f32(), self.rng.f32(), self.respawn_height);
        debug!("Collected {} into {slot}, respawned at {respawn:?}", item.name);
        self.items[index].position = respawn;
        self.target = None;
        if !self.hint.is_empty() {
            self.hint.clear();
            hooks.notifier.set_interaction_hint("");
        }
        CollectOutcome::Collected(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::recording;
    use crate::item::fixtures;

    fn setup(size: usize) -> (Equipment, PlayerInteraction, Hooks, recording::Recorder) {
        let settings = GameplaySettings {
            inventory_size: size,
            ..GameplaySettings::default()
        };
        let (hooks, recorder) = recording::hooks();
        (
            Equipment::new(settings.clone(), None),
            PlayerInteraction::with_rng(&settings, fastrand::Rng::with_seed(3)),
            hooks,
            recorder,
        )
    }

    #[test]
    fn test_scan_picks_last_item_in_range() {
        let catalog = fixtures::catalog();
        let (equipment, mut interaction, mut hooks, recorder) = setup(2);
        interaction.place(WorldItem::new(fixtures::item(&catalog, 1), Vec3::new(1.0, 0.0, 0.0)));
        interaction.place(WorldItem::new(fixtures::item(&catalog, 2), Vec3::new(0.0, 0.0, 1.5)));
        interaction.place(WorldItem::new(fixtures::item(&catalog, 3), Vec3::new(9.0, 0.0, 0.0)));

        let target = interaction.scan(&equipment, &mut hooks).map(|w| w.item.id.raw());
        assert_eq!(target, Some(2));
        assert_eq!(recorder.last_hint().as_deref(), Some("Press [E] to collect: Stone"));

        interaction.set_position(Vec3::new(20.0, 0.0, 20.0));
        assert!(interaction.scan(&equipment, &mut hooks).is_none());
        assert_eq!(recorder.last_hint().as_deref(), Some(""));
        assert_eq!(interaction.hint(), "");
    }

    #[test]
    fn test_collect_stores_and_respawns() {
        let catalog = fixtures::catalog();
        let (mut equipment, mut interaction, mut hooks, recorder) = setup(2);
        interaction.place(WorldItem::new(fixtures::item(&catalog, 1), Vec3::ZERO));
        interaction.scan(&equipment, &mut hooks);

        let outcome = interaction.collect(&mut equipment, &mut hooks);

        assert_eq!(outcome, CollectOutcome::Collected(SlotId::Inventory(0)));
        assert_eq!(recorder.messages(), vec!["New item: Wood".to_string()]);
        let respawned = interaction.items()[0].position;
        assert!(GameplaySettings::default().respawn_area.contains(respawned));
        assert!((respawned.y - 1.5).abs() < f32::EPSILON);
        assert!(interaction.target().is_none());
    }

    #[test]
    fn test_collect_with_full_inventory_leaves_item() {
        let catalog = fixtures::catalog();
        let (mut equipment, mut interaction, mut hooks, recorder) = setup(0);
        interaction.place(WorldItem::new(fixtures::item(&catalog, 1), Vec3::ZERO));
        interaction.scan(&equipment, &mut hooks);

        assert_eq!(
            interaction.collect(&mut equipment, &mut hooks),
            CollectOutcome::InventoryFull
        );
        assert_eq!(recorder.messages(), vec![INVENTORY_FULL_MESSAGE.to_string()]);
        assert_eq!(interaction.items()[0].position, Vec3::ZERO);
        assert!(recorder.spawned().is_empty());
    }

    #[test]
    fn test_open_inventory_blocks_pickup() {
        let catalog = fixtures::catalog();
        let (mut equipment, mut interaction, mut hooks, _) = setup(2);
        interaction.place(WorldItem::new(fixtures::item(&catalog, 1), Vec3::ZERO));
        interaction.scan(&equipment, &mut hooks);
        equipment.toggle_inventory(false, false, &mut hooks);

        assert!(interaction.scan(&equipment, &mut hooks).is_none());
        assert_eq!(
            interaction.collect(&mut equipment, &mut hooks),
            CollectOutcome::Blocked
        );
        assert!(equipment.find_available_slot().is_some());
    }

    #[test]
    fn test_collect_without_target() {
        let (mut equipment, mut interaction, mut hooks, _) = setup(1);
        assert_eq!(
            interaction.collect(&mut equipment, &mut hooks),
            CollectOutcome::NothingInRange
        );
    }
}
