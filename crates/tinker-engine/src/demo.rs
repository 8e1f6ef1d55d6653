//! Scripted headless session.
//!
//! Drives a [`GameSession`] through a fixed-timestep loop: collect the
//! ingredients of a recipe from the world, craft it, then overfill the
//! inventory. Every published event is logged and tallied.

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tinker_common::{ItemId, Vec3};
use tinker_gameplay::{
    AddOutcome, CollectOutcome, CraftingSlotId, GameEvent, GameSession, Hooks, ItemCatalog,
    ItemRef, SlotId,
};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::console::{Console, LogAudio, LogSpawner};
use crate::timing::FixedTimestep;

/// Where the demo lays out world items, clear of the respawn area.
const WORLD_ROW_START: Vec3 = Vec3::new(40.0, 0.0, 40.0);

/// Spacing between laid-out world items.
const WORLD_ROW_SPACING: f32 = 10.0;

/// What the demo did.
#[derive(Debug, Clone, Default)]
pub struct DemoReport {
    /// Frames simulated
    pub frames: u64,
    /// Items collected from the world
    pub collected: usize,
    /// Crafted item and whether the craft succeeded
    pub craft: Option<(String, bool)>,
    /// Items dropped into the world because the inventory was full
    pub dropped: usize,
    /// Published events by kind
    pub events: BTreeMap<&'static str, usize>,
}

/// Short name of an event, for tallies.
#[must_use]
pub fn event_name(event: &GameEvent) -> &'static str {
    match event {
        GameEvent::ItemCollected { .. } => "item_collected",
        GameEvent::InventoryFull { .. } => "inventory_full",
        GameEvent::ItemDroppedOnOverflow { .. } => "item_dropped",
        GameEvent::ItemThrown { .. } => "item_thrown",
        GameEvent::InventoryOpened => "inventory_opened",
        GameEvent::InventoryClosed => "inventory_closed",
        GameEvent::RecipeBookOpened { .. } => "recipe_book_opened",
        GameEvent::RecipeBookClosed => "recipe_book_closed",
        GameEvent::CraftStarted { .. } => "craft_started",
        GameEvent::CraftProgress { .. } => "craft_progress",
        GameEvent::CraftSucceeded { .. } => "craft_succeeded",
        GameEvent::CraftFailed { .. } => "craft_failed",
        GameEvent::CraftInterrupted { .. } => "craft_interrupted",
    }
}

struct Driver {
    session: GameSession,
    timestep: FixedTimestep,
    report: DemoReport,
}

impl Driver {
    fn frame(&mut self) {
        let dt = self.timestep.fixed_dt();
        for _ in 0..self.timestep.accumulate(dt) {
            self.session.update(dt);
        }
        self.report.frames += 1;
        self.pump_events();
    }

    fn pump_events(&mut self) {
        for event in self.session.drain_events() {
            match &event {
                GameEvent::CraftProgress { .. } => {},
                GameEvent::CraftSucceeded { item, roll } => {
                    info!("Craft succeeded: {item} (roll {roll})");
                    self.record_craft(*item, true);
                },
                GameEvent::CraftFailed { item, roll } => {
                    info!("Craft failed: {item} (roll {roll})");
                    self.record_craft(*item, false);
                },
                other => debug!("Event: {other:?}"),
            }
            *self.report.events.entry(event_name(&event)).or_default() += 1;
        }
    }

    fn record_craft(&mut self, item: ItemId, succeeded: bool) {
        let name = self
            .session
            .catalog()
            .get(item)
            .map_or_else(|| item.to_string(), |i| i.name.clone());
        self.report.craft = Some((name, succeeded));
    }

    /// Walks to a world item of type `id` and collects it.
    fn collect(&mut self, id: ItemId) -> Result<()> {
        let position = self
            .session
            .interaction()
            .items()
            .iter()
            .find(|world| world.item.id == id)
            .map(|world| world.position)
            .with_context(|| format!("no world item {id}"))?;
        self.session.set_player_position(position);
        self.frame();

        let target = self.session.interaction().target().map(|world| world.item.id);
        if target != Some(id) {
            bail!("expected to be next to {id}, found {target:?}");
        }
        match self.session.collect() {
            CollectOutcome::Collected(slot) => {
                debug!("Collected {id} into {slot}");
                self.report.collected += 1;
                Ok(())
            },
            other => bail!("collecting {id} gave {other:?}"),
        }
    }

    /// Moves an inventory item of type `id` into a crafting slot.
    fn load_crafting_slot(&mut self, id: ItemId, which: CraftingSlotId) -> Result<()> {
        let slot = self
            .session
            .equipment()
            .slots()
            .iter()
            .find(|slot| slot.get().is_some_and(|item| item.id == id))
            .map(tinker_gameplay::Slot::id)
            .with_context(|| format!("{id} is not in the inventory"))?;
        self.session.click_slot(slot);
        self.session.click_slot(SlotId::Crafting(which));
        Ok(())
    }
}

/// Picks the first recipe whose components can be collected from the world.
fn pick_recipe(catalog: &ItemCatalog) -> Option<(ItemRef, ItemId, ItemId)> {
    catalog.recipes().find_map(|item| {
        let (a, b) = item.recipe()?;
        let base = |id| catalog.get(id).is_some_and(|c| c.recipe().is_none());
        (base(a) && base(b)).then(|| (Arc::clone(item), a, b))
    })
}

/// Runs the scripted session.
pub fn run(config: &EngineConfig, catalog: Arc<ItemCatalog>) -> Result<DemoReport> {
    let (recipe, first, second) =
        pick_recipe(&catalog).context("catalog has no recipe made from world items")?;

    let hooks = Hooks::new(
        Box::new(LogSpawner),
        Box::new(Console::default()),
        Box::new(LogAudio),
    );
    let roller = Box::new(match config.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    });
    let mut driver = Driver {
        session: GameSession::with_roller(
            Arc::clone(&catalog),
            config.gameplay.clone(),
            hooks,
            roller,
        ),
        timestep: FixedTimestep::new(config.tick_rate),
        report: DemoReport::default(),
    };

    // Lay out one world item per ingredient.
    let ingredients = if first == second { vec![first] } else { vec![first, second] };
    for (index, id) in ingredients.iter().enumerate() {
        let item = catalog.get(*id).context("ingredient missing from catalog")?;
        let offset = Vec3::new(index as f32 * WORLD_ROW_SPACING, 0.0, 0.0);
        driver
            .session
            .place_world_item(Arc::clone(item), WORLD_ROW_START + offset);
    }

    info!("Collecting ingredients for {}", recipe.name);
    driver.collect(first)?;
    driver.collect(second)?;

    driver.session.toggle_inventory(false);
    driver.session.open_recipe_book();
    driver.load_crafting_slot(first, CraftingSlotId::First)?;
    driver.load_crafting_slot(second, CraftingSlotId::Second)?;

    if let Some(candidate) = driver.session.crafting().candidate() {
        info!(
            "Candidate: {} ({}, {:?})",
            candidate.name(),
            candidate.chance_text(),
            candidate.tier()
        );
    }
    driver.session.close_recipe_book();
    driver.session.craft().context("craft did not start")?;

    let mut budget = config.demo_frame_budget;
    while driver.session.crafting().is_busy() && budget > 0 {
        driver.frame();
        budget -= 1;
    }
    if driver.session.crafting().is_busy() {
        warn!("Frame budget exhausted with a craft still running");
    }
    driver.session.toggle_inventory(false);

    // Overfill the inventory; the extra item is dropped into the world.
    let filler = catalog.get(first).context("ingredient missing from catalog")?;
    for _ in 0..=driver.session.settings().inventory_size {
        if driver.session.add_item(Arc::clone(filler), true) == AddOutcome::Dropped {
            driver.report.dropped += 1;
            break;
        }
    }

    let settle = (driver.session.settings().message_seconds / driver.timestep.fixed_dt()).ceil();
    for _ in 0..settle as u32 {
        driver.frame();
    }

    if let Some(item) = driver.session.shutdown() {
        warn!("Shutdown forfeited {}", item.name);
    }
    driver.pump_events();
    Ok(driver.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_loader::{parse_catalog, BUILTIN_CATALOG};

    fn catalog() -> Arc<ItemCatalog> {
        Arc::new(parse_catalog(BUILTIN_CATALOG).expect("built-in catalog"))
    }

    #[test]
    fn test_pick_recipe_skips_intermediate_components() {
        let (recipe, a, b) = pick_recipe(&catalog()).expect("recipe");
        assert_eq!(recipe.name, "Axe");
        assert_eq!((a.raw(), b.raw()), (1, 2));
    }

    #[test]
    fn test_demo_runs_to_completion() {
        let config = EngineConfig {
            seed: Some(7),
            ..EngineConfig::default()
        };
        let report = run(&config, catalog()).expect("demo runs");

        assert_eq!(report.collected, 2);
        assert_eq!(report.dropped, 1);
        let (name, _) = report.craft.expect("craft resolved");
        assert_eq!(name, "Axe");
        assert_eq!(report.events.get("craft_started"), Some(&1));
        assert_eq!(
            report.events.get("craft_succeeded").copied().unwrap_or(0)
                + report.events.get("craft_failed").copied().unwrap_or(0),
            1
        );
        assert_eq!(report.events.get("craft_progress"), Some(&100));
        assert_eq!(report.events.get("item_dropped"), Some(&1));
    }

    #[test]
    fn test_event_names_are_distinct() {
        let events = [
            GameEvent::InventoryOpened,
            GameEvent::InventoryClosed,
            GameEvent::RecipeBookClosed,
            GameEvent::ItemThrown { item: ItemId::new(1) },
        ];
        let mut names: Vec<_> = events.iter().map(event_name).collect();
        names.dedup();
        assert_eq!(names.len(), events.len());
    }
}
