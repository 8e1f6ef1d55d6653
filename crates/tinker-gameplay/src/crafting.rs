//! Two-slot crafting engine.
//!
//! The engine watches the two crafting slots held by [`Equipment`], resolves
//! their contents against the catalog's recipes (unordered pair, first match
//! in catalog order wins) and runs a timed craft:
//!
//! ```text
//! Idle --craft()--> Progress (N steps) --roll--> Settle (result shown) --> Idle
//! ```
//!
//! Ingredients are consumed when the craft starts. The host advances the timer
//! by calling [`Crafting::update`] once per frame.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tinker_common::ItemId;
use tracing::{debug, info, warn};

use crate::equipment::{AddOutcome, Equipment};
use crate::events::GameEvent;
use crate::hooks::{AudioCue, Hooks};
use crate::item::{ChanceTier, ItemCatalog, ItemDefinition, ItemRef};
use crate::recipe_book::RecipeBook;
use crate::settings::{CraftTimings, GameplaySettings};

/// Text shown after a successful craft.
pub const SUCCESS_TEXT: &str = "Success!";

/// Text shown after a failed craft.
pub const FAILURE_TEXT: &str = "Failed!";

/// Crafting error types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CraftingError {
    /// A craft is already running
    #[error("Crafting already in progress")]
    Busy,
    /// The inventory window is closed
    #[error("Inventory is closed")]
    InventoryClosed,
    /// The crafting slots do not form a recipe
    #[error("No recipe matches the crafting slots")]
    NoCandidate,
    /// The requested result is not the displayed candidate
    #[error("Requested {requested}, but the crafting slots make {candidate}")]
    CandidateMismatch {
        /// Requested result
        requested: ItemId,
        /// Displayed candidate
        candidate: ItemId,
    },
}

/// Result type for crafting operations.
pub type CraftingResult<T> = Result<T, CraftingError>;

/// Global crafting state: the craft gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CraftState {
    /// Ready to craft
    #[default]
    Idle,
    /// A craft is running
    InProgress,
}

/// Outcome of a resolved craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CraftOutcome {
    /// Result added to the inventory
    Success,
    /// Nothing produced
    Failure,
}

impl CraftOutcome {
    /// Text shown in the result panel.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Success => SUCCESS_TEXT,
            Self::Failure => FAILURE_TEXT,
        }
    }
}

/// Source of success rolls: uniform integers in `0..=100`.
pub trait ChanceRoll {
    /// Draws a roll.
    fn roll(&mut self) -> u8;
}

impl ChanceRoll for fastrand::Rng {
    fn roll(&mut self) -> u8 {
        self.u8(0..=100)
    }
}

/// Checks a roll against a chance. Inclusive, so a chance of 0 still
/// succeeds on a roll of 0.
#[must_use]
pub const fn roll_succeeds(roll: u8, chance: u8) -> bool {
    roll <= chance
}

/// Callback fired when a craft resolves.
pub type CraftCallback = Box<dyn FnMut(&ItemDefinition)>;

/// The recipe currently formed by the crafting slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftCandidate {
    item: ItemRef,
}

impl CraftCandidate {
    /// Result item.
    #[must_use]
    pub fn item(&self) -> &ItemRef {
        &self.item
    }

    /// Result name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.item.name
    }

    /// Result icon.
    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.item.icon.as_deref()
    }

    /// Success chance (0-100).
    #[must_use]
    pub fn chance(&self) -> u8 {
        self.item.success_chance
    }

    /// Chance colour tier.
    #[must_use]
    pub fn tier(&self) -> ChanceTier {
        self.item.chance_tier()
    }

    /// Chance label, e.g. `Chance: 60%`.
    #[must_use]
    pub fn chance_text(&self) -> String {
        format!("Chance: {}%", self.chance())
    }
}

#[derive(Debug, Clone)]
enum CraftPhase {
    Idle,
    Progress {
        item: ItemRef,
        elapsed: f32,
        steps_done: u32,
    },
    Settle {
        item: ItemRef,
        outcome: CraftOutcome,
        elapsed: f32,
    },
}

/// The crafting engine.
pub struct Crafting {
    catalog: Arc<ItemCatalog>,
    timings: CraftTimings,
    craft_volume: f32,
    candidate: Option<CraftCandidate>,
    phase: CraftPhase,
    roller: Box<dyn ChanceRoll>,
    on_success: Vec<CraftCallback>,
    on_failure: Vec<CraftCallback>,
    recipe_book: RecipeBook,
}

impl std::fmt::Debug for Crafting {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crafting")
            .field("catalog_len", &self.catalog.len())
            .field("timings", &self.timings)
            .field("candidate", &self.candidate)
            .field("phase", &self.phase)
            .field("on_success", &self.on_success.len())
            .field("on_failure", &self.on_failure.len())
            .field("recipe_book", &self.recipe_book)
            .finish_non_exhaustive()
    }
}

impl Crafting {
    /// Creates an idle engine with an entropy-seeded roller.
    #[must_use]
    pub fn new(catalog: Arc<ItemCatalog>, settings: &GameplaySettings) -> Self {
        Self::with_roller(catalog, settings, Box::new(fastrand::Rng::new()))
    }

    /// Creates an idle engine drawing rolls from `roller`.
    #[must_use]
    pub fn with_roller(
        catalog: Arc<ItemCatalog>,
        settings: &GameplaySettings,
        roller: Box<dyn ChanceRoll>,
    ) -> Self {
        Self {
            catalog,
            timings: settings.craft.clamped(),
            craft_volume: settings.volumes.craft,
            candidate: None,
            phase: CraftPhase::Idle,
            roller,
            on_success: Vec::new(),
            on_failure: Vec::new(),
            recipe_book: RecipeBook::new(),
        }
    }

    /// Registers a callback fired after every successful craft.
    pub fn on_success(&mut self, callback: impl FnMut(&ItemDefinition) + 'static) {
        self.on_success.push(Box::new(callback));
    }

    /// Registers a callback fired after every failed craft.
    pub fn on_failure(&mut self, callback: impl FnMut(&ItemDefinition) + 'static) {
        self.on_failure.push(Box::new(callback));
    }

    // ------------------------------------------------------------------------
    // Display state
    // ------------------------------------------------------------------------

    /// Craft gate state.
    #[must_use]
    pub fn state(&self) -> CraftState {
        match self.phase {
            CraftPhase::Idle => CraftState::Idle,
            CraftPhase::Progress { .. } | CraftPhase::Settle { .. } => CraftState::InProgress,
        }
    }

    /// Checks whether a craft is running.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.state() == CraftState::InProgress
    }

    /// Recipe currently formed by the crafting slots.
    #[must_use]
    pub fn candidate(&self) -> Option<&CraftCandidate> {
        self.candidate.as_ref()
    }

    /// Whether the craft trigger is enabled.
    #[must_use]
    pub fn can_craft(&self) -> bool {
        self.candidate.is_some() && !self.is_busy()
    }

    /// Progress of the running craft (0.0 - 1.0).
    #[must_use]
    pub fn progress(&self) -> f32 {
        match &self.phase {
            CraftPhase::Idle => 0.0,
            CraftPhase::Progress { steps_done, .. } => {
                *steps_done as f32 / self.timings.progress_steps.max(1) as f32
            },
            CraftPhase::Settle { .. } => 1.0,
        }
    }

    /// Item being crafted, shown in the progress window.
    #[must_use]
    pub fn crafting_item(&self) -> Option<&ItemRef> {
        match &self.phase {
            CraftPhase::Idle => None,
            CraftPhase::Progress { item, .. } | CraftPhase::Settle { item, .. } => Some(item),
        }
    }

    /// Outcome shown in the result panel, once resolved.
    #[must_use]
    pub fn outcome(&self) -> Option<CraftOutcome> {
        match &self.phase {
            CraftPhase::Settle { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }

    /// Result panel text, once resolved.
    #[must_use]
    pub fn result_text(&self) -> Option<&'static str> {
        self.outcome().map(CraftOutcome::text)
    }

    /// Whether the progress window is shown.
    #[must_use]
    pub fn progress_window_visible(&self) -> bool {
        self.is_busy()
    }

    /// Recipe book state.
    #[must_use]
    pub fn recipe_book(&self) -> &RecipeBook {
        &self.recipe_book
    }

    // ------------------------------------------------------------------------
    // Recipe resolution
    // ------------------------------------------------------------------------

    /// Re-resolves the candidate from the crafting slots.
    pub fn refresh(&mut self, equipment: &Equipment) {
        let candidate = match equipment.crafting_contents() {
            (Some(a), Some(b)) => self.catalog.find_recipe(a.id, b.id).map(|item| CraftCandidate {
                item: Arc::clone(item),
            }),
            _ => None,
        };
        if candidate != self.candidate {
            debug!(
                "Crafting candidate: {:?}",
                candidate.as_ref().map(CraftCandidate::name)
            );
        }
        self.candidate = candidate;
    }

    /// Starts crafting the displayed candidate.
    ///
    /// Both crafting slots are emptied immediately, whatever the eventual
    /// outcome. Requires the inventory window to be open. Nothing changes on
    /// error.
    pub fn craft(
        &mut self,
        result: &ItemDefinition,
        equipment: &mut Equipment,
        hooks: &mut Hooks,
    ) -> CraftingResult<()> {
        if self.is_busy() {
            return Err(CraftingError::Busy);
        }
        if !equipment.is_open() {
            return Err(CraftingError::InventoryClosed);
        }
        let candidate = self.candidate.as_ref().ok_or(CraftingError::NoCandidate)?;
        if candidate.item.id != result.id {
            return Err(CraftingError::CandidateMismatch {
                requested: result.id,
                candidate: candidate.item.id,
            });
        }
        let item = Arc::clone(&candidate.item);

        self.phase = CraftPhase::Progress {
            item: Arc::clone(&item),
            elapsed: 0.0,
            steps_done: 0,
        };
        equipment.take_crafting_items();
        self.refresh(equipment);
        equipment.take_crafting_changed();

        info!("Crafting {} ({}% chance)", item.name, item.success_chance);
        hooks.publish(GameEvent::CraftStarted { item: item.id });
        hooks.audio.play_cue(AudioCue::Craft, self.craft_volume);
        Ok(())
    }

    /// Advances the running craft by `dt` seconds.
    pub fn update(&mut self, dt: f32, equipment: &mut Equipment, hooks: &mut Hooks) {
        let mut remaining = dt.max(0.0);
        loop {
            match &mut self.phase {
                CraftPhase::Idle => return,
                CraftPhase::Progress {
                    item,
                    elapsed,
                    steps_done,
                } => {
                    *elapsed += remaining;
                    let total = self.timings.progress_steps.max(1);
                    let reached = if self.timings.step_seconds > 0.0 {
                        ((*elapsed / self.timings.step_seconds).floor() as u32).min(total)
                    } else {
                        total
                    };
                    for step in (*steps_done + 1)..=reached {
                        hooks.publish(GameEvent::CraftProgress {
                            item: item.id,
                            progress: step as f32 / total as f32,
                        });
                    }
                    *steps_done = (*steps_done).max(reached);
                    if *steps_done < total {
                        return;
                    }
                    remaining = (*elapsed - self.timings.progress_seconds()).max(0.0);
                    let item = Arc::clone(item);
                    self.resolve(item, equipment, hooks);
                },
                CraftPhase::Settle { item, elapsed, .. } => {
                    *elapsed += remaining;
                    if *elapsed < self.timings.settle_seconds {
                        return;
                    }
                    debug!("Crafting of {} settled", item.name);
                    self.phase = CraftPhase::Idle;
                    return;
                },
            }
        }
    }

    fn resolve(&mut self, item: ItemRef, equipment: &mut Equipment, hooks: &mut Hooks) {
        let roll = self.roller.roll();
        let outcome = if roll_succeeds(roll, item.success_chance) {
            CraftOutcome::Success
        } else {
            CraftOutcome::Failure
        };
        info!(
            "Crafting {} resolved: {:?} (roll {roll} vs {})",
            item.name, outcome, item.success_chance
        );

        match outcome {
            CraftOutcome::Success => {
                if equipment.add_item(Arc::clone(&item), true, hooks) == AddOutcome::Rejected {
                    warn!("Crafted {} could not be stored or dropped", item.name);
                }
                for callback in &mut self.on_success {
                    callback(item.as_ref());
                }
                hooks.publish(GameEvent::CraftSucceeded { item: item.id, roll });
            },
            CraftOutcome::Failure => {
                for callback in &mut self.on_failure {
                    callback(item.as_ref());
                }
                hooks.publish(GameEvent::CraftFailed { item: item.id, roll });
            },
        }

        self.phase = CraftPhase::Settle {
            item,
            outcome,
            elapsed: 0.0,
        };
    }

    /// Tears down a running craft without resolving it.
    ///
    /// The consumed ingredients are not refunded and no callback fires.
    /// Returns the forfeited result, if a craft was running.
    pub fn interrupt(&mut self, hooks: &mut Hooks) -> Option<ItemRef> {
        let item = match std::mem::replace(&mut self.phase, CraftPhase::Idle) {
            CraftPhase::Idle => return None,
            CraftPhase::Progress { item, .. } => item,
            CraftPhase::Settle { .. } => return None,
        };
        warn!("Crafting of {} interrupted; result forfeited", item.name);
        hooks.publish(GameEvent::CraftInterrupted { item: item.id });
        Some(item)
    }

    // ------------------------------------------------------------------------
    // Recipe book
    // ------------------------------------------------------------------------

    /// Opens the recipe book.
    pub fn open_recipe_book(&mut self, hooks: &mut Hooks) {
        if self.recipe_book.open(&self.catalog) {
            hooks.publish(GameEvent::RecipeBookOpened {
                rows: self.recipe_book.rows().len(),
            });
        }
    }

    /// Closes the recipe book.
    pub fn close_recipe_book(&mut self, hooks: &mut Hooks) {
        if self.recipe_book.is_open() {
            self.recipe_book.close();
            hooks.publish(GameEvent::RecipeBookClosed);
        }
    }
}
