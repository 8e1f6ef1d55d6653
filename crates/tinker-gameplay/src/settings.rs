//! Gameplay settings data model.
//!
//! This module provides the tunables for:
//! - Inventory capacity
//! - Crafting timings
//! - Notification and audio cue levels
//! - World drops, pickup range and item respawn

use serde::{Deserialize, Serialize};
use tinker_common::Bounds;

// ============================================================================
// Crafting Timings
// ============================================================================

/// Upper bound on crafting progress steps.
pub const MAX_PROGRESS_STEPS: u32 = 10_000;

/// Timing of the crafting progress and result phases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftTimings {
    /// Number of discrete progress steps.
    pub progress_steps: u32,
    /// Duration of a single step in seconds.
    pub step_seconds: f32,
    /// How long the success/failure text stays up, in seconds.
    pub settle_seconds: f32,
}

impl Default for CraftTimings {
    fn default() -> Self {
        Self {
            progress_steps: 100,
            step_seconds: 0.01,
            settle_seconds: 2.0,
        }
    }
}

impl CraftTimings {
    /// Total duration of the progress phase in seconds.
    #[must_use]
    pub fn progress_seconds(&self) -> f32 {
        self.progress_steps as f32 * self.step_seconds
    }

    /// Total time from craft start until the engine is idle again.
    #[must_use]
    pub fn total_seconds(&self) -> f32 {
        self.progress_seconds() + self.settle_seconds
    }

    /// Returns a copy with every value in its usable range.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self {
            progress_steps: self.progress_steps.clamp(1, MAX_PROGRESS_STEPS),
            step_seconds: self.step_seconds.max(0.0),
            settle_seconds: self.settle_seconds.max(0.0),
        }
    }
}

// ============================================================================
// Audio Cue Volumes
// ============================================================================

/// Volume of each gameplay audio cue (0.0 - 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueVolumes {
    /// Inventory opened or closed.
    pub inventory: f32,
    /// Item stored in the inventory.
    pub collect: f32,
    /// Crafting started.
    pub craft: f32,
}

impl Default for CueVolumes {
    fn default() -> Self {
        Self {
            inventory: 0.65,
            collect: 0.65,
            craft: 0.5,
        }
    }
}

// ============================================================================
// Gameplay Settings
// ============================================================================

/// All gameplay tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Number of ordinary inventory slots.
    pub inventory_size: usize,
    /// Crafting timings.
    pub craft: CraftTimings,
    /// Audio cue volumes.
    pub volumes: CueVolumes,
    /// How long console messages stay visible, in seconds.
    pub message_seconds: f32,
    /// Outward impulse applied to items dropped into the world.
    pub drop_impulse: f32,
    /// Radius of the drop impulse.
    pub drop_radius: f32,
    /// Range in which the player detects collectable items.
    pub detection_range: f32,
    /// Area collected items respawn in.
    pub respawn_area: Bounds,
    /// Height collected items respawn at.
    pub respawn_height: f32,
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            inventory_size: 24,
            craft: CraftTimings::default(),
            volumes: CueVolumes::default(),
            message_seconds: 2.0,
            drop_impulse: 20.0,
            drop_radius: 1.0,
            detection_range: 2.0,
            respawn_area: Bounds::default(),
            respawn_height: 1.5,
        }
    }
}

impl GameplaySettings {
    /// Clamps values into usable ranges.
    pub fn sanitize(&mut self) {
        self.craft = self.craft.clamped();
        self.volumes.inventory = self.volumes.inventory.clamp(0.0, 1.0);
        self.volumes.collect = self.volumes.collect.clamp(0.0, 1.0);
        self.volumes.craft = self.volumes.craft.clamp(0.0, 1.0);
        self.message_seconds = self.message_seconds.max(0.0);
        self.detection_range = self.detection_range.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings_match_observed_behavior() {
        let timings = CraftTimings::default();
        assert!((timings.progress_seconds() - 1.0).abs() < 1e-4);
        assert!((timings.total_seconds() - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_sanitize_clamps() {
        let mut settings = GameplaySettings::default();
        settings.craft.progress_steps = 0;
        settings.volumes.craft = 4.0;
        settings.detection_range = -1.0;
        settings.sanitize();

        assert_eq!(settings.craft.progress_steps, 1);
        assert!((settings.volumes.craft - 1.0).abs() < f32::EPSILON);
        assert!(settings.detection_range.abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_caps_progress_steps() {
        let mut settings = GameplaySettings::default();
        settings.craft.progress_steps = u32::MAX;
        settings.craft.step_seconds = -1.0;
        settings.sanitize();

        assert_eq!(settings.craft.progress_steps, MAX_PROGRESS_STEPS);
        assert!(settings.craft.step_seconds.abs() < f32::EPSILON);
    }
}
