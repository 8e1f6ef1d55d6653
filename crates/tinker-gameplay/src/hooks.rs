//! Host hooks: the engine-side collaborators gameplay talks to.
//!
//! Spawning into the world, on-screen messages and audio playback belong to
//! the host. Gameplay only calls through these traits, bundled in [`Hooks`]
//! and passed explicitly to whatever needs them.

use serde::{Deserialize, Serialize};
use tinker_common::Vec3;

use crate::events::{EventBus, GameEvent};
use crate::item::ItemRef;

/// Audio cue played for gameplay actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioCue {
    /// Inventory opened or closed.
    Inventory,
    /// Item stored in the inventory.
    Collect,
    /// Crafting started.
    Craft,
}

/// Places item instances into the 3D world.
pub trait WorldSpawner {
    /// Spawns `item` at `position`, pushed outward with `impulse` over `radius`.
    fn spawn_item(&mut self, item: &ItemRef, position: Vec3, impulse: f32, radius: f32);
}

/// On-screen console and interaction prompt.
pub trait Notifier {
    /// Shows a console message for `duration` seconds.
    fn show_message(&mut self, text: &str, duration: f32);

    /// Replaces the interaction prompt (empty string hides it).
    fn set_interaction_hint(&mut self, text: &str);

    /// Advances message timers by `dt` seconds.
    fn tick(&mut self, _dt: f32) {}
}

/// One-shot audio playback.
pub trait AudioSink {
    /// Plays a cue at the given volume.
    fn play_cue(&mut self, cue: AudioCue, volume: f32);
}

/// Host collaborators plus the event bus.
pub struct Hooks {
    /// World spawner
    pub spawner: Box<dyn WorldSpawner>,
    /// Console and prompt
    pub notifier: Box<dyn Notifier>,
    /// Audio
    pub audio: Box<dyn AudioSink>,
    /// Gameplay events
    pub events: EventBus,
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hooks")
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}

impl Hooks {
    /// Bundles host collaborators with a fresh event bus.
    #[must_use]
    pub fn new(
        spawner: Box<dyn WorldSpawner>,
        notifier: Box<dyn Notifier>,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        Self {
            spawner,
            notifier,
            audio,
            events: EventBus::default(),
        }
    }

    /// Publishes a gameplay event.
    pub fn publish(&self, event: GameEvent) {
        self.events.publish(event);
    }
}
