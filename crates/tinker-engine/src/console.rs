//! Headless console: the host side of the notification, spawn and audio hooks.
//!
//! Messages are kept for their display duration and mirrored to the log.

use std::collections::VecDeque;

use tinker_common::Vec3;
use tinker_gameplay::{AudioCue, AudioSink, ItemRef, Notifier, WorldSpawner};
use tracing::{debug, info};

/// Default maximum visible messages.
pub const DEFAULT_MAX_MESSAGES: usize = 8;

/// A visible console message.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleMessage {
    /// Message text
    pub text: String,
    /// Seconds left on screen
    pub remaining: f32,
}

/// Console with timed messages and an interaction prompt.
#[derive(Debug)]
pub struct Console {
    messages: VecDeque<ConsoleMessage>,
    max_messages: usize,
    hint: String,
}

impl Default for Console {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

impl Console {
    /// Creates an empty console keeping at most `max_messages`.
    #[must_use]
    pub fn new(max_messages: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(max_messages),
            max_messages: max_messages.max(1),
            hint: String::new(),
        }
    }

    /// Visible messages, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = &ConsoleMessage> {
        self.messages.iter()
    }

    /// Current prompt.
    #[must_use]
    pub fn hint(&self) -> &str {
        &self.hint
    }
}

impl Notifier for Console {
    fn show_message(&mut self, text: &str, duration: f32) {
        info!(target: "tinker::console", "{text}");
        if self.messages.len() >= self.max_messages {
            self.messages.pop_front();
        }
        self.messages.push_back(ConsoleMessage {
            text: text.to_string(),
            remaining: duration,
        });
    }

    fn set_interaction_hint(&mut self, text: &str) {
        if !text.is_empty() {
            debug!(target: "tinker::console", "Prompt: {text}");
        }
        self.hint = text.to_string();
    }

    fn tick(&mut self, dt: f32) {
        for message in &mut self.messages {
            message.remaining -= dt;
        }
        self.messages.retain(|message| message.remaining > 0.0);
    }
}

/// World spawner that logs every spawn.
#[derive(Debug, Default)]
pub struct LogSpawner;

impl WorldSpawner for LogSpawner {
    fn spawn_item(&mut self, item: &ItemRef, position: Vec3, impulse: f32, radius: f32) {
        info!(
            "Spawned {} ({}) at {position:?}, impulse {impulse} over {radius}",
            item.name,
            item.prefab.as_deref().unwrap_or("-")
        );
    }
}

/// Audio sink that logs cues.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play_cue(&mut self, cue: AudioCue, volume: f32) {
        debug!("Cue {cue:?} at volume {volume:.2}");
    }
}
