//! Event bus for inter-system communication.

use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use tinker_common::ItemId;

use crate::slot::SlotId;

/// Event types that can be sent through the event bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Item stored in an inventory slot
    ItemCollected {
        /// Item type
        item: ItemId,
        /// Slot it landed in
        slot: SlotId,
    },
    /// No free slot for an incoming item
    InventoryFull {
        /// Item that did not fit
        item: ItemId,
    },
    /// Item that did not fit was dropped into the world
    ItemDroppedOnOverflow {
        /// Item type
        item: ItemId,
    },
    /// Item thrown out of the hand
    ItemThrown {
        /// Item type
        item: ItemId,
    },
    /// Inventory window opened
    InventoryOpened,
    /// Inventory window closed
    InventoryClosed,
    /// Recipe book opened
    RecipeBookOpened {
        /// Number of rows listed
        rows: usize,
    },
    /// Recipe book closed
    RecipeBookClosed,
    /// Crafting started; both ingredients are consumed
    CraftStarted {
        /// Result being attempted
        item: ItemId,
    },
    /// Crafting progress advanced
    CraftProgress {
        /// Result being attempted
        item: ItemId,
        /// Progress (0.0 - 1.0)
        progress: f32,
    },
    /// Crafting succeeded and the result was added to the inventory
    CraftSucceeded {
        /// Crafted item
        item: ItemId,
        /// Success roll
        roll: u8,
    },
    /// Crafting failed
    CraftFailed {
        /// Item that was not produced
        item: ItemId,
        /// Success roll
        roll: u8,
    },
    /// Crafting was torn down before it resolved
    CraftInterrupted {
        /// Forfeited item
        item: ItemId,
    },
}

/// Event bus for broadcasting events to subscribers.
#[derive(Debug)]
pub struct EventBus {
    /// Sender for broadcasting events
    sender: Sender<GameEvent>,
    /// Receiver for collecting events
    receiver: Receiver<GameEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Publishes an event to the bus.
    pub fn publish(&self, event: GameEvent) {
        // Non-blocking send - if full, event is dropped
        let _ = self.sender.try_send(event);
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<GameEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.receiver.try_recv() {
            events.push(event);
        }
        events
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_and_drain() {
        let bus = EventBus::new(4);
        bus.publish(GameEvent::InventoryOpened);
        bus.publish(GameEvent::InventoryClosed);
        assert_eq!(bus.pending_count(), 2);

        let events = bus.drain();
        assert_eq!(events, vec![GameEvent::InventoryOpened, GameEvent::InventoryClosed]);
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops_events() {
        let bus = EventBus::new(1);
        bus.publish(GameEvent::InventoryOpened);
        bus.publish(GameEvent::InventoryClosed);
        assert_eq!(bus.drain(), vec![GameEvent::InventoryOpened]);
    }
}
