//! Single-item slots shared by the inventory and the crafting pair.
//!
//! One [`Slot`] type serves both collections; its [`SlotId`] says which one it
//! belongs to.

use serde::{Deserialize, Serialize};

use crate::item::{ItemDefinition, ItemRef};

/// One of the two crafting slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftingSlotId {
    /// Left slot (raw id -1)
    First,
    /// Right slot (raw id -2)
    Second,
}

impl CraftingSlotId {
    /// Both crafting slots in order.
    pub const ALL: [Self; 2] = [Self::First, Self::Second];
}

/// Identity of a slot.
///
/// Inventory slots carry their construction index; crafting slots use the
/// reserved negative raw ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotId {
    /// Ordinary inventory slot
    Inventory(u32),
    /// Crafting slot
    Crafting(CraftingSlotId),
}

impl SlotId {
    /// Returns the raw integer id (`>= 0` inventory, `-1`/`-2` crafting).
    #[must_use]
    pub const fn raw(self) -> i64 {
        match self {
            Self::Inventory(index) => index as i64,
            Self::Crafting(CraftingSlotId::First) => -1,
            Self::Crafting(CraftingSlotId::Second) => -2,
        }
    }

    /// Parses a raw integer id.
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            -1 => Some(Self::Crafting(CraftingSlotId::First)),
            -2 => Some(Self::Crafting(CraftingSlotId::Second)),
            n if n >= 0 => u32::try_from(n).ok().map(Self::Inventory),
            _ => None,
        }
    }

    /// Checks if this is a crafting slot.
    #[must_use]
    pub const fn is_crafting(self) -> bool {
        matches!(self, Self::Crafting(_))
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inventory(index) => write!(f, "inventory[{index}]"),
            Self::Crafting(CraftingSlotId::First) => write!(f, "crafting[-1]"),
            Self::Crafting(CraftingSlotId::Second) => write!(f, "crafting[-2]"),
        }
    }
}

/// A cell holding at most one item.
#[derive(Debug, Clone)]
pub struct Slot {
    id: SlotId,
    contents: Option<ItemRef>,
    focused: bool,
}

impl Slot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new(id: SlotId) -> Self {
        Self {
            id,
            contents: None,
            focused: false,
        }
    }

    /// Returns the slot id.
    #[must_use]
    pub const fn id(&self) -> SlotId {
        self.id
    }

    /// Returns the held item.
    #[must_use]
    pub fn get(&self) -> Option<&ItemRef> {
        self.contents.as_ref()
    }

    /// Checks if the slot is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contents.is_none()
    }

    /// Checks whether the slot holds this item type.
    #[must_use]
    pub fn holds(&self, item: &ItemDefinition) -> bool {
        self.contents.as_deref() == Some(item)
    }

    /// Puts an item in the slot, returning whatever was there.
    pub fn assign(&mut self, item: ItemRef) -> Option<ItemRef> {
        self.contents.replace(item)
    }

    /// Empties the slot.
    pub fn remove(&mut self) -> Option<ItemRef> {
        self.contents.take()
    }

    /// Checks whether the pointer is over this slot.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Sets pointer focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

/// What a primary click on a slot does, given the hand and the slot contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotClick {
    /// Empty hand, occupied slot: take the item into the hand.
    PickUp,
    /// Held item, empty slot: put it down.
    Place,
    /// Held item, different item in the slot: put it down and take the other.
    Swap,
    /// Nothing to do (both empty, or the same item on both sides).
    Ignore,
}

impl SlotClick {
    /// Decides the click outcome.
    #[must_use]
    pub fn resolve(hand: Option<&ItemRef>, slot: Option<&ItemRef>) -> Self {
        match (hand, slot) {
            (None, None) => Self::Ignore,
            (None, Some(_)) => Self::PickUp,
            (Some(_), None) => Self::Place,
            (Some(held), Some(existing)) if held == existing => Self::Ignore,
            (Some(_), Some(_)) => Self::Swap,
        }
    }
}
