//! Per-trial player state.

use serde::{Deserialize, Serialize};

use super::collection::Collection;

/// A player's statistics: name, packs opened, and card collection.
///
/// Each trial owns its own `Player`; nothing in it is shared between
/// trials.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Name written into every statistics line.
    pub name: String,

    /// Packs opened so far. Never decreases.
    pub packs_opened: u64,

    /// The player's cards.
    pub collection: Collection,
}

impl Player {
    /// Create a player with an empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            packs_opened: 0,
            collection: Collection::new(),
        }
    }

    /// Count one opened pack and return the new total.
    pub fn record_pack(&mut self) -> u64 {
        self.packs_opened += 1;
        self.packs_opened
    }
}
