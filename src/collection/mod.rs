//! Collections and per-trial player state.
//!
//! ## Key Types
//!
//! - `Tally`: Insertion-ordered persistent map
//! - `Collection`: `expansion → border → card → count`
//! - `Player`: Name, packs-opened counter and collection of one trial

#[allow(clippy::module_inception)]
pub mod collection;
pub mod player;
pub mod tally;

pub use collection::{BorderCounts, CardCounts, Collection};
pub use player::Player;
pub use tally::Tally;
