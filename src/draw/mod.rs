//! The draw engine.
//!
//! ## Key Types
//!
//! - `DrawResolver`: Resolves a card type into a concrete `Draw`
//! - `Pack`: Opens a pack into a collection
//! - `Expansion`: Registration, collected count and completion
//! - `Reachability`: Which variants a pack can ever produce
//!
//! ## Flow
//!
//! ```text
//! Pack::open ──► slots in order ──► DrawResolver::resolve ──► Collection::increment
//!                                   (foil, border, card)
//! ```

pub mod audit;
pub mod expansion;
pub mod pack;
pub mod resolver;

pub use audit::{audit, Reachability};
pub use expansion::Expansion;
pub use pack::Pack;
pub use resolver::{resolve_card, Draw, DrawResolver};
