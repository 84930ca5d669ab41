//! # tcg-sim
//!
//! A probabilistic pack-opening and collection-completion simulator for a
//! trading card game shop.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven**: Cards, expansions and packs are JSON records. Nothing
//!    about a particular card game is hardcoded.
//!
//! 2. **Ordered Tables**: Border chances and pack slots are evaluated in the
//!    order they are written. Earlier entries shadow later ones.
//!
//! 3. **Reproducible**: Every trial draws from its own ChaCha8 stream
//!    derived from the run seed, so parallel runs give identical results.
//!
//! ## Architecture
//!
//! - **Owned Definition Cache**: `Definitions` lazily loads records and is
//!   shared read-only between trials.
//!
//! - **Persistent Collections**: `im`-backed, so snapshots clone in O(1).
//!
//! - **Integer Rolls**: A roll succeeds iff a uniform draw in `[0, 9999]`
//!   is below `round(percent × 100)`.
//!
//! ## Modules
//!
//! - `core`: Chances, RNG, errors, configuration
//! - `defs`: Definition records, JSON loading, the definition cache
//! - `collection`: Per-player card counts
//! - `draw`: Card resolution, packs, expansions, reachability audit
//! - `sim`: Completion driver, snapshots, trial runner
//! - `report`: Statistics formats
//! - `logging`: Tracing subscriber setup

pub mod collection;
pub mod core;
pub mod defs;
pub mod draw;
pub mod logging;
pub mod report;
pub mod sim;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Chance, ConfigError, DefinitionKind, LoadError, RandomSource, Result, SimConfig, SimError,
    SimRng, SimRngState, Target,
};

pub use crate::defs::{
    BorderChance, CardDefinition, DefinitionSource, Definitions, ExpansionDefinition,
    JsonDirectory, MemorySource, PackDefinition, Slot,
};

pub use crate::collection::{Collection, Player};

pub use crate::draw::{audit, Draw, DrawResolver, Expansion, Pack, Reachability};

pub use crate::sim::{
    complete_expansion, CompletionReport, MemorySink, NullSink, SnapshotPolicy, SnapshotSink,
    StatsFileSink, TrialOutcome, TrialRunner,
};

pub use crate::report::CompressLevel;
