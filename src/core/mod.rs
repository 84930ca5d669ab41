//! Core building blocks: probability rolls, random sources, errors,
//! configuration.
//!
//! Nothing here knows about cards or packs. The draw engine in `draw` is
//! built on top of these.

pub mod chance;
pub mod config;
pub mod error;
pub mod rng;

pub use chance::{Chance, ROLL_DOMAIN};
pub use config::{SimConfig, Target};
pub use error::{ConfigError, DefinitionKind, LoadError, Result, SimError};
pub use rng::{FixedSource, RandomSource, ScriptedSource, SimRng, SimRngState};
