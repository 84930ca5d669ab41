//! Simulation configuration.
//!
//! A run is configured by a `SimConfig`: where definitions live, where
//! statistics go, how many trials to run, and which (expansion, pack)
//! targets every trial completes. Configs load from JSON and can be built
//! in code:
//!
//! ```
//! use tcg_sim::core::{SimConfig, Target};
//!
//! let config = SimConfig::new("data")
//!     .with_trials(4)
//!     .with_seed(7)
//!     .with_target(Target::new("base_common", "base_common"));
//!
//! assert!(config.validate().is_ok());
//! ```

use std::num::NonZeroU64;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// One (expansion, pack) pair a trial completes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Expansion whose completion ends the target.
    pub expansion: String,
    /// Pack opened until the expansion is complete.
    pub pack: String,
}

impl Target {
    pub fn new(expansion: impl Into<String>, pack: impl Into<String>) -> Self {
        Self {
            expansion: expansion.into(),
            pack: pack.into(),
        }
    }
}

/// Complete run configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Root of the `cards/`, `expansions/` and `packs/` trees.
    pub data_dir: PathBuf,

    /// Where statistics files are written. `None` disables file output.
    pub output_dir: Option<PathBuf>,

    /// Name recorded in every statistics line.
    pub player_name: String,

    /// Run seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,

    /// Index of the first trial (file names and RNG streams use it).
    pub first_trial: u64,

    /// Number of trials to run.
    pub trials: u64,

    /// Snapshot every n opened packs. 0 disables periodic snapshots, and
    /// so does leaving `save_stat` off.
    pub save_every_n_pack: u64,

    /// Snapshot once when each target completes.
    pub save_stat: bool,

    /// Extra expansions registered in every trial's collection besides the
    /// target expansions.
    pub register: Vec<String>,

    /// Targets completed in order by every trial.
    pub targets: Vec<Target>,

    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            output_dir: None,
            player_name: "player".to_string(),
            seed: None,
            first_trial: 0,
            trials: 1,
            save_every_n_pack: 0,
            save_stat: false,
            register: Vec::new(),
            targets: Vec::new(),
            log_level: "info".to_string(),
        }
    }
}

impl SimConfig {
    /// Create a config reading definitions from `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    /// Load a config from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            source,
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            source,
            path: path.to_path_buf(),
        })
    }

    /// Check the config is runnable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(invalid("trials", "must run at least one trial"));
        }
        if self.trial_end().is_none() {
            return Err(invalid("first_trial", "first_trial + trials overflows u64"));
        }
        if self.targets.is_empty() {
            return Err(invalid("targets", "at least one target is required"));
        }
        for (i, target) in self.targets.iter().enumerate() {
            if target.expansion.is_empty() || target.pack.is_empty() {
                return Err(invalid(
                    &format!("targets[{i}]"),
                    "expansion and pack must be non-empty",
                ));
            }
        }
        if self.player_name.contains(';') {
            return Err(invalid("player_name", "must not contain ';'"));
        }
        Ok(())
    }

    /// Periodic snapshot interval, if enabled. Periodic snapshots require
    /// `save_stat`.
    #[must_use]
    pub fn snapshot_interval(&self) -> Option<NonZeroU64> {
        if !self.save_stat {
            return None;
        }
        NonZeroU64::new(self.save_every_n_pack)
    }

    /// One past the last trial index, if it fits in a `u64`.
    #[must_use]
    pub fn trial_end(&self) -> Option<u64> {
        self.first_trial.checked_add(self.trials)
    }

    /// Every expansion a trial registers: targets first, then extras, without
    /// duplicates.
    #[must_use]
    pub fn registered_expansions(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let candidates = self
            .targets
            .iter()
            .map(|t| &t.expansion)
            .chain(self.register.iter());
        for name in candidates {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    #[must_use]
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_first_trial(mut self, first: u64) -> Self {
        self.first_trial = first;
        self
    }

    #[must_use]
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Snapshot every `n` packs (0 disables).
    #[must_use]
    pub fn with_save_every(mut self, n: u64) -> Self {
        self.save_every_n_pack = n;
        self
    }

    #[must_use]
    pub fn with_save_stat(mut self, save: bool) -> Self {
        self.save_stat = save;
        self
    }

    #[must_use]
    pub fn with_registered(mut self, expansion: impl Into<String>) -> Self {
        self.register.push(expansion.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        message: message.to_string(),
    }
}
