//! Multi-trial runner.
//!
//! Every trial owns a fresh `Player` and an RNG stream derived from the run
//! seed and its trial index. Definitions are shared read-only, so trials
//! fan out over rayon's pool and the results do not depend on scheduling.

use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::complete::{complete_expansion, CompletionReport, SnapshotPolicy};
use super::snapshot::{NullSink, SnapshotSink, StatsFileSink};
use crate::collection::Player;
use crate::core::{Result, SimConfig, SimRng};
use crate::defs::Definitions;
use crate::draw::{Expansion, Pack, Reachability};
use crate::report::collected_summary;

/// Result of one trial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialOutcome {
    pub trial: u64,
    /// One report per configured target, in order.
    pub targets: Vec<CompletionReport>,
    /// The player's final state.
    pub player: Player,
}

impl TrialOutcome {
    #[must_use]
    pub fn packs_opened(&self) -> u64 {
        self.player.packs_opened
    }
}

/// Runs the configured trials against one definition cache.
#[derive(Debug)]
pub struct TrialRunner {
    defs: Arc<Definitions>,
    config: SimConfig,
    seed: u64,
    /// Expansions every fresh player registers.
    registered: Vec<String>,
}

impl TrialRunner {
    /// Build a runner reading definitions from `config.data_dir`.
    pub fn new(config: SimConfig) -> Result<Self> {
        let defs = Arc::new(Definitions::from_dir(config.data_dir.clone()));
        Self::with_definitions(defs, config)
    }

    /// Build a runner over an existing cache.
    ///
    /// Fails if the config is invalid or any configured expansion or pack
    /// does not load. Besides the configured expansions, players register
    /// every expansion a target pack can draw from.
    pub fn with_definitions(defs: Arc<Definitions>, config: SimConfig) -> Result<Self> {
        config.validate()?;
        let mut registered = config.registered_expansions();
        for name in &registered {
            defs.expansion(name)?;
        }
        for target in &config.targets {
            for name in defs.reachable_expansions(&target.pack)? {
                if !registered.contains(&name) {
                    registered.push(name);
                }
            }
        }

        let seed = config
            .seed
            .unwrap_or_else(|| SimRng::from_entropy().seed());
        Ok(Self {
            defs,
            config,
            seed,
            registered,
        })
    }

    #[must_use]
    pub fn definitions(&self) -> &Arc<Definitions> {
        &self.defs
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Expansions registered in every trial's collection, in order.
    #[must_use]
    pub fn registered_expansions(&self) -> &[String] {
        &self.registered
    }

    /// Run seed; drawn from entropy when the config has none.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Reachability of every target.
    pub fn audit(&self) -> Result<Vec<Reachability>> {
        self.config
            .targets
            .iter()
            .map(|target| {
                let expansion = Expansion::load(&self.defs, &target.expansion)?;
                Pack::load(&self.defs, &target.pack)?.reachability(&expansion)
            })
            .collect()
    }

    /// A player with every configured and pack-reachable expansion
    /// registered.
    pub fn fresh_player(&self) -> Result<Player> {
        let mut player = Player::new(self.config.player_name.clone());
        for name in &self.registered {
            Expansion::load(&self.defs, name)?.register(&mut player.collection);
        }
        Ok(player)
    }

    /// Run a single trial.
    pub fn run_trial(&self, trial: u64) -> Result<TrialOutcome> {
        let mut player = self.fresh_player()?;
        let mut rng = SimRng::for_trial(self.seed, trial);
        let policy = SnapshotPolicy {
            every_n_packs: self.config.snapshot_interval(),
            on_complete: self.config.save_stat,
        };
        let mut sink: Box<dyn SnapshotSink + '_> = match &self.config.output_dir {
            Some(dir) => Box::new(StatsFileSink::for_trial(&self.defs, dir, trial)),
            None => Box::new(NullSink),
        };

        let mut targets = Vec::with_capacity(self.config.targets.len());
        for target in &self.config.targets {
            let expansion = Expansion::load(&self.defs, &target.expansion)?;
            let pack = Pack::load(&self.defs, &target.pack)?;
            let report = complete_expansion(
                &mut player,
                &expansion,
                &pack,
                &mut rng,
                &policy,
                &mut *sink,
            )?;
            targets.push(report);
        }

        let summary = collected_summary(&player, &self.defs)?;
        info!(trial, packs_opened = player.packs_opened, collected = %summary, "trial complete");

        Ok(TrialOutcome {
            trial,
            targets,
            player,
        })
    }

    /// Run every configured trial in parallel. Results are sorted by trial
    /// index; the first failing trial's error is returned.
    pub fn run(&self) -> Result<Vec<TrialOutcome>> {
        let first = self.config.first_trial;
        let trials: Vec<u64> = (0..self.config.trials).map(|i| first + i).collect();
        info!(
            seed = self.seed,
            first_trial = first,
            trials = trials.len(),
            threads = rayon::current_num_threads(),
            "starting trials"
        );

        let mut outcomes = trials
            .par_iter()
            .map(|&trial| self.run_trial(trial))
            .collect::<Result<Vec<_>>>()?;
        outcomes.sort_by_key(|o| o.trial);
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{SimError, Target};
    use crate::defs::{CardDefinition, ExpansionDefinition, MemorySource, PackDefinition};

    fn defs() -> Arc<Definitions> {
        Arc::new(Definitions::in_memory(
            MemorySource::new()
                .with_card(
                    CardDefinition::new("ghost", "ghost")
                        .with_foil_chance(30.0)
                        .with_border("base", 100.0),
                )
                .with_expansion(ExpansionDefinition::new("ghost", ["Boo", "Spooky", "Wisp"], ["base"]))
                .with_pack(PackDefinition::new("ghost").with_fixed("ghost", 3)),
        ))
    }

    fn config() -> SimConfig {
        SimConfig::new("unused")
            .with_seed(2024)
            .with_trials(6)
            .with_first_trial(10)
            .with_player_name("Eggie")
            .with_target(Target::new("ghost", "ghost"))
    }

    #[test]
    fn test_run_sorted_and_complete() {
        let runner = TrialRunner::with_definitions(defs(), config()).unwrap();
        let outcomes = runner.run().unwrap();

        let trials: Vec<u64> = outcomes.iter().map(|o| o.trial).collect();
        assert_eq!(trials, (10..16).collect::<Vec<_>>());
        for outcome in &outcomes {
            assert_eq!(outcome.targets.len(), 1);
            assert_eq!(outcome.packs_opened(), outcome.targets[0].packs_opened);
            assert_eq!(outcome.player.name, "Eggie");
        }
    }

    #[test]
    fn test_trials_reproducible() {
        let runner = TrialRunner::with_definitions(defs(), config()).unwrap();
        let parallel = runner.run().unwrap();
        let single = runner.run_trial(12).unwrap();

        assert_eq!(parallel[2], single);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = TrialRunner::with_definitions(defs(), SimConfig::new("unused")).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_missing_pack_rejected() {
        let config = SimConfig::new("unused").with_target(Target::new("ghost", "nope"));
        let err = TrialRunner::with_definitions(defs(), config).unwrap_err();
        assert!(matches!(err, SimError::Load(_)));
    }

    #[test]
    fn test_pack_drawing_from_other_expansion_registers_it() {
        let defs = Arc::new(Definitions::in_memory(
            MemorySource::new()
                .with_card(
                    CardDefinition::new("ghost", "ghost")
                        .with_foil_chance(50.0)
                        .with_border("base", 100.0),
                )
                .with_card(
                    CardDefinition::new("spirit", "spirit")
                        .with_foil_chance(10.0)
                        .with_border("base", 100.0),
                )
                .with_expansion(ExpansionDefinition::new("ghost", ["Boo", "Wisp"], ["base"]))
                .with_expansion(ExpansionDefinition::new("spirit", ["Shade"], ["base"]))
                .with_pack(
                    PackDefinition::new("haunted")
                        .with_fixed("ghost", 2)
                        .with_chances("*bonus", [("spirit", 50.0)]),
                ),
        ));
        let config = SimConfig::new("unused")
            .with_seed(5)
            .with_trials(4)
            .with_target(Target::new("ghost", "haunted"));

        let runner = TrialRunner::with_definitions(defs, config).unwrap();
        assert_eq!(runner.registered_expansions(), ["ghost", "spirit"]);

        for outcome in runner.run().unwrap() {
            assert!(outcome.player.collection.is_registered("spirit"));
            assert!(outcome.packs_opened() >= 1);
        }
    }

    #[test]
    fn test_audit_targets() {
        let runner = TrialRunner::with_definitions(defs(), config()).unwrap();
        let audit = runner.audit().unwrap();
        assert_eq!(audit.len(), 1);
        assert!(audit[0].is_completable());
    }
}
