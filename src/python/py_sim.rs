//! Simulator bindings for Python.

use std::sync::Arc;

use pyo3::prelude::*;

use crate::core::{SimConfig, SimRng};
use crate::defs::Definitions;
use crate::draw::{Expansion, Pack};
use crate::report::{collected_summary, raw_data_compressed, CompressLevel};
use crate::sim::{complete_expansion, NullSink, SnapshotPolicy, TrialRunner};

use super::py_player::PyPlayer;
use super::{to_py_err, value_error};

/// Pack simulator over one data directory.
///
/// Holds the definition cache and its own RNG stream.
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    defs: Arc<Definitions>,
    rng: SimRng,
}

#[pymethods]
impl PySimulator {
    /// Create a simulator reading definitions from `data_dir`.
    ///
    /// # Arguments
    /// - data_dir: Root of the cards/, expansions/ and packs/ trees
    /// - seed: RNG seed (default: drawn from OS entropy)
    #[new]
    #[pyo3(signature = (data_dir, seed = None))]
    fn new(data_dir: String, seed: Option<u64>) -> Self {
        Self {
            defs: Arc::new(Definitions::from_dir(data_dir)),
            rng: seed.map_or_else(SimRng::from_entropy, SimRng::new),
        }
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Register an expansion in the player's collection.
    fn register(&self, player: &mut PyPlayer, expansion: &str) -> PyResult<()> {
        let expansion = Expansion::load(&self.defs, expansion).map_err(to_py_err)?;
        expansion.register(&mut player.0.collection);
        Ok(())
    }

    /// Open one pack; returns the drawn variants as "expansion/border/card".
    fn open_pack(&mut self, player: &mut PyPlayer, pack: &str) -> PyResult<Vec<String>> {
        let pack = Pack::load(&self.defs, pack).map_err(to_py_err)?;
        let draws = pack
            .open(&mut player.0.collection, &mut self.rng)
            .map_err(to_py_err)?;
        player.0.record_pack();
        Ok(draws.iter().map(ToString::to_string).collect())
    }

    /// Open `pack` until `expansion` is complete; returns packs opened.
    ///
    /// Never returns if the pack cannot complete the expansion; check
    /// `audit` first.
    fn complete(
        &mut self,
        py: Python<'_>,
        player: &mut PyPlayer,
        expansion: &str,
        pack: &str,
    ) -> PyResult<u64> {
        let expansion = Expansion::load(&self.defs, expansion).map_err(to_py_err)?;
        let pack = Pack::load(&self.defs, pack).map_err(to_py_err)?;
        let player = &mut player.0;
        let rng = &mut self.rng;

        let report = py
            .allow_threads(|| {
                complete_expansion(
                    player,
                    &expansion,
                    &pack,
                    rng,
                    &SnapshotPolicy::never(),
                    &mut NullSink,
                )
            })
            .map_err(to_py_err)?;
        Ok(report.packs_opened)
    }

    /// Variant border keys `pack` can and cannot produce for `expansion`,
    /// as `(reachable, unreachable)`.
    fn audit(&self, pack: &str, expansion: &str) -> PyResult<(Vec<String>, Vec<String>)> {
        let report = crate::draw::audit(&self.defs, pack, expansion).map_err(to_py_err)?;
        Ok((report.reachable, report.unreachable))
    }

    /// `group: [collected/total]` summary of the player's collection.
    fn summary(&self, player: &PyPlayer) -> PyResult<String> {
        collected_summary(&player.0, &self.defs).map_err(to_py_err)
    }

    /// Compressed statistics at level "expansion", "pack" or "border".
    fn compressed(&self, player: &PyPlayer, level: &str) -> PyResult<String> {
        let level = CompressLevel::ALL
            .into_iter()
            .find(|l| l.as_str() == level)
            .ok_or_else(|| value_error(format!("unknown level '{level}'")))?;
        raw_data_compressed(&player.0, &self.defs, level).map_err(to_py_err)
    }

    /// Run trials described by a JSON config; returns packs opened per
    /// trial, in trial order. The config's data_dir is ignored.
    fn run_trials(&self, py: Python<'_>, config_json: &str) -> PyResult<Vec<u64>> {
        let config: SimConfig = serde_json::from_str(config_json)
            .map_err(|e| value_error(format!("{e}")))?;
        let runner = TrialRunner::with_definitions(Arc::clone(&self.defs), config)
            .map_err(to_py_err)?;

        let outcomes = py.allow_threads(|| runner.run()).map_err(to_py_err)?;
        Ok(outcomes.iter().map(|o| o.packs_opened()).collect())
    }

    fn __repr__(&self) -> String {
        format!("Simulator(seed={})", self.rng.seed())
    }
}
