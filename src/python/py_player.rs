//! Player bindings for Python.

use pyo3::prelude::*;

use crate::collection::Player;
use crate::report::{raw_data, table_data, to_json};

use super::to_py_err;

/// Python wrapper for Player.
#[pyclass(name = "Player")]
#[derive(Clone, Debug)]
pub struct PyPlayer(pub Player);

#[pymethods]
impl PyPlayer {
    /// Create a player with an empty collection.
    ///
    /// Expansions must be registered through `Simulator.register` before
    /// packs are opened into it.
    #[new]
    fn new(name: String) -> Self {
        Self(Player::new(name))
    }

    #[getter]
    fn name(&self) -> String {
        self.0.name.clone()
    }

    #[getter]
    fn packs_opened(&self) -> u64 {
        self.0.packs_opened
    }

    /// Count of one (expansion, border, card) entry.
    fn count(&self, expansion: &str, border: &str, card: &str) -> PyResult<u64> {
        self.0
            .collection
            .count_at(expansion, border, card)
            .map_err(to_py_err)
    }

    /// Total cards owned, duplicates included.
    fn total_cards(&self) -> u64 {
        self.0.collection.total_cards()
    }

    fn expansions(&self) -> Vec<String> {
        self.0
            .collection
            .expansion_names()
            .map(str::to_string)
            .collect()
    }

    fn raw_data(&self) -> String {
        raw_data(&self.0)
    }

    fn table_data(&self) -> String {
        table_data(&self.0)
    }

    fn to_json(&self) -> PyResult<String> {
        to_json(&self.0).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "Player(name={:?}, packs_opened={})",
            self.0.name, self.0.packs_opened
        )
    }
}
