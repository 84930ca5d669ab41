//! Python bindings for the pack simulator.
//!
//! # Quick Start
//!
//! ```python
//! import tcg_sim
//!
//! sim = tcg_sim.Simulator("data", seed=42)
//! player = tcg_sim.Player("Eggie")
//! sim.register(player, "base_common")
//!
//! packs = sim.complete(player, "base_common", "base_common")
//! print(packs, sim.summary(player))
//! ```

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::core::SimError;

mod py_player;
mod py_sim;

pub use py_player::*;
pub use py_sim::*;

fn value_error(message: String) -> PyErr {
    PyErr::new::<PyValueError, _>(message)
}

fn to_py_err(err: SimError) -> PyErr {
    match err {
        SimError::Io { .. } | SimError::Checkpoint(_) => PyErr::new::<PyRuntimeError, _>(err.to_string()),
        _ => value_error(err.to_string()),
    }
}

/// tcg_sim: trading card pack opening simulator.
#[pymodule]
fn tcg_sim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlayer>()?;
    m.add_class::<PySimulator>()?;
    Ok(())
}
