//! Snapshot sinks and checkpoints.
//!
//! The driver hands the player to a [`SnapshotSink`] every n packs and once
//! on completion. What a sink does with it is up to the sink: nothing,
//! keep it in memory, or append compressed statistics lines to disk.

use std::fs::{self, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::collection::Player;
use crate::core::{Result, SimError, SimRngState};
use crate::defs::Definitions;
use crate::report::{raw_data_compressed, CompressLevel};

/// Directory under the output root holding compressed statistics.
pub const COMPRESSED_DIR: &str = "raw_data_compressed";

/// Receiver of periodic player snapshots.
pub trait SnapshotSink {
    fn snapshot(&mut self, player: &Player) -> Result<()>;
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for &mut S {
    fn snapshot(&mut self, player: &Player) -> Result<()> {
        (**self).snapshot(player)
    }
}

/// Discards every snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn snapshot(&mut self, _player: &Player) -> Result<()> {
        Ok(())
    }
}

/// Keeps every snapshot in memory.
///
/// Player clones share structure with the live collection, so this stays
/// cheap even for long runs.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    pub snapshots: Vec<Player>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// `packs_opened` of every captured snapshot, in order.
    #[must_use]
    pub fn packs_opened(&self) -> Vec<u64> {
        self.snapshots.iter().map(|p| p.packs_opened).collect()
    }
}

impl SnapshotSink for MemorySink {
    fn snapshot(&mut self, player: &Player) -> Result<()> {
        self.snapshots.push(player.clone());
        Ok(())
    }
}

/// Appends one compressed statistics line per level to
/// `<root>/raw_data_compressed/<level>/<stem>.txt`.
///
/// The header line is written only when a file is created.
#[derive(Debug)]
pub struct StatsFileSink<'d> {
    defs: &'d Definitions,
    root: PathBuf,
    file_stem: String,
}

impl<'d> StatsFileSink<'d> {
    pub fn new(defs: &'d Definitions, root: impl Into<PathBuf>, file_stem: impl Into<String>) -> Self {
        Self {
            defs,
            root: root.into(),
            file_stem: file_stem.into(),
        }
    }

    /// Sink for one trial: files are named `trial_<index>.txt`.
    pub fn for_trial(defs: &'d Definitions, root: impl Into<PathBuf>, trial: u64) -> Self {
        Self::new(defs, root, format!("trial_{trial}"))
    }

    /// File written for `level`.
    #[must_use]
    pub fn path_of(&self, level: CompressLevel) -> PathBuf {
        self.root
            .join(COMPRESSED_DIR)
            .join(level.as_str())
            .join(format!("{}.txt", self.file_stem))
    }

    fn append(&self, level: CompressLevel, text: &str) -> Result<()> {
        let path = self.path_of(level);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| SimError::io(dir, e))?;
        }

        let is_new = !path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| SimError::io(&path, e))?;
        let mut out = BufWriter::new(file);

        // text is "header\nvalues"
        let line = if is_new {
            text
        } else {
            text.split_once('\n').map_or(text, |(_, values)| values)
        };
        writeln!(out, "{line}")
            .and_then(|()| out.flush())
            .map_err(|e| SimError::io(&path, e))
    }
}

impl SnapshotSink for StatsFileSink<'_> {
    fn snapshot(&mut self, player: &Player) -> Result<()> {
        for level in CompressLevel::ALL {
            let text = raw_data_compressed(player, self.defs, level)?;
            self.append(level, &text)?;
        }
        Ok(())
    }
}

/// A resumable trial state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub player: Player,
    pub rng: Option<SimRngState>,
}

/// Write a checkpoint with bincode.
pub fn save_checkpoint(path: &Path, checkpoint: &Checkpoint) -> Result<()> {
    let file = fs::File::create(path).map_err(|e| SimError::io(path, e))?;
    let mut out = BufWriter::new(file);
    bincode::serialize_into(&mut out, checkpoint)?;
    out.flush().map_err(|e| SimError::io(path, e))
}

/// Read a checkpoint written by [`save_checkpoint`].
pub fn load_checkpoint(path: &Path) -> Result<Checkpoint> {
    let file = fs::File::open(path).map_err(|e| SimError::io(path, e))?;
    Ok(bincode::deserialize_from(BufReader::new(file))?)
}
