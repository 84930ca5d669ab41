//! Aggregation of per-trial statistics files.
//!
//! Each trial leaves `raw_data_compressed/expansion/trial_<i>.txt` behind.
//! Its last line is the final snapshot, whose second field is the number of
//! packs the trial opened.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use super::CompressLevel;
use crate::core::{Result, SimError};
use crate::sim::COMPRESSED_DIR;

/// Directory under the output root holding compiled statistics.
pub const STATISTICS_DIR: &str = "statistics";

/// Packs opened by one trial, read from its final snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialPacks {
    pub trial: u64,
    pub packs_opened: u64,
}

fn malformed(path: &Path, reason: impl Into<String>) -> SimError {
    SimError::MalformedStats {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
}

/// Trial index of a `trial_<i>.txt` file name.
fn trial_index(file_name: &str) -> Option<u64> {
    file_name
        .strip_prefix("trial_")?
        .strip_suffix(".txt")?
        .parse()
        .ok()
}

fn last_packs_opened(path: &Path) -> Result<u64> {
    let text = fs::read_to_string(path).map_err(|e| SimError::io(path, e))?;
    let last = text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .ok_or_else(|| malformed(path, "file is empty"))?;
    let field = last
        .split(';')
        .nth(1)
        .ok_or_else(|| malformed(path, "last line has no packs_opened field"))?;
    field
        .trim()
        .parse()
        .map_err(|_| malformed(path, format!("packs_opened '{field}' is not a count")))
}

/// Final packs-opened count of every trial file under `output_dir`, sorted
/// by trial index. Files not named `trial_<i>.txt` are skipped.
pub fn compile_packs_opened(output_dir: &Path) -> Result<Vec<TrialPacks>> {
    let dir = output_dir
        .join(COMPRESSED_DIR)
        .join(CompressLevel::Expansion.as_str());
    let entries = fs::read_dir(&dir).map_err(|e| SimError::io(&dir, e))?;

    let mut compiled = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SimError::io(&dir, e))?;
        let name = entry.file_name();
        let Some(trial) = name.to_str().and_then(trial_index) else {
            continue;
        };
        let packs_opened = last_packs_opened(&entry.path())?;
        compiled.push(TrialPacks {
            trial,
            packs_opened,
        });
    }
    compiled.sort_by_key(|t| t.trial);
    Ok(compiled)
}

/// Write `statistics/stats.txt` under `output_dir`: one packs-opened count
/// per line, in trial order. Returns the file written.
pub fn write_compiled_stats(output_dir: &Path) -> Result<PathBuf> {
    let compiled = compile_packs_opened(output_dir)?;
    let dir = output_dir.join(STATISTICS_DIR);
    fs::create_dir_all(&dir).map_err(|e| SimError::io(&dir, e))?;

    let path = dir.join("stats.txt");
    let file = fs::File::create(&path).map_err(|e| SimError::io(&path, e))?;
    let mut out = BufWriter::new(file);
    for t in &compiled {
        writeln!(out, "{}", t.packs_opened).map_err(|e| SimError::io(&path, e))?;
    }
    out.flush().map_err(|e| SimError::io(&path, e))?;

    info!(trials = compiled.len(), path = %path.display(), "compiled statistics");
    Ok(path)
}
