//! Statistics reporting.
//!
//! Renders a `Player` as raw, compressed, tabular or JSON text. The
//! compressed formats are what snapshot files store; `compile` reads the
//! final counts back out of those files.

pub mod compile;
pub mod stats;

pub use compile::{compile_packs_opened, write_compiled_stats, TrialPacks, STATISTICS_DIR};
pub use stats::{collected_summary, raw_data, raw_data_compressed, table_data, to_json};

/// Aggregation level of compressed statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompressLevel {
    /// Collected variants per expansion group.
    Expansion,
    /// Collected variants per registered expansion.
    Pack,
    /// Total cards per border key.
    Border,
}

impl CompressLevel {
    /// Every level, in the order snapshot files are written.
    pub const ALL: [CompressLevel; 3] = [
        CompressLevel::Expansion,
        CompressLevel::Pack,
        CompressLevel::Border,
    ];

    /// Directory name used for this level's snapshot files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            CompressLevel::Expansion => "expansion",
            CompressLevel::Pack => "pack",
            CompressLevel::Border => "border",
        }
    }
}

impl std::fmt::Display for CompressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
