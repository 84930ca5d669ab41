//! Simulation drivers.
//!
//! - `complete_expansion`: open one pack until one expansion is complete
//! - `TrialRunner`: many independent trials over the configured targets
//! - `SnapshotSink`: where periodic player snapshots go

pub mod complete;
pub mod snapshot;
pub mod trials;

pub use complete::{complete_expansion, CompletionReport, SnapshotPolicy};
pub use snapshot::{
    load_checkpoint, save_checkpoint, Checkpoint, MemorySink, NullSink, SnapshotSink,
    StatsFileSink, COMPRESSED_DIR,
};
pub use trials::{TrialOutcome, TrialRunner};
