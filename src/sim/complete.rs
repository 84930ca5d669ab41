//! The completion driver.
//!
//! `complete_expansion` opens packs until the expansion is complete. There
//! is no iteration cap: a target the pack cannot complete loops forever.
//! The reachability audit runs first and logs a warning for such targets.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn, Level};

use super::snapshot::SnapshotSink;
use crate::collection::Player;
use crate::core::{RandomSource, Result};
use crate::draw::{Expansion, Pack};

/// When the driver hands the player to its sink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnapshotPolicy {
    /// Snapshot whenever `packs_opened` is a multiple of this.
    pub every_n_packs: Option<NonZeroU64>,
    /// Snapshot once after the expansion completes.
    pub on_complete: bool,
}

impl SnapshotPolicy {
    #[must_use]
    pub fn never() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn every(n: u64) -> Self {
        Self {
            every_n_packs: NonZeroU64::new(n),
            on_complete: false,
        }
    }

    #[must_use]
    pub fn with_on_complete(mut self, on_complete: bool) -> Self {
        self.on_complete = on_complete;
        self
    }

    fn is_due(&self, packs_opened: u64) -> bool {
        self.every_n_packs
            .is_some_and(|n| packs_opened % n.get() == 0)
    }
}

/// Outcome of one `complete_expansion` call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionReport {
    pub expansion: String,
    pub pack: String,
    /// Packs opened during this call.
    pub packs_opened: u64,
    /// The player's packs opened after this call.
    pub total_packs_opened: u64,
    /// Cards added to the collection during this call.
    pub cards_drawn: u64,
}

/// Open `pack` until `expansion` is complete in the player's collection.
///
/// Returns immediately if the expansion is already complete. Any error
/// from opening or snapshotting aborts the loop and is returned as is.
pub fn complete_expansion<R, S>(
    player: &mut Player,
    expansion: &Expansion,
    pack: &Pack<'_>,
    rng: &mut R,
    policy: &SnapshotPolicy,
    sink: &mut S,
) -> Result<CompletionReport>
where
    R: RandomSource + ?Sized,
    S: SnapshotSink + ?Sized,
{
    let reachability = pack.reachability(expansion)?;
    if !reachability.is_completable() {
        warn!(
            expansion = expansion.name(),
            pack = pack.name(),
            unreachable = ?reachability.unreachable,
            "pack can never complete expansion; completion will not terminate"
        );
    }

    let mut packs_opened = 0u64;
    let mut cards_drawn = 0u64;

    while !expansion.is_complete(&player.collection)? {
        let draws = pack.open(&mut player.collection, rng)?;
        let total = player.record_pack();
        packs_opened += 1;
        cards_drawn += draws.len() as u64;

        if tracing::enabled!(Level::DEBUG) {
            debug!(
                player = %player.name,
                pack = pack.name(),
                packs_opened = total,
                collected = expansion.collected_count(&player.collection)?,
                total = expansion.total_variants(),
                "opened pack"
            );
        }

        if policy.is_due(total) {
            sink.snapshot(player)?;
        }
    }

    if policy.on_complete {
        sink.snapshot(player)?;
    }

    info!(
        player = %player.name,
        expansion = expansion.name(),
        pack = pack.name(),
        packs_opened,
        total_packs_opened = player.packs_opened,
        "expansion complete"
    );

    Ok(CompletionReport {
        expansion: expansion.name().to_string(),
        pack: pack.name().to_string(),
        packs_opened,
        total_packs_opened: player.packs_opened,
        cards_drawn,
    })
}
