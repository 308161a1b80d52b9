//! Reorg rollback and replay.
//!
//! When the canonical chain switches branches the snapshots built on the
//! abandoned branch are stale. Recovery rolls the current pointer back to
//! the retained common ancestor and replays the new branch forward:
//!
//! ```text
//! old:  … ── A ── B ── C         current = C (stale)
//!             \
//! new:         B' ── C' ── D'    1. ancestor = A (highest shared hash)
//!                                2. republish A as current
//!                                3. update(B'), update(C'), update(D')
//! ```
//!
//! If the ancestor fell out of the retention window the cache gives up on
//! rollback and rebuilds directly from the new tip's state.

use crate::{
    cache::{CacheError, HotStateCache},
    types::{BlockHeader, StateReader},
};
use ahash::RandomState;
use alloy_primitives::B256;
use std::collections::HashSet;
use tracing::{error, info, warn};

impl HotStateCache {
    /// Rolls the cache back to the common ancestor of `old_chain` and
    /// `new_chain`, then replays the new branch through `reader`.
    ///
    /// Both chains are expected tip-last, the way the host's reorg event
    /// reports them. The common ancestor is the shared hash with the highest
    /// block number; if it is not retained in history (or the chains share
    /// nothing), the cache is rebuilt from the new tip instead.
    ///
    /// The reorg counter is incremented exactly once per call. Must be
    /// serialized with [`update`](Self::update) by the host.
    ///
    /// # Errors
    ///
    /// Propagates the first replay [`update`](Self::update) error; the
    /// current snapshot is left at the last successfully replayed block.
    pub fn handle_reorg(
        &self,
        old_chain: &[BlockHeader],
        new_chain: &[BlockHeader],
        reader: &dyn StateReader,
    ) -> Result<(), CacheError> {
        if !self.config.enabled {
            return Ok(());
        }

        self.counters.record_reorg();
        warn!(
            old_blocks = old_chain.len(),
            new_blocks = new_chain.len(),
            "hot cache handling reorg"
        );

        let ancestor_snapshot = self
            .common_ancestor(old_chain, new_chain)
            .and_then(|hash| self.history.read().get(&hash).cloned());

        let Some(ancestor) = ancestor_snapshot else {
            let Some(tip) = new_chain.last() else {
                return Ok(());
            };
            error!(
                tip = %tip.hash,
                "common ancestor snapshot not found, rebuilding from new tip"
            );
            return self.update(tip, reader);
        };

        self.current.store(ancestor.clone());
        info!(
            block = ancestor.block_number,
            hash = %ancestor.block_hash,
            "rolled back to common ancestor"
        );

        let mut replay: Vec<&BlockHeader> = new_chain.iter().collect();
        replay.sort_by_key(|header| header.number);

        let mut replayed = 0usize;
        for header in replay {
            if header.number <= ancestor.block_number {
                continue;
            }
            self.update(header, reader)?;
            replayed += 1;
        }

        info!(
            blocks = replayed,
            new_head = self.snapshot().block_number,
            "replayed new chain"
        );

        Ok(())
    }

    /// Finds the highest-block hash shared by both chains.
    ///
    /// The new chain's hashes go into a set, then the old chain is scanned
    /// tip to root; the first hit is the highest shared block.
    fn common_ancestor(
        &self,
        old_chain: &[BlockHeader],
        new_chain: &[BlockHeader],
    ) -> Option<B256> {
        let new_hashes: HashSet<B256, RandomState> =
            new_chain.iter().map(|header| header.hash).collect();

        old_chain
            .iter()
            .rev()
            .find(|header| new_hashes.contains(&header.hash))
            .map(|header| header.hash)
    }
}
