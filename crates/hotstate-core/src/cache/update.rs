//! Block-driven snapshot construction and retention.

use crate::{
    cache::{CacheError, ContractState, HotStateCache, Snapshot},
    types::{BlockHeader, ContractKind, SlotMap, StateReader},
};
use ahash::RandomState;
use alloy_primitives::{Address, B256};
use std::{collections::HashMap, sync::Arc};
use tracing::{debug, trace, warn};

impl HotStateCache {
    /// Rebuilds the cache for a newly imported canonical block.
    ///
    /// Reads every watched contract's required slots through `reader`,
    /// decodes them, and publishes the result as the new current snapshot.
    /// A contract whose decode fails is logged and omitted from this
    /// snapshot; one bad decoder must not take down the rest of the cache.
    ///
    /// The host must call this in canonical order (increasing block number,
    /// parent-extending) and must serialize it with
    /// [`handle_reorg`](Self::handle_reorg).
    ///
    /// # Errors
    ///
    /// Currently infallible in practice; the `Result` is the seam through
    /// which replay errors propagate out of reorg handling.
    pub fn update(
        &self,
        header: &BlockHeader,
        reader: &dyn StateReader,
    ) -> Result<(), CacheError> {
        if !self.config.enabled {
            return Ok(());
        }

        let mut snapshot = Snapshot::for_header(header, self.watchlist.len());

        for address in &self.watchlist {
            match self.refresh_contract(*address, header.number, reader) {
                Ok(state) => {
                    snapshot.contracts.insert(*address, Arc::new(state));
                }
                Err(err) => {
                    warn!(
                        address = %address,
                        block = header.number,
                        error = %err,
                        "failed to refresh contract state"
                    );
                }
            }
        }

        let snapshot = Arc::new(snapshot);

        {
            let mut history = self.history.write();
            history.insert(header.hash, snapshot.clone());
            self.cleanup_old_snapshots(&mut history, header.number);
        }

        // Release store: readers that observe this pointer observe the fully
        // built snapshot.
        self.current.store(snapshot.clone());
        self.counters.record_update();

        debug!(
            block = header.number,
            hash = %header.hash,
            contracts = snapshot.len(),
            "hot cache updated"
        );

        Ok(())
    }

    /// Reads and decodes one watched contract at `block`.
    ///
    /// Without a registered decoder the contract is still represented, with
    /// `Unknown` kind and no slots, so callers can tell "watched but not
    /// decodable" from "not watched".
    fn refresh_contract(
        &self,
        address: Address,
        block: u64,
        reader: &dyn StateReader,
    ) -> Result<ContractState, CacheError> {
        // Clone the decoder out of the registry instead of holding the shard
        // lock across reader calls; the Arc keeps the decoder alive even if
        // it is replaced mid-decode.
        let Some(decoder) = self.decoders.get(&address).map(|entry| entry.value().clone())
        else {
            return Ok(ContractState {
                address,
                kind: ContractKind::Unknown,
                raw_slots: SlotMap::default(),
                decoded: None,
                last_updated: block,
            });
        };

        let required = decoder.required_slots();
        let mut raw_slots =
            SlotMap::with_capacity_and_hasher(required.len(), ahash::RandomState::new());
        for slot in required {
            raw_slots.insert(*slot, reader.get_state(address, *slot));
        }

        let decoded = decoder.decode(&raw_slots)?;
        trace!(
            address = %address,
            kind = %decoder.kind(),
            slots = raw_slots.len(),
            "contract state decoded"
        );

        Ok(ContractState {
            address,
            kind: decoder.kind(),
            raw_slots,
            decoded: Some(decoded),
            last_updated: block,
        })
    }

    /// Drops retained snapshots that fell out of the retention window.
    ///
    /// Keeps at most `max_snapshots` entries for a run of consecutive block
    /// numbers ending at `current_block`. Called with the history write lock
    /// held.
    fn cleanup_old_snapshots(
        &self,
        history: &mut HashMap<B256, Arc<Snapshot>, RandomState>,
        current_block: u64,
    ) {
        if history.len() <= self.config.max_snapshots {
            return;
        }

        let cutoff = current_block.saturating_sub(self.config.max_snapshots as u64 - 1);
        history.retain(|_, snapshot| {
            let keep = snapshot.block_number >= cutoff;
            if !keep {
                trace!(block = snapshot.block_number, "removed old snapshot");
            }
            keep
        });
    }
}
