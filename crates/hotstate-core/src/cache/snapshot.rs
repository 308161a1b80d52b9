//! Immutable point-in-time views of watched contract state.

use crate::{
    decode::DecodedState,
    types::{BlockHeader, ContractKind, SlotMap},
};
use alloy_primitives::{Address, B256};
use std::{collections::HashMap, sync::Arc};

/// Cached state of a single watched contract at one block.
///
/// Stored behind `Arc` inside a [`Snapshot`] and never mutated after
/// publication; a later refresh produces a new record in a new snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractState {
    /// The contract's address.
    pub address: Address,
    /// Protocol the registered decoder identified, `Unknown` without one.
    pub kind: ContractKind,
    /// Raw storage words, exactly the decoder's required slots.
    pub raw_slots: SlotMap,
    /// Typed record, present when a decoder was registered and succeeded.
    pub decoded: Option<DecodedState>,
    /// Block number at which this state was last refreshed.
    pub last_updated: u64,
}

impl ContractState {
    /// Returns the cached raw word at `slot`, if that slot was read.
    #[must_use]
    pub fn raw_slot(&self, slot: &B256) -> Option<B256> {
        self.raw_slots.get(slot).copied()
    }
}

/// Immutable snapshot of every refreshable watched contract at one block.
///
/// A watched address absent from `contracts` means the updater could not
/// refresh it for this block (decode failure); readers treat that as a miss.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Block number the snapshot was built at.
    pub block_number: u64,
    /// Hash of that block.
    pub block_hash: B256,
    /// Timestamp of that block, unix seconds.
    pub block_timestamp: u64,
    /// Contract states keyed by address.
    pub contracts: HashMap<Address, Arc<ContractState>, ahash::RandomState>,
}

impl Snapshot {
    /// Empty pre-ingest snapshot used as the initial current pointer.
    ///
    /// Never inserted into history, so it cannot be found by ancestor
    /// lookups.
    pub(crate) fn pre_ingest() -> Self {
        Self {
            block_number: 0,
            block_hash: B256::ZERO,
            block_timestamp: 0,
            contracts: HashMap::default(),
        }
    }

    /// Fresh snapshot for `header` with room for `capacity` contracts.
    pub(crate) fn for_header(header: &BlockHeader, capacity: usize) -> Self {
        Self {
            block_number: header.number,
            block_hash: header.hash,
            block_timestamp: header.timestamp,
            contracts: HashMap::with_capacity_and_hasher(capacity, ahash::RandomState::new()),
        }
    }

    /// Looks up the cached state for `address`.
    #[must_use]
    pub fn contract(&self, address: &Address) -> Option<&Arc<ContractState>> {
        self.contracts.get(address)
    }

    /// Number of contracts refreshed at this block.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Whether no contract was refreshed at this block.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}
