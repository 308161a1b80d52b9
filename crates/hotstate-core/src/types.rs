//! Shared types for the hot state cache.

use alloy_primitives::{Address, B256};
use std::collections::HashMap;

/// Raw storage map for a single contract: 32-byte slot key to 32-byte word.
///
/// Uses `ahash` hashing since slot lookups sit on the read hot path.
pub type SlotMap = HashMap<B256, B256, ahash::RandomState>;

/// The subset of a block header the cache consumes.
///
/// The host hands these to [`update`](crate::cache::HotStateCache::update) on
/// every canonical block import. Nothing beyond number, hash, and timestamp
/// is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockHeader {
    /// Canonical block number.
    pub number: u64,
    /// Canonical block hash.
    pub hash: B256,
    /// Block timestamp in unix seconds.
    pub timestamp: u64,
}

impl BlockHeader {
    /// Creates a header from its three consumed fields.
    #[must_use]
    pub const fn new(number: u64, hash: B256, timestamp: u64) -> Self {
        Self { number, hash, timestamp }
    }
}

/// Identifies the on-chain protocol a watched contract belongs to.
///
/// Drives which decoder output variant a [`ContractState`] carries. `Unknown`
/// marks a watched address with no registered decoder.
///
/// [`ContractState`]: crate::cache::ContractState
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum ContractKind {
    /// Watched address with no registered decoder.
    #[default]
    Unknown,
    /// Uniswap V2 pair contract.
    UniswapV2,
    /// Uniswap V3 pool contract.
    UniswapV3,
    /// Aave lending pool contract.
    Aave,
    /// Curve pool contract.
    Curve,
}

impl std::fmt::Display for ContractKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Unknown => "Unknown",
            Self::UniswapV2 => "UniswapV2",
            Self::UniswapV3 => "UniswapV3",
            Self::Aave => "Aave",
            Self::Curve => "Curve",
        };
        f.write_str(name)
    }
}

/// Read access to canonical state at the block currently being ingested.
///
/// The cache queries watched contracts through this seam instead of depending
/// on a concrete state trie. Implementations must return the value at the
/// canonical state for the block being processed; a reader that cannot read
/// returns the zero word.
pub trait StateReader {
    /// Returns the 32-byte word stored at `slot` of `address`.
    fn get_state(&self, address: Address, slot: B256) -> B256;
}
