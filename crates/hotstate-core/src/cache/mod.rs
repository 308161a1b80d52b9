//! Snapshot-versioned contract state cache.
//!
//! The cache mirrors the storage of a fixed watchlist of contracts into a
//! decoded, read-optimized form, one immutable [`Snapshot`] per canonical
//! block:
//!
//! ```text
//!                    block import                    readers
//!                         │                             │
//!                         ▼                             ▼
//!                  ┌─────────────┐   release     ┌─────────────┐
//!                  │   updater   │──────store───►│   current   │
//!                  │ (one writer)│               │  (ArcSwap)  │
//!                  └──────┬──────┘               └─────────────┘
//!                         │ insert + retention          ▲
//!                         ▼                             │ republish
//!                  ┌─────────────┐                ┌─────┴───────┐
//!                  │   history   │───ancestor────►│    reorg    │
//!                  │ hash → snap │     lookup     │   handler   │
//!                  └─────────────┘                └─────────────┘
//! ```
//!
//! # Read path
//!
//! Readers load the current snapshot with a single acquire load and traverse
//! it without locks. Because publication is one release store, a snapshot is
//! internally consistent: every contract in it was read at the same block. A
//! caller that needs cross-call consistency must hold on to the first
//! snapshot it loads; two `snapshot()` calls may straddle a publication.
//!
//! # Write path
//!
//! The host invokes [`HotStateCache::update`] once per imported canonical
//! block and [`HotStateCache::handle_reorg`] when the canonical chain
//! switches branches. Writer calls must be serialized by the host; the cache
//! does not lock writers against each other.
//!
//! # Shadow mode
//!
//! While `shadow_mode` is on, [`HotStateCache::validate`] re-reads every
//! cached slot from canonical state and reports the first divergence as
//! [`CacheError::InconsistentState`]. The cache never repairs itself; the
//! host decides whether to disable and alert.

mod hot_cache;
mod reorg;
mod snapshot;
mod update;
mod validation;

pub use hot_cache::HotStateCache;
pub use snapshot::{ContractState, Snapshot};

use crate::decode::DecodeError;
use alloy_primitives::{Address, B256};
use thiserror::Error;

/// Errors surfaced by cache lookups and the shadow validator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The contract is not present in the current snapshot.
    #[error("contract not in cache")]
    NotFound,

    /// The address is not on the watchlist.
    #[error("contract not in watchlist")]
    NotWatched,

    /// The contract is cached but the requested slot is not.
    #[error("slot {slot} not cached for {address}")]
    SlotMissing {
        /// Contract whose slot was requested.
        address: Address,
        /// The absent slot key.
        slot: B256,
    },

    /// A registered decoder rejected the raw slots.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The shadow validator found a cached slot diverging from canonical
    /// state.
    #[error(
        "cache inconsistent with canonical state: contract={address} slot={slot} \
         cached={cached} canonical={canonical}"
    )]
    InconsistentState {
        /// Contract holding the divergent slot.
        address: Address,
        /// Slot key that diverged.
        slot: B256,
        /// Value held by the cache.
        cached: B256,
        /// Value read back from canonical state.
        canonical: B256,
    },
}
