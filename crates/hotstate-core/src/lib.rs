//! # hotstate-core
//!
//! In-memory hot state cache for a blockchain node: the storage slots of a
//! configured watchlist of contracts are continuously mirrored into a
//! decoded, read-optimized form. Co-located latency-sensitive consumers read
//! this cache instead of the canonical state trie, trading a small memory
//! footprint for orders of magnitude in read latency.
//!
//! ## Architecture
//!
//! ```text
//! block import ──► updater ──► Snapshot (immutable) ──► ArcSwap current
//!                     │                                      ▲
//!                     ├──► history (hash → snapshot)         │ lock-free
//!                     │         ▲                            │ acquire load
//! reorg event ──► reorg handler ┘                         readers
//!                     │
//! shadow cadence ──► validator ──► InconsistentState on drift
//! ```
//!
//! - **[`cache`]**: the snapshot-versioned cache core with lock-free
//!   publication, bounded history retention, the block-driven updater, the
//!   reorg handler, and the shadow validator.
//! - **[`decode`]**: the decoder framework mapping watched addresses to
//!   typed storage parsers, plus the Uniswap V2 pair decoder.
//! - **[`codec`]**: pure bit-packed field extraction for 32-byte storage
//!   words.
//! - **[`config`]**: cache configuration (disabled by default, shadow mode
//!   on by default).
//! - **[`known_contracts`]**: well-known mainnet addresses for seeding
//!   watchlists.
//! - **[`stats`]**: atomic performance counters.
//!
//! The cache is strictly a read-side mirror: nothing persists across
//! restarts, nothing writes back to state, and blocks must arrive in
//! canonical order with reorgs declared explicitly by the host.

pub mod cache;
pub mod codec;
pub mod config;
pub mod decode;
pub mod known_contracts;
pub mod stats;
pub mod types;


pub use cache::{CacheError, ContractState, HotStateCache, Snapshot};
pub use config::HotCacheConfig;
pub use decode::{ContractDecoder, DecodeError, DecodedState, UniswapV2Decoder, UniswapV2State};
pub use stats::Statistics;
pub use types::{BlockHeader, ContractKind, SlotMap, StateReader};
