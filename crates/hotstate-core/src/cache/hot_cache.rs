//! Cache construction and the lock-free read surface.

use crate::{
    cache::{CacheError, ContractState, Snapshot},
    config::HotCacheConfig,
    decode::ContractDecoder,
    stats::{CacheCounters, Statistics},
};
use ahash::RandomState;
use alloy_primitives::{Address, B256};
use arc_swap::ArcSwap;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};
use tracing::{debug, info};

/// In-memory cache of decoded state for a watchlist of contracts.
///
/// Reads are wait-free: the current [`Snapshot`] sits behind an `ArcSwap`
/// and is loaded with one acquire operation. The updater and reorg handler
/// are the only writers and must be serialized by the host.
///
/// # Example
///
/// ```no_run
/// use hotstate_core::{
///     cache::HotStateCache,
///     config::HotCacheConfig,
///     decode::UniswapV2Decoder,
/// };
/// use alloy_primitives::address;
/// use std::sync::Arc;
///
/// let pair = address!("0xB4e16d0168e52d35CaCD2c6185b44281Ec28C9Dc");
/// let cache = HotStateCache::new(HotCacheConfig {
///     enabled: true,
///     watchlist: vec![pair],
///     ..Default::default()
/// });
/// cache.register_decoder(pair, Arc::new(UniswapV2Decoder));
///
/// // After the host has driven `update`, readers take one snapshot and
/// // traverse it without locks.
/// let snapshot = cache.snapshot();
/// if let Some(state) = snapshot.contract(&pair) {
///     println!("pair refreshed at block {}", state.last_updated);
/// }
/// ```
pub struct HotStateCache {
    pub(crate) config: HotCacheConfig,

    /// Current canonical snapshot. Store is a release, load an acquire, so a
    /// reader observing a snapshot observes everything written into it.
    pub(crate) current: ArcSwap<Snapshot>,

    /// Retained snapshots for reorg recovery, keyed by block hash. Bounded
    /// by `config.max_snapshots`.
    pub(crate) history: RwLock<HashMap<B256, Arc<Snapshot>, RandomState>>,

    /// Watched addresses. Fixed at construction, read without locks.
    pub(crate) watchlist: HashSet<Address, RandomState>,

    /// Registered decoders. Registration may race with updates; the updater
    /// clones the `Arc` out so a decoder can never be torn down mid-decode.
    pub(crate) decoders: DashMap<Address, Arc<dyn ContractDecoder>, RandomState>,

    pub(crate) counters: CacheCounters,
}

impl HotStateCache {
    /// Creates a cache from `config`.
    ///
    /// A zero `max_snapshots` falls back to the default of 64. The current
    /// snapshot starts as an empty pre-ingest view at block zero.
    #[must_use]
    pub fn new(mut config: HotCacheConfig) -> Self {
        if config.max_snapshots == 0 {
            config.max_snapshots = 64;
        }

        let watchlist: HashSet<Address, RandomState> =
            config.watchlist.iter().copied().collect();

        if config.enabled {
            info!(
                watchlist = watchlist.len(),
                shadow_mode = config.shadow_mode,
                max_snapshots = config.max_snapshots,
                "hot state cache initialized"
            );
        }

        Self {
            config,
            current: ArcSwap::from_pointee(Snapshot::pre_ingest()),
            history: RwLock::new(HashMap::default()),
            watchlist,
            decoders: DashMap::with_hasher(RandomState::new()),
            counters: CacheCounters::default(),
        }
    }

    /// Whether the cache is active.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Whether shadow validation is active.
    #[inline]
    #[must_use]
    pub fn is_shadow_mode(&self) -> bool {
        self.config.shadow_mode
    }

    /// Whether `address` is on the watchlist.
    #[inline]
    #[must_use]
    pub fn is_watched(&self, address: &Address) -> bool {
        self.watchlist.contains(address)
    }

    /// Registers `decoder` for `address`, replacing any previous decoder.
    ///
    /// Safe to call from any thread, including concurrently with updates.
    pub fn register_decoder(&self, address: Address, decoder: Arc<dyn ContractDecoder>) {
        debug!(address = %address, kind = %decoder.kind(), "registered contract decoder");
        self.decoders.insert(address, decoder);
    }

    /// Returns the current snapshot.
    ///
    /// A single acquire load; the returned snapshot is internally consistent
    /// and stays valid for as long as the caller holds it, even across later
    /// publications.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Returns the cached state for `address` from the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if the contract is absent; the miss
    /// counter is incremented. Hits increment the hit counter.
    pub fn contract_state(&self, address: &Address) -> Result<Arc<ContractState>, CacheError> {
        let snapshot = self.current.load();
        match snapshot.contracts.get(address) {
            Some(state) => {
                self.counters.record_hit();
                Ok(state.clone())
            }
            None => {
                self.counters.record_miss();
                Err(CacheError::NotFound)
            }
        }
    }

    /// Returns the raw storage word cached at `slot` of `address`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] if the contract is absent and
    /// [`CacheError::SlotMissing`] if the contract is cached without that
    /// slot.
    pub fn raw_slot(&self, address: &Address, slot: &B256) -> Result<B256, CacheError> {
        let state = self.contract_state(address)?;
        state
            .raw_slot(slot)
            .ok_or(CacheError::SlotMissing { address: *address, slot: *slot })
    }

    /// Returns the snapshot retained for `block_hash`, if still within the
    /// retention window.
    #[must_use]
    pub fn snapshot_at(&self, block_hash: &B256) -> Option<Arc<Snapshot>> {
        self.history.read().get(block_hash).cloned()
    }

    /// Number of snapshots currently retained for reorg recovery.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.read().len()
    }

    /// Takes a value copy of the performance counters.
    ///
    /// The copy is assembled one atomic read at a time and may be mildly
    /// inconsistent across counters under concurrent activity.
    #[must_use]
    pub fn statistics(&self) -> Statistics {
        self.counters.snapshot()
    }
}

impl std::fmt::Debug for HotStateCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HotStateCache")
            .field("enabled", &self.config.enabled)
            .field("watchlist", &self.watchlist.len())
            .field("decoders", &self.decoders.len())
            .field("history", &self.history_len())
            .finish_non_exhaustive()
    }
}
