//! # hotstate-node
//!
//! Node-facing boundary of the hot state cache: a handle the host embeds and
//! re-exports to its consumers, plus application configuration loading and
//! logging bootstrap.
//!
//! The handle owns the cache only when the feature is enabled in config;
//! every accessor surfaces [`ApiError::Disabled`] otherwise, so callers do
//! not special-case deployments that run without the cache.

pub mod config;

pub use config::{init_logging, AppConfig, LoggingConfig};

use hotstate_core::{
    CacheError, ContractDecoder, ContractKind, ContractState, DecodedState, HotCacheConfig,
    HotStateCache, Snapshot, Statistics, UniswapV2State,
};
use alloy_primitives::Address;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors surfaced at the node boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The hot cache feature is not enabled.
    #[error("hot cache is disabled")]
    Disabled,

    /// The contract is not in the hot cache.
    #[error("contract not in hot cache")]
    NotFound,

    /// The contract is cached as a different protocol than requested.
    #[error("contract is not a {expected} contract, found {actual}")]
    WrongType {
        /// Kind the caller asked for.
        expected: ContractKind,
        /// Kind the cache holds.
        actual: ContractKind,
    },

    /// The contract is cached without a typed record.
    #[error("contract state not decoded")]
    NotDecoded,

    /// Any other cache-level failure.
    #[error(transparent)]
    Cache(CacheError),
}

impl From<CacheError> for ApiError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::NotFound => Self::NotFound,
            other => Self::Cache(other),
        }
    }
}

/// Host-side handle over the optional hot state cache.
///
/// Constructed once at node startup from [`HotCacheConfig`]; cloning shares
/// the underlying cache.
#[derive(Debug, Clone, Default)]
pub struct HotCacheHandle {
    cache: Option<Arc<HotStateCache>>,
}

impl HotCacheHandle {
    /// Builds the handle from config. A disabled config yields a handle with
    /// no cache behind it.
    #[must_use]
    pub fn from_config(config: HotCacheConfig) -> Self {
        if !config.enabled {
            return Self { cache: None };
        }
        let watchlist = config.watchlist.len();
        let cache = Arc::new(HotStateCache::new(config));
        info!(watchlist, "hot cache attached to node");
        Self { cache: Some(cache) }
    }

    /// Wraps an already constructed cache.
    #[must_use]
    pub fn new(cache: Arc<HotStateCache>) -> Self {
        Self { cache: Some(cache) }
    }

    /// Returns the cache instance, or `None` when disabled.
    #[must_use]
    pub fn hot_cache(&self) -> Option<&Arc<HotStateCache>> {
        self.cache.as_ref().filter(|cache| cache.is_enabled())
    }

    fn enabled_cache(&self) -> Result<&Arc<HotStateCache>, ApiError> {
        self.hot_cache().ok_or(ApiError::Disabled)
    }

    /// Returns the current hot cache snapshot, a consistent view of all
    /// cached contract states.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Disabled`] when the cache is off.
    pub fn hot_cache_snapshot(&self) -> Result<Arc<Snapshot>, ApiError> {
        Ok(self.enabled_cache()?.snapshot())
    }

    /// Returns the cached state for a specific contract.
    ///
    /// Significantly faster than a state trie lookup for watched contracts.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Disabled`] when the cache is off and
    /// [`ApiError::NotFound`] when the contract is not cached.
    pub fn hot_cache_contract_state(
        &self,
        address: &Address,
    ) -> Result<Arc<ContractState>, ApiError> {
        Ok(self.enabled_cache()?.contract_state(address)?)
    }

    /// Returns decoded Uniswap V2 pool state for `address`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::WrongType`] when the contract is cached as a
    /// different protocol and [`ApiError::NotDecoded`] when no typed record
    /// was produced for it.
    pub fn hot_cache_uniswap_v2_state(
        &self,
        address: &Address,
    ) -> Result<UniswapV2State, ApiError> {
        let state = self.hot_cache_contract_state(address)?;

        if state.kind != ContractKind::UniswapV2 {
            return Err(ApiError::WrongType {
                expected: ContractKind::UniswapV2,
                actual: state.kind,
            });
        }

        match state.decoded.as_ref() {
            Some(DecodedState::UniswapV2(pair)) => Ok(pair.clone()),
            Some(_) => Err(ApiError::WrongType {
                expected: ContractKind::UniswapV2,
                actual: state.kind,
            }),
            None => Err(ApiError::NotDecoded),
        }
    }

    /// Returns hot cache performance counters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Disabled`] when the cache is off.
    pub fn hot_cache_statistics(&self) -> Result<Statistics, ApiError> {
        Ok(self.enabled_cache()?.statistics())
    }

    /// Registers a decoder for a specific contract address.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Disabled`] when the cache is off.
    pub fn register_hot_cache_decoder(
        &self,
        address: Address,
        decoder: Arc<dyn ContractDecoder>,
    ) -> Result<(), ApiError> {
        self.enabled_cache()?.register_decoder(address, decoder);
        Ok(())
    }
}
