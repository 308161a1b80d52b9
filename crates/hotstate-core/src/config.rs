//! Hot state cache configuration.

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};

/// Configuration for the hot state cache.
///
/// The cache ships disabled. Operators opt in per deployment and are expected
/// to leave `shadow_mode` on until validation has run clean for long enough
/// to trust the mirrored state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotCacheConfig {
    /// Whether the cache is active. Defaults to `false`.
    #[serde(default)]
    pub enabled: bool,

    /// Contract addresses whose storage is mirrored. Defaults to empty.
    #[serde(default)]
    pub watchlist: Vec<Address>,

    /// Whether cached slots are cross-checked against canonical state.
    /// Defaults to `true`.
    #[serde(default = "default_shadow_mode")]
    pub shadow_mode: bool,

    /// Maximum number of historical snapshots retained for reorg recovery.
    /// Must be greater than zero. Defaults to `64`.
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
}

fn default_shadow_mode() -> bool {
    true
}

fn default_max_snapshots() -> usize {
    64
}

impl Default for HotCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            watchlist: Vec::new(),
            shadow_mode: true,
            max_snapshots: 64,
        }
    }
}

impl HotCacheConfig {
    /// Validates the configuration for correctness.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error string if `max_snapshots` is zero.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_snapshots == 0 {
            return Err("max_snapshots must be greater than 0".to_string());
        }
        Ok(())
    }
}
