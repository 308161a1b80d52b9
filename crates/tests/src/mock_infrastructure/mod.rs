//! Mock infrastructure for hot cache testing.
//!
//! Provides a mutable canonical-state stand-in and fixture builders so the
//! suites can drive the cache without a real node behind it.
//!
//! ## Components
//!
//! - [`MockStateReader`]: in-memory slot table implementing `StateReader`;
//!   slots can be rewritten mid-test to simulate canonical drift
//! - Header and pair fixtures matching the mainnet USDC/WETH pool

use alloy_primitives::{Address, B256, U256};
use hotstate_core::{
    codec,
    decode::uniswap_v2,
    known_contracts::{PAIR_USDC_WETH, USDC_MAINNET, WETH_MAINNET},
    BlockHeader, StateReader,
};
use parking_lot::Mutex;
use std::collections::HashMap;

/// The mainnet USDC/WETH pair used as the standard fixture contract.
pub const PAIR: Address = PAIR_USDC_WETH;
/// USDC, `token0` of the fixture pair.
pub const USDC: Address = USDC_MAINNET;
/// WETH, `token1` of the fixture pair.
pub const WETH: Address = WETH_MAINNET;

/// Fixture reserve of `token0`.
pub const RESERVE0: u64 = 1_000_000;
/// Fixture reserve of `token1`.
pub const RESERVE1: u64 = 500;
/// Fixture reserve timestamp.
pub const RESERVES_TIMESTAMP: u32 = 1_234_567_890;

/// Canonical-state stand-in backed by a mutable slot table.
///
/// Unset slots read as the zero word, matching the infallible
/// [`StateReader`] contract. Tests mutate the table with [`set`] to simulate
/// canonical state moving underneath the cache.
///
/// [`set`]: MockStateReader::set
#[derive(Default)]
pub struct MockStateReader {
    slots: Mutex<HashMap<(Address, B256), B256>>,
}

impl MockStateReader {
    /// Empty reader; every slot reads as zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the canonical word at `slot` of `address`.
    pub fn set(&self, address: Address, slot: B256, value: B256) {
        self.slots.lock().insert((address, slot), value);
    }

    /// Removes the canonical word at `slot` of `address`; it reads as zero
    /// afterwards.
    pub fn clear(&self, address: Address, slot: B256) {
        self.slots.lock().remove(&(address, slot));
    }
}

impl StateReader for MockStateReader {
    fn get_state(&self, address: Address, slot: B256) -> B256 {
        self.slots.lock().get(&(address, slot)).copied().unwrap_or_default()
    }
}

/// Header with a hash derived deterministically from `tag`, so tests can
/// re-derive the hash of any block they created.
#[must_use]
pub fn header(number: u64, tag: u8) -> BlockHeader {
    BlockHeader::new(number, B256::repeat_byte(tag), 1_700_000_000 + number)
}

/// Populates `reader` with the standard USDC/WETH pair fixture.
pub fn populate_pair(reader: &MockStateReader) {
    let reserves = codec::pack_reserves(
        U256::from(RESERVE0),
        U256::from(RESERVE1),
        RESERVES_TIMESTAMP,
    )
    .expect("fixture reserves fit");

    reader.set(PAIR, uniswap_v2::SLOT_TOKEN0, USDC.into_word());
    reader.set(PAIR, uniswap_v2::SLOT_TOKEN1, WETH.into_word());
    reader.set(PAIR, uniswap_v2::SLOT_RESERVES, B256::from(reserves));
    reader.set(PAIR, uniswap_v2::SLOT_PRICE0_CUMULATIVE, B256::from(U256::from(123_456u64)));
    reader.set(PAIR, uniswap_v2::SLOT_PRICE1_CUMULATIVE, B256::from(U256::from(789_012u64)));
    reader.set(PAIR, uniswap_v2::SLOT_K_LAST, B256::from(U256::from(999_999u64)));
}

/// Reader pre-populated with the standard pair fixture.
#[must_use]
pub fn pair_reader() -> MockStateReader {
    let reader = MockStateReader::new();
    populate_pair(&reader);
    reader
}

/// Enabled cache watching the fixture pair, with its decoder registered.
#[must_use]
pub fn pair_cache(max_snapshots: usize) -> hotstate_core::HotStateCache {
    let cache = hotstate_core::HotStateCache::new(hotstate_core::HotCacheConfig {
        enabled: true,
        watchlist: vec![PAIR],
        shadow_mode: true,
        max_snapshots,
    });
    cache.register_decoder(PAIR, std::sync::Arc::new(hotstate_core::UniswapV2Decoder));
    cache
}
