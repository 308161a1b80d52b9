//! The node boundary: typed access, disabled behavior, and price helpers.

use crate::mock_infrastructure::{
    header, pair_reader, populate_pair, MockStateReader, PAIR, RESERVE0, RESERVE1, USDC, WETH,
};
use alloy_primitives::address;
use hotstate_node::{ApiError, HotCacheHandle};
use hotstate_core::{
    known_contracts, ContractKind, HotCacheConfig, UniswapV2Decoder,
};
use num_traits::One;
use std::sync::Arc;

fn enabled_handle() -> HotCacheHandle {
    let handle = HotCacheHandle::from_config(HotCacheConfig {
        enabled: true,
        watchlist: vec![PAIR],
        ..Default::default()
    });
    handle
        .register_hot_cache_decoder(PAIR, Arc::new(UniswapV2Decoder))
        .unwrap();
    handle
}

#[test]
fn typed_uniswap_query_returns_decoded_pair() {
    let handle = enabled_handle();
    let reader = pair_reader();
    handle.hot_cache().unwrap().update(&header(100, 0xA1), &reader).unwrap();

    let pair = handle.hot_cache_uniswap_v2_state(&PAIR).unwrap();
    assert_eq!(pair.token0, USDC);
    assert_eq!(pair.token1, WETH);
    assert_eq!(pair.reserve0, alloy_primitives::U256::from(RESERVE0));
    assert_eq!(pair.reserve1, alloy_primitives::U256::from(RESERVE1));

    // Price helpers are exact rationals: price * inverse == 1.
    assert!((pair.price() * pair.inverse_price()).is_one());
}

#[test]
fn unwatched_address_is_not_found() {
    let handle = enabled_handle();
    handle.hot_cache().unwrap().update(&header(100, 0xA1), &pair_reader()).unwrap();

    let dead = address!("0x000000000000000000000000000000000000dEaD");
    assert_eq!(handle.hot_cache_uniswap_v2_state(&dead).unwrap_err(), ApiError::NotFound);
}

#[test]
fn undecoded_watched_address_is_rejected_by_typed_query() {
    let handle = HotCacheHandle::from_config(HotCacheConfig {
        enabled: true,
        watchlist: vec![PAIR],
        ..Default::default()
    });
    handle.hot_cache().unwrap().update(&header(100, 0xA1), &MockStateReader::new()).unwrap();

    assert_eq!(
        handle.hot_cache_uniswap_v2_state(&PAIR).unwrap_err(),
        ApiError::WrongType { expected: ContractKind::UniswapV2, actual: ContractKind::Unknown }
    );
}

#[test]
fn snapshot_and_statistics_flow_through_the_facade() {
    let handle = enabled_handle();
    handle.hot_cache().unwrap().update(&header(100, 0xA1), &pair_reader()).unwrap();

    let snapshot = handle.hot_cache_snapshot().unwrap();
    assert_eq!(snapshot.block_number, 100);
    assert_eq!(snapshot.len(), 1);

    let _ = handle.hot_cache_contract_state(&PAIR).unwrap();
    let stats = handle.hot_cache_statistics().unwrap();
    assert_eq!(stats.updates, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn default_watchlist_and_decoders_cover_mainnet_pairs() {
    let watchlist = known_contracts::default_watchlist(1);
    let handle = HotCacheHandle::from_config(HotCacheConfig {
        enabled: true,
        watchlist: watchlist.clone(),
        ..Default::default()
    });
    let cache = handle.hot_cache().unwrap();
    known_contracts::register_default_decoders(cache, 1);

    let reader = MockStateReader::new();
    populate_pair(&reader);
    cache.update(&header(100, 0xA1), &reader).unwrap();

    // Every default-watched pair is represented; the one with fixture state
    // decodes fully.
    let snapshot = cache.snapshot();
    assert_eq!(snapshot.len(), watchlist.len());
    assert!(handle.hot_cache_uniswap_v2_state(&PAIR).is_ok());
}
