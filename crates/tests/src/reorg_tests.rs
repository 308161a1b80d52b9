//! Rollback and replay across chain reorganizations.
//!
//! Chain segments are passed tip-last and include the fork point, the way
//! the host's reorg event reports both branches.

use crate::mock_infrastructure::{header, pair_cache, pair_reader, PAIR, RESERVE1};
use alloy_primitives::U256;
use hotstate_core::{codec, decode::uniswap_v2, DecodedState};

#[test]
fn reorg_with_retained_ancestor_replays_the_new_branch() {
    let cache = pair_cache(64);
    let reader = pair_reader();

    let h1 = header(1, 0x10);
    let h2a = header(2, 0x2A);
    let h3a = header(3, 0x3A);
    for h in [&h1, &h2a, &h3a] {
        cache.update(h, &reader).unwrap();
    }
    assert_eq!(cache.snapshot().block_hash, h3a.hash);

    let h2b = header(2, 0x2B);
    let h3b = header(3, 0x3B);
    cache
        .handle_reorg(&[h1, h2a, h3a], &[h1, h2b, h3b], &reader)
        .unwrap();

    assert_eq!(cache.snapshot().block_number, 3);
    assert_eq!(cache.snapshot().block_hash, h3b.hash);
    assert!(cache.snapshot_at(&h1.hash).is_some());
    assert!(cache.snapshot_at(&h2b.hash).is_some());
    assert!(cache.snapshot_at(&h3b.hash).is_some());
    assert_eq!(cache.statistics().reorgs, 1);
}

#[test]
fn reorg_replay_reads_the_new_branch_state() {
    let cache = pair_cache(64);
    let reader = pair_reader();

    let h1 = header(1, 0x10);
    let h2a = header(2, 0x2A);
    cache.update(&h1, &reader).unwrap();
    cache.update(&h2a, &reader).unwrap();

    // The new branch carries different reserves.
    let reserves =
        codec::pack_reserves(U256::from(2_000_000u64), U256::from(RESERVE1), 1_234_567_999)
            .unwrap();
    reader.set(PAIR, uniswap_v2::SLOT_RESERVES, reserves.into());

    let h2b = header(2, 0x2B);
    cache.handle_reorg(&[h1, h2a], &[h1, h2b], &reader).unwrap();

    let snapshot = cache.snapshot();
    assert_eq!(snapshot.block_hash, h2b.hash);
    let state = snapshot.contract(&PAIR).unwrap();
    match state.decoded.as_ref().unwrap() {
        DecodedState::UniswapV2(pair) => {
            assert_eq!(pair.reserve0, U256::from(2_000_000u64));
        }
        other => panic!("unexpected decoded kind: {other:?}"),
    }
}

#[test]
fn reorg_with_evicted_ancestor_rebuilds_from_new_tip() {
    // A window of one keeps only the tip, so the fork point is long gone.
    let cache = pair_cache(1);
    let reader = pair_reader();

    for number in 1..=3u64 {
        cache.update(&header(number, number as u8), &reader).unwrap();
    }

    let h3a = header(3, 3);
    let h5b = header(5, 0x5B);
    cache.handle_reorg(&[h3a], &[h5b], &reader).unwrap();

    assert_eq!(cache.snapshot().block_number, 5);
    assert_eq!(cache.snapshot().block_hash, h5b.hash);
    assert!(cache.snapshot().contract(&PAIR).is_some());
    assert_eq!(cache.statistics().reorgs, 1);
}

#[test]
fn disjoint_chains_rebuild_from_new_tip() {
    let cache = pair_cache(64);
    let reader = pair_reader();

    cache.update(&header(1, 1), &reader).unwrap();

    let h9 = header(9, 0x99);
    cache.handle_reorg(&[header(1, 1)], &[header(8, 0x88), h9], &reader).unwrap();

    assert_eq!(cache.snapshot().block_hash, h9.hash);
    assert_eq!(cache.statistics().reorgs, 1);
}

#[test]
fn empty_old_chain_with_one_new_header_equals_a_single_update() {
    let reorged = pair_cache(64);
    let updated = pair_cache(64);
    let reader = pair_reader();

    let h1 = header(1, 1);
    reorged.handle_reorg(&[], &[h1], &reader).unwrap();
    updated.update(&h1, &reader).unwrap();

    let a = reorged.snapshot();
    let b = updated.snapshot();
    assert_eq!(a.block_number, b.block_number);
    assert_eq!(a.block_hash, b.block_hash);
    assert_eq!(
        a.contract(&PAIR).unwrap().raw_slots,
        b.contract(&PAIR).unwrap().raw_slots
    );
    assert_eq!(reorged.statistics().updates, updated.statistics().updates);
}

#[test]
fn reorg_counter_increments_once_per_call() {
    let cache = pair_cache(64);
    let reader = pair_reader();

    cache.update(&header(1, 1), &reader).unwrap();

    // Found ancestor, missing ancestor, and no-op calls each count once.
    cache.handle_reorg(&[header(1, 1)], &[header(1, 1), header(2, 2)], &reader).unwrap();
    cache.handle_reorg(&[header(2, 2)], &[header(7, 7)], &reader).unwrap();
    cache.handle_reorg(&[header(7, 7)], &[], &reader).unwrap();

    assert_eq!(cache.statistics().reorgs, 3);
}
