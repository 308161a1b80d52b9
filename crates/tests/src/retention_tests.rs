//! History retention bounds under small windows.

use crate::mock_infrastructure::{header, pair_cache, pair_reader};

#[test]
fn two_snapshot_window_keeps_the_last_two_blocks() {
    let cache = pair_cache(2);
    let reader = pair_reader();

    for number in 1..=4u64 {
        cache.update(&header(number, number as u8), &reader).unwrap();
    }

    assert_eq!(cache.history_len(), 2);
    assert!(cache.snapshot_at(&header(1, 1).hash).is_none(), "block 1 must be evicted");
    assert!(cache.snapshot_at(&header(2, 2).hash).is_none(), "block 2 must be evicted");
    assert!(cache.snapshot_at(&header(3, 3).hash).is_some());
    assert!(cache.snapshot_at(&header(4, 4).hash).is_some());
}

#[test]
fn single_snapshot_window_keeps_only_the_latest() {
    let cache = pair_cache(1);
    let reader = pair_reader();

    for number in 1..=5u64 {
        cache.update(&header(number, number as u8), &reader).unwrap();
        assert_eq!(cache.history_len(), 1);
        assert!(cache.snapshot_at(&header(number, number as u8).hash).is_some());
    }
}

#[test]
fn history_stays_bounded_over_a_long_run() {
    let cache = pair_cache(8);
    let reader = pair_reader();

    for number in 1..=100u64 {
        cache.update(&header(number, (number % 251) as u8), &reader).unwrap();
        assert!(cache.history_len() <= 8, "history exceeded bound at block {number}");
    }

    // The whole retained window is reachable by hash.
    for number in 93..=100u64 {
        assert!(cache.snapshot_at(&header(number, (number % 251) as u8).hash).is_some());
    }
}

#[test]
fn evicted_snapshots_stay_readable_through_held_references() {
    let cache = pair_cache(1);
    let reader = pair_reader();

    cache.update(&header(1, 1), &reader).unwrap();
    let first = cache.snapshot_at(&header(1, 1).hash).unwrap();

    cache.update(&header(2, 2), &reader).unwrap();

    // Evicted from history, but the held Arc is still a valid immutable view.
    assert!(cache.snapshot_at(&header(1, 1).hash).is_none());
    assert_eq!(first.block_number, 1);
    assert!(first.contract(&crate::mock_infrastructure::PAIR).is_some());
}
