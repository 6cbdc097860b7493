use gas_trigger::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

#[test]
fn test_concurrent_callers_never_share_an_id() {
    let generator = Arc::new(IdGenerator::new());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let generator = Arc::clone(&generator);
            std::thread::spawn(move || (0..2_000).map(|_| generator.next_id()).collect::<Vec<_>>())
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for id in handle.join().expect("worker thread") {
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(seen.len(), 8 * 2_000);
}

#[test]
fn test_sequential_ids_increase() {
    let generator = IdGenerator::new();
    let ids: Vec<i64> = (0..500).map(|_| generator.next_id()).collect();
    for w in ids.windows(2) { assert!(w[0] < w[1], "{} then {}", w[0], w[1]); }
}

#[test]
fn test_frozen_clock_counts_up_from_seed() {
    let generator = IdGenerator::with_clock(Arc::new(|| 1_000i64));
    assert_eq!(generator.next_id(), 1_000);
    assert_eq!(generator.next_id(), 1_001);
    assert_eq!(generator.next_id(), 1_002);
}

#[test]
fn test_reseeds_once_clock_passes_offset() {
    let now = Arc::new(AtomicI64::new(1_000));
    let clock = Arc::clone(&now);
    let generator = IdGenerator::with_clock(Arc::new(move || clock.load(Ordering::SeqCst)));

    assert_eq!(generator.next_id(), 1_000);
    assert_eq!(generator.next_id(), 1_001);
    now.store(5_000, Ordering::SeqCst);
    assert_eq!(generator.next_id(), 5_000);
}

#[test]
fn test_clock_stepping_backwards_keeps_ids_unique() {
    let now = Arc::new(AtomicI64::new(5_000));
    let clock = Arc::clone(&now);
    let generator = IdGenerator::with_clock(Arc::new(move || clock.load(Ordering::SeqCst)));

    let mut seen = HashSet::new();
    assert!(seen.insert(generator.next_id()));
    // NTP-style adjustment into the past
    now.store(1_000, Ordering::SeqCst);
    for _ in 0..10 {
        assert!(seen.insert(generator.next_id()));
    }
    now.store(5_005, Ordering::SeqCst);
    assert!(seen.insert(generator.next_id()));
    assert_eq!(seen.len(), 12);
}

#[test]
fn test_global_generator_is_shared() {
    let a = IdGenerator::global();
    let b = IdGenerator::global();
    assert!(Arc::ptr_eq(&a, &b));
    assert_ne!(a.next_id(), b.next_id());
}
