//! Stress tests that push the heap through large operation counts
//!
//! These perform large numbers of operations in various patterns to catch
//! edge cases in carry propagation and root-ring bookkeeping.

use rust_binomial_heap::{BinomialHeap, Key};

/// Deterministic LCG so the patterns are reproducible
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

#[test]
fn test_massive_insert_then_drain() {
    let mut heap = BinomialHeap::new();
    for i in (0..5000u32).rev() {
        heap.insert(i, i);
    }
    assert_eq!(heap.len(), 5000);
    assert_eq!(heap.num_trees(), 5000usize.count_ones() as usize);
    assert!(heap.verify_structure());

    for i in 0..5000u32 {
        assert_eq!(heap.delete_min(), Ok((i, i)));
    }
    assert!(heap.is_empty());
}

#[test]
fn test_many_decrease_keys() {
    let mut heap = BinomialHeap::new();
    let handles: Vec<_> = (0..1000u32).map(|i| heap.insert(10_000 + i, i)).collect();

    // Bring every key down to its index, last-inserted first.
    for (i, handle) in handles.iter().enumerate().rev() {
        heap.decrease_key(handle, 10_000).unwrap();
        assert_eq!(heap.key_of(handle), Ok(i as Key));
    }
    assert!(heap.verify_structure());

    for i in 0..1000u32 {
        assert_eq!(heap.delete_min(), Ok((i, i)));
    }
}

#[test]
fn test_alternating_insert_and_delete_min() {
    let mut heap = BinomialHeap::new();
    let mut last = 0;
    for i in 0..2000u32 {
        heap.insert(i * 2, i);
        heap.insert(i * 2 + 1, i);
        let (key, _) = heap.delete_min().unwrap();
        assert!(key >= last);
        last = key;
        assert_eq!(heap.num_trees(), heap.len().count_ones() as usize);
    }
    assert_eq!(heap.len(), 2000);
    assert!(heap.verify_structure());
}

#[test]
fn test_repeated_melds() {
    let mut rng = Lcg::new(7);
    let mut total = BinomialHeap::new();
    let mut expected = Vec::new();

    for round in 0..200 {
        let mut part = BinomialHeap::new();
        let count = rng.below(40) as usize;
        for _ in 0..count {
            let key = rng.below(100_000) as Key;
            part.insert(key, round);
            expected.push(key);
        }
        total.meld(&mut part);
        assert!(part.is_empty());
        assert_eq!(total.len(), expected.len());
    }
    assert!(total.verify_structure());

    expected.sort_unstable();
    for key in expected {
        assert_eq!(total.delete_min().map(|(k, _)| k), Ok(key));
    }
}

#[test]
fn test_random_mixed_workload() {
    let mut rng = Lcg::new(0xdead_beef);
    let mut heap = BinomialHeap::new();
    let mut handles = Vec::new();

    for step in 0..20_000u32 {
        match rng.below(10) {
            0..=4 => {
                let key = rng.below(1_000_000) as Key;
                handles.push(heap.insert(key, step));
            }
            5 | 6 => {
                let _ = heap.delete_min();
            }
            7 | 8 if !handles.is_empty() => {
                let i = rng.below(handles.len() as u64) as usize;
                if let Ok(key) = heap.key_of(&handles[i]) {
                    if key > 0 {
                        let diff = 1 + rng.below(u64::from(key)) as Key;
                        heap.decrease_key(&handles[i], diff).unwrap();
                    }
                }
            }
            _ if !handles.is_empty() => {
                let i = rng.below(handles.len() as u64) as usize;
                let handle = handles.swap_remove(i);
                if heap.contains(&handle) {
                    let before = heap.len();
                    heap.delete(&handle).unwrap();
                    assert_eq!(heap.len(), before - 1);
                }
            }
            _ => {}
        }
        if step % 1000 == 0 {
            assert!(heap.verify_structure());
        }
    }

    let mut last = 0;
    while let Ok((key, _)) = heap.delete_min() {
        assert!(key >= last);
        last = key;
    }
}
