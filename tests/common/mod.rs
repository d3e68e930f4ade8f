//! Strategy-agnostic checks shared by the integration tests. Everything here
//! drives a map only through `OrderedMap`, so each check runs unchanged
//! against every balancing strategy.

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::collections::BTreeMap;

use balanced_maps::{Error, OrderedMap};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub type Map = dyn OrderedMap<i64, i64>;

/// Number of keys the scripted scenarios insert.
pub const N: i64 = 1000;

/// Insert `0..N` with value = key, then find every one of them.
pub fn scenario_a(map: &mut Map) {
    for key in 0..N {
        map.insert(key, key);
    }
    assert_eq!(map.size(), 1000);

    for key in 0..N {
        assert_eq!(map.find(&key).copied(), Ok(key), "find({key})");
    }
}

/// After scenario A, overwrite the lower half with `500 - key`.
pub fn scenario_b(map: &mut Map) {
    scenario_a(map);

    for key in 0..500 {
        map.insert(key, 500 - key);
    }
    assert_eq!(map.size(), 1000);

    for key in 0..N {
        let expected = if key < 500 { 500 - key } else { key };
        assert_eq!(map.find(&key).copied(), Ok(expected), "find({key})");
    }
}

/// After scenario A, delete every key in ascending order.
pub fn scenario_c(map: &mut Map) {
    scenario_a(map);

    for key in 0..N {
        assert_eq!(map.delete(&key), Ok(()), "delete({key})");
    }
    assert_eq!(map.size(), 0);
    assert_eq!(map.height(), 0);

    for key in 0..N {
        assert_eq!(map.find(&key), Err(Error::KeyNotFound), "find({key})");
    }
}

/// Absent keys fail with `KeyNotFound` and change nothing.
pub fn missing_keys(map: &mut Map) {
    assert_eq!(map.find(&7), Err(Error::KeyNotFound));
    assert_eq!(map.delete(&7), Err(Error::KeyNotFound));
    assert_eq!(map.get(&7), Err(Error::KeyNotFound));
    assert!(!map.contains_key(&7));

    for key in (0..100).map(|key| key * 2) {
        map.insert(key, key);
    }
    let height = map.height();

    for key in (0..100).map(|key| key * 2 + 1) {
        assert_eq!(map.delete(&key), Err(Error::KeyNotFound), "delete({key})");
        assert_eq!(map.find(&key), Err(Error::KeyNotFound), "find({key})");
    }
    assert_eq!(map.size(), 100);
    assert_eq!(map.height(), height);

    // A key deleted twice fails the second time.
    assert_eq!(map.delete(&10), Ok(()));
    assert_eq!(map.delete(&10), Err(Error::KeyNotFound));
    assert_eq!(map.size(), 99);
}

/// Writing through `find` updates the stored value in place.
pub fn find_writes_through(map: &mut Map) {
    map.insert(1, 10);
    map.insert(2, 20);

    *map.find(&1).unwrap() += 5;
    assert_eq!(map.get(&1), Ok(&15));
    assert_eq!(map.get(&2), Ok(&20));
    assert_eq!(map.size(), 2);
}

/// `clear` empties the map and leaves it usable.
pub fn clear_and_reuse(map: &mut Map) {
    for key in 0..200 {
        map.insert(key, key);
    }
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.height(), 0);
    assert_eq!(map.find(&0), Err(Error::KeyNotFound));

    map.insert(3, 3);
    assert_eq!(map.size(), 1);
    assert_eq!(map.height(), 1);
}

/// `0..n` in a reproducible random order.
pub fn shuffled(n: i64, seed: u64) -> Vec<i64> {
    let mut keys: Vec<i64> = (0..n).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(seed));
    keys
}

/// Interleaves inserts and deletes of shuffled keys, comparing against a
/// `BTreeMap` after every step.
pub fn matches_model(map: &mut Map, seed: u64) {
    let mut model = BTreeMap::new();

    for (step, key) in shuffled(2000, seed).into_iter().enumerate() {
        let key = key % 700;
        if step % 3 == 2 {
            let expected = model.remove(&key).map(|_| ()).ok_or(Error::KeyNotFound);
            assert_eq!(map.delete(&key), expected, "step {step}: delete({key})");
        } else {
            map.insert(key, key * 3);
            model.insert(key, key * 3);
        }
        assert_eq!(map.size(), model.len(), "step {step}");
    }

    for key in 0..700 {
        assert_eq!(map.get(&key).ok(), model.get(&key), "get({key})");
    }
}

/// Fills a fresh map with `keys` and checks that its height never exceeds
/// `bound(size)`.
pub fn assert_height_bound(map: &mut Map, keys: &[i64], bound: fn(usize) -> f64) {
    for &key in keys {
        map.insert(key, key);
        let (height, size) = (map.height(), map.size());
        assert!(
            height as f64 <= bound(size) + 1e-9,
            "height {height} exceeds {:.2} at size {size}",
            bound(size)
        );
    }
}

pub fn log2(n: usize) -> f64 {
    (n as f64).log2()
}
