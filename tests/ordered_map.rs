//! Every strategy driven through the shared `OrderedMap` contract.

mod common;

use std::collections::BTreeMap;

use balanced_maps::{BTree, Error, RedBlackTree, Treap, WeightBalancedTree};
use common::{Map, log2, shuffled};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn weight_balanced_bound(n: usize) -> f64 {
    2.0 * log2(n + 1) + 1.0
}

fn red_black_bound(n: usize) -> f64 {
    2.0 * log2(n + 1)
}

fn treap_bound(n: usize) -> f64 {
    4.0 * log2(n + 1) + 4.0
}

/// `log_T((n + 1) / 2) + 1` for the default degree of 2.
fn btree_bound(n: usize) -> f64 {
    log2(n + 1) - log2(2) + 1.0
}

macro_rules! contract_tests {
    ($strategy:ident, $make:expr, $bound:expr) => {
        mod $strategy {
            use super::*;

            fn make() -> Box<Map> {
                Box::new($make)
            }

            #[test]
            fn scenario_a_inserts_and_finds() {
                common::scenario_a(&mut *make());
            }

            #[test]
            fn scenario_b_overwrites_without_growing() {
                common::scenario_b(&mut *make());
            }

            #[test]
            fn scenario_c_deletes_everything() {
                common::scenario_c(&mut *make());
            }

            #[test]
            fn missing_keys_report_key_not_found() {
                common::missing_keys(&mut *make());
            }

            #[test]
            fn find_writes_through() {
                common::find_writes_through(&mut *make());
            }

            #[test]
            fn clear_and_reuse() {
                common::clear_and_reuse(&mut *make());
            }

            #[test]
            fn shuffled_inserts_and_deletes_match_btreemap() {
                for seed in 0..4 {
                    common::matches_model(&mut *make(), seed);
                }
            }

            #[test]
            fn height_stays_logarithmic() {
                let ascending: Vec<i64> = (0..2048).collect();
                let descending: Vec<i64> = (0..2048).rev().collect();

                common::assert_height_bound(&mut *make(), &ascending, $bound);
                common::assert_height_bound(&mut *make(), &descending, $bound);
                common::assert_height_bound(&mut *make(), &shuffled(2048, 11), $bound);
            }
        }
    };
}

contract_tests!(weight_balanced, WeightBalancedTree::<i64, i64>::new(), weight_balanced_bound);
contract_tests!(red_black, RedBlackTree::<i64, i64>::new(), red_black_bound);
contract_tests!(treap, Treap::<i64, i64>::with_seed(0x5eed), treap_bound);
contract_tests!(btree, BTree::<i64, i64>::new(), btree_bound);

fn all_strategies() -> Vec<(&'static str, Box<Map>)> {
    vec![
        ("weight-balanced", Box::new(WeightBalancedTree::<i64, i64>::new()) as Box<Map>),
        ("red-black", Box::new(RedBlackTree::<i64, i64>::new()) as Box<Map>),
        ("treap", Box::new(Treap::<i64, i64>::with_seed(1)) as Box<Map>),
        ("b-tree", Box::new(BTree::<i64, i64>::new()) as Box<Map>),
        ("b-tree/5", Box::new(BTree::<i64, i64, 5>::new()) as Box<Map>),
    ]
}

#[test]
fn strategies_are_indistinguishable_through_the_trait() {
    let keys = shuffled(500, 3);
    let mut maps = all_strategies();

    for (_, map) in &mut maps {
        for &key in &keys {
            map.insert(key, -key);
        }
        for &key in keys.iter().filter(|&&key| key % 5 == 0) {
            map.delete(&key).unwrap();
        }
    }

    for key in 0..500 {
        let expected = if key % 5 == 0 { Err(Error::KeyNotFound) } else { Ok(-key) };
        for (name, map) in &mut maps {
            assert_eq!(map.find(&key).copied(), expected, "{name}: find({key})");
        }
    }

    for (name, map) in &maps {
        assert_eq!(map.size(), 400, "{name}");
    }
}

#[derive(Clone, Debug)]
enum Op {
    Insert(i64, i64),
    Delete(i64),
    Find(i64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        5 => (-300i64..300, any::<i64>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (-300i64..300).prop_map(Op::Delete),
        2 => (-300i64..300).prop_map(Op::Find),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replays one random operation sequence on every strategy and on a
    /// `BTreeMap`, asserting identical results at every step.
    #[test]
    fn every_strategy_matches_btreemap(ops in prop::collection::vec(op_strategy(), 0..2000)) {
        let mut maps = all_strategies();
        let mut model = BTreeMap::new();

        for op in &ops {
            match *op {
                Op::Insert(k, v) => {
                    model.insert(k, v);
                    for (_, map) in &mut maps {
                        map.insert(k, v);
                    }
                }
                Op::Delete(k) => {
                    let expected = model.remove(&k).map(|_| ()).ok_or(Error::KeyNotFound);
                    for (name, map) in &mut maps {
                        prop_assert_eq!(map.delete(&k), expected, "{}: delete({})", name, k);
                    }
                }
                Op::Find(k) => {
                    let expected = model.get(&k).copied().ok_or(Error::KeyNotFound);
                    for (name, map) in &mut maps {
                        prop_assert_eq!(map.find(&k).copied(), expected, "{}: find({})", name, k);
                    }
                }
            }

            for (name, map) in &maps {
                prop_assert_eq!(map.size(), model.len(), "{}", name);
            }
        }
    }
}
