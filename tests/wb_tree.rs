use balanced_maps::{Error, WeightBalancedTree};
use pretty_assertions::assert_eq;

#[test]
fn borrowed_keys_look_up_owned_ones() {
    let mut tree = WeightBalancedTree::new();
    for word in ["pear", "apple", "fig", "quince"] {
        tree.insert(word.to_owned(), word.len());
    }

    assert_eq!(tree.get("fig"), Ok(&3));
    assert!(tree.contains_key("quince"));
    *tree.find("apple").unwrap() = 0;
    assert_eq!(tree.get("apple"), Ok(&0));

    tree.delete("pear").unwrap();
    assert_eq!(tree.delete("pear"), Err(Error::KeyNotFound));
    assert_eq!(format!("{tree:?}"), r#"{"apple": 0, "fig": 3, "quince": 6}"#);
}

#[test]
fn with_capacity_preallocates() {
    let mut tree = WeightBalancedTree::with_capacity(64);
    let capacity = tree.capacity();
    assert!(capacity >= 64);

    tree.extend((0..64).map(|k| (k, k)));
    assert_eq!(tree.capacity(), capacity);
    assert_eq!(tree.size(), 64);
}

#[test]
fn clone_is_independent() {
    let mut original: WeightBalancedTree<i32, i32> = (0..100).map(|k| (k, k)).collect();
    let copy = original.clone();

    for key in 0..50 {
        original.delete(&key).unwrap();
    }
    assert_eq!(original.size(), 50);
    assert_eq!(copy.size(), 100);
    assert_eq!(copy.get(&10), Ok(&10));
}

#[test]
fn default_is_empty() {
    let tree: WeightBalancedTree<u8, u8> = WeightBalancedTree::default();
    assert!(tree.is_empty());
    assert_eq!(format!("{tree:?}"), "{}");
}

#[test]
fn alternating_ends_stay_shallow() {
    let mut tree = WeightBalancedTree::new();
    for i in 0..1000 {
        let key = if i % 2 == 0 { i } else { -i };
        tree.insert(key, ());
    }
    assert_eq!(tree.size(), 1000);
    assert!(tree.height() <= 21, "height {}", tree.height());
}
