use balanced_maps::{Error, Treap};
use pretty_assertions::assert_eq;
use rand::RngCore;

/// A priority source that replays a fixed sequence.
struct Script(Vec<u64>);

impl RngCore for Script {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.0.remove(0)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[test]
fn injected_priorities_decide_the_shape() {
    // Key 3 draws the smallest priority and ends up at the root; 1 and 2
    // hang below it in priority order.
    let mut treap = Treap::with_rng(Script(vec![50, 40, 10]));
    treap.insert(1, 'a');
    treap.insert(2, 'b');
    treap.insert(3, 'c');

    assert_eq!(treap.height(), 3);
    assert_eq!(treap.size(), 3);
    assert_eq!(format!("{treap:?}"), "{1: 'a', 2: 'b', 3: 'c'}");

    // An overwrite draws nothing, so the exhausted script is never touched.
    treap.insert(2, 'B');
    assert_eq!(treap.get(&2), Ok(&'B'));
}

#[test]
fn balanced_priorities_give_a_balanced_tree() {
    // Middle key first with the smallest priority, then the quartiles.
    let mut treap = Treap::with_rng(Script(vec![1, 2, 2, 3, 3, 3, 3]));
    for key in [4, 2, 6, 1, 3, 5, 7] {
        treap.insert(key, ());
    }
    assert_eq!(treap.height(), 3);

    // 2 and 6 tie, so 6 rises and 4 sinks down the left side; 3 ends up
    // one level deeper than before.
    treap.delete(&4).unwrap();
    assert_eq!(treap.height(), 4);
    assert_eq!(format!("{treap:?}"), "{1: (), 2: (), 3: (), 5: (), 6: (), 7: ()}");
    assert_eq!(treap.delete(&4), Err(Error::KeyNotFound));
    assert_eq!(treap.size(), 6);
}

#[test]
fn seeds_reproduce_and_differ() {
    let build = |seed| {
        let mut treap = Treap::with_seed(seed);
        treap.extend((0..2000).map(|k| (k, k)));
        treap
    };

    let heights: Vec<usize> = (0..8).map(|seed| build(seed).height()).collect();
    let again: Vec<usize> = (0..8).map(|seed| build(seed).height()).collect();
    assert_eq!(heights, again);

    for height in heights {
        assert!(height <= 4 * 11 + 4, "height {height}");
    }
}

#[test]
fn entropy_seeded_default_works() {
    let mut treap: Treap<String, usize> = Treap::default();
    treap.insert("one".to_owned(), 1);
    assert_eq!(treap.find("one"), Ok(&mut 1));

    let mut treap: Treap<u8, u8> = Treap::with_capacity(32);
    assert!(treap.capacity() >= 32);
    treap.extend([(1, 1), (2, 2)]);
    treap.clear();
    assert!(treap.is_empty());
}
