//! A treap: a binary search tree over keys that is also a min-heap over
//! randomly drawn priorities.
//!
//! Every inserted node draws a priority from the treap's random source. The
//! node is attached as a leaf and then rotated upwards while its priority is
//! strictly smaller than its parent's. A deleted node is rotated downwards,
//! always lifting the child with the smaller priority, until it is a leaf and
//! can be unlinked.
//!
//! The expected height is logarithmic, but an unlucky or adversarial priority
//! sequence can produce a much deeper tree. Both passes therefore work from an
//! explicit [`Path`] instead of recursing.
//!
//! The random source is a type parameter. [`Treap::new`] seeds a [`StdRng`]
//! from the operating system; [`Treap::with_seed`] and [`Treap::with_rng`]
//! make the shape reproducible.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::debug;

use crate::error::{Error, Result};
use crate::ordered_map::forward_ordered_map;
use crate::raw::{Arena, BinaryNode, Direction, Handle, Path, PathElement, for_each_in_order, height, search};

mod node;

use node::Node;

/// An ordered map backed by a treap.
///
/// # Examples
///
/// ```
/// use balanced_maps::{Error, Treap};
///
/// let mut a = Treap::with_seed(42);
/// let mut b = Treap::with_seed(42);
/// for key in 0..100 {
///     a.insert(key, ());
///     b.insert(key, ());
/// }
///
/// // The same seed gives the same shape.
/// assert_eq!(a.height(), b.height());
///
/// a.delete(&10)?;
/// assert_eq!(a.delete(&10), Err(Error::KeyNotFound));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone)]
pub struct Treap<K, V, R = StdRng> {
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    len: usize,
    rng: R,
}

impl<K, V> Treap<K, V, StdRng> {
    /// Creates an empty treap whose priorities come from an entropy-seeded
    /// generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Creates an empty treap with a reproducible priority sequence.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        debug!(seed, "seeding treap priorities");
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Creates an empty treap with room for at least `capacity` entries before
    /// its node storage reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            rng: StdRng::from_entropy(),
        }
    }
}

impl<K, V, R> Treap<K, V, R> {
    /// Creates an empty treap drawing priorities from `rng`.
    #[must_use]
    pub const fn with_rng(rng: R) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            rng,
        }
    }

    /// Number of entries the treap can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of distinct keys stored.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the treap holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    #[must_use]
    pub fn height(&self) -> usize {
        height(&self.nodes, self.root)
    }

    /// Removes every entry. The random source keeps its state.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Rotates `handle` down towards `direction` and returns the child that
    /// rose into its place. The caller relinks the returned node.
    fn rotate(&mut self, handle: Handle, direction: Direction) -> Handle {
        let lifted = self.nodes.get(handle).child(direction.opposite()).expect("`rotate()` - no child to lift!");
        let middle = self.nodes.get(lifted).child(direction);

        self.nodes.get_mut(handle).set_child(direction.opposite(), middle);
        self.nodes.get_mut(lifted).set_child(direction, Some(handle));

        lifted
    }

    /// Points the link described by `parent` (or the root, if `None`) at
    /// `child`.
    fn link(&mut self, parent: Option<PathElement>, child: Option<Handle>) {
        match parent {
            None => self.root = child,
            Some(PathElement { node, direction }) => self.nodes.get_mut(node).set_child(direction, child),
        }
    }
}

impl<K: Ord, V, R: RngCore> Treap<K, V, R> {
    /// Stores `value` under `key`, replacing the value of an existing key.
    ///
    /// A priority is drawn only when a new node is created.
    pub fn insert(&mut self, key: K, value: V) {
        let mut path = Path::new();
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            let direction = match key.cmp(&node.key) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => {
                    node.value = value;
                    return;
                }
            };
            path.push(PathElement { node: handle, direction });
            current = node.child(direction);
        }

        let priority = self.rng.next_u64();
        let handle = self.nodes.alloc(Node::new(key, value, priority));
        self.len += 1;
        self.link(path.last().copied(), Some(handle));

        while let Some(PathElement { node: parent, direction }) = path.pop() {
            if self.nodes.get(parent).priority <= priority {
                break;
            }
            self.rotate(parent, direction.opposite());
            self.link(path.last().copied(), Some(handle));
        }
    }
}

impl<K: Ord, V, R> Treap<K, V, R> {
    /// Removes the entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is not present.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut path = Path::new();
        let mut current = self.root;

        let handle = loop {
            let handle = current.ok_or(Error::KeyNotFound)?;
            let node = self.nodes.get(handle);
            let direction = match key.cmp(node.key.borrow()) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => break handle,
            };
            path.push(PathElement { node: handle, direction });
            current = node.child(direction);
        };

        loop {
            let node = self.nodes.get(handle);
            let lift = match (node.child(Direction::Left), node.child(Direction::Right)) {
                (None, None) => break,
                (Some(_), None) => Direction::Left,
                (None, Some(_)) => Direction::Right,
                // Equal priorities lift the right child.
                (Some(left), Some(right)) => {
                    if self.nodes.get(left).priority < self.nodes.get(right).priority {
                        Direction::Left
                    } else {
                        Direction::Right
                    }
                }
            };

            let lifted = self.rotate(handle, lift.opposite());
            self.link(path.last().copied(), Some(lifted));
            path.push(PathElement {
                node: lifted,
                direction: lift.opposite(),
            });
        }

        self.link(path.last().copied(), None);
        self.nodes.free(handle);
        self.len -= 1;
        Ok(())
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is not present.
    pub fn find<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = search(&self.nodes, self.root, key).ok_or(Error::KeyNotFound)?;
        Ok(&mut self.nodes.get_mut(handle).value)
    }

    /// Returns a shared reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is not present.
    pub fn get<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = search(&self.nodes, self.root, key).ok_or(Error::KeyNotFound)?;
        Ok(&self.nodes.get(handle).value)
    }

    /// Returns `true` if `key` is stored.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        search(&self.nodes, self.root, key).is_some()
    }
}

forward_ordered_map!([K: Ord, V, R: RngCore] Treap<K, V, R>);

impl<K, V> Default for Treap<K, V, StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, R> fmt::Debug for Treap<K, V, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for_each_in_order(&self.nodes, self.root, |node| {
            map.entry(&node.key, &node.value);
        });
        map.finish()
    }
}

impl<K: Ord, V, R: RngCore> Extend<(K, V)> for Treap<K, V, R> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for Treap<K, V, StdRng> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut treap = Self::new();
        treap.extend(iter);
        treap
    }
}
