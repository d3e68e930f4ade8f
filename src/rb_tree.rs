//! A red-black tree.
//!
//! Nodes are coloured red or black such that the root is black, no red node
//! has a red child, and every path from a node down to an empty link passes
//! the same number of black nodes. Together these keep the longest path at
//! most twice the shortest. Inserts and deletes are iterative: nodes carry a
//! back-reference to their parent so the repair passes in [`fixup`] can climb
//! without a path stack.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::ordered_map::forward_ordered_map;
use crate::raw::{Arena, BinaryNode, Direction, Handle, for_each_in_order, height, leftmost, search};

mod fixup;
mod node;

use node::{Color, Node};

/// An ordered map backed by a red-black tree.
///
/// # Examples
///
/// ```
/// use balanced_maps::{Error, RedBlackTree};
///
/// let mut tree: RedBlackTree<u32, u32> = (0..1000).map(|k| (k, k * k)).collect();
/// assert_eq!(tree.get(&12), Ok(&144));
///
/// // No path is more than twice as long as any other.
/// assert!(tree.height() <= 20);
///
/// tree.delete(&12)?;
/// assert!(!tree.contains_key(&12));
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone)]
pub struct RedBlackTree<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    len: usize,
}

impl<K, V> RedBlackTree<K, V> {
    /// Creates an empty tree.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates an empty tree with room for at least `capacity` entries before
    /// its node storage reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// Number of entries the tree can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of distinct keys stored.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    #[must_use]
    pub fn height(&self) -> usize {
        height(&self.nodes, self.root)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    #[inline]
    fn parent(&self, handle: Handle) -> Option<Handle> {
        self.nodes.get(handle).parent
    }

    #[inline]
    fn child(&self, handle: Handle, direction: Direction) -> Option<Handle> {
        self.nodes.get(handle).child(direction)
    }

    /// Empty links count as black.
    #[inline]
    fn is_red(&self, link: Option<Handle>) -> bool {
        link.is_some_and(|handle| self.nodes.get(handle).is_red())
    }

    #[inline]
    fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).color = color;
    }

    /// Which child link of `parent` holds `child`.
    fn side_of(&self, child: Handle, parent: Handle) -> Direction {
        if self.child(parent, Direction::Left) == Some(child) {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    /// Stores `value` under `key`, replacing the value of an existing key.
    pub fn insert(&mut self, key: K, value: V) {
        let mut parent = None;
        let mut direction = Direction::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            direction = match key.cmp(&node.key) {
                Ordering::Less => Direction::Left,
                Ordering::Greater => Direction::Right,
                Ordering::Equal => {
                    node.value = value;
                    return;
                }
            };
            parent = Some(handle);
            current = node.child(direction);
        }

        let handle = self.nodes.alloc(Node::new_red(key, value, parent));
        self.len += 1;

        match parent {
            None => self.root = Some(handle),
            Some(parent) => self.nodes.get_mut(parent).set_child(direction, Some(handle)),
        }

        self.insert_fixup(handle);
    }

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
        let z = search(&self.nodes, self.root, key).ok_or(Error::KeyNotFound)?;

        let node = self.nodes.get(z);
        let (left, right, z_color, z_parent) = (
            node.child(Direction::Left),
            node.child(Direction::Right),
            node.color,
            node.parent,
        );

        // `x` is whatever moves into the vacated slot, `x_parent` its parent
        // afterwards; `removed` is the colour that left the tree there.
        let (removed, x, x_parent) = match (left, right) {
            (None, child) | (child, None) => {
                self.transplant(z, child);
                (z_color, child, z_parent)
            }
            (Some(left), Some(right)) => {
                let y = leftmost(&self.nodes, right);
                let successor = self.nodes.get(y);
                let (y_color, x, y_parent) = (successor.color, successor.child(Direction::Right), successor.parent);

                let x_parent = if y_parent == Some(z) {
                    Some(y)
                } else {
                    self.transplant(y, x);
                    self.nodes.get_mut(y).set_child(Direction::Right, Some(right));
                    self.nodes.get_mut(right).parent = Some(y);
                    y_parent
                };

                self.transplant(z, Some(y));
                let successor = self.nodes.get_mut(y);
                successor.set_child(Direction::Left, Some(left));
                successor.color = z_color;
                self.nodes.get_mut(left).parent = Some(y);

                (y_color, x, x_parent)
            }
        };

        self.nodes.free(z);
        self.len -= 1;

        if removed == Color::Black {
            self.delete_fixup(x, x_parent);
        }

        if self.len == 0 {
            trace!("red-black tree emptied");
        }
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

forward_ordered_map!([K: Ord, V] RedBlackTree<K, V>);

impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RedBlackTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for_each_in_order(&self.nodes, self.root, |node| {
            map.entry(&node.key, &node.value);
        });
        map.finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for RedBlackTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RedBlackTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
