//! A binary search tree balanced on subtree weights.
//!
//! Every node records how many nodes its subtree holds. After each insert or
//! delete the nodes on the update path are revisited bottom-up: the weight is
//! recomputed and, if one side outweighs the other by more than one node, the
//! node is rotated towards the lighter side. When the heavy child itself leans
//! the other way it is rotated first, turning the single rotation into a
//! double rotation.
//!
//! The balance signal is subtree *size*, not subtree height, so the rotation
//! pattern differs from an AVL tree even though the rebalancing code looks
//! alike.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

use tracing::trace;

use crate::error::{Error, Result};
use crate::ordered_map::forward_ordered_map;
use crate::raw::{Arena, Handle, Size, for_each_in_order, height, search};

mod node;

use node::Node;

/// An ordered map backed by a weight-balanced binary search tree.
///
/// # Examples
///
/// ```
/// use balanced_maps::{Error, WeightBalancedTree};
///
/// let mut ages = WeightBalancedTree::new();
/// ages.insert("carol", 41);
/// ages.insert("alice", 29);
/// ages.insert("bob", 35);
///
/// *ages.find("alice")? += 1;
/// assert_eq!(ages.get("alice"), Ok(&30));
///
/// ages.delete("bob")?;
/// assert_eq!(ages.delete("bob"), Err(Error::KeyNotFound));
/// assert_eq!(ages.size(), 2);
/// # Ok::<(), Error>(())
/// ```
#[derive(Clone)]
pub struct WeightBalancedTree<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Option<Handle>,
    len: usize,
}

impl<K, V> WeightBalancedTree<K, V> {
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

    fn weight(&self, link: Option<Handle>) -> Size {
        link.map_or(Size::ZERO, |handle| self.nodes.get(handle).weight)
    }

    fn update_weight(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let weight = Size::joined(self.weight(node.left), self.weight(node.right));
        self.nodes.get_mut(handle).weight = weight;
    }

    /// `weight(left) - weight(right)`.
    #[allow(clippy::cast_possible_wrap)]
    fn balance_factor(&self, handle: Handle) -> isize {
        let node = self.nodes.get(handle);
        self.weight(node.left).to_usize() as isize - self.weight(node.right).to_usize() as isize
    }

    /// Lifts the right child of `x` into its place and returns it.
    fn rotate_left(&mut self, x: Handle) -> Handle {
        let y = self.nodes.get(x).right.expect("`rotate_left()` - node has no right child!");

        self.nodes.get_mut(x).right = self.nodes.get(y).left;
        self.update_weight(x);

        self.nodes.get_mut(y).left = Some(x);
        self.update_weight(y);

        y
    }

    /// Lifts the left child of `y` into its place and returns it.
    fn rotate_right(&mut self, y: Handle) -> Handle {
        let x = self.nodes.get(y).left.expect("`rotate_right()` - node has no left child!");

        self.nodes.get_mut(y).left = self.nodes.get(x).right;
        self.update_weight(y);

        self.nodes.get_mut(x).right = Some(y);
        self.update_weight(x);

        x
    }

    /// Refreshes the weight of `handle` and restores the size bound at it.
    /// Returns the node now rooting this subtree.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        self.update_weight(handle);
        let balance = self.balance_factor(handle);

        if balance > 1 {
            let left = self.nodes.get(handle).left.expect("`rebalance()` - left-heavy node has no left child!");
            if self.balance_factor(left) < 0 {
                let lifted = self.rotate_left(left);
                self.nodes.get_mut(handle).left = Some(lifted);
            }
            return self.rotate_right(handle);
        }

        if balance < -1 {
            let right = self.nodes.get(handle).right.expect("`rebalance()` - right-heavy node has no right child!");
            if self.balance_factor(right) > 0 {
                let lifted = self.rotate_right(right);
                self.nodes.get_mut(handle).right = Some(lifted);
            }
            return self.rotate_left(handle);
        }

        handle
    }
}

impl<K: Ord, V> WeightBalancedTree<K, V> {
    /// Stores `value` under `key`, replacing the value of an existing key.
    pub fn insert(&mut self, key: K, value: V) {
        let root = self.insert_at(self.root, key, value);
        self.root = Some(root);
    }

    fn insert_at(&mut self, link: Option<Handle>, key: K, value: V) -> Handle {
        let Some(handle) = link else {
            self.len += 1;
            return self.nodes.alloc(Node::new(key, value));
        };

        let node = self.nodes.get(handle);
        let (ordering, left, right) = (key.cmp(&node.key), node.left, node.right);
        match ordering {
            Ordering::Less => {
                let left = self.insert_at(left, key, value);
                self.nodes.get_mut(handle).left = Some(left);
                self.rebalance(handle)
            }
            Ordering::Greater => {
                let right = self.insert_at(right, key, value);
                self.nodes.get_mut(handle).right = Some(right);
                self.rebalance(handle)
            }
            Ordering::Equal => {
                self.nodes.get_mut(handle).value = value;
                handle
            }
        }
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
        self.root = self.delete_at(self.root, key)?;
        if self.len == 0 {
            trace!("weight-balanced tree emptied");
        }
        Ok(())
    }

    fn delete_at<Q>(&mut self, link: Option<Handle>, key: &Q) -> Result<Option<Handle>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = link.ok_or(Error::KeyNotFound)?;

        let node = self.nodes.get(handle);
        let (ordering, left, right) = (key.cmp(node.key.borrow()), node.left, node.right);
        match ordering {
            Ordering::Less => {
                let left = self.delete_at(left, key)?;
                self.nodes.get_mut(handle).left = left;
                Ok(Some(self.rebalance(handle)))
            }
            Ordering::Greater => {
                let right = self.delete_at(right, key)?;
                self.nodes.get_mut(handle).right = right;
                Ok(Some(self.rebalance(handle)))
            }
            Ordering::Equal => {
                self.nodes.free(handle);
                self.len -= 1;

                match (left, right) {
                    (None, child) | (child, None) => Ok(child),
                    (Some(left), Some(right)) => {
                        // The in-order successor takes the removed node's place.
                        let (rest, successor) = self.detach_min(right);
                        let node = self.nodes.get_mut(successor);
                        node.left = Some(left);
                        node.right = rest;
                        Ok(Some(self.rebalance(successor)))
                    }
                }
            }
        }
    }

    /// Unlinks the minimum of the subtree at `handle`, rebalancing the left
    /// spine on the way back up. Returns the remaining subtree and the
    /// detached node.
    fn detach_min(&mut self, handle: Handle) -> (Option<Handle>, Handle) {
        let node = self.nodes.get(handle);
        match node.left {
            None => (node.right, handle),
            Some(left) => {
                let (rest, min) = self.detach_min(left);
                self.nodes.get_mut(handle).left = rest;
                (Some(self.rebalance(handle)), min)
            }
        }
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

forward_ordered_map!([K: Ord, V] WeightBalancedTree<K, V>);

impl<K, V> Default for WeightBalancedTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for WeightBalancedTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for_each_in_order(&self.nodes, self.root, |node| {
            map.entry(&node.key, &node.value);
        });
        map.finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for WeightBalancedTree<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for WeightBalancedTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
