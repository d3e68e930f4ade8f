//! A B-tree of minimal degree `T`.
//!
//! Every node except the root holds between `T - 1` and `2T - 1` items, every
//! internal node has one more child than it has items, and all leaves sit at
//! the same depth. The root is always allocated; an empty tree is a root leaf
//! with no items.
//!
//! Both mutations work top-down in a single pass. Insert splits any full node
//! before stepping into it, so there is always room for the median of a split
//! below. Delete tops up any minimal node before stepping into it (borrowing
//! from a sibling or merging with one), so removing an item never leaves a
//! node short.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::mem;

use smallvec::SmallVec;
use tracing::trace;

use crate::error::{Error, Result};
use crate::ordered_map::forward_ordered_map;
use crate::raw::{Arena, Handle};

mod node;

use node::{Item, Node};

/// An ordered map backed by a B-tree with minimal degree `T`.
///
/// `T` defaults to 2 (a 2-3-4 tree). Larger degrees give wider, shallower
/// trees.
///
/// # Examples
///
/// ```
/// use balanced_maps::{BTree, Error};
///
/// let mut tree: BTree<u32, char, 3> = BTree::new();
/// for (key, value) in ('a'..='z').enumerate() {
///     tree.insert(key as u32, value);
/// }
/// assert_eq!(tree.get(&7), Ok(&'h'));
/// assert!(tree.height() <= 3);
///
/// tree.delete(&7)?;
/// assert_eq!(tree.find(&7), Err(Error::KeyNotFound));
/// # Ok::<(), Error>(())
/// ```
///
/// A minimal degree below 2 is rejected when the tree is created:
///
/// ```compile_fail
/// let tree: balanced_maps::BTree<u32, u32, 1> = balanced_maps::BTree::new();
/// ```
#[derive(Clone)]
pub struct BTree<K, V, const T: usize = 2> {
    nodes: Arena<Node<K, V>>,
    root: Handle,
    len: usize,
}

impl<K, V, const T: usize> BTree<K, V, T> {
    const MAX_ITEMS: usize = 2 * T - 1;

    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tree whose node storage can hold at least `capacity`
    /// entries at minimum occupancy before it reallocates.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        const { assert!(T >= 2, "`BTree` - minimal degree `T` must be at least 2!") };

        let mut nodes = Arena::with_entry_capacity(capacity, T - 1);
        let root = nodes.alloc(Node::leaf(Self::MAX_ITEMS));
        Self { nodes, root, len: 0 }
    }

    /// Number of entries the tree can hold at minimum occupancy before its
    /// node storage reallocates.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.nodes.entry_capacity(T - 1)
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

    /// Number of nodes on a root-to-leaf path; 0 when empty.
    ///
    /// Every leaf is at the same depth, so any path will do.
    #[must_use]
    pub fn height(&self) -> usize {
        if self.len == 0 {
            return 0;
        }

        let mut height = 1;
        let mut handle = self.root;
        while let Some(&first) = self.nodes.get(handle).children.first() {
            height += 1;
            handle = first;
        }
        height
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = self.nodes.alloc(Node::leaf(Self::MAX_ITEMS));
        self.len = 0;
    }

    /// Splits the full child at `index` of `parent` around its median, which
    /// moves up into `parent`.
    fn split_child(&mut self, parent: Handle, index: usize) {
        let child = self.nodes.get(parent).children[index];

        let full = self.nodes.get_mut(child);
        let upper_items = full.items.split_off(T);
        let median = full.items.pop().expect("`split_child()` - child is not full!");
        let upper_children = if full.is_leaf() {
            Vec::new()
        } else {
            full.children.split_off(T)
        };

        let sibling = self.nodes.alloc(Node {
            items: upper_items,
            children: upper_children,
        });

        let parent = self.nodes.get_mut(parent);
        parent.items.insert(index, median);
        parent.children.insert(index + 1, sibling);
    }

    /// Folds the child at `index + 1` of `parent` and the item separating it
    /// into the child at `index`. Collapses the root if it is left without
    /// items. Returns the merged node.
    fn join(&mut self, parent: Handle, index: usize) -> Handle {
        let node = self.nodes.get_mut(parent);
        let separator = node.items.remove(index);
        let right = node.children.remove(index + 1);
        let left = node.children[index];
        let parent_emptied = node.items.is_empty();

        let right = self.nodes.take(right);
        let merged = self.nodes.get_mut(left);
        merged.items.push(separator);
        merged.items.extend(right.items);
        merged.children.extend(right.children);

        if parent_emptied && parent == self.root {
            self.nodes.free(parent);
            self.root = left;
            trace!(size = self.len, degree = T, "b-tree root collapsed");
        }

        left
    }

    /// Moves the last item of the left sibling of child `index` up into
    /// `parent`, and the separator down to the front of the child.
    fn borrow_from_left(&mut self, parent: Handle, index: usize) {
        let (left, child) = {
            let node = self.nodes.get(parent);
            (node.children[index - 1], node.children[index])
        };

        let sibling = self.nodes.get_mut(left);
        let item = sibling.items.pop().expect("`borrow_from_left()` - sibling is empty!");
        let grandchild = sibling.children.pop();

        let separator = mem::replace(&mut self.nodes.get_mut(parent).items[index - 1], item);

        let child = self.nodes.get_mut(child);
        child.items.insert(0, separator);
        if let Some(grandchild) = grandchild {
            child.children.insert(0, grandchild);
        }
    }

    /// Moves the first item of the right sibling of child `index` up into
    /// `parent`, and the separator down to the back of the child.
    fn borrow_from_right(&mut self, parent: Handle, index: usize) {
        let (child, right) = {
            let node = self.nodes.get(parent);
            (node.children[index], node.children[index + 1])
        };

        let sibling = self.nodes.get_mut(right);
        let item = sibling.items.remove(0);
        let grandchild = if sibling.is_leaf() {
            None
        } else {
            Some(sibling.children.remove(0))
        };

        let separator = mem::replace(&mut self.nodes.get_mut(parent).items[index], item);

        let child = self.nodes.get_mut(child);
        child.items.push(separator);
        if let Some(grandchild) = grandchild {
            child.children.push(grandchild);
        }
    }

    /// Makes sure the child at `index` of `parent` holds at least `T` items
    /// and returns the node a delete should continue into.
    fn descend_for_delete(&mut self, parent: Handle, index: usize) -> Handle {
        let node = self.nodes.get(parent);
        let child = node.children[index];
        if self.nodes.get(child).items.len() >= T {
            return child;
        }

        let left = index.checked_sub(1).map(|left| node.children[left]);
        let right = node.children.get(index + 1).copied();

        if let Some(left) = left
            && self.nodes.get(left).items.len() >= T
        {
            self.borrow_from_left(parent, index);
            return child;
        }

        if let Some(right) = right
            && self.nodes.get(right).items.len() >= T
        {
            self.borrow_from_right(parent, index);
            return child;
        }

        match left {
            Some(_) => self.join(parent, index - 1),
            None => self.join(parent, index),
        }
    }

    /// Removes and returns the largest item below `handle`, which must hold
    /// at least `T` items.
    fn pop_max(&mut self, mut handle: Handle) -> Item<K, V> {
        loop {
            let node = self.nodes.get_mut(handle);
            if node.is_leaf() {
                return node.items.pop().expect("`pop_max()` - leaf is empty!");
            }
            let last = node.children.len() - 1;
            handle = self.descend_for_delete(handle, last);
        }
    }

    /// Removes and returns the smallest item below `handle`, which must hold
    /// at least `T` items.
    fn pop_min(&mut self, mut handle: Handle) -> Item<K, V> {
        loop {
            let node = self.nodes.get_mut(handle);
            if node.is_leaf() {
                return node.items.remove(0);
            }
            handle = self.descend_for_delete(handle, 0);
        }
    }

    /// Visits every entry in ascending key order.
    fn for_each_in_order(&self, mut visit: impl FnMut(&K, &V)) {
        // (node, next child to descend into)
        let mut stack: SmallVec<[(Handle, usize); 16]> = SmallVec::new();
        stack.push((self.root, 0));

        while let Some((handle, index)) = stack.pop() {
            let node = self.nodes.get(handle);
            if node.is_leaf() {
                for item in &node.items {
                    visit(&item.key, &item.value);
                }
                continue;
            }

            if let Some(item) = index.checked_sub(1).map(|before| &node.items[before]) {
                visit(&item.key, &item.value);
            }
            if let Some(&child) = node.children.get(index) {
                // Past the last child there is no item left to visit.
                if index < node.items.len() {
                    stack.push((handle, index + 1));
                }
                stack.push((child, 0));
            }
        }
    }

    fn locate<Q>(&self, key: &Q) -> Option<(Handle, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut handle = self.root;
        loop {
            let node = self.nodes.get(handle);
            match node.search(key) {
                Ok(index) => return Some((handle, index)),
                Err(_) if node.is_leaf() => return None,
                Err(index) => handle = node.children[index],
            }
        }
    }
}

impl<K: Ord, V, const T: usize> BTree<K, V, T> {
    /// Stores `value` under `key`, replacing the value of an existing key.
    pub fn insert(&mut self, key: K, value: V) {
        if self.nodes.get(self.root).items.len() == Self::MAX_ITEMS {
            let old_root = self.root;
            self.root = self.nodes.alloc(Node::above(old_root, Self::MAX_ITEMS));
            self.split_child(self.root, 0);
            trace!(size = self.len, degree = T, "b-tree root split");
        }

        let mut handle = self.root;
        loop {
            let node = self.nodes.get_mut(handle);
            let mut index = match node.search(&key) {
                Ok(index) => {
                    node.items[index].value = value;
                    return;
                }
                Err(index) => index,
            };

            if node.is_leaf() {
                node.items.insert(index, Item { key, value });
                self.len += 1;
                return;
            }

            let child = node.children[index];
            if self.nodes.get(child).items.len() == Self::MAX_ITEMS {
                self.split_child(handle, index);

                // The median that rose may be the key itself.
                let node = self.nodes.get_mut(handle);
                match key.cmp(&node.items[index].key) {
                    Ordering::Less => {}
                    Ordering::Greater => index += 1,
                    Ordering::Equal => {
                        node.items[index].value = value;
                        return;
                    }
                }
            }

            handle = self.nodes.get(handle).children[index];
        }
    }

    /// Removes the entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is not present. The tree is
    /// checked before any node is restructured, so a failed delete changes
    /// nothing.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<()>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.locate(key).is_none() {
            return Err(Error::KeyNotFound);
        }

        let mut handle = self.root;
        loop {
            let node = self.nodes.get(handle);
            match node.search(key) {
                Ok(index) if node.is_leaf() => {
                    self.nodes.get_mut(handle).items.remove(index);
                    break;
                }
                Ok(index) => {
                    let (before, after) = (node.children[index], node.children[index + 1]);

                    let replacement = if self.nodes.get(before).items.len() >= T {
                        Some(self.pop_max(before))
                    } else if self.nodes.get(after).items.len() >= T {
                        Some(self.pop_min(after))
                    } else {
                        None
                    };

                    match replacement {
                        Some(replacement) => {
                            self.nodes.get_mut(handle).items[index] = replacement;
                            break;
                        }
                        None => handle = self.join(handle, index),
                    }
                }
                Err(index) => {
                    debug_assert!(!node.is_leaf(), "`delete()` - key vanished during descent!");
                    handle = self.descend_for_delete(handle, index);
                }
            }
        }

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
        let (handle, index) = self.locate(key).ok_or(Error::KeyNotFound)?;
        Ok(&mut self.nodes.get_mut(handle).items[index].value)
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
        let (handle, index) = self.locate(key).ok_or(Error::KeyNotFound)?;
        Ok(&self.nodes.get(handle).items[index].value)
    }

    /// Returns `true` if `key` is stored.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.locate(key).is_some()
    }
}

forward_ordered_map!([K: Ord, V, const T: usize] BTree<K, V, T>);

impl<K, V, const T: usize> Default for BTree<K, V, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, const T: usize> fmt::Debug for BTree<K, V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        self.for_each_in_order(|key, value| {
            map.entry(key, value);
        });
        map.finish()
    }
}

impl<K: Ord, V, const T: usize> Extend<(K, V)> for BTree<K, V, T> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: Ord, V, const T: usize> FromIterator<(K, V)> for BTree<K, V, T> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}
