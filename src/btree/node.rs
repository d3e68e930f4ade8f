use core::borrow::Borrow;

use crate::raw::Handle;

/// One key/value entry of a B-tree node.
#[derive(Clone)]
pub(crate) struct Item<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

/// A B-tree node: sorted items and, for internal nodes, one more child than
/// items. A leaf has no children.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) items: Vec<Item<K, V>>,
    pub(crate) children: Vec<Handle>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn leaf(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            children: Vec::new(),
        }
    }

    /// An item-less internal node above `child`, used to grow the tree.
    pub(crate) fn above(child: Handle, capacity: usize) -> Self {
        let mut children = Vec::with_capacity(capacity + 1);
        children.push(child);
        Self {
            items: Vec::with_capacity(capacity),
            children,
        }
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// `Ok(index)` of the item holding `key`, or `Err(index)` of the child
    /// whose subtree would hold it.
    pub(crate) fn search<Q>(&self, key: &Q) -> Result<usize, usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.items.binary_search_by(|item| item.key.borrow().cmp(key))
    }
}
