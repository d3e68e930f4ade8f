use crate::raw::{BinaryNode, Direction, Handle};

/// A treap node. Keys are in search-tree order; priorities are in min-heap
/// order, so no child has a smaller priority than its parent.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) priority: u64,
    pub(crate) children: [Option<Handle>; 2],
}

impl<K, V> Node<K, V> {
    pub(crate) const fn new(key: K, value: V, priority: u64) -> Self {
        Self {
            key,
            value,
            priority,
            children: [None, None],
        }
    }
}

impl<K, V> BinaryNode for Node<K, V> {
    type Key = K;

    #[inline]
    fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    fn child(&self, direction: Direction) -> Option<Handle> {
        self.children[direction as usize]
    }

    #[inline]
    fn set_child(&mut self, direction: Direction, child: Option<Handle>) {
        self.children[direction as usize] = child;
    }
}
