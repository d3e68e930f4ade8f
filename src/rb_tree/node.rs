use crate::raw::{BinaryNode, Direction, Handle};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// A red-black node. `parent` is a back-reference only: the parent's child
/// link is what keeps a node in the tree.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Option<Handle>,
    pub(crate) children: [Option<Handle>; 2],
}

impl<K, V> Node<K, V> {
    /// New nodes enter the tree red, hanging below `parent`.
    pub(crate) const fn new_red(key: K, value: V, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) fn is_red(&self) -> bool {
        self.color == Color::Red
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
