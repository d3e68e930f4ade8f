use core::borrow::Borrow;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;

/// Which child link of a binary node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One step of a root-to-node descent: the node passed through and the
/// child link taken out of it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PathElement {
    pub(crate) node: Handle,
    pub(crate) direction: Direction,
}

/// Descent stack for the iterative algorithms. Sixty-four levels covers any
/// balanced tree that fits in an arena; deeper paths spill to the heap.
pub(crate) type Path = SmallVec<[PathElement; 64]>;

/// Shape shared by the nodes of every binary strategy.
pub(crate) trait BinaryNode {
    type Key;

    fn key(&self) -> &Self::Key;
    fn child(&self, direction: Direction) -> Option<Handle>;
    fn set_child(&mut self, direction: Direction, child: Option<Handle>);
}

/// Walks down from `root` and returns the node holding `key`.
pub(crate) fn search<N, Q>(nodes: &Arena<N>, root: Option<Handle>, key: &Q) -> Option<Handle>
where
    N: BinaryNode,
    N::Key: Borrow<Q>,
    Q: ?Sized + Ord,
{
    let mut current = root;
    while let Some(handle) = current {
        let node = nodes.get(handle);
        current = match key.cmp(node.key().borrow()) {
            Ordering::Less => node.child(Direction::Left),
            Ordering::Greater => node.child(Direction::Right),
            Ordering::Equal => return Some(handle),
        };
    }
    None
}

/// Follows the left spine of `handle` to the smallest key of its subtree.
pub(crate) fn leftmost<N: BinaryNode>(nodes: &Arena<N>, mut handle: Handle) -> Handle {
    while let Some(left) = nodes.get(handle).child(Direction::Left) {
        handle = left;
    }
    handle
}

/// Longest root-to-leaf path, in nodes. Uses an explicit stack so an
/// unbalanced subtree cannot exhaust the call stack.
pub(crate) fn height<N: BinaryNode>(nodes: &Arena<N>, root: Option<Handle>) -> usize {
    let mut stack: SmallVec<[(Handle, usize); 64]> = SmallVec::new();
    let mut deepest = 0;

    if let Some(root) = root {
        stack.push((root, 1));
    }

    while let Some((handle, depth)) = stack.pop() {
        deepest = deepest.max(depth);
        let node = nodes.get(handle);
        for direction in [Direction::Left, Direction::Right] {
            if let Some(child) = node.child(direction) {
                stack.push((child, depth + 1));
            }
        }
    }

    deepest
}

/// Visits every node in ascending key order.
pub(crate) fn for_each_in_order<N, F>(nodes: &Arena<N>, root: Option<Handle>, mut visit: F)
where
    N: BinaryNode,
    F: FnMut(&N),
{
    let mut stack: SmallVec<[Handle; 64]> = SmallVec::new();
    let mut current = root;

    loop {
        while let Some(handle) = current {
            stack.push(handle);
            current = nodes.get(handle).child(Direction::Left);
        }

        let Some(handle) = stack.pop() else {
            break;
        };

        let node = nodes.get(handle);
        visit(node);
        current = node.child(Direction::Right);
    }
}
