mod arena;
mod binary;
mod handle;
mod size;

pub(crate) use arena::Arena;
pub(crate) use binary::{BinaryNode, Direction, Path, PathElement, for_each_in_order, height, leftmost, search};
pub(crate) use handle::Handle;
pub(crate) use size::Size;
