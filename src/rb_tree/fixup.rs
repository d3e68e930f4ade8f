//! Rotations and the recolouring passes that restore the red-black rules
//! after a node is attached or spliced out.

use super::RedBlackTree;
use super::node::Color;
use crate::raw::{BinaryNode, Direction, Handle};

impl<K, V> RedBlackTree<K, V> {
    /// Rotates `x` down towards `direction`; its child on the other side
    /// takes its place.
    pub(super) fn rotate(&mut self, x: Handle, direction: Direction) {
        let y = self.child(x, direction.opposite()).expect("`rotate()` - no child to lift!");
        let middle = self.child(y, direction);

        self.nodes.get_mut(x).set_child(direction.opposite(), middle);
        if let Some(middle) = middle {
            self.nodes.get_mut(middle).parent = Some(x);
        }

        self.transplant(x, Some(y));
        self.nodes.get_mut(y).set_child(direction, Some(x));
        self.nodes.get_mut(x).parent = Some(y);
    }

    /// Puts `new` in the slot `old` occupies under its parent (or at the root).
    /// `old` keeps its own links.
    pub(super) fn transplant(&mut self, old: Handle, new: Option<Handle>) {
        let parent = self.nodes.get(old).parent;
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.nodes.get_mut(parent).set_child(side, new);
            }
        }

        if let Some(new) = new {
            self.nodes.get_mut(new).parent = parent;
        }
    }

    /// Repairs a red node `z` that may sit under a red parent.
    pub(super) fn insert_fixup(&mut self, mut z: Handle) {
        while let Some(parent) = self.parent(z)
            && self.is_red(Some(parent))
        {
            // A red parent is never the root, so the grandparent exists.
            let grandparent = self.parent(parent).expect("`insert_fixup()` - red node has no parent!");
            let side = self.side_of(parent, grandparent);
            let uncle = self.child(grandparent, side.opposite());

            if let Some(uncle) = uncle.filter(|&uncle| self.nodes.get(uncle).is_red()) {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                z = grandparent;
                continue;
            }

            let mut parent = parent;
            if self.child(parent, side.opposite()) == Some(z) {
                // Inner grandchild: straighten it into the outer case first.
                z = parent;
                self.rotate(z, side);
                parent = self.parent(z).expect("`insert_fixup()` - rotated node has no parent!");
            }

            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            self.rotate(grandparent, side.opposite());
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    /// Restores equal black heights after a black node left the slot now held
    /// by `x`. `x` may be empty, so its parent is passed alongside.
    pub(super) fn delete_fixup(&mut self, mut x: Option<Handle>, mut parent: Option<Handle>) {
        while x != self.root && !self.is_red(x) {
            let p = parent.expect("`delete_fixup()` - doubly black slot has no parent!");
            let side = if self.child(p, Direction::Left) == x {
                Direction::Left
            } else {
                Direction::Right
            };
            let far = side.opposite();
            let mut sibling = self.child(p, far).expect("`delete_fixup()` - doubly black slot has no sibling!");

            if self.nodes.get(sibling).is_red() {
                self.set_color(sibling, Color::Black);
                self.set_color(p, Color::Red);
                self.rotate(p, side);
                sibling = self.child(p, far).expect("`delete_fixup()` - doubly black slot has no sibling!");
            }

            let near_red = self.is_red(self.child(sibling, side));
            let far_red = self.is_red(self.child(sibling, far));

            if !near_red && !far_red {
                self.set_color(sibling, Color::Red);
                x = Some(p);
                parent = self.parent(p);
                continue;
            }

            if !far_red {
                if let Some(near) = self.child(sibling, side) {
                    self.set_color(near, Color::Black);
                }
                self.set_color(sibling, Color::Red);
                self.rotate(sibling, far);
                sibling = self.child(p, far).expect("`delete_fixup()` - doubly black slot has no sibling!");
            }

            let parent_color = self.nodes.get(p).color;
            self.set_color(sibling, parent_color);
            self.set_color(p, Color::Black);
            if let Some(far_child) = self.child(sibling, far) {
                self.set_color(far_child, Color::Black);
            }
            self.rotate(p, side);

            x = self.root;
            parent = None;
        }

        if let Some(x) = x {
            self.set_color(x, Color::Black);
        }
    }
}
