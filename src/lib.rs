//! Interchangeable self-balancing ordered maps.
//!
//! This crate provides four in-memory ordered key-value maps that share one
//! contract, [`OrderedMap`], and differ only in how they keep themselves
//! balanced:
//!
//! - [`WeightBalancedTree`] - a binary search tree rebalanced on subtree sizes
//! - [`RedBlackTree`] - a binary search tree kept balanced by node colours
//! - [`Treap`] - a binary search tree heap-ordered on random priorities
//! - [`BTree`] - a multiway search tree of configurable minimal degree
//!
//! Every map supports insertion with overwrite, exact-key lookup and deletion,
//! reports its size in O(1), and keeps its height logarithmic in its size (in
//! expectation, for the treap).
//!
//! # Example
//!
//! ```
//! use balanced_maps::{BTree, Error, OrderedMap, RedBlackTree};
//!
//! fn load(map: &mut impl OrderedMap<u32, String>) {
//!     for id in 0..100 {
//!         map.insert(id, format!("user-{id}"));
//!     }
//! }
//!
//! let mut by_colour = RedBlackTree::new();
//! let mut by_page: BTree<u32, String, 4> = BTree::new();
//! load(&mut by_colour);
//! load(&mut by_page);
//!
//! assert_eq!(by_colour.find(&42)?, "user-42");
//! assert_eq!(by_page.find(&42)?, "user-42");
//! assert_eq!(by_page.delete(&100), Err(Error::KeyNotFound));
//! # Ok::<(), Error>(())
//! ```
//!
//! # Implementation
//!
//! Each map owns an arena of nodes and links them by compact, niche-optimised
//! handles rather than pointers. There is no `unsafe` code, red-black parent
//! links are plain back-references, and dropping a map frees its arena in one
//! pass however deep the tree is.

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod ordered_map;
mod raw;

pub mod btree;
pub mod rb_tree;
pub mod treap;
pub mod wb_tree;

pub use btree::BTree;
pub use error::{Error, Result};
pub use ordered_map::OrderedMap;
pub use rb_tree::RedBlackTree;
pub use treap::Treap;
pub use wb_tree::WeightBalancedTree;
