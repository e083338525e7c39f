//! Arena-backed generic binary tree.
//!
//! Nodes live in a [`generational_arena::Arena`] owned by their
//! [`BinaryTree`]; child links are arena indices and attachment is a
//! one-shot transition, so the structure stays a tree rather than a DAG.
//! The crate provides the three conventional depth-first traversal orders,
//! breadth-first level grouping with a numeric level-sum aggregation, and a
//! scan for nodes whose two children are both leaves.
//!
//! This is a plain container: no ordering invariant over values, no
//! balancing, no key-based lookup.

pub mod display;
pub mod errors;
pub mod level;
pub mod tree;
pub mod util;

pub use display::TreeNodeConvert;
pub use errors::{TreeError, TreeResult};
pub use tree::{BinaryTree, InOrderIter, Node, PostOrderIter, PreOrderIter};
