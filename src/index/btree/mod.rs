//! B-tree index implementation.
//!
//! # Components
//! - [`BTree`] - Owns the root and the minimum degree; top-level insert/delete
//! - `Node` - One page of keys plus owned children; split/borrow/merge surgery
//! - [`Iter`] - Lazy in-order traversal
//! - [`BTreeStats`] - Structural operation counters
//! - [`InvariantViolation`] - What [`BTree::validate`] reports

mod iter;
mod node;
mod stats;
mod tree;
mod validate;

pub use iter::Iter;
pub use stats::{BTreeStats, StatsSnapshot};
pub use tree::BTree;
pub use validate::InvariantViolation;
