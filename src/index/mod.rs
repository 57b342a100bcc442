//! Index structures.
//!
//! Currently implements:
//! - [`btree`] - In-memory B-tree with a configurable minimum degree

pub mod btree;

pub use btree::BTree;
