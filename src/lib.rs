//! mindex - An in-memory B-tree index with a configurable minimum degree.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            mindex                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                 BTree (index/btree/)                     │   │
//! │  │   insert / delete / contains / iter / levels / validate  │   │
//! │  │   root growth on split, root collapse on empty           │   │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │                       Node                               │   │
//! │  │   find_key · insert_non_full · split_child               │   │
//! │  │   delete · fill · borrow_from_prev/next · merge          │   │
//! │  └─────────────────────────────────────────────────────────┘    │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐    │
//! │  │              Common (common/)                            │   │
//! │  │          BTreeConfig (t) + Error/Result                  │   │
//! │  └─────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (config, Error)
//! - [`index`] - Index structures (B-tree)
//!
//! # Logging
//! Structural changes (splits, borrows, merges, root growth and collapse)
//! are emitted as `tracing` events at `TRACE` level. Install any
//! `tracing` subscriber to see them.
//!
//! # Quick Start
//! ```
//! use mindex::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! for k in [10, 20, 5, 6, 12, 30, 7, 17] {
//!     tree.insert(k).unwrap();
//! }
//!
//! tree.delete(&6).unwrap();
//! let keys: Vec<_> = tree.iter().copied().collect();
//! assert_eq!(keys, vec![5, 7, 10, 12, 17, 20, 30]);
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_MIN_DEGREE, MIN_DEGREE_FLOOR};
pub use common::{BTreeConfig, Error, Result};

pub use index::btree::{BTree, BTreeStats, InvariantViolation, Iter, StatsSnapshot};
