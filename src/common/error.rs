//! Error types for mindex.

use thiserror::Error;

use crate::common::config::MIN_DEGREE_FLOOR;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors reported by the index.
///
/// None of these are fatal to an existing tree: every operation that
/// returns an error leaves the tree exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Delete attempted on a tree with no root.
    #[error("tree is empty")]
    EmptyTree,

    /// Delete attempted for a key that is not stored in the tree.
    #[error("key not found")]
    KeyNotFound,

    /// Insert attempted for a key that is already stored in the tree.
    #[error("key already present")]
    DuplicateKey,

    /// Construction with a minimum degree below the supported floor.
    ///
    /// A degree of 1 would allow nodes with zero keys, which breaks the
    /// split/merge arithmetic.
    #[error("invalid configuration: minimum degree {min_degree} (must be at least {floor})", floor = MIN_DEGREE_FLOOR)]
    InvalidConfiguration { min_degree: usize },
}
