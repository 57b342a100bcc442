//! Configuration for mindex trees.

use crate::common::{Error, Result};

/// Smallest legal minimum degree.
///
/// With `t = 1` a non-root node could hold zero keys and a split would
/// produce an empty sibling.
pub const MIN_DEGREE_FLOOR: usize = 2;

/// Minimum degree used by [`BTreeConfig::default`].
///
/// # Capacity
/// With `t = 6`:
/// - Non-root nodes hold 5 to 11 keys
/// - Internal nodes hold 6 to 12 children
pub const DEFAULT_MIN_DEGREE: usize = 6;

/// Shape parameters of a B-tree.
///
/// # Example
/// ```
/// use mindex::common::config::BTreeConfig;
///
/// let config = BTreeConfig::new(3);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.min_keys(), 2);
/// assert_eq!(config.max_keys(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BTreeConfig {
    /// Minimum degree `t`.
    pub min_degree: usize,
}

impl BTreeConfig {
    /// Create a config with the given minimum degree.
    ///
    /// The value is not checked until [`validate`](Self::validate) runs.
    pub fn new(min_degree: usize) -> Self {
        Self { min_degree }
    }

    /// Check that the degree is usable.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` if `min_degree < 2`
    pub fn validate(&self) -> Result<()> {
        if self.min_degree < MIN_DEGREE_FLOOR {
            return Err(Error::InvalidConfiguration {
                min_degree: self.min_degree,
            });
        }
        Ok(())
    }

    /// Fewest keys a non-root node may hold (`t - 1`).
    #[inline]
    pub fn min_keys(&self) -> usize {
        self.min_degree - 1
    }

    /// Most keys any node may hold (`2t - 1`).
    #[inline]
    pub fn max_keys(&self) -> usize {
        2 * self.min_degree - 1
    }

    /// Most children an internal node may hold (`2t`).
    #[inline]
    pub fn max_children(&self) -> usize {
        2 * self.min_degree
    }
}

impl Default for BTreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_DEGREE)
    }
}
