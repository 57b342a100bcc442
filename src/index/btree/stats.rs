//! Structural statistics for a B-tree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the structural operations a tree has performed.
///
/// Node methods receive a shared reference while the tree itself is
/// mutably borrowed, so the counters use interior mutability.
///
/// # Memory Ordering
/// All operations use `Ordering::Relaxed`: the counters are independent
/// and only need atomic increments.
///
/// # Example
/// ```
/// use mindex::BTreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = BTreeStats::new();
/// stats.splits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().splits, 1);
/// ```
#[derive(Debug, Default)]
pub struct BTreeStats {
    /// Number of full nodes split in two (root splits included).
    pub splits: AtomicU64,

    /// Number of sibling pairs merged into one node.
    pub merges: AtomicU64,

    /// Number of keys rotated in from a left sibling.
    pub borrows_left: AtomicU64,

    /// Number of keys rotated in from a right sibling.
    pub borrows_right: AtomicU64,

    /// Number of times the tree gained a level.
    pub root_grows: AtomicU64,

    /// Number of times the tree lost a level.
    pub root_collapses: AtomicU64,
}

impl BTreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn record(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            splits: self.splits.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            borrows_left: self.borrows_left.load(Ordering::Relaxed),
            borrows_right: self.borrows_right.load(Ordering::Relaxed),
            root_grows: self.root_grows.load(Ordering::Relaxed),
            root_collapses: self.root_collapses.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.splits.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
        self.borrows_left.store(0, Ordering::Relaxed);
        self.borrows_right.store(0, Ordering::Relaxed);
        self.root_grows.store(0, Ordering::Relaxed);
        self.root_collapses.store(0, Ordering::Relaxed);
    }
}

/// A point-in-time copy of [`BTreeStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub splits: u64,
    pub merges: u64,
    pub borrows_left: u64,
    pub borrows_right: u64,
    pub root_grows: u64,
    pub root_collapses: u64,
}

impl StatsSnapshot {
    /// Total key rotations in either direction.
    pub fn borrows(&self) -> u64 {
        self.borrows_left + self.borrows_right
    }

    /// Net change in height implied by the counters.
    pub fn height_delta(&self) -> i64 {
        self.root_grows as i64 - self.root_collapses as i64
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, merges: {}, borrows: {}, grows: {}, collapses: {} }}",
            self.splits,
            self.merges,
            self.borrows(),
            self.root_grows,
            self.root_collapses
        )
    }
}
