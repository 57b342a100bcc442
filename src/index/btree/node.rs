//! B-tree node and the structural surgery performed on it.
//!
//! A [`Node`] owns its keys and, when internal, its children. Every
//! rebalancing primitive (split, borrow, merge) works on a node and its
//! direct children only; the tree handles the two root special cases.
//!
//! # Layout
//! ```text
//!                 keys:      [ k0 | k1 | k2 ]
//!                 children: c0   c1   c2   c3
//!
//!   every key in c0 < k0 < every key in c1 < k1 < ... < k2 < every key in c3
//! ```

use std::mem;

use tracing::trace;

use crate::common::{Error, Result};
use crate::index::btree::stats::BTreeStats;

/// One page of the tree.
///
/// Child slots hold `Box`es: a node is owned by exactly one parent slot
/// (or by the tree, for the root), so removing a slot drops the subtree.
pub(crate) struct Node<K> {
    /// Strictly ascending keys, between `t - 1` and `2t - 1` of them
    /// (the root may hold fewer).
    pub(super) keys: Vec<K>,

    /// `keys.len() + 1` children for an internal node, empty for a leaf.
    pub(super) children: Vec<Box<Node<K>>>,

    /// Fixed at construction.
    leaf: bool,

    /// Minimum degree `t` of the owning tree.
    min_degree: usize,
}

impl<K> Node<K> {
    /// Create an empty node sized for a tree of minimum degree `t`.
    pub(super) fn new(min_degree: usize, leaf: bool) -> Self {
        let children = if leaf {
            Vec::new()
        } else {
            Vec::with_capacity(2 * min_degree)
        };

        Self {
            keys: Vec::with_capacity(2 * min_degree - 1),
            children,
            leaf,
            min_degree,
        }
    }

    /// Create a leaf holding a single key.
    pub(super) fn leaf_with(min_degree: usize, key: K) -> Self {
        let mut node = Self::new(min_degree, true);
        node.keys.push(key);
        node
    }

    #[inline]
    pub(super) fn is_leaf(&self) -> bool {
        self.leaf
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(super) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// A full node holds `2t - 1` keys and must be split before it can
    /// take another.
    #[inline]
    pub(super) fn is_full(&self) -> bool {
        self.keys.len() == 2 * self.min_degree - 1
    }

    /// Whether the node can give up a key and stay at or above `t - 1`.
    #[inline]
    fn has_spare(&self) -> bool {
        self.keys.len() >= self.min_degree
    }

    /// Smallest key in this subtree (leftmost leaf).
    pub(super) fn first_key(&self) -> &K {
        let mut node = self;
        while !node.leaf {
            node = &node.children[0];
        }
        &node.keys[0]
    }

    /// Largest key in this subtree (rightmost leaf).
    pub(super) fn last_key(&self) -> &K {
        let mut node = self;
        while !node.leaf {
            node = &node.children[node.children.len() - 1];
        }
        &node.keys[node.keys.len() - 1]
    }

    /// Number of levels from this node down to its leaves.
    pub(super) fn height(&self) -> usize {
        let mut node = self;
        let mut height = 1;
        while !node.leaf {
            node = &node.children[0];
            height += 1;
        }
        height
    }
}

impl<K: Ord> Node<K> {
    /// Smallest index `i` with `keys[i] >= key`, or `keys.len()`.
    ///
    /// Doubles as the descent branch: if `key` is not at `i`, it can only
    /// live in `children[i]`.
    #[inline]
    pub(super) fn find_key(&self, key: &K) -> usize {
        self.keys.partition_point(|probe| probe < key)
    }

    /// Whether `key` is stored in this subtree.
    pub(super) fn contains(&self, key: &K) -> bool {
        let mut node = self;
        loop {
            let idx = node.find_key(key);
            if idx < node.keys.len() && node.keys[idx] == *key {
                return true;
            }
            if node.leaf {
                return false;
            }
            node = &node.children[idx];
        }
    }
}

impl<K: Ord + Clone> Node<K> {
    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert `key` into the subtree rooted here.
    ///
    /// The caller guarantees this node is not full. Any full child on the
    /// descent path is split before we step into it, so the precondition
    /// holds again one level down.
    pub(super) fn insert_non_full(&mut self, key: K, stats: &BTreeStats) {
        let mut idx = self.find_key(&key);

        if self.leaf {
            self.keys.insert(idx, key);
            return;
        }

        if self.children[idx].is_full() {
            self.split_child(idx, stats);
            // The promoted median now sits at keys[idx].
            if self.keys[idx] < key {
                idx += 1;
            }
        }

        self.children[idx].insert_non_full(key, stats);
    }

    /// Split the full child at `idx` around its median.
    ///
    /// ```text
    ///   before:  parent [ .. a | b .. ]        after:  parent [ .. a | m | b .. ]
    ///                        |                                     |   |
    ///                   y [ lo | m | hi ]                     y [ lo ] z [ hi ]
    /// ```
    ///
    /// `y` keeps its lower `t - 1` keys (and lower `t` children), the new
    /// sibling `z` takes the upper `t - 1` keys (and upper `t` children),
    /// and the median moves up into this node at `idx`.
    pub(super) fn split_child(&mut self, idx: usize, stats: &BTreeStats) {
        let t = self.min_degree;

        let (median, sibling) = {
            let full = &mut self.children[idx];
            debug_assert!(full.is_full(), "split_child on a non-full node");

            let mut sibling = Node::new(t, full.leaf);
            sibling.keys = full.keys.split_off(t);
            if !full.leaf {
                sibling.children = full.children.split_off(t);
            }
            let median = full.keys.remove(t - 1);
            (median, sibling)
        };

        self.keys.insert(idx, median);
        self.children.insert(idx + 1, Box::new(sibling));

        BTreeStats::record(&stats.splits);
        trace!(index = idx, parent_len = self.keys.len(), "split full child");
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Remove `key` from the subtree rooted here.
    ///
    /// Unless this node is the root, the caller has already made sure it
    /// holds at least `t` keys, so removing one key here (or in any node
    /// below, by the same rule) can never underflow.
    ///
    /// # Errors
    /// - `Error::KeyNotFound` if the descent ends in a leaf without `key`
    pub(super) fn delete(&mut self, key: &K, stats: &BTreeStats) -> Result<()> {
        let idx = self.find_key(key);

        if idx < self.keys.len() && self.keys[idx] == *key {
            if self.leaf {
                self.remove_from_leaf(idx);
                return Ok(());
            }
            return self.remove_from_internal(idx, stats);
        }

        if self.leaf {
            return Err(Error::KeyNotFound);
        }

        let idx = if self.children[idx].has_spare() {
            idx
        } else {
            self.fill(idx, stats)
        };

        self.children[idx].delete(key, stats)
    }

    fn remove_from_leaf(&mut self, idx: usize) {
        self.keys.remove(idx);
    }

    /// Remove `keys[idx]` from an internal node.
    ///
    /// The first matching case wins:
    /// 1. Left child has a spare key: replace with the predecessor and
    ///    delete the predecessor from the left subtree.
    /// 2. Right child has a spare key: replace with the successor and
    ///    delete the successor from the right subtree.
    /// 3. Both are minimal: merge them around the key and delete the key
    ///    from the merged child.
    fn remove_from_internal(&mut self, idx: usize, stats: &BTreeStats) -> Result<()> {
        if self.children[idx].has_spare() {
            let pred = self.children[idx].last_key().clone();
            self.keys[idx] = pred;
            self.children[idx].delete(&self.keys[idx], stats)
        } else if self.children[idx + 1].has_spare() {
            let succ = self.children[idx + 1].first_key().clone();
            self.keys[idx] = succ;
            self.children[idx + 1].delete(&self.keys[idx], stats)
        } else {
            let key = self.keys[idx].clone();
            self.merge(idx, stats);
            self.children[idx].delete(&key, stats)
        }
    }

    /// Bring `children[idx]` up to at least `t` keys before descending.
    ///
    /// Returns the index of the child that now covers the original
    /// subtree. It differs from `idx` only when the last child was merged
    /// into its left neighbour.
    fn fill(&mut self, idx: usize, stats: &BTreeStats) -> usize {
        let last = self.keys.len();

        if idx > 0 && self.children[idx - 1].has_spare() {
            self.borrow_from_prev(idx, stats);
            idx
        } else if idx < last && self.children[idx + 1].has_spare() {
            self.borrow_from_next(idx, stats);
            idx
        } else if idx < last {
            self.merge(idx, stats);
            idx
        } else {
            self.merge(idx - 1, stats);
            idx - 1
        }
    }

    /// Rotate the left sibling's last key up into `keys[idx - 1]` and the
    /// old separator down to the front of `children[idx]`.
    fn borrow_from_prev(&mut self, idx: usize, stats: &BTreeStats) {
        let (left, right) = self.children.split_at_mut(idx);
        let sibling = &mut left[idx - 1];
        let child = &mut right[0];

        let moved = sibling.keys.remove(sibling.keys.len() - 1);
        let separator = mem::replace(&mut self.keys[idx - 1], moved);
        child.keys.insert(0, separator);

        if !child.leaf {
            let moved_child = sibling.children.remove(sibling.children.len() - 1);
            child.children.insert(0, moved_child);
        }

        BTreeStats::record(&stats.borrows_left);
        trace!(
            index = idx,
            child_len = child.keys.len(),
            sibling_len = sibling.keys.len(),
            "borrowed from left sibling"
        );
    }

    /// Mirror image of [`borrow_from_prev`](Self::borrow_from_prev) using
    /// the right sibling's first key.
    fn borrow_from_next(&mut self, idx: usize, stats: &BTreeStats) {
        let (left, right) = self.children.split_at_mut(idx + 1);
        let child = &mut left[idx];
        let sibling = &mut right[0];

        let moved = sibling.keys.remove(0);
        let separator = mem::replace(&mut self.keys[idx], moved);
        child.keys.push(separator);

        if !child.leaf {
            child.children.push(sibling.children.remove(0));
        }

        BTreeStats::record(&stats.borrows_right);
        trace!(
            index = idx,
            child_len = child.keys.len(),
            sibling_len = sibling.keys.len(),
            "borrowed from right sibling"
        );
    }

    /// Fold `keys[idx]` and `children[idx + 1]` into `children[idx]`.
    ///
    /// Both children must be minimal, so the result holds exactly
    /// `2t - 1` keys. This node loses one key and one child; the absorbed
    /// sibling is dropped here.
    fn merge(&mut self, idx: usize, stats: &BTreeStats) {
        let sibling = self.children.remove(idx + 1);
        let separator = self.keys.remove(idx);
        let Node { keys, children, .. } = *sibling;

        let child = &mut self.children[idx];
        child.keys.push(separator);
        child.keys.extend(keys);
        child.children.extend(children);

        BTreeStats::record(&stats.merges);
        trace!(
            index = idx,
            merged_len = child.keys.len(),
            parent_len = self.keys.len(),
            "merged siblings"
        );
    }
}
