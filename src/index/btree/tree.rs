//! The B-tree: root ownership and the top-level entry points.

use std::fmt;

use tracing::{debug, trace};

use crate::common::{BTreeConfig, Error, Result};
use crate::index::btree::iter::Iter;
use crate::index::btree::node::Node;
use crate::index::btree::stats::BTreeStats;
use crate::index::btree::validate::{self, InvariantViolation};

/// An in-memory B-tree of distinct keys with a fixed minimum degree.
///
/// # Architecture
/// ```text
/// ┌──────────────────────────────────────────────────────┐
/// │                        BTree                         │
/// │  config (t)   len   stats                            │
/// │  root: Option<Box<Node>>                             │
/// │        │                                             │
/// │        ▼                                             │
/// │   [ k0 | k1 ]        grows on root split (insert)    │
/// │   /    |    \        shrinks on root collapse        │
/// │ [..]  [..]  [..]     every leaf at the same depth    │
/// └──────────────────────────────────────────────────────┘
/// ```
///
/// Only the tree can change the root. Everything below it is owned by a
/// parent's child slot and rebuilt in place as operations descend.
///
/// # Thread Safety
/// None provided. Mutation needs `&mut self`; callers sharing a tree
/// across threads must wrap it in their own lock.
///
/// # Example
/// ```
/// use mindex::{BTree, Error};
///
/// let mut tree = BTree::new(2).unwrap();
/// for k in [5, 1, 9, 3] {
///     tree.insert(k).unwrap();
/// }
///
/// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 9]);
/// assert_eq!(tree.delete(&4), Err(Error::KeyNotFound));
/// tree.delete(&5).unwrap();
/// assert_eq!(tree.len(), 3);
/// ```
pub struct BTree<K> {
    /// `None` exactly when the tree holds no keys.
    root: Option<Box<Node<K>>>,

    /// Shape parameters (immutable after construction).
    config: BTreeConfig,

    /// Number of stored keys.
    len: usize,

    /// Structural operation counters.
    stats: BTreeStats,
}

impl<K> BTree<K> {
    /// Create an empty tree with minimum degree `min_degree`.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` if `min_degree < 2`
    pub fn new(min_degree: usize) -> Result<Self> {
        Self::with_config(BTreeConfig::new(min_degree))
    }

    /// Create an empty tree from a config.
    ///
    /// # Errors
    /// - `Error::InvalidConfiguration` if the config fails validation
    pub fn with_config(config: BTreeConfig) -> Result<Self> {
        config.validate()?;
        debug!(min_degree = config.min_degree, "created btree");

        Ok(Self {
            root: None,
            config,
            len: 0,
            stats: BTreeStats::new(),
        })
    }

    // ========================================================================
    // Public API: Info
    // ========================================================================

    /// Number of keys in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels: 0 when empty, 1 for a lone leaf root.
    pub fn height(&self) -> usize {
        self.root.as_deref().map_or(0, Node::height)
    }

    /// Minimum degree `t`.
    #[inline]
    pub fn min_degree(&self) -> usize {
        self.config.min_degree
    }

    /// The config this tree was built with.
    #[inline]
    pub fn config(&self) -> &BTreeConfig {
        &self.config
    }

    /// Structural operation counters.
    pub fn stats(&self) -> &BTreeStats {
        &self.stats
    }

    /// Smallest key, if any.
    pub fn min(&self) -> Option<&K> {
        self.root.as_deref().map(Node::first_key)
    }

    /// Largest key, if any.
    pub fn max(&self) -> Option<&K> {
        self.root.as_deref().map(Node::last_key)
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    // ========================================================================
    // Public API: Traversal
    // ========================================================================

    /// Iterate over all keys in ascending order.
    ///
    /// The iterator is lazy and borrows the tree; call `iter` again to
    /// restart from the smallest key.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Keys of every node grouped by depth, root first.
    ///
    /// Within a level, nodes appear left to right. Intended for diagnostic
    /// rendering and shape assertions.
    pub fn levels(&self) -> Vec<Vec<&[K]>> {
        let mut levels = Vec::new();
        let mut frontier: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();

        while !frontier.is_empty() {
            levels.push(frontier.iter().map(|&node| node.keys.as_slice()).collect());
            frontier = frontier
                .into_iter()
                .flat_map(|node| node.children.iter().map(|child| child.as_ref()))
                .collect();
        }

        levels
    }
}

impl<K: Ord> BTree<K> {
    /// Whether `key` is stored in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.root.as_ref().is_some_and(|root| root.contains(key))
    }

    /// Check every structural invariant.
    ///
    /// # Errors
    /// Returns the first violation found in a depth-first walk.
    pub fn validate(&self) -> std::result::Result<(), InvariantViolation> {
        validate::check(
            self.root.as_deref(),
            self.config.min_keys(),
            self.config.max_keys(),
            self.len,
        )
    }
}

impl<K: Ord + Clone> BTree<K> {
    // ========================================================================
    // Public API: Mutation
    // ========================================================================

    /// Insert a key.
    ///
    /// A full root is split first, which is the only way the tree grows
    /// taller.
    ///
    /// # Errors
    /// - `Error::DuplicateKey` if `key` is already present (tree unchanged)
    pub fn insert(&mut self, key: K) -> Result<()> {
        let t = self.config.min_degree;

        let Some(root) = self.root.as_mut() else {
            self.root = Some(Box::new(Node::leaf_with(t, key)));
            self.len = 1;
            return Ok(());
        };

        if root.contains(&key) {
            return Err(Error::DuplicateKey);
        }

        if root.is_full() {
            let old_root = std::mem::replace(root, Box::new(Node::new(t, false)));
            root.children.push(old_root);
            root.split_child(0, &self.stats);

            BTreeStats::record(&self.stats.root_grows);
            trace!(height = root.height(), "root split, tree grew");

            let idx = usize::from(root.keys[0] < key);
            root.children[idx].insert_non_full(key, &self.stats);
        } else {
            root.insert_non_full(key, &self.stats);
        }

        self.len += 1;
        Ok(())
    }

    /// Delete a key.
    ///
    /// If the root is left without keys it is replaced by its only child,
    /// which is the only way the tree gets shorter.
    ///
    /// # Errors
    /// - `Error::EmptyTree` if the tree has no root
    /// - `Error::KeyNotFound` if `key` is absent (tree unchanged)
    pub fn delete(&mut self, key: &K) -> Result<()> {
        let Some(root) = self.root.as_mut() else {
            return Err(Error::EmptyTree);
        };

        // Rebalancing happens on the way down, so absence has to be known
        // before the first fill.
        if !root.contains(key) {
            return Err(Error::KeyNotFound);
        }

        root.delete(key, &self.stats)?;
        self.len -= 1;

        if root.is_empty() {
            let replacement = if root.is_leaf() {
                None
            } else {
                Some(root.children.remove(0))
            };
            self.root = replacement;

            BTreeStats::record(&self.stats.root_collapses);
            trace!(height = self.height(), "root emptied, tree shrank");
        }

        Ok(())
    }
}

impl<K> Default for BTree<K> {
    fn default() -> Self {
        Self {
            root: None,
            config: BTreeConfig::default(),
            len: 0,
            stats: BTreeStats::new(),
        }
    }
}

impl<K> fmt::Debug for BTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTree")
            .field("min_degree", &self.config.min_degree)
            .field("len", &self.len)
            .field("height", &self.height())
            .finish()
    }
}

impl<'a, K> IntoIterator for &'a BTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}
