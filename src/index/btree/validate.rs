//! Structural invariant checking.
//!
//! [`BTree::validate`](super::BTree::validate) walks every node and reports
//! the first broken invariant. Depth is counted from the root (depth 0).

use thiserror::Error;

use crate::index::btree::node::Node;

/// A broken B-tree invariant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Keys inside one node are not strictly ascending.
    #[error("keys out of order in node at depth {depth}")]
    UnsortedKeys { depth: usize },

    /// A key lies outside the range its parent's separators allow.
    #[error("key at depth {depth} escapes its parent separator range")]
    SeparatorViolation { depth: usize },

    /// A node holds more than `2t - 1` keys.
    #[error("node at depth {depth} holds {len} keys (max {max})")]
    Overflow { depth: usize, len: usize, max: usize },

    /// A non-root node holds fewer than `t - 1` keys.
    #[error("node at depth {depth} holds {len} keys (min {min})")]
    Underflow { depth: usize, len: usize, min: usize },

    /// The root exists but stores no keys.
    #[error("root node is empty")]
    EmptyRoot,

    /// An internal node does not have exactly one more child than keys.
    #[error("internal node at depth {depth} has {keys} keys but {children} children")]
    ChildCountMismatch {
        depth: usize,
        keys: usize,
        children: usize,
    },

    /// Leaves found at different depths.
    #[error("leaf at depth {found}, expected every leaf at depth {expected}")]
    UnevenLeafDepth { expected: usize, found: usize },

    /// The tracked length disagrees with the number of stored keys.
    #[error("tree reports {tracked} keys but stores {actual}")]
    LengthMismatch { tracked: usize, actual: usize },
}

/// Check the subtree under `root` against every invariant.
///
/// `min_keys`/`max_keys` are the non-root bounds (`t - 1`, `2t - 1`).
/// `tracked_len` is what the tree believes it holds.
pub(super) fn check<K: Ord>(
    root: Option<&Node<K>>,
    min_keys: usize,
    max_keys: usize,
    tracked_len: usize,
) -> Result<(), InvariantViolation> {
    let Some(root) = root else {
        return match tracked_len {
            0 => Ok(()),
            tracked => Err(InvariantViolation::LengthMismatch { tracked, actual: 0 }),
        };
    };

    if root.is_empty() {
        return Err(InvariantViolation::EmptyRoot);
    }

    let mut walk = Walk {
        min_keys,
        max_keys,
        leaf_depth: None,
        count: 0,
    };
    walk.visit(root, 0, None, None)?;

    if walk.count != tracked_len {
        return Err(InvariantViolation::LengthMismatch {
            tracked: tracked_len,
            actual: walk.count,
        });
    }
    Ok(())
}

struct Walk {
    min_keys: usize,
    max_keys: usize,
    leaf_depth: Option<usize>,
    count: usize,
}

impl Walk {
    /// Visit `node`, whose keys must lie strictly between `lower` and
    /// `upper` when those are given.
    fn visit<K: Ord>(
        &mut self,
        node: &Node<K>,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> Result<(), InvariantViolation> {
        let len = node.len();

        if len > self.max_keys {
            return Err(InvariantViolation::Overflow {
                depth,
                len,
                max: self.max_keys,
            });
        }
        if depth > 0 && len < self.min_keys {
            return Err(InvariantViolation::Underflow {
                depth,
                len,
                min: self.min_keys,
            });
        }
        if node.keys.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(InvariantViolation::UnsortedKeys { depth });
        }

        let (Some(first), Some(last)) = (node.keys.first(), node.keys.last()) else {
            // Only a root can be empty, and the caller already rejected that.
            return Err(InvariantViolation::Underflow {
                depth,
                len,
                min: self.min_keys,
            });
        };
        if lower.is_some_and(|lo| first <= lo) || upper.is_some_and(|hi| last >= hi) {
            return Err(InvariantViolation::SeparatorViolation { depth });
        }

        self.count += len;

        if node.is_leaf() {
            return match self.leaf_depth {
                None => {
                    self.leaf_depth = Some(depth);
                    Ok(())
                }
                Some(expected) if expected == depth => Ok(()),
                Some(expected) => Err(InvariantViolation::UnevenLeafDepth {
                    expected,
                    found: depth,
                }),
            };
        }

        if node.children.len() != len + 1 {
            return Err(InvariantViolation::ChildCountMismatch {
                depth,
                keys: len,
                children: node.children.len(),
            });
        }

        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
            let hi = if i == len { upper } else { Some(&node.keys[i]) };
            self.visit(child, depth + 1, lo, hi)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(keys: &[u32]) -> Box<Node<u32>> {
        let mut node = Node::new(2, true);
        node.keys.extend_from_slice(keys);
        Box::new(node)
    }

    fn internal(keys: &[u32], children: Vec<Box<Node<u32>>>) -> Node<u32> {
        let mut node = Node::new(2, false);
        node.keys.extend_from_slice(keys);
        node.children = children;
        node
    }

    #[test]
    fn test_valid_tree() {
        let root = internal(&[10], vec![leaf(&[1, 2]), leaf(&[11])]);
        assert_eq!(check(Some(&root), 1, 3, 4), Ok(()));
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(check::<u32>(None, 1, 3, 0), Ok(()));
        assert_eq!(
            check::<u32>(None, 1, 3, 2),
            Err(InvariantViolation::LengthMismatch { tracked: 2, actual: 0 })
        );
    }

    #[test]
    fn test_detects_separator_violation() {
        let root = internal(&[10], vec![leaf(&[1, 12]), leaf(&[11])]);
        assert_eq!(
            check(Some(&root), 1, 3, 4),
            Err(InvariantViolation::SeparatorViolation { depth: 1 })
        );
    }

    #[test]
    fn test_detects_underflow_and_overflow() {
        let root = internal(&[10], vec![leaf(&[]), leaf(&[11])]);
        assert!(matches!(
            check(Some(&root), 1, 3, 2),
            Err(InvariantViolation::Underflow { depth: 1, .. })
        ));

        let root = leaf(&[1, 2, 3, 4]);
        assert!(matches!(
            check(Some(&*root), 1, 3, 4),
            Err(InvariantViolation::Overflow { len: 4, .. })
        ));
    }

    #[test]
    fn test_detects_uneven_leaves() {
        let deep = internal(&[3], vec![leaf(&[1]), leaf(&[4])]);
        let root = internal(&[10], vec![Box::new(deep), leaf(&[11])]);
        assert_eq!(
            check(Some(&root), 1, 3, 4),
            Err(InvariantViolation::UnevenLeafDepth {
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_detects_child_count_mismatch() {
        let root = internal(&[10, 20], vec![leaf(&[1]), leaf(&[11])]);
        assert_eq!(
            check(Some(&root), 1, 3, 4),
            Err(InvariantViolation::ChildCountMismatch {
                depth: 0,
                keys: 2,
                children: 2
            })
        );
    }
}
