//! In-order iteration over a B-tree.

use std::iter::FusedIterator;

use crate::index::btree::node::Node;

/// Lazy ascending iterator over the keys of a [`BTree`](super::BTree).
///
/// Holds a stack of `(node, next key position)` frames from the root down
/// to the node that yields next. Each call to `next` does amortised O(1)
/// work; the stack never grows beyond the tree height.
pub struct Iter<'a, K> {
    stack: Vec<(&'a Node<K>, usize)>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(super) fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        if let Some(root) = root {
            iter.descend_leftmost(root);
        }
        iter
    }

    /// Push `node` and the left spine below it.
    fn descend_leftmost(&mut self, mut node: &'a Node<K>) {
        loop {
            self.stack.push((node, 0));
            if node.is_leaf() {
                break;
            }
            node = &node.children[0];
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        loop {
            let (node, pos) = self.stack.last_mut()?;
            let node: &'a Node<K> = *node;

            if *pos < node.keys.len() {
                let key = &node.keys[*pos];
                *pos += 1;
                // Keys in children[pos] come right after keys[pos - 1].
                let child_idx = *pos;
                if !node.is_leaf() {
                    self.descend_leftmost(&node.children[child_idx]);
                }
                self.remaining -= 1;
                return Some(key);
            }

            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}
