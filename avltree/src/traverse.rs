//! Depth-first traversals over borrowed trees.
//!
//! Both iterators keep their own explicit stack, so any number of them may
//! walk the same tree at once and a new one always starts from the root.

use std::iter::FusedIterator;

use crate::node::Node;

/// Keys in ascending order (left, self, right).
pub struct InOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
    // Exact number of keys left, when the total was known up front.
    remaining: Option<usize>,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn with_len(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self::new(root);
        iter.remaining = Some(len);
        iter
    }

    pub fn new(root: Option<&'a Node<K>>) -> Self {
        let mut iter = Self {
            stack: Vec::with_capacity(root.map_or(0, |r| r.height())),
            remaining: None,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (self.stack.len(), None),
        }
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}

/// Keys root first (self, left, right). Feeding this sequence back into an
/// empty search tree without rebalancing rebuilds the same shape, which is
/// what diagram renderers rely on.
pub struct PreOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: Option<usize>,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn with_len(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self::new(root);
        iter.remaining = Some(len);
        iter
    }

    pub fn new(root: Option<&'a Node<K>>) -> Self {
        let mut stack = Vec::with_capacity(root.map_or(0, |r| r.height() + 1));
        stack.extend(root);
        Self {
            stack,
            remaining: None,
        }
    }
}

impl<K> Clone for PreOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so the left subtree is visited first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining = remaining.saturating_sub(1);
        }
        Some(node.key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining {
            Some(n) => (n, Some(n)),
            None => (self.stack.len(), None),
        }
    }
}

impl<K> FusedIterator for PreOrder<'_, K> {}

/// In-order traversal of a bare subtree.
pub fn in_order<K>(root: Option<&Node<K>>) -> InOrder<'_, K> {
    InOrder::new(root)
}

/// Pre-order traversal of a bare subtree.
pub fn pre_order<K>(root: Option<&Node<K>>) -> PreOrder<'_, K> {
    PreOrder::new(root)
}
