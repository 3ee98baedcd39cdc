//! Structural invariant checks.

use thiserror::Error;

use crate::node::Node;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("node at depth {depth} caches height {cached}, actual height is {actual}")]
    StaleHeight {
        depth: usize,
        cached: usize,
        actual: usize,
    },
    #[error("node at depth {depth} has balance factor {factor}")]
    Unbalanced { depth: usize, factor: i32 },
    #[error("node at depth {depth} breaks search order")]
    OutOfOrder { depth: usize },
    #[error("tree reports {reported} keys but holds {counted}")]
    CountMismatch { reported: usize, counted: usize },
}

/// Check every node below `root` and compare the node count to `len`.
///
/// Order is checked weakly (`left <= key <= right`): a rotation can move a
/// duplicate key into the left subtree of its twin.
pub fn check<K: Ord>(root: Option<&Node<K>>, len: usize) -> Result<(), InvariantError> {
    let counted = match root {
        Some(root) => check_recurse(root, 1, None, None)?.1,
        None => 0,
    };
    if counted != len {
        return Err(InvariantError::CountMismatch {
            reported: len,
            counted,
        });
    }
    Ok(())
}

// Returns (height, node count) of the subtree.
fn check_recurse<K: Ord>(
    node: &Node<K>,
    depth: usize,
    lower: Option<&K>,
    upper: Option<&K>,
) -> Result<(usize, usize), InvariantError> {
    let key = node.key();
    if lower.is_some_and(|lo| key < lo) || upper.is_some_and(|hi| key > hi) {
        return Err(InvariantError::OutOfOrder { depth });
    }

    let (hl, cl) = match node.left() {
        Some(left) => check_recurse(left, depth + 1, lower, Some(key))?,
        None => (0, 0),
    };
    let (hr, cr) = match node.right() {
        Some(right) => check_recurse(right, depth + 1, Some(key), upper)?,
        None => (0, 0),
    };

    let actual = hl.max(hr) + 1;
    if node.height() != actual {
        return Err(InvariantError::StaleHeight {
            depth,
            cached: node.height(),
            actual,
        });
    }
    let factor = node.balance_factor();
    if !(-1..=1).contains(&factor) {
        return Err(InvariantError::Unbalanced { depth, factor });
    }
    Ok((actual, cl + cr + 1))
}
