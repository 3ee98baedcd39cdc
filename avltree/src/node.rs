//! Node representation and the recursive AVL engine.
//!
//! Every mutating function in this module takes ownership of a subtree and
//! hands back ownership of its replacement. Rebalancing may promote a
//! different node to the top of any subtree it touches, so callers must
//! always rebind the slot that held the old subtree to the returned value.
//!
//! These functions are the low-level interface; most users want
//! [`AvlTree`](crate::tree::AvlTree), which keeps the root and a key count.

use std::cmp::Ordering;

use crate::observer::{BalanceObserver, Rotation};

/// An owned, possibly empty, subtree.
pub type Link<K> = Option<Box<Node<K>>>;

/// A single key in the tree, exclusively owning its two subtrees.
#[derive(Debug, Clone)]
pub struct Node<K> {
    key: K,
    // An AVL tree of height 255 would need more nodes than fit in memory.
    height: u8,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    #[inline]
    pub(crate) fn new_leaf(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            height: 1,
            left: None,
            right: None,
        })
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn left(&self) -> Option<&Node<K>> {
        self.left.as_deref()
    }

    #[inline]
    pub fn right(&self) -> Option<&Node<K>> {
        self.right.as_deref()
    }

    /// Cached height of the subtree rooted here; a leaf has height 1.
    #[inline]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// `height(right) - height(left)`. Positive means right-heavy.
    #[inline]
    pub fn balance_factor(&self) -> i32 {
        height(&self.right) as i32 - height(&self.left) as i32
    }

    /// Recompute the cached height from the children's cached heights.
    #[inline]
    pub(crate) fn fix_height(&mut self) {
        let hl = height(&self.left);
        let hr = height(&self.right);
        self.height = (hl.max(hr) + 1) as u8;
    }

    #[inline]
    pub(crate) fn into_key(self: Box<Self>) -> K {
        self.key
    }
}

/// Height of a possibly empty subtree: 0 for `None`.
#[inline]
pub fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |n| n.height())
}

/// Promote `p.left` into `p`'s place. `p` becomes the new root's right child
/// and inherits its former right subtree as its own left subtree.
pub(crate) fn rotate_right<K>(mut p: Box<Node<K>>) -> Box<Node<K>> {
    let mut q = p
        .left
        .take()
        .expect("rotate_right on a node without a left child");
    p.left = q.right.take();
    p.fix_height();
    q.right = Some(p);
    q.fix_height();
    q
}

/// Mirror of [`rotate_right`]: promote `q.right` into `q`'s place.
pub(crate) fn rotate_left<K>(mut q: Box<Node<K>>) -> Box<Node<K>> {
    let mut p = q
        .right
        .take()
        .expect("rotate_left on a node without a right child");
    q.right = p.left.take();
    q.fix_height();
    p.left = Some(q);
    p.fix_height();
    p
}

/// Restore the AVL property at `p`, assuming both children are balanced and
/// `p` drifted by at most one level. Returns the new subtree root with a
/// correct cached height.
pub(crate) fn balance<K, O>(mut p: Box<Node<K>>, observer: &mut O) -> Box<Node<K>>
where
    O: BalanceObserver<K>,
{
    p.fix_height();
    match p.balance_factor() {
        2 => {
            observer.balancing(&p);
            // A left-leaning right child has to be straightened first, otherwise
            // the single rotation just moves the imbalance to the other side.
            if p.right.as_ref().is_some_and(|r| r.balance_factor() < 0) {
                tracing::trace!(height = p.height, "right-left case, rotating right child");
                p.right = p.right.take().map(rotate_right);
                observer.rotated(Rotation::Right, &p);
            }
            tracing::trace!(height = p.height, "right-heavy, rotating left");
            let root = rotate_left(p);
            observer.rotated(Rotation::Left, &root);
            root
        }
        -2 => {
            observer.balancing(&p);
            if p.left.as_ref().is_some_and(|l| l.balance_factor() > 0) {
                tracing::trace!(height = p.height, "left-right case, rotating left child");
                p.left = p.left.take().map(rotate_left);
                observer.rotated(Rotation::Left, &p);
            }
            tracing::trace!(height = p.height, "left-heavy, rotating right");
            let root = rotate_right(p);
            observer.rotated(Rotation::Right, &root);
            root
        }
        _ => p,
    }
}

/// Insert `key` below `link` and return the rebalanced subtree.
///
/// Keys equal to an existing key descend to the right, so duplicates are
/// kept side by side rather than rejected.
pub fn insert<K, O>(link: Link<K>, key: K, observer: &mut O) -> Box<Node<K>>
where
    K: Ord,
    O: BalanceObserver<K>,
{
    let Some(mut p) = link else {
        return Node::new_leaf(key);
    };
    if key < p.key {
        p.left = Some(insert(p.left.take(), key, observer));
    } else {
        p.right = Some(insert(p.right.take(), key, observer));
    }
    balance(p, observer)
}

/// The node holding the smallest key of a non-empty subtree.
pub fn find_min<K>(mut p: &Node<K>) -> &Node<K> {
    while let Some(left) = p.left() {
        p = left;
    }
    p
}

/// Detach the minimum node of `p`.
///
/// Returns the rebalanced remainder together with the detached node, whose
/// children are both empty. Taking a `Box` rather than a `Link` means there is
/// no "empty subtree" case to get wrong.
pub fn remove_min<K, O>(mut p: Box<Node<K>>, observer: &mut O) -> (Link<K>, Box<Node<K>>)
where
    O: BalanceObserver<K>,
{
    match p.left.take() {
        None => {
            let rest = p.right.take();
            p.height = 1;
            (rest, p)
        }
        Some(left) => {
            let (rest, min) = remove_min(left, observer);
            p.left = rest;
            (Some(balance(p, observer)), min)
        }
    }
}

/// Remove one occurrence of `key` below `link`.
///
/// Returns the rebalanced subtree and the removed key, or the subtree with
/// `None` if `key` was not present. A removed node with a right subtree is
/// replaced by its in-order successor, which is detached from that subtree
/// and reused as the new local root.
pub fn remove<K, O>(link: Link<K>, key: &K, observer: &mut O) -> (Link<K>, Option<K>)
where
    K: Ord,
    O: BalanceObserver<K>,
{
    let Some(mut p) = link else {
        return (None, None);
    };
    let removed = match key.cmp(&p.key) {
        Ordering::Less => {
            let (left, removed) = remove(p.left.take(), key, observer);
            p.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove(p.right.take(), key, observer);
            p.right = right;
            removed
        }
        Ordering::Equal => {
            let Node {
                key: removed,
                left,
                right,
                ..
            } = *p;
            let Some(right) = right else {
                return (left, Some(removed));
            };
            let (rest, mut min) = remove_min(right, observer);
            min.right = rest;
            min.left = left;
            return (Some(balance(min, observer)), Some(removed));
        }
    };
    (Some(balance(p, observer)), removed)
}

/// Find the node holding `key`, if any.
pub fn find<'a, K: Ord>(mut link: Option<&'a Node<K>>, key: &K) -> Option<&'a Node<K>> {
    while let Some(p) = link {
        link = match key.cmp(&p.key) {
            Ordering::Less => p.left(),
            Ordering::Greater => p.right(),
            Ordering::Equal => return Some(p),
        };
    }
    None
}
