//! The owning AVL tree.
//!
//! This module contains [`AvlTree`], which holds the root of a tree built by
//! the engine in [`node`](crate::node) and keeps track of how many keys it
//! holds.

use std::fmt;

use crate::node::{self, Link, Node};
use crate::observer::{BalanceObserver, NoopObserver};
use crate::stats::{TreeStats, TreeStatsTrait, get_tree_stats_recurse};
use crate::traverse::{InOrder, PreOrder};
use crate::validate::{self, InvariantError};

/// A height-balanced binary search tree over ordered keys.
///
/// After every public operation, the heights of the two subtrees of any node
/// differ by at most one, so the tree stays within roughly `1.44 * log2(n)`
/// levels regardless of insertion order.
///
/// Equal keys are allowed and kept side by side: inserting a key that is
/// already present adds a second copy, and [`remove`](AvlTree::remove) takes
/// out one copy at a time.
///
/// ## Examples
///
/// ```rust
/// use avltree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for k in [1, 2, 3, 4, 5, 6, 7] {
///     tree.insert(k);
/// }
///
/// assert_eq!(tree.height(), 3);
/// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7]);
///
/// assert_eq!(tree.remove(&4), Some(4));
/// assert_eq!(tree.pop_min(), Some(1));
/// assert_eq!(tree.len(), 5);
/// ```
pub struct AvlTree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<K: Clone> Clone for AvlTree<K> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<K> AvlTree<K> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Number of levels; 0 for an empty tree.
    #[inline]
    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    /// The root node, for read-only walks such as diagram renderers.
    #[inline]
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Smallest key, if any.
    pub fn first(&self) -> Option<&K> {
        self.root().map(|r| node::find_min(r).key())
    }

    /// Keys in ascending order.
    pub fn in_order(&self) -> InOrder<'_, K> {
        InOrder::with_len(self.root(), self.len)
    }

    /// Keys root first, then the left subtree, then the right subtree.
    pub fn pre_order(&self) -> PreOrder<'_, K> {
        PreOrder::with_len(self.root(), self.len)
    }
}

impl<K: Ord> AvlTree<K> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `key`. Always succeeds; an equal key already in the tree is kept.
    #[inline]
    pub fn insert(&mut self, key: K) {
        self.insert_with(key, &mut NoopObserver)
    }

    /// Insert `key`, reporting any rebalancing to `observer`.
    pub fn insert_with<O: BalanceObserver<K>>(&mut self, key: K, observer: &mut O) {
        self.root = Some(node::insert(self.root.take(), key, observer));
        self.len += 1;
        tracing::debug!(len = self.len, height = self.height(), "inserted key");
    }

    /// Remove one occurrence of `key`, returning it. Removing a key that is
    /// not present (including from an empty tree) does nothing.
    #[inline]
    pub fn remove(&mut self, key: &K) -> Option<K> {
        self.remove_with(key, &mut NoopObserver)
    }

    /// [`remove`](AvlTree::remove), reporting any rebalancing to `observer`.
    pub fn remove_with<O: BalanceObserver<K>>(&mut self, key: &K, observer: &mut O) -> Option<K> {
        let (root, removed) = node::remove(self.root.take(), key, observer);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
            tracing::debug!(len = self.len, height = self.height(), "removed key");
        }
        removed
    }

    /// Remove and return the smallest key.
    #[inline]
    pub fn pop_min(&mut self) -> Option<K> {
        self.pop_min_with(&mut NoopObserver)
    }

    /// [`pop_min`](AvlTree::pop_min), reporting any rebalancing to `observer`.
    pub fn pop_min_with<O: BalanceObserver<K>>(&mut self, observer: &mut O) -> Option<K> {
        let root = self.root.take()?;
        let (rest, min) = node::remove_min(root, observer);
        self.root = rest;
        self.len -= 1;
        tracing::debug!(len = self.len, height = self.height(), "removed minimum");
        Some(min.into_key())
    }

    pub fn contains(&self, key: &K) -> bool {
        node::find(self.root(), key).is_some()
    }

    /// Check the height cache, balance, order and count of every node.
    pub fn validate(&self) -> Result<(), InvariantError> {
        validate::check(self.root(), self.len)
    }
}

impl<K> TreeStatsTrait for AvlTree<K> {
    fn get_tree_stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        if let Some(root) = self.root() {
            get_tree_stats_recurse(root, &mut stats, 1);
        }
        stats
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.in_order()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use crate::observer::{BalanceEvent, RecordingObserver, Rotation};
    use crate::stats::{TreeStatsTrait, avl_height_bound};
    use crate::tree::AvlTree;

    fn keys(tree: &AvlTree<i32>) -> Vec<i32> {
        tree.in_order().copied().collect()
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = AvlTree::<i32>::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.first(), None);
        assert_eq!(tree.remove(&1), None);
        assert_eq!(tree.pop_min(), None);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_small_balanced_insert() {
        let tree: AvlTree<i32> = [50, 30, 70, 20, 40].into_iter().collect();
        assert_eq!(keys(&tree), vec![20, 30, 40, 50, 70]);
        assert_eq!(tree.height(), 3);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_sequential_insert_stays_shallow() {
        let mut obs = RecordingObserver::new();
        let mut tree = AvlTree::new();
        for k in 1..=7 {
            tree.insert_with(k, &mut obs);
        }
        assert_eq!(tree.height(), 3);
        assert_eq!(keys(&tree), (1..=7).collect::<Vec<_>>());
        // Ascending input only ever needs single left rotations.
        assert_eq!(obs.rotations(), 4);
        assert!(
            obs.events()
                .iter()
                .all(|e| !matches!(e, BalanceEvent::Rotated(Rotation::Right, _)))
        );
    }

    #[test]
    fn test_left_chain_rotates_right_at_root() {
        let mut obs = RecordingObserver::new();
        let mut tree = AvlTree::new();
        for k in [3, 2, 1] {
            tree.insert_with(k, &mut obs);
        }
        assert_eq!(tree.root().map(|r| *r.key()), Some(2));
        assert_eq!(keys(&tree), vec![1, 2, 3]);
        assert_eq!(
            obs.events(),
            &[
                BalanceEvent::Balancing(3),
                BalanceEvent::Rotated(Rotation::Right, 2),
            ]
        );
    }

    #[test]
    fn test_bent_chain_needs_double_rotation() {
        let mut obs = RecordingObserver::new();
        let mut tree = AvlTree::new();
        for k in [1, 3, 2] {
            tree.insert_with(k, &mut obs);
        }
        assert_eq!(tree.root().map(|r| *r.key()), Some(2));
        assert_eq!(keys(&tree), vec![1, 2, 3]);
        assert_eq!(
            obs.events(),
            &[
                BalanceEvent::Balancing(1),
                BalanceEvent::Rotated(Rotation::Right, 1),
                BalanceEvent::Rotated(Rotation::Left, 2),
            ]
        );
    }

    #[test]
    fn test_remove_inner_key() {
        let mut tree: AvlTree<i32> = [10, 20, 30, 40, 50].into_iter().collect();
        assert_eq!(tree.remove(&30), Some(30));
        assert_eq!(keys(&tree), vec![10, 20, 40, 50]);
        assert_eq!(tree.len(), 4);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_remove_root_uses_successor() {
        let mut tree: AvlTree<i32> = [1, 2, 3, 4, 5, 6, 7].into_iter().collect();
        assert_eq!(tree.root().map(|r| *r.key()), Some(4));
        assert_eq!(tree.remove(&4), Some(4));
        assert_eq!(tree.root().map(|r| *r.key()), Some(5));
        assert_eq!(keys(&tree), vec![1, 2, 3, 5, 6, 7]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_remove_rebalances_parent() {
        // 2(1,3(_,4)): dropping 1 leaves 2 right-heavy with a straight right child.
        let mut tree: AvlTree<i32> = [2, 1, 3, 4].into_iter().collect();
        let mut obs = RecordingObserver::new();
        assert_eq!(tree.remove_with(&1, &mut obs), Some(1));
        assert_eq!(
            obs.events(),
            &[
                BalanceEvent::Balancing(2),
                BalanceEvent::Rotated(Rotation::Left, 3),
            ]
        );
        assert_eq!(tree.root().map(|r| *r.key()), Some(3));
        assert_eq!(keys(&tree), vec![2, 3, 4]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_pop_min_rebalances_parent() {
        let mut tree: AvlTree<i32> = [2, 1, 3, 4].into_iter().collect();
        let mut obs = RecordingObserver::new();
        assert_eq!(tree.pop_min_with(&mut obs), Some(1));
        assert_eq!(
            obs.events(),
            &[
                BalanceEvent::Balancing(2),
                BalanceEvent::Rotated(Rotation::Left, 3),
            ]
        );
        assert_eq!(tree.root().map(|r| *r.key()), Some(3));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_remove_missing_key_is_noop() {
        let mut tree: AvlTree<i32> = [5, 3, 8].into_iter().collect();
        assert_eq!(tree.remove(&4), None);
        assert_eq!(tree.len(), 3);
        assert_eq!(keys(&tree), vec![3, 5, 8]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut tree: AvlTree<i32> = [5, 5, 5, 1, 5].into_iter().collect();
        assert_eq!(tree.len(), 5);
        assert_eq!(keys(&tree), vec![1, 5, 5, 5, 5]);
        assert!(tree.validate().is_ok());

        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(keys(&tree), vec![1, 5, 5, 5]);
        while tree.remove(&5).is_some() {}
        assert_eq!(keys(&tree), vec![1]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_pop_min_drains_in_order() {
        let mut input: Vec<i32> = (0..500).collect();
        input.shuffle(&mut StdRng::seed_from_u64(7));
        let mut tree: AvlTree<i32> = input.into_iter().collect();

        let mut drained = vec![];
        while let Some(k) = tree.pop_min() {
            drained.push(k);
            assert!(tree.validate().is_ok());
        }
        assert_eq!(drained, (0..500).collect::<Vec<_>>());
        assert!(tree.is_empty());
    }

    #[test]
    fn test_insert_then_remove_round_trip() {
        let mut tree: AvlTree<i32> = [8, 3, 10, 1, 6, 14, 4, 7, 13].into_iter().collect();
        let before = keys(&tree);
        tree.insert(5);
        assert_eq!(tree.remove(&5), Some(5));
        assert_eq!(keys(&tree), before);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_first_and_contains() {
        let tree: AvlTree<i32> = [40, 10, 90, 25].into_iter().collect();
        assert_eq!(tree.first(), Some(&10));
        assert!(tree.contains(&25));
        assert!(!tree.contains(&26));
    }

    #[test]
    fn test_debug_and_clone() {
        let tree: AvlTree<i32> = [2, 1, 3].into_iter().collect();
        let copy = tree.clone();
        assert_eq!(format!("{copy:?}"), "{1, 2, 3}");
        assert_eq!(format!("{tree:?}"), format!("{copy:?}"));
    }

    #[test]
    fn test_clear() {
        let mut tree: AvlTree<i32> = (0..10).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.in_order().count(), 0);
    }

    // Compare against a BTreeMap used as a multiset, since we can safely
    // assume the latter behaves correctly.
    #[test]
    fn test_random_ops_match_btreemap() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut tree = AvlTree::new();
        let mut model: BTreeMap<u16, usize> = BTreeMap::new();

        for i in 0..20_000 {
            let key = rng.random_range(0..512u16);
            match rng.random_range(0..10) {
                0..=5 => {
                    tree.insert(key);
                    *model.entry(key).or_default() += 1;
                }
                6..=8 => {
                    let expected = match model.get_mut(&key) {
                        Some(n) if *n > 1 => {
                            *n -= 1;
                            Some(key)
                        }
                        Some(_) => {
                            model.remove(&key);
                            Some(key)
                        }
                        None => None,
                    };
                    assert_eq!(tree.remove(&key), expected);
                }
                _ => {
                    let expected = model.first_key_value().map(|(k, _)| *k);
                    if let Some(k) = expected {
                        let n = model.get_mut(&k).unwrap();
                        *n -= 1;
                        if *n == 0 {
                            model.remove(&k);
                        }
                    }
                    assert_eq!(tree.pop_min(), expected);
                }
            }

            if i % 1000 == 0 {
                tree.validate().unwrap();
            }
        }

        tree.validate().unwrap();
        let expected: Vec<u16> = model
            .iter()
            .flat_map(|(k, n)| std::iter::repeat_n(*k, *n))
            .collect();
        assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), expected);
        assert_eq!(tree.len(), expected.len());
    }

    #[test]
    fn test_random_insert_height_bound() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut tree = AvlTree::new();
        for _ in 0..100_000 {
            tree.insert(rng.random::<u64>());
        }
        let stats = tree.get_tree_stats();
        assert_eq!(stats.num_nodes, 100_000);
        assert_eq!(stats.max_height, tree.height());
        assert!(tree.height() <= avl_height_bound(tree.len()));
        eprintln!("stats: {stats:?}");
    }
}
