//! Statistics and introspection for AVL trees.
//!
//! Statistics can be useful for:
//! - Checking how close a tree runs to the AVL height bound
//! - Seeing how often nodes sit at a non-zero balance factor
//! - Debugging tree structure issues

use crate::node::Node;

pub trait TreeStatsTrait {
    fn get_tree_stats(&self) -> TreeStats;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeStats {
    pub num_nodes: usize,
    pub num_leaves: usize,
    pub max_height: usize,
    /// Nodes with a balance factor of -1.
    pub left_heavy: usize,
    /// Nodes with a balance factor of 0.
    pub balanced: usize,
    /// Nodes with a balance factor of +1.
    pub right_heavy: usize,
}

impl TreeStats {
    /// Fraction of nodes sitting at a non-zero balance factor.
    pub fn skew(&self) -> f64 {
        if self.num_nodes == 0 {
            return 0.0;
        }
        (self.left_heavy + self.right_heavy) as f64 / self.num_nodes as f64
    }
}

/// Largest height an AVL tree holding `num_nodes` keys can reach:
/// `h < 1.4405 * log2(n + 2) - 0.3277`.
pub fn avl_height_bound(num_nodes: usize) -> usize {
    let n = num_nodes as f64;
    (1.4405 * (n + 2.0).log2() - 0.3277).floor() as usize
}

pub(crate) fn update_tree_stats<K>(tree_stats: &mut TreeStats, node: &Node<K>, depth: usize) {
    tree_stats.num_nodes += 1;
    tree_stats.max_height = tree_stats.max_height.max(depth);
    if node.is_leaf() {
        tree_stats.num_leaves += 1;
    }
    match node.balance_factor() {
        ..0 => tree_stats.left_heavy += 1,
        0 => tree_stats.balanced += 1,
        _ => tree_stats.right_heavy += 1,
    }
}

pub(crate) fn get_tree_stats_recurse<K>(
    node: &Node<K>,
    tree_stats: &mut TreeStats,
    depth: usize,
) {
    update_tree_stats(tree_stats, node, depth);
    for child in [node.left(), node.right()].into_iter().flatten() {
        get_tree_stats_recurse(child, tree_stats, depth + 1);
    }
}
