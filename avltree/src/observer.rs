//! Hooks for watching the engine rebalance a tree.
//!
//! The engine never prints anything itself. Anything that wants to narrate
//! rebalancing (a LaTeX walkthrough, a test counting rotations) implements
//! [`BalanceObserver`] and passes it to the `*_with` operations on
//! [`AvlTree`](crate::tree::AvlTree).

use std::fmt;

use crate::node::Node;

/// Direction of a single rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// The right child is promoted.
    Left,
    /// The left child is promoted.
    Right,
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Left => f.write_str("left"),
            Rotation::Right => f.write_str("right"),
        }
    }
}

/// Receives rebalancing events while an operation unwinds.
///
/// All hooks default to doing nothing.
pub trait BalanceObserver<K> {
    /// `node` has a balance factor of +2 or -2 and is about to be rotated.
    fn balancing(&mut self, _node: &Node<K>) {}

    /// A rotation just finished. `subtree` is the root of the subtree that now
    /// holds the rotated pair: for the first half of a double rotation this is
    /// the still unbalanced parent, otherwise it is the newly promoted node.
    fn rotated(&mut self, _rotation: Rotation, _subtree: &Node<K>) {}
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl<K> BalanceObserver<K> for NoopObserver {}

/// An event captured by [`RecordingObserver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceEvent<K> {
    /// Key of the node found out of balance.
    Balancing(K),
    /// Rotation performed and the key at the root of the affected subtree.
    Rotated(Rotation, K),
}

/// Observer that keeps a log of every event, in order.
#[derive(Debug, Clone)]
pub struct RecordingObserver<K> {
    events: Vec<BalanceEvent<K>>,
}

impl<K> Default for RecordingObserver<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RecordingObserver<K> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[BalanceEvent<K>] {
        &self.events
    }

    /// Number of single rotations seen; a double rotation counts as two.
    pub fn rotations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BalanceEvent::Rotated(..)))
            .count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl<K: Clone> BalanceObserver<K> for RecordingObserver<K> {
    fn balancing(&mut self, node: &Node<K>) {
        self.events.push(BalanceEvent::Balancing(node.key().clone()));
    }

    fn rotated(&mut self, rotation: Rotation, subtree: &Node<K>) {
        self.events
            .push(BalanceEvent::Rotated(rotation, subtree.key().clone()));
    }
}
