//! A height-balanced (AVL) binary search tree.
//!
//! The tree keeps the heights of the two subtrees of every node within one of
//! each other by rotating nodes on the way back up from each insertion or
//! removal. [`AvlTree`] is the owning container; the recursive engine it is
//! built on lives in [`node`] for callers that want to manage subtrees
//! directly.
//!
//! Beyond the core operations the crate carries a few diagnostics: ordered and
//! root-first traversals ([`traverse`]), invariant checking ([`validate`]),
//! structure statistics ([`stats`]), rebalancing hooks ([`observer`]) and an
//! Asymptote diagram renderer ([`render`]).

pub mod node;
pub mod observer;
pub mod render;
pub mod stats;
pub mod traverse;
pub mod tree;
pub mod validate;

pub use node::Node;
pub use observer::{BalanceEvent, BalanceObserver, NoopObserver, RecordingObserver, Rotation};
pub use tree::AvlTree;
pub use validate::InvariantError;
