//! Interval indexing for clustering.
//!
//! An arena-backed AVL tree over 1-D half-open intervals, augmented with the
//! largest high endpoint of each subtree so overlap queries can skip whole
//! branches.
//!
//! - `node` - Arena slots, tree nodes and the stable handle type
//! - `tree` - Insert, remove, overlap query and traversal

mod node;
mod tree;

pub use node::IntervalHandle;
pub use tree::{IntervalTree, Iter};
