//! Arena storage for interval tree nodes.

use std::fmt;

use ordered_float::OrderedFloat;

/// Stable reference to an interval stored in an [`IntervalTree`].
///
/// A handle stays valid until the interval it names is removed. Slots are
/// reused after removal, so each handle also carries the slot generation;
/// a stale handle never resolves to a newer interval.
///
/// [`IntervalTree`]: super::IntervalTree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntervalHandle {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl fmt::Display for IntervalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}@{}", self.index, self.generation)
    }
}

/// Ordering key: low endpoint first, then insertion sequence so that equal
/// low endpoints still get a strict total order.
pub(super) type NodeKey = (OrderedFloat<f64>, u64);

/// Node in the interval tree.
#[derive(Clone, Debug)]
pub(super) struct Node<T> {
    pub lo: f64,
    pub hi: f64,
    pub seq: u64,
    /// Largest `hi` in the subtree rooted here.
    pub max_hi: f64,
    pub height: u32,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub payload: T,
}

impl<T> Node<T> {
    pub fn leaf(lo: f64, hi: f64, seq: u64, payload: T) -> Self {
        Self {
            lo,
            hi,
            seq,
            max_hi: hi,
            height: 1,
            left: None,
            right: None,
            payload,
        }
    }

    pub fn key(&self) -> NodeKey {
        (OrderedFloat(self.lo), self.seq)
    }
}

/// Arena slot. Vacant slots keep their generation so stale handles are caught.
#[derive(Clone, Debug)]
pub(super) struct Slot<T> {
    pub generation: u32,
    pub node: Option<Node<T>>,
}
