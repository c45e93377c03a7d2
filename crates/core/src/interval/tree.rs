//! Augmented AVL interval tree.
//!
//! Nodes live in a `Vec` arena and link to each other by index, so handles
//! survive rotations. Every mutation restores heights and subtree maxima on
//! the way back up before returning.

use super::node::{IntervalHandle, Node, NodeKey, Slot};
use crate::error::{BlobError, Result};

/// Balanced index over 1-D intervals `[lo, hi)` with an opaque payload each.
#[derive(Clone, Debug)]
pub struct IntervalTree<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    root: Option<usize>,
    len: usize,
    next_seq: u64,
}

impl<T> Default for IntervalTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> IntervalTree<T> {
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
            next_seq: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Number of stored intervals.
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every interval. Outstanding handles become unknown.
    pub fn clear(&mut self) {
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(idx);
            }
        }
        self.root = None;
        self.len = 0;
    }

    /// Adds the interval `[lo, hi)` carrying `payload`.
    ///
    /// Fails with `InvalidInterval` when `lo > hi` or either endpoint is NaN.
    pub fn insert(&mut self, lo: f64, hi: f64, payload: T) -> Result<IntervalHandle> {
        if lo.is_nan() || hi.is_nan() || lo > hi {
            return Err(BlobError::InvalidInterval { lo, hi });
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        let idx = self.alloc(Node::leaf(lo, hi, seq, payload));
        let root = self.insert_at(self.root, idx);
        self.root = Some(root);
        self.len += 1;
        Ok(self.handle(idx))
    }

    /// Deletes the interval named by `handle` and hands its payload back.
    ///
    /// Removing the same handle twice fails with `UnknownHandle`.
    pub fn remove(&mut self, handle: IntervalHandle) -> Result<T> {
        let idx = self.resolve(handle)?;
        let key = self.node(idx).key();
        self.root = self.remove_at(self.root, key, idx);
        self.len -= 1;

        let slot = &mut self.slots[idx];
        slot.generation = slot.generation.wrapping_add(1);
        let node = slot.node.take().ok_or(BlobError::UnknownHandle(handle))?;
        self.free.push(idx);
        Ok(node.payload)
    }

    /// Whether `handle` still names a stored interval.
    pub fn contains(&self, handle: IntervalHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    pub fn get(&self, handle: IntervalHandle) -> Option<&T> {
        let idx = self.resolve(handle).ok()?;
        Some(&self.node(idx).payload)
    }

    pub fn get_mut(&mut self, handle: IntervalHandle) -> Option<&mut T> {
        let idx = self.resolve(handle).ok()?;
        Some(&mut self.node_mut(idx).payload)
    }

    /// The `(lo, hi)` endpoints of a stored interval.
    pub fn interval(&self, handle: IntervalHandle) -> Option<(f64, f64)> {
        let idx = self.resolve(handle).ok()?;
        let node = self.node(idx);
        Some((node.lo, node.hi))
    }

    /// All stored intervals overlapping `[lo, hi)`.
    ///
    /// Uses half-open semantics: a stored `[a, b)` matches when
    /// `a < hi && lo < b`. Results come in ascending `lo` order, ties in
    /// insertion order. An inverted or NaN range matches nothing.
    pub fn query(&self, lo: f64, hi: f64) -> Vec<IntervalHandle> {
        let mut out = Vec::new();
        if lo <= hi {
            self.collect(self.root, lo, hi, false, &mut out);
        }
        out
    }

    /// Like [`query`](Self::query) but with closed intervals, so endpoints
    /// that only touch also match.
    pub fn query_inclusive(&self, lo: f64, hi: f64) -> Vec<IntervalHandle> {
        let mut out = Vec::new();
        if lo <= hi {
            self.collect(self.root, lo, hi, true, &mut out);
        }
        out
    }

    /// In-order iteration over `(handle, payload)`.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.push_left(self.root);
        iter
    }

    /// Consumes the tree, returning payloads in in-order sequence.
    pub fn into_values(mut self) -> Vec<T> {
        let order: Vec<usize> = self.iter().map(|(h, _)| h.index as usize).collect();
        order
            .into_iter()
            .filter_map(|idx| self.slots[idx].node.take().map(|node| node.payload))
            .collect()
    }

    /// Verifies ordering, AVL balance, heights and subtree maxima.
    ///
    /// Returns a description of the first violation found.
    pub fn check_invariants(&self) -> std::result::Result<(), String> {
        let mut seen = 0;
        self.check_subtree(self.root, None, None, &mut seen)?;
        if seen != self.len {
            return Err(format!("reachable nodes {seen} != len {}", self.len));
        }
        Ok(())
    }

    // ---- arena helpers ----

    fn alloc(&mut self, node: Node<T>) -> usize {
        if let Some(idx) = self.free.pop() {
            self.slots[idx].node = Some(node);
            idx
        } else {
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            self.slots.len() - 1
        }
    }

    fn handle(&self, idx: usize) -> IntervalHandle {
        IntervalHandle {
            index: idx as u32,
            generation: self.slots[idx].generation,
        }
    }

    fn resolve(&self, handle: IntervalHandle) -> Result<usize> {
        let idx = handle.index as usize;
        match self.slots.get(idx) {
            Some(slot) if slot.generation == handle.generation && slot.node.is_some() => Ok(idx),
            _ => Err(BlobError::UnknownHandle(handle)),
        }
    }

    fn node(&self, idx: usize) -> &Node<T> {
        self.slots[idx]
            .node
            .as_ref()
            .expect("interval tree link points at a vacant slot")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<T> {
        self.slots[idx]
            .node
            .as_mut()
            .expect("interval tree link points at a vacant slot")
    }

    // ---- balancing ----

    fn height(&self, idx: Option<usize>) -> u32 {
        idx.map_or(0, |i| self.node(i).height)
    }

    fn max_hi(&self, idx: Option<usize>) -> f64 {
        idx.map_or(f64::NEG_INFINITY, |i| self.node(i).max_hi)
    }

    fn balance_factor(&self, idx: usize) -> i64 {
        let node = self.node(idx);
        i64::from(self.height(node.left)) - i64::from(self.height(node.right))
    }

    /// Recomputes height and subtree max from the children.
    fn update(&mut self, idx: usize) {
        let (left, right) = {
            let node = self.node(idx);
            (node.left, node.right)
        };
        let height = 1 + self.height(left).max(self.height(right));
        let max_hi = self.max_hi(left).max(self.max_hi(right));
        let node = self.node_mut(idx);
        node.height = height;
        node.max_hi = node.hi.max(max_hi);
    }

    fn rotate_right(&mut self, idx: usize) -> usize {
        let pivot = self
            .node(idx)
            .left
            .expect("right rotation needs a left child");
        let inner = self.node(pivot).right;
        self.node_mut(idx).left = inner;
        self.update(idx);
        self.node_mut(pivot).right = Some(idx);
        self.update(pivot);
        pivot
    }

    fn rotate_left(&mut self, idx: usize) -> usize {
        let pivot = self
            .node(idx)
            .right
            .expect("left rotation needs a right child");
        let inner = self.node(pivot).left;
        self.node_mut(idx).right = inner;
        self.update(idx);
        self.node_mut(pivot).left = Some(idx);
        self.update(pivot);
        pivot
    }

    /// Restores the AVL property at `idx`, returning the new subtree root.
    fn rebalance(&mut self, idx: usize) -> usize {
        self.update(idx);
        let bf = self.balance_factor(idx);
        if bf > 1 {
            let left = self.node(idx).left;
            if let Some(left) = left {
                if self.balance_factor(left) < 0 {
                    let new_left = self.rotate_left(left);
                    self.node_mut(idx).left = Some(new_left);
                }
            }
            return self.rotate_right(idx);
        }
        if bf < -1 {
            let right = self.node(idx).right;
            if let Some(right) = right {
                if self.balance_factor(right) > 0 {
                    let new_right = self.rotate_right(right);
                    self.node_mut(idx).right = Some(new_right);
                }
            }
            return self.rotate_left(idx);
        }
        idx
    }

    // ---- structural edits ----

    fn insert_at(&mut self, root: Option<usize>, idx: usize) -> usize {
        let Some(cur) = root else {
            return idx;
        };
        if self.node(idx).key() < self.node(cur).key() {
            let left = self.node(cur).left;
            let new_left = self.insert_at(left, idx);
            self.node_mut(cur).left = Some(new_left);
        } else {
            let right = self.node(cur).right;
            let new_right = self.insert_at(right, idx);
            self.node_mut(cur).right = Some(new_right);
        }
        self.rebalance(cur)
    }

    fn remove_at(&mut self, root: Option<usize>, key: NodeKey, target: usize) -> Option<usize> {
        let cur = root?;
        if cur == target {
            let (left, right) = {
                let node = self.node(cur);
                (node.left, node.right)
            };
            return match (left, right) {
                (None, None) => None,
                (Some(child), None) | (None, Some(child)) => Some(child),
                (Some(left), Some(right)) => {
                    let (new_right, successor) = self.take_min(right);
                    let succ = self.node_mut(successor);
                    succ.left = Some(left);
                    succ.right = new_right;
                    Some(self.rebalance(successor))
                }
            };
        }

        if key < self.node(cur).key() {
            let left = self.node(cur).left;
            let new_left = self.remove_at(left, key, target);
            self.node_mut(cur).left = new_left;
        } else {
            let right = self.node(cur).right;
            let new_right = self.remove_at(right, key, target);
            self.node_mut(cur).right = new_right;
        }
        Some(self.rebalance(cur))
    }

    /// Detaches the minimum node under `root`.
    ///
    /// Returns the rebalanced remainder and the detached node index.
    fn take_min(&mut self, root: usize) -> (Option<usize>, usize) {
        let left = self.node(root).left;
        match left {
            None => (self.node(root).right, root),
            Some(left) => {
                let (new_left, min) = self.take_min(left);
                self.node_mut(root).left = new_left;
                (Some(self.rebalance(root)), min)
            }
        }
    }

    // ---- queries ----

    fn collect(
        &self,
        root: Option<usize>,
        lo: f64,
        hi: f64,
        closed: bool,
        out: &mut Vec<IntervalHandle>,
    ) {
        let Some(idx) = root else {
            return;
        };
        let node = self.node(idx);

        // Nothing below reaches far enough right.
        let reaches_subtree = if closed {
            node.max_hi >= lo
        } else {
            node.max_hi > lo
        };
        if !reaches_subtree {
            return;
        }

        self.collect(node.left, lo, hi, closed, out);

        // This node and its right subtree start at or after node.lo.
        let starts_in_range = if closed { node.lo <= hi } else { node.lo < hi };
        if !starts_in_range {
            return;
        }
        let reaches = if closed { node.hi >= lo } else { node.hi > lo };
        if reaches {
            out.push(self.handle(idx));
        }

        self.collect(node.right, lo, hi, closed, out);
    }

    fn check_subtree(
        &self,
        root: Option<usize>,
        lower: Option<NodeKey>,
        upper: Option<NodeKey>,
        seen: &mut usize,
    ) -> std::result::Result<(), String> {
        let Some(idx) = root else {
            return Ok(());
        };
        let node = self
            .slots
            .get(idx)
            .and_then(|slot| slot.node.as_ref())
            .ok_or_else(|| format!("link to vacant slot {idx}"))?;
        *seen += 1;

        let key = node.key();
        if lower.is_some_and(|l| key <= l) || upper.is_some_and(|u| key >= u) {
            return Err(format!("node {idx} out of key order"));
        }

        self.check_subtree(node.left, lower, Some(key), seen)?;
        self.check_subtree(node.right, Some(key), upper, seen)?;

        let expected_height = 1 + self.height(node.left).max(self.height(node.right));
        if node.height != expected_height {
            return Err(format!("node {idx} height {} != {expected_height}", node.height));
        }
        if self.balance_factor(idx).abs() > 1 {
            return Err(format!("node {idx} unbalanced"));
        }
        let expected_max = node
            .hi
            .max(self.max_hi(node.left))
            .max(self.max_hi(node.right));
        if node.max_hi != expected_max {
            return Err(format!("node {idx} max_hi {} != {expected_max}", node.max_hi));
        }
        Ok(())
    }
}

/// In-order iterator over an [`IntervalTree`].
pub struct Iter<'a, T> {
    tree: &'a IntervalTree<T>,
    stack: Vec<usize>,
}

impl<T> Iter<'_, T> {
    fn push_left(&mut self, mut cur: Option<usize>) {
        while let Some(idx) = cur {
            self.stack.push(idx);
            cur = self.tree.node(idx).left;
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (IntervalHandle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let tree = self.tree;
        let node = tree.node(idx);
        self.push_left(node.right);
        Some((tree.handle(idx), &node.payload))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.tree.len))
    }
}
