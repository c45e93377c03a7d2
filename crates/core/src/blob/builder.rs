//! Incremental blob merging.
//!
//! Each padded input rectangle becomes a candidate. The candidate keeps
//! swallowing settled blobs it intersects, growing its bounding box, until a
//! fresh scan of the tree finds nothing more to absorb. Only then is it
//! inserted back as a settled blob. A merge always restarts the scan, since
//! growth can expose overlaps with entries that were already passed over.

use std::time::Instant;

use rustc_hash::FxHashSet;
use tracing::{debug, debug_span, trace};

use crate::BlobId;
use crate::error::{BlobError, Result};
use crate::geometry::{Bounded, EDGE_CONTACT_CONNECTS, Rect};
use crate::interval::{IntervalHandle, IntervalTree};
use crate::params::BlobParams;

/// A group of input ids and the padded bounding box covering all of them.
///
/// `ids` keeps first-seen order: the candidate's own id first, then the ids
/// of each absorbed blob in merge order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BlobEntry {
    pub ids: Vec<BlobId>,
    pub rect: Rect,
}

impl BlobEntry {
    fn seed(id: BlobId, rect: Rect) -> Self {
        Self {
            ids: vec![id],
            rect,
        }
    }

    fn absorb(&mut self, other: Self) {
        self.ids.extend(other.ids);
        self.rect = self.rect.union(&other.rect);
    }

    /// Number of input rectangles in this blob.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|member| member == id)
    }
}

/// Drives incremental clustering over one interval tree.
///
/// The tree holds exactly the blobs settled so far. A builder whose `push`
/// failed should be discarded.
#[derive(Debug)]
pub struct BlobBuilder {
    padding: f64,
    tree: IntervalTree<BlobEntry>,
    seen: FxHashSet<BlobId>,
    merges: usize,
}

impl BlobBuilder {
    /// Creates a builder expanding every rectangle by `padding`.
    pub fn new(padding: f64) -> Result<Self> {
        Self::with_capacity(padding, 0)
    }

    pub fn with_capacity(padding: f64, capacity: usize) -> Result<Self> {
        if !padding.is_finite() || padding < 0.0 {
            return Err(BlobError::InvalidPadding(padding));
        }
        let mut seen = FxHashSet::default();
        seen.reserve(capacity);
        Ok(Self {
            padding,
            tree: IntervalTree::with_capacity(capacity),
            seen,
            merges: 0,
        })
    }

    pub const fn padding(&self) -> f64 {
        self.padding
    }

    /// Adds one rectangle and merges it with every blob it connects to.
    ///
    /// The id is checked against all ids pushed so far, and the padded extent
    /// for overflow, before the tree is touched.
    pub fn push(&mut self, id: impl Into<BlobId>, rect: Rect) -> Result<()> {
        let id = id.into();
        if self.seen.contains(&id) {
            return Err(BlobError::DuplicateIdentifier(id));
        }
        let padded = rect.padded(self.padding);
        if !padded.is_finite() {
            return Err(rect.invalid("padded extent overflows"));
        }
        self.seen.insert(id.clone());
        self.settle(BlobEntry::seed(id, padded))
    }

    fn settle(&mut self, mut candidate: BlobEntry) -> Result<()> {
        while let Some(handle) = self.find_intersecting(&candidate.rect) {
            let settled = self.tree.remove(handle)?;
            trace!(
                into = %candidate.ids[0],
                absorbed = settled.ids.len(),
                "merging blob"
            );
            candidate.absorb(settled);
            self.merges += 1;
        }
        let (lo, hi) = (candidate.rect.left(), candidate.rect.right());
        self.tree.insert(lo, hi, candidate)?;
        Ok(())
    }

    /// First settled blob whose rectangle truly intersects `rect`.
    fn find_intersecting(&self, rect: &Rect) -> Option<IntervalHandle> {
        let (lo, hi) = (rect.left(), rect.right());
        let hits = if EDGE_CONTACT_CONNECTS {
            self.tree.query_inclusive(lo, hi)
        } else {
            self.tree.query(lo, hi)
        };
        hits.into_iter().find(|&handle| {
            self.tree
                .get(handle)
                .is_some_and(|entry| entry.rect.intersects(rect))
        })
    }

    /// Number of blobs settled so far.
    pub const fn len(&self) -> usize {
        self.tree.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Number of merges performed so far.
    pub const fn merges(&self) -> usize {
        self.merges
    }

    /// Settled blobs in ascending order of their left edge.
    pub fn blobs(&self) -> impl Iterator<Item = &BlobEntry> {
        self.tree.iter().map(|(_, entry)| entry)
    }

    /// Returns the final partition, ordered by left edge.
    pub fn finish(self) -> Vec<BlobEntry> {
        self.tree.into_values()
    }
}

fn check_unique(boxes: &[(BlobId, Rect)]) -> Result<()> {
    let mut seen = FxHashSet::default();
    seen.reserve(boxes.len());
    for (id, _) in boxes {
        if !seen.insert(id) {
            return Err(BlobError::DuplicateIdentifier(id.clone()));
        }
    }
    Ok(())
}

/// Partitions `boxes` into blobs of transitively overlapping rectangles.
///
/// Every rectangle is first expanded by `padding` on all sides. The result is
/// independent of input order up to the order of blobs in the output.
pub fn cluster<I, K>(boxes: I, padding: f64) -> Result<Vec<BlobEntry>>
where
    I: IntoIterator<Item = (K, Rect)>,
    K: Into<BlobId>,
{
    let boxes: Vec<(BlobId, Rect)> = boxes
        .into_iter()
        .map(|(id, rect)| (id.into(), rect))
        .collect();

    let mut builder = BlobBuilder::with_capacity(padding, boxes.len())?;
    check_unique(&boxes)?;

    let _span = debug_span!("cluster", inputs = boxes.len(), padding).entered();
    let start = Instant::now();
    for (id, rect) in boxes {
        builder.push(id, rect)?;
    }
    let merges = builder.merges();
    let blobs = builder.finish();
    debug!(
        blobs = blobs.len(),
        merges,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "clustering finished"
    );
    Ok(blobs)
}

/// Like [`cluster`], with the margin taken from `params` in user units.
pub fn cluster_with_params<I, K>(boxes: I, params: &BlobParams) -> Result<Vec<BlobEntry>>
where
    I: IntoIterator<Item = (K, Rect)>,
    K: Into<BlobId>,
{
    let padding = params.padding_user_units()?;
    cluster(boxes, padding)
}

/// Clusters arbitrary items with a known extent.
///
/// `id_of` names each item; ids must be unique.
pub fn cluster_bounded<'a, T, F, K>(
    items: &'a [T],
    id_of: F,
    padding: f64,
) -> Result<Vec<BlobEntry>>
where
    T: Bounded,
    F: Fn(&'a T) -> K,
    K: Into<BlobId>,
{
    let boxes = items
        .iter()
        .map(|item| {
            let rect = Rect::from_edges(item.left(), item.top(), item.right(), item.bottom())?;
            Ok((id_of(item).into(), rect))
        })
        .collect::<Result<Vec<(BlobId, Rect)>>>()?;
    cluster(boxes, padding)
}
