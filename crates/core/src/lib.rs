//! blobmark - groups axis-aligned bounding boxes into connected blobs.
//!
//! Two rectangles land in the same blob when they are linked by a chain of
//! pairwise overlaps after padding. Clustering is incremental over an
//! augmented interval tree keyed on each rectangle's horizontal span.

pub mod blob;
pub mod error;
pub mod geometry;
pub mod interval;
pub mod params;

pub use blob::{BlobBuilder, BlobEntry, BlobReport, cluster, cluster_bounded, cluster_with_params};
pub use error::{BlobError, Result};
pub use geometry::{Bounded, EDGE_CONTACT_CONNECTS, Rect};
pub use interval::{IntervalHandle, IntervalTree};
pub use params::{BlobParams, LengthUnit};

/// Identifier attached to each input rectangle.
pub type BlobId = smol_str::SmolStr;
