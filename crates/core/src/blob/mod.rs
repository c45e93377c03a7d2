//! Blob clustering.
//!
//! - `builder` - Incremental merge driver and the `cluster` entry points
//! - `report` - Summaries of a finished partition

mod builder;
mod report;

pub use builder::{BlobBuilder, BlobEntry, cluster, cluster_bounded, cluster_with_params};
pub use report::BlobReport;
