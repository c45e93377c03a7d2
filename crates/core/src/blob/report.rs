//! Partition summaries.

use std::fmt;

use itertools::Itertools;

use super::builder::BlobEntry;

/// A finished partition plus the counts needed to report on it.
///
/// A drawing that forms a single blob has nothing isolated to point out;
/// only when there are two or more blobs is each one worth flagging.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobReport {
    blobs: Vec<BlobEntry>,
    input_count: usize,
}

impl BlobReport {
    pub fn new(blobs: Vec<BlobEntry>) -> Self {
        let input_count = blobs.iter().map(BlobEntry::len).sum();
        Self { blobs, input_count }
    }

    pub fn blobs(&self) -> &[BlobEntry] {
        &self.blobs
    }

    pub fn into_blobs(self) -> Vec<BlobEntry> {
        self.blobs
    }

    pub fn blob_count(&self) -> usize {
        self.blobs.len()
    }

    /// Total number of input rectangles across all blobs.
    pub const fn input_count(&self) -> usize {
        self.input_count
    }

    /// True when everything is connected (or there was no input at all).
    pub fn is_connected(&self) -> bool {
        self.blobs.len() <= 1
    }

    /// Blobs worth flagging: none for a connected drawing, all otherwise.
    pub fn isolated(&self) -> &[BlobEntry] {
        if self.is_connected() {
            &[]
        } else {
            &self.blobs
        }
    }

    /// One-line count of blobs found.
    pub fn summary(&self) -> String {
        let count = self.blobs.len();
        if count == 1 {
            format!("{count} bounding box blob found")
        } else {
            format!("{count} bounding box blobs found")
        }
    }

    /// Message attached to an isolated blob.
    pub fn describe(blob: &BlobEntry) -> String {
        format!(
            "the following object(s) form an isolated blob: {}",
            blob.ids.iter().join(", ")
        )
    }
}

impl From<Vec<BlobEntry>> for BlobReport {
    fn from(blobs: Vec<BlobEntry>) -> Self {
        Self::new(blobs)
    }
}

impl fmt::Display for BlobReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for blob in self.isolated() {
            writeln!(f, "{} {}", Self::describe(blob), blob.rect)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::cluster;
    use crate::geometry::Rect;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
        Rect::new(left, top, width, height).unwrap()
    }

    #[test]
    fn test_connected_has_nothing_isolated() {
        let blobs = cluster(
            [
                ("a", rect(0.0, 0.0, 10.0, 10.0)),
                ("b", rect(5.0, 5.0, 10.0, 10.0)),
            ],
            0.0,
        )
        .unwrap();
        let report = BlobReport::new(blobs);
        assert!(report.is_connected());
        assert!(report.isolated().is_empty());
        assert_eq!(report.input_count(), 2);
        assert_eq!(report.summary(), "1 bounding box blob found");
    }

    #[test]
    fn test_empty_report() {
        let report = BlobReport::new(Vec::new());
        assert!(report.is_connected());
        assert_eq!(report.summary(), "0 bounding box blobs found");
    }
}
