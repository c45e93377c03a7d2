//! Error types for blobmark clustering.

use thiserror::Error;

use crate::interval::IntervalHandle;
use crate::BlobId;

/// Primary error type for clustering operations.
///
/// Every variant aborts the current call; no partial partition is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BlobError {
    #[error("invalid interval [{lo}, {hi}): low endpoint exceeds high endpoint")]
    InvalidInterval { lo: f64, hi: f64 },

    #[error("unknown interval handle: {0}")]
    UnknownHandle(IntervalHandle),

    #[error("duplicate identifier: {0}")]
    DuplicateIdentifier(BlobId),

    #[error("invalid rectangle ({left}, {top}, {width}, {height}): {msg}")]
    InvalidRect {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
        msg: &'static str,
    },

    #[error("padding must be a finite non-negative length, got {0}")]
    InvalidPadding(f64),

    #[error("viewport scale must be a finite positive factor, got {0}")]
    InvalidScale(f64),
}

/// Convenience Result type alias for BlobError.
pub type Result<T> = std::result::Result<T, BlobError>;
