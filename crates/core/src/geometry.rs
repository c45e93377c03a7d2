//! Axis-aligned rectangles and the overlap predicates used for clustering.
//!
//! Coordinates follow the document convention: `top` grows downward and
//! `bottom = top + height`. All rectangles are plain values.

use std::fmt;

use crate::error::{BlobError, Result};

/// Whether rectangles that only share an edge or a corner are connected.
///
/// `false` uses strict inequalities, so a zero-area contact does not merge
/// two rectangles. Flipping it to `true` makes every comparison inclusive,
/// both in [`Rect::intersects`] and in the interval tree query the blob
/// builder issues.
pub const EDGE_CONTACT_CONNECTS: bool = false;

/// Trait for objects that have a known axis-aligned extent.
pub trait Bounded {
    fn left(&self) -> f64;
    fn top(&self) -> f64;
    fn right(&self) -> f64;
    fn bottom(&self) -> f64;

    fn width(&self) -> f64 {
        self.right() - self.left()
    }

    fn height(&self) -> f64 {
        self.bottom() - self.top()
    }
}

/// An axis-aligned rectangle stored by its four edges.
///
/// `right >= left` and `bottom >= top` always hold. A zero width or height is
/// valid and describes a line or a point. Padding and union only move edges,
/// so a merged blob keeps exactly the edges of its outermost members.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(into = "RectRecord"))]
pub struct Rect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

/// Serialized form of a [`Rect`]: origin plus size.
#[cfg(feature = "serde")]
#[derive(serde::Serialize)]
struct RectRecord {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

#[cfg(feature = "serde")]
impl From<Rect> for RectRecord {
    fn from(rect: Rect) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Result<Self> {
        let invalid = |msg| BlobError::InvalidRect {
            left,
            top,
            width,
            height,
            msg,
        };
        if !(left.is_finite() && top.is_finite() && width.is_finite() && height.is_finite()) {
            return Err(invalid("coordinates must be finite"));
        }
        if width < 0.0 || height < 0.0 {
            return Err(invalid("size must be non-negative"));
        }
        let rect = Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
        };
        if !rect.is_finite() {
            return Err(invalid("extent overflows"));
        }
        Ok(rect)
    }

    /// Creates a rectangle from its edge coordinates, kept exactly as given.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self> {
        let rect = Self {
            left,
            top,
            right,
            bottom,
        };
        if !rect.is_finite() {
            return Err(rect.invalid("coordinates must be finite"));
        }
        if right < left || bottom < top {
            return Err(rect.invalid("size must be non-negative"));
        }
        Ok(rect)
    }

    /// Error naming this rectangle.
    pub(crate) fn invalid(&self, msg: &'static str) -> BlobError {
        BlobError::InvalidRect {
            left: self.left,
            top: self.top,
            width: self.width(),
            height: self.height(),
            msg,
        }
    }

    pub const fn left(&self) -> f64 {
        self.left
    }

    pub const fn top(&self) -> f64 {
        self.top
    }

    pub const fn right(&self) -> f64 {
        self.right
    }

    pub const fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// True for rectangles with zero width or zero height.
    pub fn is_degenerate(&self) -> bool {
        self.right == self.left || self.bottom == self.top
    }

    /// True when all four edges are finite.
    pub fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Expands the rectangle by `margin` on all four sides.
    ///
    /// `margin` is expected to be non-negative; the caller validates it. A
    /// huge margin can push edges to infinity, see [`Rect::is_finite`].
    pub fn padded(&self, margin: f64) -> Self {
        Self {
            left: self.left - margin,
            top: self.top - margin,
            right: self.right + margin,
            bottom: self.bottom + margin,
        }
    }

    /// AABB overlap test under the [`EDGE_CONTACT_CONNECTS`] policy.
    pub fn intersects(&self, other: &Self) -> bool {
        if EDGE_CONTACT_CONNECTS {
            self.left <= other.right
                && other.left <= self.right
                && self.top <= other.bottom
                && other.top <= self.bottom
        } else {
            self.left < other.right
                && other.left < self.right
                && self.top < other.bottom
                && other.top < self.bottom
        }
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.left,
            self.top,
            self.width(),
            self.height()
        )
    }
}

impl Bounded for Rect {
    fn left(&self) -> f64 {
        self.left
    }

    fn top(&self) -> f64 {
        self.top
    }

    fn right(&self) -> f64 {
        self.right
    }

    fn bottom(&self) -> f64 {
        self.bottom
    }
}
