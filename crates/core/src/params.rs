//! Clustering parameters.
//!
//! Contains BlobParams for controlling how much slack is added around each
//! rectangle before overlap testing.

use std::fmt;
use std::str::FromStr;

use crate::error::{BlobError, Result};

/// Absolute length units understood for the padding margin.
///
/// Conversions follow CSS/SVG: one user unit is one pixel at 96 per inch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthUnit {
    Px,
    #[default]
    Mm,
    Cm,
    In,
    Pt,
    Pc,
}

impl LengthUnit {
    /// Number of pixels in one of this unit.
    pub const fn px_per_unit(self) -> f64 {
        match self {
            Self::Px => 1.0,
            Self::Mm => 96.0 / 25.4,
            Self::Cm => 96.0 / 2.54,
            Self::In => 96.0,
            Self::Pt => 96.0 / 72.0,
            Self::Pc => 16.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::In => "in",
            Self::Pt => "pt",
            Self::Pc => "pc",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "px" => Ok(Self::Px),
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "in" => Ok(Self::In),
            "pt" => Ok(Self::Pt),
            "pc" => Ok(Self::Pc),
            other => Err(format!("unknown length unit: {other}")),
        }
    }
}

/// Parameters for blob clustering.
#[derive(Debug, Clone, PartialEq)]
pub struct BlobParams {
    /// Margin added on every side of each rectangle, expressed in `unit`.
    pub padding: f64,

    /// Unit of `padding`.
    pub unit: LengthUnit,

    /// Pixels per document user unit. Documents whose viewBox is scaled
    /// relative to their physical size use a value other than 1.0.
    pub viewport_scale: f64,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            padding: 10.0,
            unit: LengthUnit::Mm,
            viewport_scale: 1.0,
        }
    }
}

impl BlobParams {
    /// Creates parameters with the given margin and a unit viewport scale.
    pub const fn new(padding: f64, unit: LengthUnit) -> Self {
        Self {
            padding,
            unit,
            viewport_scale: 1.0,
        }
    }

    #[must_use]
    pub const fn with_viewport_scale(mut self, viewport_scale: f64) -> Self {
        self.viewport_scale = viewport_scale;
        self
    }

    /// Checks that padding and scale are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.padding.is_finite() || self.padding < 0.0 {
            return Err(BlobError::InvalidPadding(self.padding));
        }
        if !self.viewport_scale.is_finite() || self.viewport_scale <= 0.0 {
            return Err(BlobError::InvalidScale(self.viewport_scale));
        }
        Ok(())
    }

    /// The padding margin converted to document user units.
    pub fn padding_user_units(&self) -> Result<f64> {
        self.validate()?;
        Ok(self.padding * self.unit.px_per_unit() / self.viewport_scale)
    }
}
