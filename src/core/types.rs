use serde::{Deserialize, Serialize};

use crate::core::primitives::finite_non_negative;
use crate::error::ChartResult;

/// Rendering surface size in integer pixels, as republished by the host's
/// resize observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A viewport is drawable only when both extents are strictly positive.
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[must_use]
    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    #[must_use]
    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }
}

/// One position on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Clamps the point into the viewport rectangle for on-surface drawing.
    #[must_use]
    pub fn clamped_to(self, viewport: Viewport) -> Self {
        Self {
            x: self.x.clamp(0.0, viewport.width_f64()),
            y: self.y.clamp(0.0, viewport.height_f64()),
        }
    }
}

/// One position in offer data space: principal on x, rate on y.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct OfferTerms {
    pub principal: f64,
    pub rate: f64,
}

impl OfferTerms {
    /// Builds validated terms; principal and rate must be finite and >= 0.
    pub fn new(principal: f64, rate: f64) -> ChartResult<Self> {
        Ok(Self {
            principal: finite_non_negative(principal, "principal")?,
            rate: finite_non_negative(rate, "rate")?,
        })
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.principal.is_finite() && self.rate.is_finite()
    }
}
