//! Pixel-space kernel density estimation and contour banding.
//!
//! The overlay works entirely in projected pixel coordinates so the
//! smoothing bandwidth is expressed in pixels and stays independent of the
//! data's unit scale. Geometry is ephemeral: every recompute fully replaces
//! the previous bands because the isoline topology can change arbitrarily
//! between frames.

mod contour;
mod grid;

pub use contour::{ContourBand, build_bands};
pub use grid::DensityGrid;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Tuning surface for the density overlay.
///
/// These were hand-tuned magic numbers in earlier revisions of the chart;
/// they are exposed as validated configuration instead of hard constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensityConfig {
    /// Gaussian smoothing bandwidth in pixels.
    pub bandwidth_px: f64,
    /// Grid cell size in pixels; smaller cells trade CPU for smoother bands.
    pub cell_size_px: f64,
    /// Number of iso-level thresholds between zero and the observed maximum.
    pub level_count: usize,
    /// Power-law exponent applied to the normalized density before color
    /// mapping; 1.0 means linear.
    pub color_exponent: f64,
    /// Fill color at density zero (low opacity).
    pub low_color: Color,
    /// Fill color at the observed maximum density (higher opacity).
    pub high_color: Color,
    /// Duration of the one-time fade-in when contours first appear for a
    /// new dataset.
    pub fade_in_ms: f64,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            bandwidth_px: 20.0,
            cell_size_px: 8.0,
            level_count: 12,
            color_exponent: 0.7,
            low_color: Color::rgba(0.28, 0.46, 0.90, 0.04),
            high_color: Color::rgba(0.28, 0.46, 0.90, 0.35),
            fade_in_ms: 400.0,
        }
    }
}

impl DensityConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.bandwidth_px, "bandwidth_px"),
            (self.cell_size_px, "cell_size_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "density `{name}` must be finite and > 0"
                )));
            }
        }
        if self.level_count == 0 || self.level_count > 64 {
            return Err(ChartError::InvalidData(
                "density level count must be in 1..=64".to_owned(),
            ));
        }
        if !self.color_exponent.is_finite() || self.color_exponent <= 0.0 {
            return Err(ChartError::InvalidData(
                "density color exponent must be finite and > 0".to_owned(),
            ));
        }
        if !self.fade_in_ms.is_finite() || self.fade_in_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "density fade duration must be finite and >= 0".to_owned(),
            ));
        }
        self.low_color.validate()?;
        self.high_color.validate()?;
        Ok(self)
    }

    /// Fill color for an iso level, interpolated through the power-law
    /// transform of the normalized density.
    #[must_use]
    pub fn band_fill(self, iso_value: f64, max_density: f64) -> Color {
        if max_density <= 0.0 || !iso_value.is_finite() {
            return self.low_color;
        }
        let normalized = (iso_value / max_density).clamp(0.0, 1.0);
        let shaped = normalized.powf(self.color_exponent);
        self.low_color.lerp(self.high_color, shaped)
    }
}
