use crate::core::{PixelPoint, Viewport};
use crate::density::DensityConfig;
use crate::error::{ChartError, ChartResult};

#[cfg(feature = "parallel-density")]
use rayon::prelude::*;

/// Gaussian kernel density estimate sampled on a regular pixel grid.
///
/// Nodes cover the viewport plus a one-cell margin on every side; the margin
/// ring is forced to zero after evaluation so every iso-contour closes
/// inside the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    cols: usize,
    rows: usize,
    cell_size_px: f64,
    origin_x: f64,
    origin_y: f64,
    values: Vec<f64>,
    max_value: f64,
}

impl DensityGrid {
    /// Evaluates the KDE over already-projected points.
    ///
    /// Non-finite points are skipped; an empty input yields an all-zero grid
    /// with `max_value == 0`, which downstream banding treats as "nothing to
    /// draw".
    pub fn evaluate(
        points: &[PixelPoint],
        viewport: Viewport,
        config: DensityConfig,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        if !viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let cell = config.cell_size_px;
        let origin_x = -cell;
        let origin_y = -cell;
        // Node counts cover [-cell, extent + cell] inclusive on both axes.
        let cols = (viewport.width_f64() / cell).ceil() as usize + 3;
        let rows = (viewport.height_f64() / cell).ceil() as usize + 3;

        let usable: Vec<PixelPoint> = points
            .iter()
            .copied()
            .filter(|point| point.is_finite())
            .collect();

        let two_sigma_sq = 2.0 * config.bandwidth_px * config.bandwidth_px;
        let row_values = |row: usize| -> Vec<f64> {
            let node_y = origin_y + row as f64 * cell;
            (0..cols)
                .map(|col| {
                    let node_x = origin_x + col as f64 * cell;
                    usable
                        .iter()
                        .map(|point| {
                            let dx = point.x - node_x;
                            let dy = point.y - node_y;
                            (-(dx * dx + dy * dy) / two_sigma_sq).exp()
                        })
                        .sum()
                })
                .collect()
        };

        #[cfg(feature = "parallel-density")]
        let mut values: Vec<f64> = (0..rows)
            .into_par_iter()
            .flat_map_iter(row_values)
            .collect();

        #[cfg(not(feature = "parallel-density"))]
        let mut values: Vec<f64> = (0..rows).flat_map(row_values).collect();

        // Zero the outer ring so marching squares always closes its rings.
        for col in 0..cols {
            values[col] = 0.0;
            values[(rows - 1) * cols + col] = 0.0;
        }
        for row in 0..rows {
            values[row * cols] = 0.0;
            values[row * cols + cols - 1] = 0.0;
        }

        let max_value = values.iter().copied().fold(0.0_f64, f64::max);

        Ok(Self {
            cols,
            rows,
            cell_size_px: cell,
            origin_x,
            origin_y,
            values,
            max_value,
        })
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Density value at one grid node.
    #[must_use]
    pub fn value_at(&self, col: usize, row: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    /// Pixel position of one grid node.
    #[must_use]
    pub fn node_position(&self, col: usize, row: usize) -> PixelPoint {
        PixelPoint::new(
            self.origin_x + col as f64 * self.cell_size_px,
            self.origin_y + row as f64 * self.cell_size_px,
        )
    }
}
