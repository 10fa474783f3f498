use std::collections::HashMap;

use smallvec::SmallVec;

use crate::core::PixelPoint;
use crate::density::{DensityConfig, DensityGrid};
use crate::render::Color;

/// One filled iso-level region of the density estimate.
///
/// Fully replaced on every recompute; bands are never patched in place
/// because the isoline topology can change arbitrarily between frames.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourBand {
    pub iso_value: f64,
    pub fill: Color,
    /// Closed boundary rings in pixel space. Rings are rendered with
    /// even-odd fill so inner rings cut holes.
    pub rings: Vec<Vec<PixelPoint>>,
}

/// Extracts filled contour bands from a density grid.
///
/// Thresholds are spaced evenly between zero and the observed maximum;
/// bands are emitted lowest first so painting them in order stacks higher
/// densities on top.
#[must_use]
pub fn build_bands(grid: &DensityGrid, config: DensityConfig) -> Vec<ContourBand> {
    let max = grid.max_value();
    if max <= 0.0 {
        return Vec::new();
    }

    let mut bands = Vec::with_capacity(config.level_count);
    for level in 0..config.level_count {
        let iso_value = max * (level + 1) as f64 / (config.level_count + 1) as f64;
        let rings = rings_at_threshold(grid, iso_value);
        if rings.is_empty() {
            continue;
        }
        bands.push(ContourBand {
            iso_value,
            fill: config.band_fill(iso_value, max),
            rings,
        });
    }
    bands
}

/// A grid edge hosting one threshold crossing, identified by its low node.
/// `horizontal` edges run to `(col + 1, row)`, vertical ones to
/// `(col, row + 1)`. Keying crossings by edge (not by interpolated floats)
/// makes ring chaining exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EdgeKey {
    col: usize,
    row: usize,
    horizontal: bool,
}

/// Marching squares over the grid at one threshold.
///
/// The grid's zero outer ring guarantees every crossing chain closes, so
/// each produced ring is a closed loop.
fn rings_at_threshold(grid: &DensityGrid, threshold: f64) -> Vec<Vec<PixelPoint>> {
    let mut segments: Vec<[EdgeKey; 2]> = Vec::new();

    for row in 0..grid.rows() - 1 {
        for col in 0..grid.cols() - 1 {
            let top_left = grid.value_at(col, row);
            let top_right = grid.value_at(col + 1, row);
            let bottom_right = grid.value_at(col + 1, row + 1);
            let bottom_left = grid.value_at(col, row + 1);

            let mut case = 0_u8;
            if top_left >= threshold {
                case |= 8;
            }
            if top_right >= threshold {
                case |= 4;
            }
            if bottom_right >= threshold {
                case |= 2;
            }
            if bottom_left >= threshold {
                case |= 1;
            }

            let top = EdgeKey {
                col,
                row,
                horizontal: true,
            };
            let bottom = EdgeKey {
                col,
                row: row + 1,
                horizontal: true,
            };
            let left = EdgeKey {
                col,
                row,
                horizontal: false,
            };
            let right = EdgeKey {
                col: col + 1,
                row,
                horizontal: false,
            };

            let mut cell_segments: SmallVec<[[EdgeKey; 2]; 2]> = SmallVec::new();
            match case {
                0 | 15 => {}
                1 => cell_segments.push([left, bottom]),
                2 => cell_segments.push([bottom, right]),
                3 => cell_segments.push([left, right]),
                4 => cell_segments.push([top, right]),
                5 => {
                    // Saddle: connectivity decided by the cell center.
                    let center =
                        (top_left + top_right + bottom_right + bottom_left) / 4.0;
                    if center >= threshold {
                        cell_segments.push([top, left]);
                        cell_segments.push([right, bottom]);
                    } else {
                        cell_segments.push([top, right]);
                        cell_segments.push([left, bottom]);
                    }
                }
                6 => cell_segments.push([top, bottom]),
                7 => cell_segments.push([top, left]),
                8 => cell_segments.push([top, left]),
                9 => cell_segments.push([top, bottom]),
                10 => {
                    let center =
                        (top_left + top_right + bottom_right + bottom_left) / 4.0;
                    if center >= threshold {
                        cell_segments.push([top, right]);
                        cell_segments.push([bottom, left]);
                    } else {
                        cell_segments.push([top, left]);
                        cell_segments.push([bottom, right]);
                    }
                }
                11 => cell_segments.push([top, right]),
                12 => cell_segments.push([left, right]),
                13 => cell_segments.push([bottom, right]),
                14 => cell_segments.push([left, bottom]),
                _ => unreachable!("4-bit case"),
            }
            segments.extend(cell_segments);
        }
    }

    chain_segments(grid, threshold, &segments)
}

/// Chains edge-keyed segments into closed rings and interpolates the
/// crossing positions.
fn chain_segments(
    grid: &DensityGrid,
    threshold: f64,
    segments: &[[EdgeKey; 2]],
) -> Vec<Vec<PixelPoint>> {
    let mut by_endpoint: HashMap<EdgeKey, SmallVec<[usize; 2]>> =
        HashMap::with_capacity(segments.len() * 2);
    for (index, segment) in segments.iter().enumerate() {
        by_endpoint.entry(segment[0]).or_default().push(index);
        by_endpoint.entry(segment[1]).or_default().push(index);
    }

    let mut visited = vec![false; segments.len()];
    let mut rings = Vec::new();

    for start in 0..segments.len() {
        if visited[start] {
            continue;
        }
        visited[start] = true;

        let mut ring_keys = vec![segments[start][0], segments[start][1]];
        loop {
            let current = *ring_keys.last().unwrap_or(&segments[start][0]);
            if current == ring_keys[0] {
                ring_keys.pop();
                break;
            }

            let Some(candidates) = by_endpoint.get(&current) else {
                break;
            };
            let Some(&next_index) = candidates.iter().find(|&&index| !visited[index]) else {
                break;
            };

            visited[next_index] = true;
            let segment = segments[next_index];
            let next_key = if segment[0] == current {
                segment[1]
            } else {
                segment[0]
            };
            ring_keys.push(next_key);
        }

        if ring_keys.len() >= 3 {
            rings.push(
                ring_keys
                    .into_iter()
                    .map(|key| crossing_position(grid, threshold, key))
                    .collect(),
            );
        }
    }

    rings
}

/// Linear interpolation of the threshold crossing along one grid edge.
fn crossing_position(grid: &DensityGrid, threshold: f64, key: EdgeKey) -> PixelPoint {
    let (other_col, other_row) = if key.horizontal {
        (key.col + 1, key.row)
    } else {
        (key.col, key.row + 1)
    };

    let value_a = grid.value_at(key.col, key.row);
    let value_b = grid.value_at(other_col, other_row);
    let position_a = grid.node_position(key.col, key.row);
    let position_b = grid.node_position(other_col, other_row);

    let span = value_b - value_a;
    let t = if span.abs() <= f64::EPSILON {
        0.5
    } else {
        ((threshold - value_a) / span).clamp(0.0, 1.0)
    };

    PixelPoint::new(
        position_a.x + (position_b.x - position_a.x) * t,
        position_a.y + (position_b.y - position_a.y) * t,
    )
}
