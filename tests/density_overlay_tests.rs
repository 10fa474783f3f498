use offerchart_rs::core::{PixelPoint, Viewport};
use offerchart_rs::density::{build_bands, DensityConfig, DensityGrid};

fn cluster(center_x: f64, center_y: f64, count: usize) -> Vec<PixelPoint> {
    (0..count)
        .map(|index| {
            let angle = index as f64 * 0.7;
            PixelPoint::new(
                center_x + angle.cos() * 3.0,
                center_y + angle.sin() * 3.0,
            )
        })
        .collect()
}

#[test]
fn density_peaks_at_the_point_cluster() {
    let viewport = Viewport::new(400, 200);
    let config = DensityConfig::default();
    let points = cluster(200.0, 100.0, 12);

    let grid = DensityGrid::evaluate(&points, viewport, config).expect("grid");
    assert!(grid.max_value() > 0.0);

    // The maximum node sits near the cluster center.
    let mut best = (0_usize, 0_usize);
    let mut best_value = f64::NEG_INFINITY;
    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            if grid.value_at(col, row) > best_value {
                best_value = grid.value_at(col, row);
                best = (col, row);
            }
        }
    }
    let position = grid.node_position(best.0, best.1);
    assert!((position.x - 200.0).abs() <= config.cell_size_px * 2.0);
    assert!((position.y - 100.0).abs() <= config.cell_size_px * 2.0);
}

#[test]
fn empty_input_yields_no_bands() {
    let viewport = Viewport::new(400, 200);
    let config = DensityConfig::default();

    let grid = DensityGrid::evaluate(&[], viewport, config).expect("grid");
    assert_eq!(grid.max_value(), 0.0);
    assert!(build_bands(&grid, config).is_empty());
}

#[test]
fn contour_rings_are_closed_polygons() {
    let viewport = Viewport::new(400, 200);
    let config = DensityConfig::default();
    let points = cluster(200.0, 100.0, 12);

    let grid = DensityGrid::evaluate(&points, viewport, config).expect("grid");
    let bands = build_bands(&grid, config);
    assert!(!bands.is_empty());

    for band in &bands {
        for ring in &band.rings {
            // Marching squares over a zero-bordered grid always closes its
            // rings.
            assert!(ring.len() >= 3);
            for point in ring {
                assert!(point.is_finite());
            }
        }
    }
}

#[test]
fn bands_are_ordered_lowest_threshold_first() {
    let viewport = Viewport::new(400, 200);
    let config = DensityConfig::default();
    let points = cluster(200.0, 100.0, 12);

    let grid = DensityGrid::evaluate(&points, viewport, config).expect("grid");
    let bands = build_bands(&grid, config);

    for pair in bands.windows(2) {
        assert!(pair[0].iso_value < pair[1].iso_value);
    }
    if let Some(first) = bands.first() {
        assert!(first.iso_value > 0.0);
    }
}

#[test]
fn band_fills_grow_more_opaque_with_density() {
    let config = DensityConfig::default();
    let low = config.band_fill(0.1, 1.0);
    let high = config.band_fill(0.9, 1.0);
    assert!(low.alpha < high.alpha);
}

#[test]
fn non_finite_points_are_ignored() {
    let viewport = Viewport::new(400, 200);
    let config = DensityConfig::default();
    let mut points = cluster(200.0, 100.0, 6);
    points.push(PixelPoint::new(f64::NAN, 50.0));

    let grid = DensityGrid::evaluate(&points, viewport, config).expect("grid");
    assert!(grid.max_value().is_finite());
    assert!(grid.max_value() > 0.0);
}
