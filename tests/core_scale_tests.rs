use approx::assert_abs_diff_eq;
use offerchart_rs::core::{LinearScale, OfferDomain, PixelPoint, ScatterProjection, Viewport};

#[test]
fn scale_round_trip_within_tolerance() {
    let scale = LinearScale::new(10.0, 110.0).expect("valid scale");

    let original = 42.5;
    let px = scale.to_pixel(original, 1000.0).expect("to pixel");
    let recovered = scale.from_pixel(px, 1000.0).expect("from pixel");

    assert_abs_diff_eq!(recovered, original, epsilon = 1e-9);
}

#[test]
fn zero_span_domain_is_rejected() {
    assert!(LinearScale::new(5.0, 5.0).is_err());
    assert!(LinearScale::new(f64::NAN, 1.0).is_err());
}

#[test]
fn degenerate_extent_is_rejected() {
    let scale = LinearScale::new(0.0, 1.0).expect("valid scale");
    assert!(scale.to_pixel(0.5, 0.0).is_err());
    assert!(scale.to_pixel(0.5, f64::INFINITY).is_err());
}

#[test]
fn units_per_pixel_matches_span() {
    let scale = LinearScale::new(0.0, 100.0).expect("valid scale");
    let upp = scale.units_per_pixel(200.0).expect("units per pixel");
    assert_abs_diff_eq!(upp, 0.5, epsilon = 1e-12);
}

#[test]
fn projection_round_trip_within_tolerance() {
    let domain = OfferDomain::new(20.0, 120.0, 10.0, 60.0).expect("valid domain");
    let projection = ScatterProjection::new(domain, Viewport::new(800, 400)).expect("projection");

    let x = projection.principal_to_pixel(77.0).expect("to pixel");
    let principal = projection.pixel_to_principal(x).expect("from pixel");
    assert_abs_diff_eq!(principal, 77.0, epsilon = 1e-9);

    let y = projection.rate_to_pixel(33.0).expect("to pixel");
    let rate = projection.pixel_to_rate(y).expect("from pixel");
    assert_abs_diff_eq!(rate, 33.0, epsilon = 1e-9);
}

#[test]
fn rate_axis_plots_better_rates_upward() {
    let domain = OfferDomain::new(0.0, 100.0, 0.0, 50.0).expect("valid domain");
    let projection = ScatterProjection::new(domain, Viewport::new(200, 100)).expect("projection");

    let low = projection.rate_to_pixel(10.0).expect("low rate");
    let high = projection.rate_to_pixel(40.0).expect("high rate");
    assert!(high < low);
}

#[test]
fn unproject_reports_off_surface_positions_unclamped() {
    let domain = OfferDomain::new(0.0, 100.0, 0.0, 50.0).expect("valid domain");
    let projection = ScatterProjection::new(domain, Viewport::new(200, 100)).expect("projection");

    let terms = projection
        .unproject(PixelPoint::new(300.0, -50.0))
        .expect("unproject");
    assert_abs_diff_eq!(terms.principal, 150.0, epsilon = 1e-9);
    assert_abs_diff_eq!(terms.rate, 75.0, epsilon = 1e-9);
}
