use offerchart_rs::core::{DomainTuning, Offer, OfferDomain, OfferTerms, PlotEdge};

fn offer(principal: f64, rate: f64) -> Offer {
    Offer::new(principal, rate, 1_700_000_000.0).expect("valid offer")
}

#[test]
fn fit_pads_the_observed_range() {
    let offers = vec![offer(100.0, 5.0), offer(200.0, 15.0)];
    let domain =
        OfferDomain::from_offers(&offers, None, DomainTuning::default()).expect("fit domain");

    let (principal_start, principal_end) = domain.principal_range();
    // 10% of a 100-unit span on each side.
    assert!((principal_start - 90.0).abs() <= 1e-9);
    assert!((principal_end - 210.0).abs() <= 1e-9);

    let (rate_start, rate_end) = domain.rate_range();
    assert!((rate_start - 4.0).abs() <= 1e-9);
    assert!((rate_end - 16.0).abs() <= 1e-9);
}

#[test]
fn fit_never_produces_negative_bounds() {
    let offers = vec![offer(1.0, 0.2), offer(3.0, 0.4)];
    let domain =
        OfferDomain::from_offers(&offers, None, DomainTuning::default()).expect("fit domain");

    assert!(domain.principal_range().0 >= 0.0);
    assert!(domain.rate_range().0 >= 0.0);
}

#[test]
fn fit_applies_span_floor_to_a_single_point() {
    let offers = vec![offer(500.0, 8.0)];
    let domain =
        OfferDomain::from_offers(&offers, None, DomainTuning::default()).expect("fit domain");

    let tuning = DomainTuning::default();
    assert!(domain.principal_span() >= tuning.min_principal_span);
    assert!(domain.rate_span() >= tuning.min_rate_span);
    assert!(domain.contains(offer(500.0, 8.0).terms()));
}

#[test]
fn fit_widens_to_include_the_user_offer() {
    let offers = vec![offer(100.0, 5.0), offer(200.0, 15.0)];
    let user = OfferTerms {
        principal: 400.0,
        rate: 2.0,
    };
    let domain =
        OfferDomain::from_offers(&offers, Some(user), DomainTuning::default()).expect("fit domain");

    assert!(domain.contains(user));
    for market in &offers {
        assert!(domain.contains(market.terms()));
    }
}

#[test]
fn fit_from_empty_data_is_rejected() {
    assert!(OfferDomain::from_offers(&[], None, DomainTuning::default()).is_err());
}

#[test]
fn adjust_edge_grows_outward() {
    let mut domain = OfferDomain::new(20.0, 120.0, 10.0, 60.0).expect("valid domain");

    domain
        .adjust_edge(PlotEdge::Left, 5.0, 1.0)
        .expect("adjust left");
    assert!((domain.principal_range().0 - 15.0).abs() <= 1e-9);

    domain
        .adjust_edge(PlotEdge::Top, 5.0, 0.1)
        .expect("adjust top");
    assert!((domain.rate_range().1 - 65.0).abs() <= 1e-9);
}

#[test]
fn adjust_edge_clamps_at_zero() {
    let mut domain = OfferDomain::new(2.0, 100.0, 0.5, 50.0).expect("valid domain");

    domain
        .adjust_edge(PlotEdge::Left, 10.0, 1.0)
        .expect("adjust left");
    assert_eq!(domain.principal_range().0, 0.0);

    domain
        .adjust_edge(PlotEdge::Bottom, 10.0, 0.1)
        .expect("adjust bottom");
    assert_eq!(domain.rate_range().0, 0.0);
}

#[test]
fn adjust_edge_honors_the_span_floor() {
    let mut domain = OfferDomain::new(0.0, 100.0, 0.0, 50.0).expect("valid domain");

    // Inward adjustment far beyond the floor must stop at it.
    domain
        .adjust_edge(PlotEdge::Right, -99.0, 10.0)
        .expect("adjust right inward");
    assert!(domain.principal_span() >= 10.0 - 1e-9);
}
