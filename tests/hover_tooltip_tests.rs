use offerchart_rs::api::OfferChartConfig;
use offerchart_rs::core::{Offer, OfferDomain, OfferTerms, Viewport};
use offerchart_rs::render::NullRenderer;
use offerchart_rs::OfferChartEngine;

/// 200x100 surface over a 100x50 domain; mark "a" sits at pixel (100, 50).
fn hover_fixture() -> OfferChartEngine<NullRenderer> {
    let config = OfferChartConfig::new(Viewport::new(200, 100));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");

    engine.set_reference_time(1_700_000_000.0);
    engine
        .set_offers(vec![
            Offer::new(50.0, 25.0, 1_700_000_000.0 - 7_200.0)
                .expect("offer")
                .with_id("a")
                .with_duration_days(30),
            Offer::new(20.0, 10.0, 1_700_000_000.0 - 86_400.0)
                .expect("offer")
                .with_id("b"),
        ])
        .expect("set offers");
    engine.set_domain(OfferDomain::new(0.0, 100.0, 0.0, 50.0).expect("domain"));

    // One frame so marks exist for hit-testing.
    engine.render().expect("render");
    engine
}

#[test]
fn hovering_a_mark_builds_a_tooltip() {
    let mut engine = hover_fixture();

    engine.pointer_move(102.0, 51.0).expect("pointer move");

    let tooltip = engine.hover_tooltip().expect("tooltip");
    assert!(tooltip.lines.contains(&"50".to_owned()));
    assert!(tooltip.lines.contains(&"25.00%".to_owned()));
    assert!(tooltip.lines.contains(&"30 days".to_owned()));
    assert!(tooltip.lines.contains(&"2 hours ago".to_owned()));
}

#[test]
fn duration_line_is_omitted_when_unknown() {
    let mut engine = hover_fixture();

    // Mark "b" at terms (20, 10) = pixel (40, 80), no duration.
    engine.pointer_move(40.0, 80.0).expect("pointer move");

    let tooltip = engine.hover_tooltip().expect("tooltip");
    assert!(!tooltip.lines.iter().any(|line| line.ends_with("days")));
    assert!(tooltip.lines.contains(&"1 day ago".to_owned()));
}

#[test]
fn moving_within_the_same_mark_only_repositions() {
    let mut engine = hover_fixture();

    engine.pointer_move(100.0, 50.0).expect("pointer move");
    let first = engine.hover_tooltip().expect("tooltip").clone();

    engine.pointer_move(103.0, 52.0).expect("pointer move");
    let second = engine.hover_tooltip().expect("tooltip").clone();

    assert_eq!(first.key, second.key);
    assert_eq!(first.lines, second.lines);
    assert_ne!(first.position, second.position);
}

#[test]
fn leaving_the_mark_drops_the_tooltip() {
    let mut engine = hover_fixture();

    engine.pointer_move(100.0, 50.0).expect("pointer move");
    assert!(engine.hover_tooltip().is_some());

    engine.pointer_move(170.0, 20.0).expect("pointer move");
    assert!(engine.hover_tooltip().is_none());
}

#[test]
fn pointer_leave_clears_hover_state() {
    let mut engine = hover_fixture();

    engine.pointer_move(100.0, 50.0).expect("pointer move");
    engine.pointer_leave();
    assert!(engine.hover_tooltip().is_none());
}

#[test]
fn hover_is_suppressed_while_dragging() {
    let mut engine = hover_fixture();
    engine
        .set_user_offer(OfferTerms {
            principal: 80.0,
            rate: 40.0,
        })
        .expect("set user offer");

    // Marker at pixel (160, 20).
    assert!(engine.pointer_down(160.0, 20.0).expect("pointer down"));
    // Dragging across mark "a" must not spawn a hover tooltip.
    engine.pointer_move(100.0, 50.0).expect("pointer move");
    assert!(engine.hover_tooltip().is_none());
    assert!(engine.drag_tooltip().is_some());
}
