use offerchart_rs::api::{ChartSnapshot, OfferChartConfig};
use offerchart_rs::core::{Offer, OfferTerms, Viewport};
use offerchart_rs::interaction::DragPhase;
use offerchart_rs::render::NullRenderer;
use offerchart_rs::OfferChartEngine;

fn populated_engine() -> OfferChartEngine<NullRenderer> {
    let config = OfferChartConfig::new(Viewport::new(800, 400)).with_unit_label("USDC");
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");

    engine
        .set_offers(vec![
            Offer::new(100.0, 5.0, 1.0).expect("offer").with_id("a"),
            Offer::new(200.0, 7.0, 2.0)
                .expect("offer")
                .with_id("b")
                .with_duration_days(90),
        ])
        .expect("set offers");
    engine
        .set_user_offer(OfferTerms {
            principal: 150.0,
            rate: 6.0,
        })
        .expect("set user offer");
    engine
}

#[test]
fn snapshot_captures_the_full_session_state() {
    let engine = populated_engine();
    let snapshot = engine.snapshot();

    assert_eq!(snapshot.offers.len(), 2);
    assert_eq!(snapshot.config.unit_label, "USDC");
    assert_eq!(snapshot.domain, engine.domain());
    assert_eq!(snapshot.data_revision, engine.data_revision());
    assert_eq!(snapshot.drag_phase, DragPhase::Idle);
    assert!(snapshot.density_enabled);

    let user = snapshot.user_offer.expect("user offer");
    assert_eq!(user.principal, 150.0);
}

#[test]
fn snapshot_round_trips_through_json() {
    let engine = populated_engine();
    let json = engine.snapshot_json_pretty().expect("serialize");

    let restored: ChartSnapshot = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, engine.snapshot());
}

#[test]
fn snapshot_reflects_an_active_drag() {
    let mut engine = populated_engine();
    engine.render().expect("render");

    let marker = engine.user_offer().expect("user offer");
    let domain = engine.domain();
    let (principal_start, principal_end) = domain.principal_range();
    let (rate_start, rate_end) = domain.rate_range();
    let x = (marker.principal - principal_start) / (principal_end - principal_start) * 800.0;
    let y = 400.0 - (marker.rate - rate_start) / (rate_end - rate_start) * 400.0;

    assert!(engine.pointer_down(x, y).expect("pointer down"));
    assert_eq!(engine.snapshot().drag_phase, DragPhase::Dragging);

    engine.pointer_up();
    assert_eq!(engine.snapshot().drag_phase, DragPhase::Idle);
}
