use offerchart_rs::api::{InvalidationTopic, OfferChartConfig};
use offerchart_rs::core::{Offer, OfferDomain, OfferTerms, Viewport};
use offerchart_rs::render::NullRenderer;
use offerchart_rs::OfferChartEngine;

fn market() -> Vec<Offer> {
    vec![
        Offer::new(100.0, 5.0, 1.0).expect("offer").with_id("a"),
        Offer::new(200.0, 7.0, 2.0).expect("offer").with_id("b"),
        Offer::new(150.0, 6.0, 3.0).expect("offer").with_id("c"),
    ]
}

#[test]
fn engine_smoke_flow() {
    let config = OfferChartConfig::new(Viewport::new(800, 400)).with_unit_label("USDC");
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");

    engine.set_offers(market()).expect("set offers");
    engine
        .set_user_offer(OfferTerms {
            principal: 150.0,
            rate: 6.5,
        })
        .expect("set user offer");

    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert_eq!(engine.mark_count(), 3);

    // Let the enter animations finish, then draw again: three marks plus
    // the marker circle.
    engine.advance_frame(1_000.0).expect("advance frame");
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_circle_count, 4);
    // Two dashed median guides.
    assert!(engine.renderer().last_line_count >= 2);
}

#[test]
fn empty_offer_set_still_renders() {
    let config = OfferChartConfig::new(Viewport::new(800, 400));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");

    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 1);
    assert_eq!(engine.renderer().last_circle_count, 0);
    assert_eq!(engine.renderer().last_polygon_count, 0);
}

#[test]
fn degenerate_viewport_suspends_rendering() {
    let config = OfferChartConfig::new(Viewport::new(0, 0));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_offers(market()).expect("set offers");

    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 0);

    // The first real resize observation resumes drawing.
    engine.set_viewport(Viewport::new(640, 320));
    engine.render().expect("render");
    assert_eq!(engine.renderer().frames_rendered, 1);
}

#[test]
fn set_offers_refits_the_domain() {
    let config = OfferChartConfig::new(Viewport::new(800, 400));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");

    engine.set_offers(market()).expect("set offers");
    let domain = engine.domain();
    for offer in engine.offers() {
        assert!(domain.contains(offer.terms()));
    }
    assert!(domain.principal_range().1 < 1_000.0);
}

#[test]
fn replacing_offers_bumps_the_data_revision() {
    let config = OfferChartConfig::new(Viewport::new(800, 400));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");

    let before = engine.data_revision();
    engine.set_offers(market()).expect("set offers");
    assert_eq!(engine.data_revision(), before + 1);
}

#[test]
fn density_layer_toggles_with_the_flag() {
    let config = OfferChartConfig::new(Viewport::new(800, 400));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_offers(market()).expect("set offers");

    engine.render().expect("render");
    assert!(engine.renderer().last_polygon_count > 0);

    engine.set_density_enabled(false);
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_polygon_count, 0);

    engine.set_density_enabled(true);
    engine.render().expect("render");
    assert!(engine.renderer().last_polygon_count > 0);
}

#[test]
fn repeated_renders_reuse_cached_density() {
    let config = OfferChartConfig::new(Viewport::new(800, 400));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_offers(market()).expect("set offers");

    engine.render().expect("render");
    let first = engine.renderer().last_polygon_count;

    // No data, domain, or viewport change: the contour geometry must be
    // byte-for-byte the same cached set.
    engine.render().expect("render");
    assert_eq!(engine.renderer().last_polygon_count, first);
}

#[test]
fn animations_settle_after_enough_frames() {
    let config = OfferChartConfig::new(Viewport::new(800, 400));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_offers(market()).expect("set offers");
    engine.render().expect("render");
    assert!(engine.is_animating());

    engine.advance_frame(2_000.0).expect("advance frame");
    assert!(!engine.is_animating());
}

#[test]
fn invalidation_topics_accumulate_and_drain() {
    let config = OfferChartConfig::new(Viewport::new(800, 400));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");

    engine.render().expect("render");
    assert!(engine.pending_invalidation().is_none());

    engine.set_offers(market()).expect("set offers");
    engine.set_viewport(Viewport::new(640, 320));
    let pending = engine.pending_invalidation();
    assert!(pending.contains_topic(InvalidationTopic::Data));
    assert!(pending.contains_topic(InvalidationTopic::Domain));
    assert!(pending.contains_topic(InvalidationTopic::Viewport));

    let drained = engine.take_invalidation();
    assert!(!drained.is_none());
    assert!(engine.pending_invalidation().is_none());
}

#[test]
fn user_offer_outside_the_domain_widens_it() {
    let config = OfferChartConfig::new(Viewport::new(800, 400));
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_offers(market()).expect("set offers");

    let user = OfferTerms {
        principal: 5_000.0,
        rate: 20.0,
    };
    engine.set_user_offer(user).expect("set user offer");
    assert!(engine.domain().contains(user));

    engine.set_domain(OfferDomain::new(0.0, 400.0, 0.0, 10.0).expect("domain"));
    assert!(!engine.domain().contains(user));
}
