use criterion::{Criterion, criterion_group, criterion_main};
use offerchart_rs::api::{MarkReconciler, MarkStyle, OfferChartConfig};
use offerchart_rs::core::{Offer, OfferDomain, PixelPoint, ScatterProjection, Viewport};
use offerchart_rs::density::{build_bands, DensityConfig, DensityGrid};
use offerchart_rs::render::NullRenderer;
use offerchart_rs::OfferChartEngine;
use std::hint::black_box;

fn market(count: usize) -> Vec<Offer> {
    (0..count)
        .map(|i| {
            let t = i as f64;
            let principal = 500.0 + (t * 7.31).sin().abs() * 9_500.0;
            let rate = 2.0 + (t * 3.77).cos().abs() * 18.0;
            Offer::new(principal, rate, t)
                .expect("valid generated offer")
                .with_id(format!("offer-{i}"))
        })
        .collect()
}

fn bench_projection_round_trip(c: &mut Criterion) {
    let domain = OfferDomain::new(0.0, 10_000.0, 0.0, 25.0).expect("valid domain");
    let projection = ScatterProjection::new(domain, Viewport::new(1920, 1080)).expect("projection");

    c.bench_function("projection_round_trip", |b| {
        b.iter(|| {
            let x = projection
                .principal_to_pixel(black_box(4_321.123))
                .expect("to pixel");
            let y = projection.rate_to_pixel(black_box(7.89)).expect("to pixel");
            let _ = projection.pixel_to_principal(x).expect("from pixel");
            let _ = projection.pixel_to_rate(y).expect("from pixel");
        })
    });
}

fn bench_density_grid_and_contours_2k(c: &mut Criterion) {
    let viewport = Viewport::new(1600, 900);
    let config = DensityConfig::default();

    let points: Vec<PixelPoint> = (0..2_000)
        .map(|i| {
            let t = i as f64;
            PixelPoint::new(
                800.0 + (t * 0.73).sin() * 350.0,
                450.0 + (t * 1.19).cos() * 200.0,
            )
        })
        .collect();

    c.bench_function("density_grid_and_contours_2k", |b| {
        b.iter(|| {
            let grid = DensityGrid::evaluate(black_box(&points), viewport, config)
                .expect("grid evaluation should succeed");
            let _ = build_bands(&grid, config);
        })
    });
}

fn bench_mark_reconcile_1k(c: &mut Criterion) {
    let domain = OfferDomain::new(0.0, 10_000.0, 0.0, 25.0).expect("valid domain");
    let projection = ScatterProjection::new(domain, Viewport::new(1920, 1080)).expect("projection");
    let offers = market(1_000);
    let style = MarkStyle::default();

    c.bench_function("mark_reconcile_1k", |b| {
        b.iter(|| {
            let mut reconciler = MarkReconciler::default();
            reconciler.reconcile(black_box(&offers), &projection, false, style);
            reconciler.advance_frame(16.0);
        })
    });
}

fn bench_engine_snapshot_json_1k(c: &mut Criterion) {
    let config = OfferChartConfig::new(Viewport::new(1600, 900)).with_unit_label("USDC");
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config).expect("engine init");
    engine.set_offers(market(1_000)).expect("set offers");

    c.bench_function("engine_snapshot_json_1k", |b| {
        b.iter(|| {
            let _ = engine
                .snapshot_json_pretty()
                .expect("snapshot json should succeed");
        })
    });
}

criterion_group!(
    benches,
    bench_projection_round_trip,
    bench_density_grid_and_contours_2k,
    bench_mark_reconcile_1k,
    bench_engine_snapshot_json_1k
);
criterion_main!(benches);
