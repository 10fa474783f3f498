use offerchart_rs::api::{ObserverContext, OfferChartConfig, OfferChartEvent, OfferChartObserver};
use offerchart_rs::core::{Offer, OfferTerms, Viewport};
use offerchart_rs::render::NullRenderer;
use offerchart_rs::OfferChartEngine;

struct EventPrinter;

impl OfferChartObserver for EventPrinter {
    fn id(&self) -> &str {
        "event-printer"
    }

    fn on_event(&mut self, event: OfferChartEvent, context: ObserverContext) {
        match event {
            OfferChartEvent::LiveDrag(update) => {
                println!(
                    "live drag: {:.1} principal at {:.2}% ({} offers visible)",
                    update.principal, update.rate, context.offers_len
                );
            }
            OfferChartEvent::DragCommitted(commit) => {
                println!(
                    "committed: {:.1} principal at {:.2}%",
                    commit.principal, commit.rate
                );
            }
            OfferChartEvent::DomainChanged { domain } => {
                println!(
                    "domain: principal {:?}, rate {:?}",
                    domain.principal_range(),
                    domain.rate_range()
                );
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = OfferChartConfig::new(Viewport::new(1000, 600)).with_unit_label("USDC");
    let mut engine = OfferChartEngine::new(NullRenderer::default(), config)?;
    engine.add_observer(Box::new(EventPrinter));

    let offers: Vec<Offer> = (0..40)
        .map(|i| {
            let t = i as f64;
            let principal = 1_000.0 + (t * 2.3).sin().abs() * 8_000.0;
            let rate = 3.0 + (t * 1.7).cos().abs() * 12.0;
            Offer::new(principal, rate, 1_700_000_000.0 - t * 3_600.0)
                .map(|offer| offer.with_id(format!("market-{i}")).with_duration_days(90))
        })
        .collect::<Result<_, _>>()?;
    engine.set_offers(offers)?;
    engine.set_user_offer(OfferTerms {
        principal: 5_000.0,
        rate: 8.0,
    })?;
    engine.render()?;

    // Simulated drag toward the right edge at 60 fps; the domain expands
    // once the pointer enters the edge zone.
    let marker = engine.user_offer().ok_or("marker missing")?;
    let domain = engine.domain();
    let (principal_start, principal_end) = domain.principal_range();
    let (rate_start, rate_end) = domain.rate_range();
    let x = (marker.principal - principal_start) / (principal_end - principal_start) * 1000.0;
    let y = 600.0 - (marker.rate - rate_start) / (rate_end - rate_start) * 600.0;

    if !engine.pointer_down(x, y)? {
        return Err("pointer-down missed the marker".into());
    }
    for frame in 0..120 {
        let step = f64::from(frame);
        engine.pointer_move((x + step * 8.0).min(995.0), y)?;
        engine.advance_frame(16.0)?;
        engine.render()?;
    }
    engine.pointer_up();

    println!("frames rendered: {}", engine.renderer().frames_rendered);
    println!("{}", engine.snapshot_json_pretty()?);
    Ok(())
}
