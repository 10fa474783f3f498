use offerchart_rs::core::{
    canonicalize_offers, DomainTuning, LinearScale, Offer, OfferDomain, ScatterProjection,
    Viewport,
};
use proptest::prelude::*;

proptest! {
    #[test]
    fn scale_round_trip_property(
        domain_start in 0.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0,
        extent in 1.0f64..4096.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        let scale = LinearScale::new(domain_start, domain_end).expect("valid scale");
        let px = scale.to_pixel(value, extent).expect("to pixel");
        let recovered = scale.from_pixel(px, extent).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn projection_round_trip_property(
        principal_span in 1.0f64..1_000_000.0,
        rate_span in 0.1f64..100.0,
        principal_factor in 0.0f64..1.0,
        rate_factor in 0.0f64..1.0
    ) {
        let domain = OfferDomain::new(0.0, principal_span, 0.0, rate_span)
            .expect("valid domain");
        let projection = ScatterProjection::new(domain, Viewport::new(1920, 1080))
            .expect("projection");

        let principal = principal_factor * principal_span;
        let rate = rate_factor * rate_span;

        let x = projection.principal_to_pixel(principal).expect("to pixel");
        let y = projection.rate_to_pixel(rate).expect("to pixel");
        let recovered_principal = projection.pixel_to_principal(x).expect("from pixel");
        let recovered_rate = projection.pixel_to_rate(y).expect("from pixel");

        prop_assert!((recovered_principal - principal).abs() <= 1e-6 * principal_span);
        prop_assert!((recovered_rate - rate).abs() <= 1e-6 * rate_span);
    }

    #[test]
    fn fitted_domain_contains_every_offer(
        raw in prop::collection::vec((0.0f64..1_000_000.0, 0.0f64..100.0), 1..40)
    ) {
        let offers: Vec<Offer> = raw
            .iter()
            .map(|&(principal, rate)| Offer::new(principal, rate, 0.0).expect("valid offer"))
            .collect();

        let domain = OfferDomain::from_offers(&offers, None, DomainTuning::default())
            .expect("fit domain");
        for offer in &offers {
            prop_assert!(domain.contains(offer.terms()));
        }
        prop_assert!(domain.principal_range().0 >= 0.0);
        prop_assert!(domain.rate_range().0 >= 0.0);
    }

    #[test]
    fn canonicalization_is_idempotent(
        raw in prop::collection::vec(
            (0.0f64..1_000.0, 0.0f64..50.0, 0.0f64..100.0, prop::option::of(0u32..8)),
            0..30
        )
    ) {
        let offers: Vec<Offer> = raw
            .iter()
            .map(|&(principal, rate, placed_at, id_slot)| {
                let offer = Offer::new(principal, rate, placed_at).expect("valid offer");
                match id_slot {
                    Some(slot) => offer.with_id(format!("offer-{slot}")),
                    None => offer,
                }
            })
            .collect();

        let once = canonicalize_offers(offers);
        let twice = canonicalize_offers(once.clone());
        prop_assert_eq!(&once, &twice);

        // Keys are unique after canonicalization.
        let mut keys: Vec<_> = once.iter().map(Offer::key).collect();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), once.len());
    }
}
