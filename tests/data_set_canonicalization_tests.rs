use chrono::DateTime;
use rust_decimal::Decimal;

use offerchart_rs::core::{canonicalize_offers, Offer};

fn offer(principal: f64, rate: f64, placed_at: f64) -> Offer {
    Offer::new(principal, rate, placed_at).expect("valid offer")
}

#[test]
fn decimal_time_constructor_converts_to_canonical_units() {
    let placed_at = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
    let offer = Offer::from_decimal_time(
        placed_at,
        Decimal::new(250_000, 2), // 2500.00
        Decimal::new(85, 1),      // 8.5
    )
    .expect("valid offer");

    assert_eq!(offer.principal, 2500.0);
    assert_eq!(offer.rate, 8.5);
    assert_eq!(offer.age_timestamp, 1_700_000_000.0);
    assert!(offer.id.is_none());
}

#[test]
fn decimal_time_constructor_rejects_negative_terms() {
    let placed_at = DateTime::from_timestamp(1_700_000_000, 0).expect("valid timestamp");
    assert!(Offer::from_decimal_time(placed_at, Decimal::new(-1, 0), Decimal::new(85, 1)).is_err());
    assert!(Offer::from_decimal_time(placed_at, Decimal::new(250_000, 2), Decimal::NEGATIVE_ONE)
        .is_err());
}

#[test]
fn identified_offers_keep_distinct_keys_despite_equal_terms() {
    let offers = vec![
        offer(100.0, 5.0, 1.0).with_id("a"),
        offer(100.0, 5.0, 2.0).with_id("b"),
    ];

    let canonical = canonicalize_offers(offers);
    assert_eq!(canonical.len(), 2);
}

#[test]
fn duplicate_ids_resolve_to_the_newest_placement() {
    let offers = vec![
        offer(100.0, 5.0, 1.0).with_id("a"),
        offer(120.0, 6.0, 9.0).with_id("a"),
        offer(110.0, 5.5, 4.0).with_id("a"),
    ];

    let canonical = canonicalize_offers(offers);
    assert_eq!(canonical.len(), 1);
    assert_eq!(canonical[0].age_timestamp, 9.0);
    assert_eq!(canonical[0].principal, 120.0);
}

#[test]
fn anonymous_offers_collide_on_identical_terms_only() {
    let offers = vec![
        offer(100.0, 5.0, 1.0),
        offer(100.0, 5.0, 3.0),
        offer(100.0, 5.1, 2.0),
        offer(100.0, 5.0, 1.5).with_duration_days(30),
    ];

    let canonical = canonicalize_offers(offers);
    // Equal terms without a duration collapse; differing rate or duration
    // stay distinct.
    assert_eq!(canonical.len(), 3);
    let merged = canonical
        .iter()
        .find(|o| o.rate == 5.0 && o.duration_days.is_none())
        .expect("merged anonymous offer");
    assert_eq!(merged.age_timestamp, 3.0);
}

#[test]
fn identity_key_wins_over_the_composite_fallback() {
    let identified = offer(100.0, 5.0, 1.0).with_id("a");
    let anonymous = offer(100.0, 5.0, 1.0);
    assert_ne!(identified.key(), anonymous.key());
}

#[test]
fn empty_id_falls_back_to_composite_identity() {
    let blank = offer(100.0, 5.0, 1.0).with_id("");
    let anonymous = offer(100.0, 5.0, 1.0);
    assert_eq!(blank.key(), anonymous.key());
    assert!(!blank.has_stable_identity());
}
