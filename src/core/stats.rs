use serde::{Deserialize, Serialize};

use crate::core::offer::Offer;

/// Median principal and rate over the identified market offers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketMedians {
    pub principal: f64,
    pub rate: f64,
}

/// Computes market medians, counting only offers with a stable identity.
///
/// The user's own proposed offer carries no upstream id, so even when a host
/// injects it into the same rendered collection it never shifts the market
/// statistics. Returns `None` when no identified offer exists; callers treat
/// that as "no market data", not as a median of zero.
#[must_use]
pub fn market_medians(offers: &[Offer]) -> Option<MarketMedians> {
    let mut principals: Vec<f64> = Vec::with_capacity(offers.len());
    let mut rates: Vec<f64> = Vec::with_capacity(offers.len());

    for offer in offers {
        if !offer.has_stable_identity() {
            continue;
        }
        if !offer.principal.is_finite() || !offer.rate.is_finite() {
            continue;
        }
        principals.push(offer.principal);
        rates.push(offer.rate);
    }

    if principals.is_empty() {
        return None;
    }

    Some(MarketMedians {
        principal: median_of(&mut principals),
        rate: median_of(&mut rates),
    })
}

/// Median of a non-empty finite sample; the mean of the two middle values
/// for even-sized samples.
fn median_of(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid]
    } else {
        (values[mid - 1] + values[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::market_medians;
    use crate::core::Offer;

    #[test]
    fn medians_over_identified_offers_only() {
        let offers = vec![
            Offer::new(1.0, 5.0, 0.0).expect("offer").with_id("a"),
            Offer::new(3.0, 7.0, 0.0).expect("offer").with_id("b"),
            // A user offer leaking into the market list without an id.
            Offer::new(100.0, 50.0, 0.0).expect("offer"),
        ];

        let medians = market_medians(&offers).expect("medians");
        assert_eq!(medians.principal, 2.0);
        assert_eq!(medians.rate, 6.0);
    }

    #[test]
    fn empty_market_yields_none() {
        assert!(market_medians(&[]).is_none());
        let unidentified = vec![Offer::new(10.0, 2.0, 0.0).expect("offer")];
        assert!(market_medians(&unidentified).is_none());
    }

    #[test]
    fn odd_sized_sample_uses_middle_value() {
        let offers = vec![
            Offer::new(1.0, 1.0, 0.0).expect("offer").with_id("a"),
            Offer::new(9.0, 3.0, 0.0).expect("offer").with_id("b"),
            Offer::new(5.0, 2.0, 0.0).expect("offer").with_id("c"),
        ];
        let medians = market_medians(&offers).expect("medians");
        assert_eq!(medians.principal, 5.0);
        assert_eq!(medians.rate, 2.0);
    }
}
