use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, decimal_to_f64, finite_non_negative};
use crate::core::types::OfferTerms;
use crate::error::{ChartError, ChartResult};

/// One normalized market offer, immutable once received.
///
/// `id` is the upstream record identity. Visual marks are matched across
/// re-renders by [`Offer::key`], so records that keep their id keep their
/// mark, its transition state, and its tooltip target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: Option<String>,
    pub principal: f64,
    pub rate: f64,
    /// Unix seconds of offer placement; drives recency coloring.
    pub age_timestamp: f64,
    pub duration_days: Option<u32>,
}

impl Offer {
    /// Builds a validated offer from raw floating values.
    ///
    /// Invariants:
    /// - `principal` and `rate` are finite and >= 0
    /// - `age_timestamp` is finite
    pub fn new(principal: f64, rate: f64, age_timestamp: f64) -> ChartResult<Self> {
        if !age_timestamp.is_finite() {
            return Err(ChartError::InvalidData(
                "offer age timestamp must be finite".to_owned(),
            ));
        }

        Ok(Self {
            id: None,
            principal: finite_non_negative(principal, "principal")?,
            rate: finite_non_negative(rate, "rate")?,
            age_timestamp,
            duration_days: None,
        })
    }

    /// Converts strongly-typed temporal/decimal input into a validated offer.
    pub fn from_decimal_time(
        placed_at: DateTime<Utc>,
        principal: Decimal,
        rate: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            decimal_to_f64(principal, "principal")?,
            decimal_to_f64(rate, "rate")?,
            datetime_to_unix_seconds(placed_at),
        )
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_duration_days(mut self, duration_days: u32) -> Self {
        self.duration_days = Some(duration_days);
        self
    }

    #[must_use]
    pub fn terms(&self) -> OfferTerms {
        OfferTerms {
            principal: self.principal,
            rate: self.rate,
        }
    }

    /// Returns `true` when the offer carries a stable upstream identity.
    ///
    /// Only identified offers count toward market statistics; a user offer
    /// leaking into the market list without an id is thereby excluded.
    #[must_use]
    pub fn has_stable_identity(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Stable reconciliation key for this offer.
    ///
    /// Falls back to a `principal|rate|duration` composite when no identity
    /// is present. The composite can collide for two distinct offers with
    /// identical terms; canonicalization treats such collisions as dedup
    /// (newest placement wins) rather than trying to disambiguate.
    #[must_use]
    pub fn key(&self) -> OfferKey {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => OfferKey(format!("id:{id}")),
            _ => OfferKey(format!(
                "terms:{:.6}|{:.6}|{}",
                self.principal,
                self.rate,
                self.duration_days.map_or(-1_i64, i64::from)
            )),
        }
    }
}

/// Mark-matching key: the upstream identity, or the composite fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferKey(String);

impl OfferKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OfferKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonicalizes an inbound offer list for the chart engine.
///
/// Offers sharing a key are collapsed to the one with the newest
/// `age_timestamp`; first-seen list order is preserved otherwise so keyed
/// reconciliation stays stable across refreshes.
#[must_use]
pub fn canonicalize_offers(offers: Vec<Offer>) -> Vec<Offer> {
    let mut slot_by_key: HashMap<OfferKey, usize> = HashMap::with_capacity(offers.len());
    let mut canonical: Vec<Offer> = Vec::with_capacity(offers.len());

    for offer in offers {
        match slot_by_key.get(&offer.key()) {
            Some(&slot) => {
                if offer.age_timestamp > canonical[slot].age_timestamp {
                    canonical[slot] = offer;
                }
            }
            None => {
                slot_by_key.insert(offer.key(), canonical.len());
                canonical.push(offer);
            }
        }
    }

    canonical
}
