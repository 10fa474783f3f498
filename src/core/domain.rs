use serde::{Deserialize, Serialize};

use crate::core::offer::Offer;
use crate::core::types::OfferTerms;
use crate::error::{ChartError, ChartResult};

/// Tuning controls for fitting the domain around the active offer set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainTuning {
    /// Padding added on each side, as a ratio of the observed range.
    pub padding_ratio: f64,
    /// Floor span for the principal axis, avoiding zero-width domains.
    pub min_principal_span: f64,
    /// Floor span for the rate axis, avoiding zero-width domains.
    pub min_rate_span: f64,
}

impl Default for DomainTuning {
    fn default() -> Self {
        Self {
            padding_ratio: 0.10,
            min_principal_span: 1.0,
            min_rate_span: 0.1,
        }
    }
}

impl DomainTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.padding_ratio.is_finite() || self.padding_ratio < 0.0 {
            return Err(ChartError::InvalidData(
                "domain padding ratio must be finite and >= 0".to_owned(),
            ));
        }

        for (value, name) in [
            (self.min_principal_span, "min_principal_span"),
            (self.min_rate_span, "min_rate_span"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "domain tuning `{name}` must be finite and > 0"
                )));
            }
        }

        Ok(self)
    }
}

/// One edge of the plot rectangle, named from the viewer's perspective.
///
/// `Top` is the high-rate side (the rate axis is plotted upward) and `Left`
/// is the low-principal side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlotEdge {
    Left,
    Right,
    Top,
    Bottom,
}

/// Two-axis numeric range mapping offer data space to plotting space.
///
/// Invariants: `start <= end` on both axes and all bounds >= 0 (principal
/// and rate are non-negative quantities).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OfferDomain {
    principal_start: f64,
    principal_end: f64,
    rate_start: f64,
    rate_end: f64,
}

impl Default for OfferDomain {
    /// Placeholder domain used before any data arrives; replaced by the
    /// first fit.
    fn default() -> Self {
        Self {
            principal_start: 0.0,
            principal_end: 1.0,
            rate_start: 0.0,
            rate_end: 1.0,
        }
    }
}

impl OfferDomain {
    /// Creates a domain from explicit bounds.
    ///
    /// Bounds on each axis are reordered when reversed; negative or
    /// non-finite bounds are rejected.
    pub fn new(
        principal_start: f64,
        principal_end: f64,
        rate_start: f64,
        rate_end: f64,
    ) -> ChartResult<Self> {
        for (value, name) in [
            (principal_start, "principal bound"),
            (principal_end, "principal bound"),
            (rate_start, "rate bound"),
            (rate_end, "rate bound"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "domain {name} must be finite and >= 0"
                )));
            }
        }

        Ok(Self {
            principal_start: principal_start.min(principal_end),
            principal_end: principal_start.max(principal_end),
            rate_start: rate_start.min(rate_end),
            rate_end: rate_start.max(rate_end),
        })
    }

    /// Fits a padded domain around the offer set, optionally widened to
    /// include one extra point (the user's proposed offer).
    pub fn from_offers(
        offers: &[Offer],
        include: Option<OfferTerms>,
        tuning: DomainTuning,
    ) -> ChartResult<Self> {
        let tuning = tuning.validate()?;

        if offers.is_empty() && include.is_none() {
            return Err(ChartError::InvalidData(
                "domain cannot be fitted from empty data".to_owned(),
            ));
        }

        let mut principal_min = f64::INFINITY;
        let mut principal_max = f64::NEG_INFINITY;
        let mut rate_min = f64::INFINITY;
        let mut rate_max = f64::NEG_INFINITY;

        let mut absorb = |terms: OfferTerms| {
            principal_min = principal_min.min(terms.principal);
            principal_max = principal_max.max(terms.principal);
            rate_min = rate_min.min(terms.rate);
            rate_max = rate_max.max(terms.rate);
        };

        for offer in offers {
            if !offer.terms().is_finite() {
                return Err(ChartError::InvalidData(
                    "offer values must be finite".to_owned(),
                ));
            }
            absorb(offer.terms());
        }
        if let Some(terms) = include {
            if !terms.is_finite() {
                return Err(ChartError::InvalidData(
                    "included terms must be finite".to_owned(),
                ));
            }
            absorb(terms);
        }

        let principal = pad_axis(
            principal_min,
            principal_max,
            tuning.padding_ratio,
            tuning.min_principal_span,
        );
        let rate = pad_axis(
            rate_min,
            rate_max,
            tuning.padding_ratio,
            tuning.min_rate_span,
        );

        Ok(Self {
            principal_start: principal.0,
            principal_end: principal.1,
            rate_start: rate.0,
            rate_end: rate.1,
        })
    }

    #[must_use]
    pub fn principal_range(self) -> (f64, f64) {
        (self.principal_start, self.principal_end)
    }

    #[must_use]
    pub fn rate_range(self) -> (f64, f64) {
        (self.rate_start, self.rate_end)
    }

    #[must_use]
    pub fn principal_span(self) -> f64 {
        self.principal_end - self.principal_start
    }

    #[must_use]
    pub fn rate_span(self) -> f64 {
        self.rate_end - self.rate_start
    }

    #[must_use]
    pub fn contains(self, terms: OfferTerms) -> bool {
        terms.principal >= self.principal_start
            && terms.principal <= self.principal_end
            && terms.rate >= self.rate_start
            && terms.rate <= self.rate_end
    }

    /// Moves one domain bound by a signed data-space delta.
    ///
    /// Positive `outward_delta` always grows the axis away from the plot
    /// center for that edge; a negative delta adjusts inward. Bounds stay
    /// >= 0 and the axis span never drops below `min_span`, so repeated
    /// inward adjustment cannot collapse the domain.
    pub fn adjust_edge(
        &mut self,
        edge: PlotEdge,
        outward_delta: f64,
        min_span: f64,
    ) -> ChartResult<()> {
        if !outward_delta.is_finite() {
            return Err(ChartError::InvalidData(
                "edge adjustment delta must be finite".to_owned(),
            ));
        }
        if !min_span.is_finite() || min_span <= 0.0 {
            return Err(ChartError::InvalidData(
                "edge adjustment min span must be finite and > 0".to_owned(),
            ));
        }

        match edge {
            PlotEdge::Left => {
                let candidate = (self.principal_start - outward_delta).max(0.0);
                self.principal_start = candidate.min(self.principal_end - min_span).max(0.0);
            }
            PlotEdge::Right => {
                let candidate = self.principal_end + outward_delta;
                self.principal_end = candidate.max(self.principal_start + min_span);
            }
            PlotEdge::Bottom => {
                let candidate = (self.rate_start - outward_delta).max(0.0);
                self.rate_start = candidate.min(self.rate_end - min_span).max(0.0);
            }
            PlotEdge::Top => {
                let candidate = self.rate_end + outward_delta;
                self.rate_end = candidate.max(self.rate_start + min_span);
            }
        }

        Ok(())
    }
}

/// Pads one observed axis range and enforces its floor span, keeping both
/// bounds non-negative.
fn pad_axis(min: f64, max: f64, padding_ratio: f64, min_span: f64) -> (f64, f64) {
    let (base_min, base_max) = if min == max {
        let half = min_span / 2.0;
        (min - half, max + half)
    } else {
        (min, max)
    };

    let span = base_max - base_min;
    let padded_min = (base_min - span * padding_ratio).max(0.0);
    let padded_max = base_max + span * padding_ratio;

    if padded_max - padded_min < min_span {
        (padded_min, padded_min + min_span)
    } else {
        (padded_min, padded_max)
    }
}
