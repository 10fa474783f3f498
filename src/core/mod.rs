mod domain;
mod offer;
mod primitives;
mod projection;
mod scale;
mod stats;
mod types;

pub use domain::{DomainTuning, OfferDomain, PlotEdge};
pub use offer::{Offer, OfferKey, canonicalize_offers};
pub use primitives::{datetime_to_unix_seconds, decimal_to_f64, finite_non_negative};
pub use projection::ScatterProjection;
pub use scale::LinearScale;
pub use stats::{MarketMedians, market_medians};
pub use types::{OfferTerms, PixelPoint, Viewport};
