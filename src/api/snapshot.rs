//! Serializable snapshot of the full chart state.
//!
//! Snapshots cover everything a host needs to persist and later replay a
//! session: configuration, data, domain, and the interaction phase. Cached
//! geometry (marks, contours) is deliberately excluded; it is a pure
//! function of this state and rebuilds on the first frame after restore.

use serde::{Deserialize, Serialize};

use crate::api::config::OfferChartConfig;
use crate::api::engine::OfferChartEngine;
use crate::core::{Offer, OfferDomain, OfferTerms};
use crate::error::ChartResult;
use crate::interaction::DragPhase;
use crate::render::Renderer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub config: OfferChartConfig,
    pub domain: OfferDomain,
    pub offers: Vec<Offer>,
    pub user_offer: Option<OfferTerms>,
    pub data_revision: u64,
    pub density_enabled: bool,
    pub drag_phase: DragPhase,
}

impl<R: Renderer> OfferChartEngine<R> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        ChartSnapshot {
            config: self.config.clone(),
            domain: self.domain,
            offers: self.offers.clone(),
            user_offer: self.user_offer,
            data_revision: self.data_revision,
            density_enabled: self.density_enabled,
            drag_phase: self.interaction.phase(),
        }
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
