//! Density overlay ownership: recompute gating and the one-time fade-in.

use tracing::debug;

use crate::core::{Offer, OfferDomain, ScatterProjection, Viewport};
use crate::density::{ContourBand, DensityConfig, DensityGrid, build_bands};
use crate::error::ChartResult;

/// Everything that, when unchanged, makes a recompute redundant.
///
/// Pointer movement and animation frames never alter this signature, so a
/// 60 fps drag performs zero density work.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DensitySignature {
    data_revision: u64,
    domain: OfferDomain,
    viewport: Viewport,
    config: DensityConfig,
}

/// Owns the cached contour geometry and its recompute policy.
#[derive(Debug, Default)]
pub struct DensityCoordinator {
    bands: Vec<ContourBand>,
    signature: Option<DensitySignature>,
    opacity: f64,
    faded_revision: Option<u64>,
}

impl DensityCoordinator {
    /// Brings the cached bands up to date, recomputing only when the offer
    /// set, domain, viewport, or config changed since the last computation.
    ///
    /// Disabled overlays drop all geometry and perform no computation. The
    /// first bands for a new data revision start transparent and fade in
    /// once via [`DensityCoordinator::advance_frame`]; later recomputes for
    /// the same revision (domain pans, resizes) keep full opacity.
    pub fn ensure_current(
        &mut self,
        enabled: bool,
        offers: &[Offer],
        projection: &ScatterProjection,
        data_revision: u64,
        domain: OfferDomain,
        viewport: Viewport,
        config: DensityConfig,
    ) -> ChartResult<()> {
        if !enabled {
            self.clear();
            return Ok(());
        }

        let signature = DensitySignature {
            data_revision,
            domain,
            viewport,
            config,
        };
        if self.signature == Some(signature) {
            return Ok(());
        }

        let points: Vec<_> = offers
            .iter()
            .filter_map(|offer| projection.project(offer.terms()))
            .collect();

        let grid = DensityGrid::evaluate(&points, viewport, config)?;
        // Full replacement: contour topology can change arbitrarily, so the
        // previous geometry is never patched.
        self.bands = build_bands(&grid, config);
        self.signature = Some(signature);

        if self.faded_revision != Some(data_revision) {
            self.faded_revision = Some(data_revision);
            self.opacity = if config.fade_in_ms > 0.0 { 0.0 } else { 1.0 };
        }

        debug!(
            bands = self.bands.len(),
            points = points.len(),
            data_revision,
            "density overlay recomputed"
        );
        Ok(())
    }

    /// Steps the fade-in; a no-op once fully opaque.
    pub fn advance_frame(&mut self, delta_ms: f64, fade_in_ms: f64) {
        if self.opacity >= 1.0 || !delta_ms.is_finite() || delta_ms <= 0.0 {
            return;
        }
        if fade_in_ms <= 0.0 {
            self.opacity = 1.0;
            return;
        }
        self.opacity = (self.opacity + delta_ms / fade_in_ms).min(1.0);
    }

    #[must_use]
    pub fn bands(&self) -> &[ContourBand] {
        &self.bands
    }

    /// Current fade opacity multiplier applied to band fills.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    #[must_use]
    pub fn is_fading(&self) -> bool {
        !self.bands.is_empty() && self.opacity < 1.0
    }

    /// Drops all cached geometry; the next `ensure_current` recomputes.
    pub fn clear(&mut self) {
        self.bands.clear();
        self.signature = None;
    }
}

#[cfg(test)]
mod tests {
    use super::DensityCoordinator;
    use crate::core::{Offer, OfferDomain, ScatterProjection, Viewport};
    use crate::density::DensityConfig;

    fn fixture() -> (Vec<Offer>, OfferDomain, Viewport, ScatterProjection) {
        let offers = vec![
            Offer::new(40.0, 4.0, 0.0).expect("offer").with_id("a"),
            Offer::new(50.0, 5.0, 1.0).expect("offer").with_id("b"),
            Offer::new(55.0, 4.5, 2.0).expect("offer").with_id("c"),
        ];
        let domain = OfferDomain::new(0.0, 100.0, 0.0, 10.0).expect("domain");
        let viewport = Viewport::new(120, 120);
        let projection = ScatterProjection::new(domain, viewport).expect("projection");
        (offers, domain, viewport, projection)
    }

    #[test]
    fn unchanged_inputs_reuse_cached_bands() {
        let (offers, domain, viewport, projection) = fixture();
        let config = DensityConfig::default();
        let mut coordinator = DensityCoordinator::default();

        coordinator
            .ensure_current(true, &offers, &projection, 1, domain, viewport, config)
            .expect("first compute");
        let first = coordinator.bands().to_vec();

        coordinator
            .ensure_current(true, &offers, &projection, 1, domain, viewport, config)
            .expect("second pass");
        assert_eq!(coordinator.bands(), first.as_slice());
    }

    #[test]
    fn disabled_overlay_clears_geometry() {
        let (offers, domain, viewport, projection) = fixture();
        let config = DensityConfig::default();
        let mut coordinator = DensityCoordinator::default();

        coordinator
            .ensure_current(true, &offers, &projection, 1, domain, viewport, config)
            .expect("compute");
        assert!(!coordinator.bands().is_empty());

        coordinator
            .ensure_current(false, &offers, &projection, 1, domain, viewport, config)
            .expect("disable");
        assert!(coordinator.bands().is_empty());
    }

    #[test]
    fn fade_runs_once_per_data_revision() {
        let (offers, domain, viewport, projection) = fixture();
        let config = DensityConfig::default();
        let mut coordinator = DensityCoordinator::default();

        coordinator
            .ensure_current(true, &offers, &projection, 1, domain, viewport, config)
            .expect("compute");
        assert_eq!(coordinator.opacity(), 0.0);

        coordinator.advance_frame(config.fade_in_ms, config.fade_in_ms);
        assert_eq!(coordinator.opacity(), 1.0);

        // Same revision, different domain: recompute without re-fading.
        let wider = OfferDomain::new(0.0, 200.0, 0.0, 20.0).expect("domain");
        let wider_projection = ScatterProjection::new(wider, viewport).expect("projection");
        coordinator
            .ensure_current(true, &offers, &wider_projection, 1, wider, viewport, config)
            .expect("recompute");
        assert_eq!(coordinator.opacity(), 1.0);

        // New revision fades again.
        coordinator
            .ensure_current(true, &offers, &projection, 2, domain, viewport, config)
            .expect("new revision");
        assert_eq!(coordinator.opacity(), 0.0);
    }
}
