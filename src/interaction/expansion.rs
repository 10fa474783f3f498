//! Edge-triggered domain auto-expansion.
//!
//! While a drag session is active and the pointer sits near a plot edge, the
//! engine periodically nudges the corresponding domain bound outward so the
//! dragged marker is never clipped by the current view. The loop is armed on
//! drag start, disarmed on drag end, and stepped deterministically through
//! the engine's `advance_frame`, so nothing fires while idle and nothing
//! leaks after teardown.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{OfferDomain, PixelPoint, PlotEdge, ScatterProjection, Viewport};
use crate::error::{ChartError, ChartResult};

/// Tuning for the expansion ticker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeExpansionConfig {
    /// Interval between expansion checks while dragging.
    pub tick_interval_ms: f64,
    /// Edge proximity that triggers expansion, as a fraction of the surface
    /// extent on that axis.
    pub edge_threshold_ratio: f64,
    /// Outward nudge per tick, in pixels, converted to data units through
    /// the current per-pixel scale.
    pub step_px: f64,
    /// Floor for each axis span, as a fraction of the span captured when the
    /// loop was armed. Guards against feedback that could collapse the
    /// domain under repeated inward adjustment.
    pub min_span_ratio: f64,
}

impl Default for EdgeExpansionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 40.0,
            edge_threshold_ratio: 0.08,
            step_px: 8.0,
            min_span_ratio: 0.25,
        }
    }
}

impl EdgeExpansionConfig {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.tick_interval_ms.is_finite() || self.tick_interval_ms <= 0.0 {
            return Err(ChartError::InvalidData(
                "expansion tick interval must be finite and > 0".to_owned(),
            ));
        }
        if !self.edge_threshold_ratio.is_finite() || !(0.0..0.5).contains(&self.edge_threshold_ratio)
        {
            return Err(ChartError::InvalidData(
                "expansion edge threshold ratio must be in [0, 0.5)".to_owned(),
            ));
        }
        if !self.step_px.is_finite() || self.step_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "expansion step must be finite and > 0 pixels".to_owned(),
            ));
        }
        if !self.min_span_ratio.is_finite() || !(0.0..=1.0).contains(&self.min_span_ratio) {
            return Err(ChartError::InvalidData(
                "expansion min span ratio must be in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Plot edges the pointer is currently near; more than one can trigger in
/// the same tick (surface corners).
pub type NearEdges = SmallVec<[PlotEdge; 4]>;

/// Returns every edge within the threshold fraction of the surface extent.
#[must_use]
pub fn near_edges(pixel: PixelPoint, viewport: Viewport, threshold_ratio: f64) -> NearEdges {
    let mut edges = NearEdges::new();
    if !viewport.is_valid() || !pixel.is_finite() {
        return edges;
    }

    let width = viewport.width_f64();
    let height = viewport.height_f64();
    let x_threshold = width * threshold_ratio;
    let y_threshold = height * threshold_ratio;

    if pixel.x <= x_threshold {
        edges.push(PlotEdge::Left);
    }
    if pixel.x >= width - x_threshold {
        edges.push(PlotEdge::Right);
    }
    if pixel.y <= y_threshold {
        edges.push(PlotEdge::Top);
    }
    if pixel.y >= height - y_threshold {
        edges.push(PlotEdge::Bottom);
    }
    edges
}

/// Runtime state of the expansion loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EdgeExpansionState {
    armed: bool,
    elapsed_since_tick_ms: f64,
    /// Axis spans captured when the loop was armed; span floors are derived
    /// from these, not from the live (growing) spans.
    anchor_principal_span: f64,
    anchor_rate_span: f64,
}

impl EdgeExpansionState {
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Arms the loop at drag start, capturing the current axis spans.
    pub fn arm(&mut self, domain: OfferDomain) {
        self.armed = true;
        self.elapsed_since_tick_ms = 0.0;
        self.anchor_principal_span = domain.principal_span();
        self.anchor_rate_span = domain.rate_span();
    }

    /// Disarms the loop at drag end or teardown.
    pub fn disarm(&mut self) {
        self.armed = false;
        self.elapsed_since_tick_ms = 0.0;
    }

    /// Advances the ticker and applies any due expansion to `domain`.
    ///
    /// Returns the edges expanded during this step (possibly across several
    /// elapsed ticks). Does nothing while disarmed.
    pub fn step(
        &mut self,
        delta_ms: f64,
        last_drag_pixel: PixelPoint,
        viewport: Viewport,
        domain: &mut OfferDomain,
        config: EdgeExpansionConfig,
    ) -> ChartResult<NearEdges> {
        let mut expanded = NearEdges::new();
        if !self.armed || !delta_ms.is_finite() || delta_ms <= 0.0 {
            return Ok(expanded);
        }

        let principal_floor = (self.anchor_principal_span * config.min_span_ratio)
            .max(f64::MIN_POSITIVE);
        let rate_floor = (self.anchor_rate_span * config.min_span_ratio).max(f64::MIN_POSITIVE);

        self.elapsed_since_tick_ms += delta_ms;
        while self.elapsed_since_tick_ms >= config.tick_interval_ms {
            self.elapsed_since_tick_ms -= config.tick_interval_ms;

            let edges = near_edges(last_drag_pixel, viewport, config.edge_threshold_ratio);
            if edges.is_empty() {
                continue;
            }
            // Rebuilt per tick: an earlier tick in the same step may have
            // grown the domain, and each nudge converts through the scale
            // that growth produced.
            let projection = ScatterProjection::new(*domain, viewport)?;

            for edge in edges {
                let (delta, floor) = match edge {
                    PlotEdge::Left | PlotEdge::Right => (
                        config.step_px * projection.principal_per_pixel(),
                        principal_floor,
                    ),
                    PlotEdge::Top | PlotEdge::Bottom => {
                        (config.step_px * projection.rate_per_pixel(), rate_floor)
                    }
                };
                domain.adjust_edge(edge, delta, floor)?;
                if !expanded.contains(&edge) {
                    expanded.push(edge);
                }
            }
        }

        Ok(expanded)
    }
}
