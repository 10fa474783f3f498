//! User-offer marker drag state machine.
//!
//! Idle → pointer-down on the marker → Dragging → pointer-up → Idle. Local
//! visuals (marker position, crosshairs, drag tooltip) update synchronously
//! on every pointer event; outbound `LiveDrag` notifications go through the
//! throttle so downstream work is rate-limited. The final commit is a
//! distinct unconditional emission that throttling can never drop.

use tracing::debug;

use crate::api::engine::OfferChartEngine;
use crate::api::events::{DragCommit, LiveDragUpdate, OfferChartEvent};
use crate::api::invalidation::InvalidationTopic;
use crate::core::{OfferTerms, PixelPoint, ScatterProjection};
use crate::error::ChartResult;
use crate::interaction::DragSession;
use crate::render::Renderer;

/// Floating tooltip tracking the marker while dragging.
#[derive(Debug, Clone, PartialEq)]
pub struct DragTooltip {
    pub position: PixelPoint,
    pub principal_text: String,
    pub rate_text: String,
}

impl<R: Renderer> OfferChartEngine<R> {
    /// Pointer-down: starts a drag when the pointer hits the user-offer
    /// marker. Returns whether a drag session began.
    ///
    /// The anchor is the pointer position itself (not the marker center),
    /// so the marker never jumps under the finger on drag start.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        let pointer = PixelPoint::new(x, y);
        if !pointer.is_finite() || self.interaction.is_dragging() {
            return Ok(false);
        }
        let Some(user_offer) = self.user_offer else {
            return Ok(false);
        };
        let Some(projection) = self.projection() else {
            return Ok(false);
        };
        let Some(marker_pixel) = projection.project(user_offer) else {
            return Ok(false);
        };

        let distance = (marker_pixel.x - x).hypot(marker_pixel.y - y);
        if distance > self.config.drag.hit_radius_px {
            return Ok(false);
        }

        let anchor_terms = projection.unproject(pointer)?;
        self.interaction
            .begin_drag(DragSession::begin(pointer, anchor_terms));
        self.hover_tooltip = None;
        self.expansion.arm(self.domain);
        self.live_drag_throttle.reset();
        self.drag_tooltip = Some(self.build_drag_tooltip(pointer, user_offer));
        self.pending_invalidation.insert(InvalidationTopic::Cursor);

        debug!(x, y, "drag started");
        Ok(true)
    }

    /// Pointer movement: drives the drag when a session is active,
    /// otherwise the hover tooltip.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> ChartResult<()> {
        let pointer = PixelPoint::new(x, y);
        if !pointer.is_finite() {
            return Ok(());
        }
        self.interaction.set_cursor(pointer);

        let Some(session) = self.interaction.drag_session() else {
            self.update_hover(pointer);
            return Ok(());
        };

        // The mapper is rebuilt fresh on every move: the domain may be
        // expanding concurrently under the auto-expansion loop.
        let Some(projection) = self.projection() else {
            return Ok(());
        };

        let delta_x = x - session.anchor_pixel.x;
        let delta_y = y - session.anchor_pixel.y;
        // Rate axis is inverted: dragging upward increases the rate.
        let live_terms = OfferTerms {
            principal: session.anchor_terms.principal + delta_x * projection.principal_per_pixel(),
            rate: session.anchor_terms.rate - delta_y * projection.rate_per_pixel(),
        };

        self.interaction.update_drag(pointer, live_terms);
        // The marker and everything reading the user offer follow the
        // unclamped data value; only pixel positions are clamped at draw
        // time.
        self.user_offer = Some(live_terms);
        self.drag_tooltip = Some(self.build_drag_tooltip(pointer, live_terms));
        self.pending_invalidation.insert(InvalidationTopic::Cursor);

        if self.live_drag_throttle.try_emit() {
            self.emit_event(OfferChartEvent::LiveDrag(LiveDragUpdate {
                principal: live_terms.principal,
                rate: live_terms.rate,
                pixel_x: x,
                pixel_y: y,
                surface_width: self.viewport.width,
                surface_height: self.viewport.height,
                dragging: true,
            }));
        }
        Ok(())
    }

    /// Pointer-up: ends the drag and emits exactly one unthrottled commit.
    pub fn pointer_up(&mut self) {
        let Some(session) = self.interaction.end_drag() else {
            return;
        };
        self.expansion.disarm();
        self.drag_tooltip = None;
        self.live_drag_throttle.cancel();
        self.pending_invalidation.insert(InvalidationTopic::Cursor);

        debug!(
            principal = session.live_terms.principal,
            rate = session.live_terms.rate,
            "drag committed"
        );
        self.emit_event(OfferChartEvent::DragCommitted(DragCommit {
            principal: session.live_terms.principal,
            rate: session.live_terms.rate,
        }));
    }

    /// Teardown path: releases every drag resource without emitting.
    ///
    /// Used when the chart is being dismantled mid-drag; the expansion
    /// ticker, tooltips, and throttle state are all dropped so nothing
    /// fires afterwards.
    pub fn cancel_drag(&mut self) {
        if self.interaction.end_drag().is_some() {
            debug!("drag cancelled");
        }
        self.expansion.disarm();
        self.drag_tooltip = None;
        self.hover_tooltip = None;
        self.live_drag_throttle.cancel();
    }

    #[must_use]
    pub fn drag_tooltip(&self) -> Option<&DragTooltip> {
        self.drag_tooltip.as_ref()
    }

    pub(super) fn build_drag_tooltip(
        &self,
        pointer: PixelPoint,
        terms: OfferTerms,
    ) -> DragTooltip {
        let offset = self.config.drag.tooltip_offset_px;
        let formatter = self.formatter();
        DragTooltip {
            position: PixelPoint::new(pointer.x + offset, pointer.y - offset),
            principal_text: formatter.principal(terms.principal),
            rate_text: formatter.rate(terms.rate),
        }
    }

    /// Current projection, or `None` while geometry is degenerate.
    #[must_use]
    pub(super) fn projection(&self) -> Option<ScatterProjection> {
        ScatterProjection::new(self.domain, self.viewport).ok()
    }
}
