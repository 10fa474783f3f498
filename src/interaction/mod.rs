mod throttle;

pub mod expansion;

pub use expansion::{EdgeExpansionConfig, EdgeExpansionState, NearEdges, near_edges};
pub use throttle::{ManualClock, SystemClock, Throttle, ThrottleClock};

use serde::{Deserialize, Serialize};

use crate::core::{OfferKey, OfferTerms, PixelPoint};

/// Whether the user-offer marker is currently being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Ephemeral state for one marker drag, created on pointer-down and
/// destroyed on pointer-up.
///
/// The anchor fields are frozen at drag start; every pointer move derives
/// the live terms from the anchor plus the accumulated pixel delta, so a
/// drag never drifts even when the domain expands underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    pub anchor_pixel: PixelPoint,
    pub anchor_terms: OfferTerms,
    pub live_pixel: PixelPoint,
    pub live_terms: OfferTerms,
}

impl DragSession {
    #[must_use]
    pub fn begin(anchor_pixel: PixelPoint, anchor_terms: OfferTerms) -> Self {
        Self {
            anchor_pixel,
            anchor_terms,
            live_pixel: anchor_pixel,
            live_terms: anchor_terms,
        }
    }

    /// Pixel delta accumulated since drag start.
    #[must_use]
    pub fn pixel_delta(self) -> (f64, f64) {
        (
            self.live_pixel.x - self.anchor_pixel.x,
            self.live_pixel.y - self.anchor_pixel.y,
        )
    }
}

/// Pointer-over state for one market mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverState {
    pub key: OfferKey,
    pub pointer: PixelPoint,
}

/// Pointer interaction state owned by the engine.
///
/// At most one drag session exists at a time (single-pointer interaction
/// model); hovering is suppressed while dragging.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InteractionState {
    drag: Option<DragSession>,
    hover: Option<HoverState>,
    cursor: PixelPoint,
}

impl InteractionState {
    #[must_use]
    pub fn phase(&self) -> DragPhase {
        if self.drag.is_some() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.drag
    }

    #[must_use]
    pub fn hover(&self) -> Option<&HoverState> {
        self.hover.as_ref()
    }

    #[must_use]
    pub fn cursor(&self) -> PixelPoint {
        self.cursor
    }

    pub fn set_cursor(&mut self, pointer: PixelPoint) {
        self.cursor = pointer;
    }

    pub fn begin_drag(&mut self, session: DragSession) {
        self.hover = None;
        self.drag = Some(session);
    }

    /// Updates the live side of the active session; no-op when idle.
    pub fn update_drag(&mut self, live_pixel: PixelPoint, live_terms: OfferTerms) {
        if let Some(session) = self.drag.as_mut() {
            session.live_pixel = live_pixel;
            session.live_terms = live_terms;
        }
    }

    /// Ends the active drag and returns the final session, if any.
    pub fn end_drag(&mut self) -> Option<DragSession> {
        self.drag.take()
    }

    pub fn set_hover(&mut self, hover: Option<HoverState>) {
        if self.drag.is_none() {
            self.hover = hover;
        }
    }

    pub fn clear_hover(&mut self) {
        self.hover = None;
    }
}
