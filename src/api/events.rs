use serde::{Deserialize, Serialize};

use crate::core::{OfferDomain, OfferTerms, Viewport};
use crate::interaction::DragPhase;

/// Throttled in-drag notification.
///
/// Carries the *unclamped* data-space terms: pixel clamping applied for
/// rendering never truncates the candidate offer reported outward. Pixel
/// fields and surface extents are included so hosts can run their own
/// edge-proximity logic.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveDragUpdate {
    pub principal: f64,
    pub rate: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub surface_width: u32,
    pub surface_height: u32,
    pub dragging: bool,
}

/// Final, unthrottled end-of-drag notification; exactly one per drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragCommit {
    pub principal: f64,
    pub rate: f64,
}

/// Event stream exposed to chart observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OfferChartEvent {
    /// Throttled; emitted only while a drag session is active.
    LiveDrag(LiveDragUpdate),
    /// Unconditional; never dropped by throttling.
    DragCommitted(DragCommit),
    /// The domain changed through auto-expansion, a fit, or a host overwrite.
    DomainChanged { domain: OfferDomain },
    OffersReplaced { offers_len: usize },
    ViewportChanged { viewport: Viewport },
    Rendered,
}

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverContext {
    pub viewport: Viewport,
    pub domain: OfferDomain,
    pub offers_len: usize,
    pub user_offer: Option<OfferTerms>,
    pub drag_phase: DragPhase,
    pub density_enabled: bool,
}

/// Extension hook interface for bounded host logic.
///
/// Observers see events and read engine context without mutating core
/// internals directly; the host reacting to `LiveDrag` by persisting a
/// candidate offer or overwriting the domain happens between events.
pub trait OfferChartObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: OfferChartEvent, context: ObserverContext);
}
