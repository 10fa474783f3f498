//! Engine facade: owns all chart state and drives every subsystem.

use std::mem;

use tracing::{debug, info};

use crate::api::config::OfferChartConfig;
use crate::api::density_coordinator::DensityCoordinator;
use crate::api::events::{ObserverContext, OfferChartEvent, OfferChartObserver};
use crate::api::format::{UnitValueFormatter, ValueFormatter};
use crate::api::hover::HoverTooltip;
use crate::api::invalidation::{InvalidationTopic, InvalidationTopics};
use crate::api::marks::MarkReconciler;
use crate::core::{canonicalize_offers, Offer, OfferDomain, OfferTerms, Viewport};
use crate::error::ChartResult;
use crate::interaction::{
    EdgeExpansionState, InteractionState, ManualClock, Throttle,
};
use crate::render::Renderer;

use super::drag_controller::DragTooltip;

/// Fallback domain used before any data arrives; replaced by the first fit.
const DEFAULT_PRINCIPAL_END: f64 = 10_000.0;
const DEFAULT_RATE_END: f64 = 25.0;

/// Interactive offer-comparison chart over a pluggable renderer.
///
/// The engine holds no timers and reads no wall clock: hosts drive all
/// recurring work (mark transitions, density fade-in, edge expansion,
/// live-update throttling) by calling [`OfferChartEngine::advance_frame`]
/// from their own frame tick, which keeps every session replayable.
pub struct OfferChartEngine<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: OfferChartConfig,
    pub(super) viewport: Viewport,
    pub(super) domain: OfferDomain,
    pub(super) offers: Vec<Offer>,
    pub(super) user_offer: Option<OfferTerms>,
    /// Bumped on every offer replacement; gates density recomputation.
    pub(super) data_revision: u64,
    pub(super) density_enabled: bool,
    pub(super) interaction: InteractionState,
    pub(super) marks: MarkReconciler,
    pub(super) density: DensityCoordinator,
    pub(super) expansion: EdgeExpansionState,
    pub(super) live_drag_throttle: Throttle,
    pub(super) clock: ManualClock,
    pub(super) hover_tooltip: Option<HoverTooltip>,
    pub(super) drag_tooltip: Option<DragTooltip>,
    pub(super) pending_invalidation: InvalidationTopics,
    /// "Now" used for relative age labels; tracks the newest offer
    /// timestamp until a host pins it explicitly.
    pub(super) reference_unix_seconds: f64,
    pub(super) reference_time_pinned: bool,
    pub(super) formatter: Box<dyn ValueFormatter>,
    pub(super) observers: Vec<Box<dyn OfferChartObserver>>,
}

impl<R: Renderer> OfferChartEngine<R> {
    /// Creates an engine from a validated configuration.
    ///
    /// The configured viewport may still be degenerate here; rendering is
    /// skipped until the first valid size is observed.
    pub fn new(renderer: R, config: OfferChartConfig) -> ChartResult<Self> {
        config.validate()?;
        let clock = ManualClock::new();
        let live_drag_throttle = Throttle::new(
            config.drag.live_update_interval_ms,
            Box::new(clock.clone()),
        )?;
        let domain = OfferDomain::new(0.0, DEFAULT_PRINCIPAL_END, 0.0, DEFAULT_RATE_END)?;
        let formatter: Box<dyn ValueFormatter> =
            Box::new(UnitValueFormatter::new(config.unit_label.clone()));

        info!(
            width = config.viewport.width,
            height = config.viewport.height,
            "offer chart engine created"
        );

        Ok(Self {
            renderer,
            viewport: config.viewport,
            density_enabled: config.show_density,
            domain,
            offers: Vec::new(),
            user_offer: None,
            data_revision: 0,
            interaction: InteractionState::default(),
            marks: MarkReconciler::default(),
            density: DensityCoordinator::default(),
            expansion: EdgeExpansionState::default(),
            live_drag_throttle,
            clock,
            hover_tooltip: None,
            drag_tooltip: None,
            pending_invalidation: InvalidationTopics::all(),
            reference_unix_seconds: 0.0,
            reference_time_pinned: false,
            formatter,
            observers: Vec::new(),
            config,
        })
    }

    /// Replaces the market offer set.
    ///
    /// Offers are canonicalized (deduplicated by key, newest observation
    /// wins) before storage. The domain is refitted around the new data
    /// unless a drag is in flight, in which case the expansion loop keeps
    /// ownership of the bounds until the drag ends.
    pub fn set_offers(&mut self, offers: Vec<Offer>) -> ChartResult<()> {
        self.offers = canonicalize_offers(offers);
        self.data_revision = self.data_revision.wrapping_add(1);
        self.pending_invalidation.insert(InvalidationTopic::Data);

        if !self.reference_time_pinned {
            self.reference_unix_seconds = self
                .offers
                .iter()
                .map(|offer| offer.age_timestamp)
                .fold(0.0_f64, f64::max);
        }

        debug!(
            offers = self.offers.len(),
            revision = self.data_revision,
            "offer set replaced"
        );

        if !self.interaction.is_dragging()
            && (!self.offers.is_empty() || self.user_offer.is_some())
        {
            self.fit_domain_to_offers()?;
        }
        self.emit_event(OfferChartEvent::OffersReplaced {
            offers_len: self.offers.len(),
        });
        Ok(())
    }

    pub fn offers(&self) -> &[Offer] {
        &self.offers
    }

    /// Places (or moves) the user's proposed offer marker.
    pub fn set_user_offer(&mut self, terms: OfferTerms) -> ChartResult<()> {
        self.user_offer = Some(terms);
        self.pending_invalidation.insert(InvalidationTopic::Data);
        if !self.domain.contains(terms) {
            self.fit_domain_to_offers()?;
        }
        Ok(())
    }

    pub fn clear_user_offer(&mut self) {
        self.user_offer = None;
        self.drag_tooltip = None;
        self.pending_invalidation.insert(InvalidationTopic::Data);
    }

    pub fn user_offer(&self) -> Option<OfferTerms> {
        self.user_offer
    }

    /// Refits the domain around the current offers plus the user offer.
    ///
    /// Emits [`OfferChartEvent::DomainChanged`] only when the bounds
    /// actually move.
    pub fn fit_domain_to_offers(&mut self) -> ChartResult<()> {
        let domain =
            OfferDomain::from_offers(&self.offers, self.user_offer, self.config.domain_tuning)?;
        if domain != self.domain {
            self.domain = domain;
            self.pending_invalidation.insert(InvalidationTopic::Domain);
            self.emit_event(OfferChartEvent::DomainChanged { domain });
        }
        Ok(())
    }

    /// Overwrites the domain with host-supplied bounds.
    pub fn set_domain(&mut self, domain: OfferDomain) {
        if domain == self.domain {
            return;
        }
        self.domain = domain;
        self.pending_invalidation.insert(InvalidationTopic::Domain);
        self.emit_event(OfferChartEvent::DomainChanged { domain });
    }

    pub fn domain(&self) -> OfferDomain {
        self.domain
    }

    /// Records a new surface size. A degenerate size is accepted and
    /// simply suspends rendering until a usable one arrives.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.config.viewport = viewport;
        self.pending_invalidation
            .insert(InvalidationTopic::Viewport);
        self.emit_event(OfferChartEvent::ViewportChanged { viewport });
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_density_enabled(&mut self, enabled: bool) {
        if enabled == self.density_enabled {
            return;
        }
        self.density_enabled = enabled;
        self.pending_invalidation.insert(InvalidationTopic::Density);
    }

    pub fn density_enabled(&self) -> bool {
        self.density_enabled
    }

    /// Swaps the display unit label, rebuilding the default formatter.
    pub fn set_unit_label(&mut self, unit_label: impl Into<String>) {
        let unit_label = unit_label.into();
        self.formatter = Box::new(UnitValueFormatter::new(unit_label.clone()));
        self.config.unit_label = unit_label;
        self.pending_invalidation.insert(InvalidationTopic::Style);
    }

    /// Replaces value formatting wholesale, for hosts with their own
    /// locale or currency rules.
    pub fn set_value_formatter(&mut self, formatter: Box<dyn ValueFormatter>) {
        self.formatter = formatter;
        self.pending_invalidation.insert(InvalidationTopic::Style);
    }

    pub(super) fn formatter(&self) -> &dyn ValueFormatter {
        self.formatter.as_ref()
    }

    /// Pins the reference instant used for relative age labels. Without
    /// this, "now" follows the newest offer timestamp.
    pub fn set_reference_time(&mut self, unix_seconds: f64) {
        if unix_seconds.is_finite() {
            self.reference_unix_seconds = unix_seconds;
            self.reference_time_pinned = true;
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn OfferChartObserver>) {
        self.observers.push(observer);
    }

    pub fn remove_observer(&mut self, id: &str) {
        self.observers.retain(|observer| observer.id() != id);
    }

    pub(super) fn emit_event(&mut self, event: OfferChartEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = ObserverContext {
            viewport: self.viewport,
            domain: self.domain,
            offers_len: self.offers.len(),
            user_offer: self.user_offer,
            drag_phase: self.interaction.phase(),
            density_enabled: self.density_enabled,
        };
        // Taken out so an observer panicking across a re-entrant borrow is
        // structurally impossible; observers registered during dispatch
        // are kept.
        let mut observers = mem::take(&mut self.observers);
        for observer in &mut observers {
            observer.on_event(event, context);
        }
        observers.append(&mut self.observers);
        self.observers = observers;
    }

    /// Advances every host-stepped process by `delta_ms`.
    ///
    /// This is the only place time passes: mark transitions, density
    /// fade-in, the throttle clock, and (while dragging) the edge
    /// expansion ticker all move here and nowhere else.
    pub fn advance_frame(&mut self, delta_ms: f64) -> ChartResult<()> {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return Ok(());
        }
        self.clock.advance_ms(delta_ms);
        self.marks.advance_frame(delta_ms);
        self.density
            .advance_frame(delta_ms, self.config.density.fade_in_ms);
        if self.marks.is_animating() || self.density.is_fading() {
            self.pending_invalidation.insert(InvalidationTopic::Style);
        }

        if let Some(session) = self.interaction.drag_session() {
            if self.expansion.is_armed() {
                let expanded = self.expansion.step(
                    delta_ms,
                    session.live_pixel,
                    self.viewport,
                    &mut self.domain,
                    self.config.expansion,
                )?;
                if !expanded.is_empty() {
                    debug!(edges = ?expanded, "domain expanded at plot edge");
                    self.pending_invalidation
                        .insert(InvalidationTopic::Domain);
                    self.emit_event(OfferChartEvent::DomainChanged {
                        domain: self.domain,
                    });
                }
            }
        }
        Ok(())
    }

    /// Draws one frame through the renderer.
    ///
    /// A no-op while the viewport is degenerate; an empty offer set still
    /// renders (reference lines and density simply stay absent).
    pub fn render(&mut self) -> ChartResult<()> {
        let Some(layered) = self.build_layered_frame()? else {
            return Ok(());
        };
        let frame = layered.flatten();
        self.renderer.render(&frame)?;
        self.pending_invalidation.take();
        self.emit_event(OfferChartEvent::Rendered);
        Ok(())
    }

    /// Topics accumulated since the last completed render.
    pub fn pending_invalidation(&self) -> InvalidationTopics {
        self.pending_invalidation
    }

    /// Drains and returns the accumulated topics, for hosts that schedule
    /// their own redraws instead of calling [`OfferChartEngine::render`]
    /// every tick.
    pub fn take_invalidation(&mut self) -> InvalidationTopics {
        self.pending_invalidation.take()
    }

    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    pub fn is_animating(&self) -> bool {
        self.marks.is_animating() || self.density.is_fading()
    }

    pub fn data_revision(&self) -> u64 {
        self.data_revision
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
