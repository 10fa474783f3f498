//! GTK4 host adapter.
//!
//! Maps GTK signal handlers one-to-one onto engine entry points; the
//! adapter itself holds no state beyond the engine.

use gtk4 as gtk;

use crate::api::OfferChartEngine;
use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::Renderer;

pub struct GtkChartAdapter<R: Renderer> {
    engine: OfferChartEngine<R>,
}

impl<R: Renderer> GtkChartAdapter<R> {
    #[must_use]
    pub fn new(engine: OfferChartEngine<R>) -> Self {
        let _ = std::mem::size_of::<gtk::DrawingArea>();
        Self { engine }
    }

    pub fn engine(&self) -> &OfferChartEngine<R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut OfferChartEngine<R> {
        &mut self.engine
    }

    /// `DrawingArea::connect_resize` handler. GTK reports signed extents;
    /// negative values collapse to a degenerate viewport, which suspends
    /// rendering rather than erroring.
    pub fn on_resize(&mut self, width: i32, height: i32) {
        let viewport = Viewport::new(width.max(0) as u32, height.max(0) as u32);
        self.engine.set_viewport(viewport);
    }

    /// `GestureClick::connect_pressed` handler. Returns `true` when the
    /// press started a marker drag.
    pub fn on_pointer_pressed(&mut self, x: f64, y: f64) -> ChartResult<bool> {
        self.engine.pointer_down(x, y)
    }

    /// `EventControllerMotion::connect_motion` handler.
    pub fn on_pointer_motion(&mut self, x: f64, y: f64) -> ChartResult<()> {
        self.engine.pointer_move(x, y)
    }

    /// `GestureClick::connect_released` handler.
    pub fn on_pointer_released(&mut self) {
        self.engine.pointer_up();
    }

    /// `EventControllerMotion::connect_leave` handler.
    pub fn on_pointer_leave(&mut self) {
        self.engine.pointer_leave();
    }

    /// `WidgetExt::add_tick_callback` handler; `delta_ms` is the elapsed
    /// time since the previous frame clock tick.
    pub fn on_tick(&mut self, delta_ms: f64) -> ChartResult<()> {
        self.engine.advance_frame(delta_ms)
    }

    pub fn into_engine(self) -> OfferChartEngine<R> {
        self.engine
    }
}
