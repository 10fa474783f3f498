//! Public engine API.
//!
//! The [`OfferChartEngine`] facade is one struct whose behavior is split
//! across focused impl files: pointer handling in `drag_controller` and
//! `hover`, scene assembly in `frame_builder`, persistence in `snapshot`,
//! and everything stateful in `engine`.

mod config;
mod density_coordinator;
mod drag_controller;
mod engine;
mod events;
mod format;
mod frame_builder;
mod hover;
mod invalidation;
mod marks;
mod reference_lines;
mod snapshot;

pub use config::{DragTuning, MarkStyle, MarkerStyle, OfferChartConfig, ReferenceStyle};
pub use density_coordinator::DensityCoordinator;
pub use drag_controller::DragTooltip;
pub use engine::OfferChartEngine;
pub use events::{
    DragCommit, LiveDragUpdate, ObserverContext, OfferChartEvent, OfferChartObserver,
};
pub use format::{relative_age_label, UnitValueFormatter, ValueFormatter};
pub use hover::HoverTooltip;
pub use invalidation::{InvalidationTopic, InvalidationTopics};
pub use marks::{age_color_parameter, MarkPhase, MarkReconciler, MarkVisual, MarketMark};
pub use reference_lines::{resolve_reference_layout, ReferenceLabel, ReferenceLayout};
pub use snapshot::ChartSnapshot;
