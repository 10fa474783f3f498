//! offerchart-rs: interactive offer-market scatter chart engine.
//!
//! This crate provides a Rust-idiomatic core for comparing a proposed loan
//! offer against a market of existing offers: a principal × rate point cloud,
//! a kernel-density contour overlay, median reference lines, and a draggable
//! "your offer" marker with edge-triggered domain auto-expansion.

pub mod api;
pub mod core;
pub mod density;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{OfferChartConfig, OfferChartEngine};
pub use error::{ChartError, ChartResult};
