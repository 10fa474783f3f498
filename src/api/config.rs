use serde::{Deserialize, Serialize};

use crate::core::{DomainTuning, Viewport};
use crate::density::DensityConfig;
use crate::error::{ChartError, ChartResult};
use crate::interaction::EdgeExpansionConfig;
use crate::render::Color;

/// Visual tuning for market point marks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkStyle {
    pub radius_px: f64,
    /// Grow-in duration for newly entered marks.
    pub enter_duration_ms: f64,
    /// Shrink-out duration for removed marks.
    pub exit_duration_ms: f64,
    /// Position/color transition duration for updated marks.
    pub update_duration_ms: f64,
    /// Color at the oldest observed timestamp.
    pub old_color: Color,
    /// Color at the newest observed timestamp.
    pub new_color: Color,
}

impl Default for MarkStyle {
    fn default() -> Self {
        Self {
            radius_px: 4.0,
            enter_duration_ms: 300.0,
            exit_duration_ms: 200.0,
            update_duration_ms: 200.0,
            old_color: Color::rgba(0.55, 0.60, 0.72, 0.55),
            new_color: Color::rgba(0.16, 0.45, 0.90, 0.90),
        }
    }
}

impl MarkStyle {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.radius_px.is_finite() || self.radius_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "mark radius must be finite and > 0".to_owned(),
            ));
        }
        for (value, name) in [
            (self.enter_duration_ms, "enter_duration_ms"),
            (self.exit_duration_ms, "exit_duration_ms"),
            (self.update_duration_ms, "update_duration_ms"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "mark `{name}` must be finite and >= 0"
                )));
            }
        }
        self.old_color.validate()?;
        self.new_color.validate()?;
        Ok(self)
    }
}

/// Visual tuning for the user-offer marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub radius_px: f64,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
    /// Label shown above the marker while idle; suppressed during a drag.
    pub idle_label: String,
    pub font_size_px: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            radius_px: 7.0,
            fill_color: Color::rgba(0.95, 0.55, 0.10, 0.95),
            stroke_color: Color::rgb(1.0, 1.0, 1.0),
            stroke_width: 2.0,
            idle_label: "Your Offer".to_owned(),
            font_size_px: 11.0,
        }
    }
}

impl MarkerStyle {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.radius_px.is_finite() || self.radius_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker radius must be finite and > 0".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(ChartError::InvalidData(
                "marker stroke width must be finite and >= 0".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "marker font size must be finite and > 0".to_owned(),
            ));
        }
        self.fill_color.validate()?;
        self.stroke_color.validate()
    }
}

/// Visual tuning for median reference lines and their annotations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStyle {
    pub line_color: Color,
    pub line_width: f64,
    pub dash_px: f64,
    pub gap_px: f64,
    pub font_size_px: f64,
    /// Distance between a reference line and its annotation.
    pub label_inset_px: f64,
}

impl Default for ReferenceStyle {
    fn default() -> Self {
        Self {
            line_color: Color::rgba(0.35, 0.38, 0.45, 0.8),
            line_width: 1.0,
            dash_px: 5.0,
            gap_px: 4.0,
            font_size_px: 10.0,
            label_inset_px: 6.0,
        }
    }
}

impl ReferenceStyle {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.line_width, "line_width"),
            (self.dash_px, "dash_px"),
            (self.gap_px, "gap_px"),
            (self.font_size_px, "font_size_px"),
            (self.label_inset_px, "label_inset_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "reference `{name}` must be finite and > 0"
                )));
            }
        }
        self.line_color.validate()?;
        Ok(self)
    }
}

/// Tuning for the drag controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragTuning {
    /// Pointer-down within this distance of the marker starts a drag.
    pub hit_radius_px: f64,
    /// Pointer-over within this distance of a mark shows its tooltip.
    pub hover_radius_px: f64,
    /// Minimum interval between outbound live-drag notifications. Local
    /// visual feedback is never throttled.
    pub live_update_interval_ms: f64,
    /// Tooltip offset from the pointer, in pixels.
    pub tooltip_offset_px: f64,
}

impl Default for DragTuning {
    fn default() -> Self {
        Self {
            hit_radius_px: 14.0,
            hover_radius_px: 8.0,
            live_update_interval_ms: 80.0,
            tooltip_offset_px: 12.0,
        }
    }
}

impl DragTuning {
    pub fn validate(self) -> ChartResult<Self> {
        for (value, name) in [
            (self.hit_radius_px, "hit_radius_px"),
            (self.hover_radius_px, "hover_radius_px"),
            (self.tooltip_offset_px, "tooltip_offset_px"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "drag `{name}` must be finite and > 0"
                )));
            }
        }
        if !self.live_update_interval_ms.is_finite() || self.live_update_interval_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "drag live update interval must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Aggregated engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferChartConfig {
    pub viewport: Viewport,
    pub domain_tuning: DomainTuning,
    pub mark_style: MarkStyle,
    pub marker_style: MarkerStyle,
    pub reference_style: ReferenceStyle,
    pub drag: DragTuning,
    pub expansion: EdgeExpansionConfig,
    pub density: DensityConfig,
    /// Display-only unit label for principal values (e.g. a currency code).
    pub unit_label: String,
    pub show_density: bool,
}

impl OfferChartConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            domain_tuning: DomainTuning::default(),
            mark_style: MarkStyle::default(),
            marker_style: MarkerStyle::default(),
            reference_style: ReferenceStyle::default(),
            drag: DragTuning::default(),
            expansion: EdgeExpansionConfig::default(),
            density: DensityConfig::default(),
            unit_label: String::new(),
            show_density: true,
        }
    }

    #[must_use]
    pub fn with_unit_label(mut self, unit_label: impl Into<String>) -> Self {
        self.unit_label = unit_label.into();
        self
    }

    #[must_use]
    pub fn with_density(mut self, density: DensityConfig) -> Self {
        self.density = density;
        self
    }

    #[must_use]
    pub fn with_density_enabled(mut self, show_density: bool) -> Self {
        self.show_density = show_density;
        self
    }

    #[must_use]
    pub fn with_domain_tuning(mut self, domain_tuning: DomainTuning) -> Self {
        self.domain_tuning = domain_tuning;
        self
    }

    #[must_use]
    pub fn with_mark_style(mut self, mark_style: MarkStyle) -> Self {
        self.mark_style = mark_style;
        self
    }

    #[must_use]
    pub fn with_marker_style(mut self, marker_style: MarkerStyle) -> Self {
        self.marker_style = marker_style;
        self
    }

    #[must_use]
    pub fn with_drag_tuning(mut self, drag: DragTuning) -> Self {
        self.drag = drag;
        self
    }

    #[must_use]
    pub fn with_expansion(mut self, expansion: EdgeExpansionConfig) -> Self {
        self.expansion = expansion;
        self
    }

    /// Validates every sub-config; the viewport may be degenerate here (a
    /// host can construct the engine before its first resize observation).
    pub fn validate(&self) -> ChartResult<()> {
        self.domain_tuning.validate()?;
        self.mark_style.validate()?;
        self.marker_style.validate()?;
        self.reference_style.validate()?;
        self.drag.validate()?;
        self.expansion.validate()?;
        self.density.validate()?;
        Ok(())
    }
}
