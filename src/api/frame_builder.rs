//! Composes the layered scene for one draw pass.

use crate::api::engine::OfferChartEngine;
use crate::core::{MarketMedians, PixelPoint, ScatterProjection, market_medians};
use crate::error::ChartResult;
use crate::render::{
    ChartLayerKind, CirclePrimitive, Color, LayeredRenderFrame, LinePrimitive, PolygonPrimitive,
    RectPrimitive, Renderer, TextHAlign, TextPrimitive,
};

use super::reference_lines::{push_reference_layer, resolve_reference_layout};

const TOOLTIP_FONT_PX: f64 = 10.0;
const TOOLTIP_LINE_HEIGHT_PX: f64 = 14.0;
const TOOLTIP_PADDING_PX: f64 = 6.0;
/// Rough per-character advance used to size tooltip backgrounds without a
/// text-measurement backend.
const TOOLTIP_CHAR_WIDTH_PX: f64 = 6.0;

impl<R: Renderer> OfferChartEngine<R> {
    /// Builds the full layered scene, or `None` while geometry is
    /// degenerate (zero-size surface, unusable domain). Skipping is the
    /// error-handling contract: the chart recovers automatically on the
    /// next valid observation.
    pub fn build_layered_frame(&mut self) -> ChartResult<Option<LayeredRenderFrame>> {
        if !self.viewport.is_valid() {
            return Ok(None);
        }
        let Some(projection) = self.projection() else {
            return Ok(None);
        };

        let dragging = self.interaction.is_dragging();
        self.marks
            .reconcile(&self.offers, &projection, dragging, self.config.mark_style);
        self.density.ensure_current(
            self.density_enabled,
            &self.offers,
            &projection,
            self.data_revision,
            self.domain,
            self.viewport,
            self.config.density,
        )?;

        let mut frame = LayeredRenderFrame::new(self.viewport);
        self.push_density_layer(&mut frame);
        self.push_marks_layer(&mut frame);
        let medians = market_medians(&self.offers);
        self.push_reference_layer(&mut frame, &projection, medians)?;
        self.push_marker_layer(&mut frame, &projection);
        self.push_overlay_layer(&mut frame, &projection, medians);

        Ok(Some(frame))
    }

    fn push_density_layer(&self, frame: &mut LayeredRenderFrame) {
        let opacity = self.density.opacity();
        for band in self.density.bands() {
            let fill = band.fill.with_alpha(band.fill.alpha * opacity);
            frame.push_polygon(
                ChartLayerKind::Density,
                PolygonPrimitive::new(band.rings.clone(), fill),
            );
        }
    }

    fn push_marks_layer(&self, frame: &mut LayeredRenderFrame) {
        for mark in self.marks.iter() {
            let visual = mark.visual();
            if visual.radius <= 0.0 {
                continue;
            }
            frame.push_circle(
                ChartLayerKind::Marks,
                CirclePrimitive::filled(visual.x, visual.y, visual.radius, visual.color),
            );
        }
    }

    fn push_reference_layer(
        &self,
        frame: &mut LayeredRenderFrame,
        projection: &ScatterProjection,
        medians: Option<MarketMedians>,
    ) -> ChartResult<()> {
        let Some(medians) = medians else {
            return Ok(());
        };
        let layout = resolve_reference_layout(
            medians,
            projection,
            self.viewport,
            self.config.reference_style,
            self.formatter(),
        )?;
        if let Some(layout) = layout {
            push_reference_layer(frame, &layout, self.viewport, self.config.reference_style);
        }
        Ok(())
    }

    fn push_marker_layer(&self, frame: &mut LayeredRenderFrame, projection: &ScatterProjection) {
        let Some(user_offer) = self.user_offer else {
            return;
        };
        let Some(pixel) = projection.project(user_offer) else {
            return;
        };
        // Clamped for drawing only; the data value reported outward is
        // never truncated at the view edge.
        let pixel = pixel.clamped_to(self.viewport);

        let style = &self.config.marker_style;
        frame.push_circle(
            ChartLayerKind::Marker,
            CirclePrimitive::filled(pixel.x, pixel.y, style.radius_px, style.fill_color)
                .with_stroke(style.stroke_width, style.stroke_color),
        );

        // The idle label is suppressed while dragging; the drag tooltip
        // takes over.
        if !self.interaction.is_dragging() && !style.idle_label.is_empty() {
            frame.push_text(
                ChartLayerKind::Marker,
                TextPrimitive::new(
                    style.idle_label.clone(),
                    pixel.x,
                    (pixel.y - style.radius_px - style.font_size_px - 4.0).max(0.0),
                    style.font_size_px,
                    style.fill_color,
                    TextHAlign::Center,
                ),
            );
        }
    }

    fn push_overlay_layer(
        &self,
        frame: &mut LayeredRenderFrame,
        projection: &ScatterProjection,
        medians: Option<MarketMedians>,
    ) {
        if let Some(session) = self.interaction.drag_session() {
            let Some(pixel) = projection.project(session.live_terms) else {
                return;
            };
            let pixel = pixel.clamped_to(self.viewport);
            self.push_drag_crosshair(frame, pixel);
            if let Some(medians) = medians {
                self.push_median_diff_badges(frame, pixel, session.live_terms, medians);
            }
            if let Some(tooltip) = &self.drag_tooltip {
                let lines = [tooltip.principal_text.clone(), tooltip.rate_text.clone()];
                self.push_tooltip_box(frame, tooltip.position, &lines);
            }
        } else if let Some(tooltip) = &self.hover_tooltip {
            self.push_tooltip_box(frame, tooltip.position, &tooltip.lines);
        }
    }

    fn push_drag_crosshair(&self, frame: &mut LayeredRenderFrame, pixel: PixelPoint) {
        let style = self.config.reference_style;
        let width = self.viewport.width_f64();
        let height = self.viewport.height_f64();
        let color = self.config.marker_style.fill_color.with_alpha(0.6);

        frame.push_line(
            ChartLayerKind::Overlay,
            LinePrimitive::new(pixel.x, 0.0, pixel.x, height, 1.0, color)
                .dashed(style.dash_px, style.gap_px),
        );
        frame.push_line(
            ChartLayerKind::Overlay,
            LinePrimitive::new(0.0, pixel.y, width, pixel.y, 1.0, color)
                .dashed(style.dash_px, style.gap_px),
        );
    }

    /// Signed diff-from-median badges for both axes, flipped to whichever
    /// side keeps them inside the plot and off the crosshair.
    fn push_median_diff_badges(
        &self,
        frame: &mut LayeredRenderFrame,
        pixel: PixelPoint,
        live_terms: crate::core::OfferTerms,
        medians: MarketMedians,
    ) {
        let width = self.viewport.width_f64();
        let height = self.viewport.height_f64();
        let inset = self.config.reference_style.label_inset_px;
        let font = self.config.reference_style.font_size_px;
        let color = self.config.marker_style.fill_color;
        let formatter = self.formatter();

        let principal_diff = live_terms.principal - medians.principal;
        let principal_text = if principal_diff >= 0.0 {
            format!("+{} above median", formatter.principal(principal_diff))
        } else {
            format!("-{} below median", formatter.principal(principal_diff.abs()))
        };
        let (principal_x, principal_align) = if pixel.x <= width / 2.0 {
            (pixel.x + inset, TextHAlign::Left)
        } else {
            (pixel.x - inset, TextHAlign::Right)
        };
        frame.push_text(
            ChartLayerKind::Overlay,
            TextPrimitive::new(
                principal_text,
                principal_x,
                (height - inset - font).max(0.0),
                font,
                color,
                principal_align,
            ),
        );

        let rate_diff = live_terms.rate - medians.rate;
        let rate_text = if rate_diff >= 0.0 {
            format!("+{} above median", formatter.rate(rate_diff))
        } else {
            format!("-{} below median", formatter.rate(rate_diff.abs()))
        };
        let rate_y = if pixel.y <= height / 2.0 {
            pixel.y + inset + font
        } else {
            pixel.y - inset - font
        };
        let (rate_x, rate_align) = if pixel.x <= width / 2.0 {
            (width - inset, TextHAlign::Right)
        } else {
            (inset, TextHAlign::Left)
        };
        frame.push_text(
            ChartLayerKind::Overlay,
            TextPrimitive::new(rate_text, rate_x, rate_y, font, color, rate_align),
        );
    }

    fn push_tooltip_box(
        &self,
        frame: &mut LayeredRenderFrame,
        position: PixelPoint,
        lines: &[String],
    ) {
        if lines.is_empty() {
            return;
        }
        let longest = lines.iter().map(String::len).max().unwrap_or(0) as f64;
        let box_width = longest * TOOLTIP_CHAR_WIDTH_PX + TOOLTIP_PADDING_PX * 2.0;
        let box_height = lines.len() as f64 * TOOLTIP_LINE_HEIGHT_PX + TOOLTIP_PADDING_PX * 2.0;

        // Keep the whole box on-surface.
        let x = position
            .x
            .min(self.viewport.width_f64() - box_width)
            .max(0.0);
        let y = position
            .y
            .min(self.viewport.height_f64() - box_height)
            .max(0.0);

        frame.push_rect(
            ChartLayerKind::Overlay,
            RectPrimitive::filled(x, y, box_width, box_height, Color::rgba(0.10, 0.12, 0.16, 0.9))
                .with_corner_radius(3.0),
        );
        for (index, line) in lines.iter().filter(|line| !line.is_empty()).enumerate() {
            frame.push_text(
                ChartLayerKind::Overlay,
                TextPrimitive::new(
                    line.clone(),
                    x + TOOLTIP_PADDING_PX,
                    y + TOOLTIP_PADDING_PX + index as f64 * TOOLTIP_LINE_HEIGHT_PX,
                    TOOLTIP_FONT_PX,
                    Color::rgb(0.95, 0.95, 0.95),
                    TextHAlign::Left,
                ),
            );
        }
    }
}
