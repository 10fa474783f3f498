//! Median reference lines and their flipped annotations.

use crate::api::ReferenceStyle;
use crate::api::format::ValueFormatter;
use crate::core::{MarketMedians, ScatterProjection, Viewport};
use crate::error::ChartResult;
use crate::render::{ChartLayerKind, LayeredRenderFrame, LinePrimitive, TextHAlign, TextPrimitive};

/// Resolved placement for one reference annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub h_align: TextHAlign,
}

/// Resolved geometry for both median guides.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLayout {
    /// x position of the vertical median-principal line.
    pub principal_x: f64,
    /// y position of the horizontal median-rate line.
    pub rate_y: f64,
    pub principal_label: ReferenceLabel,
    pub rate_label: ReferenceLabel,
}

/// Computes line positions and label placement, flipping each annotation to
/// the side that keeps it inside the plot.
///
/// Returns `None` when either projected position is off-scale non-finite;
/// callers simply skip the layer.
pub fn resolve_reference_layout(
    medians: MarketMedians,
    projection: &ScatterProjection,
    viewport: Viewport,
    style: ReferenceStyle,
    formatter: &dyn ValueFormatter,
) -> ChartResult<Option<ReferenceLayout>> {
    let principal_x = projection.principal_to_pixel(medians.principal)?;
    let rate_y = projection.rate_to_pixel(medians.rate)?;
    if !principal_x.is_finite() || !rate_y.is_finite() {
        return Ok(None);
    }

    let width = viewport.width_f64();
    let height = viewport.height_f64();
    let inset = style.label_inset_px;

    // Vertical line: label sits beside the line, switching anchor side at
    // the plot midpoint so it never runs off the near edge.
    let principal_label = if principal_x <= width / 2.0 {
        ReferenceLabel {
            text: formatter.principal(medians.principal),
            x: principal_x + inset,
            y: inset,
            h_align: TextHAlign::Left,
        }
    } else {
        ReferenceLabel {
            text: formatter.principal(medians.principal),
            x: principal_x - inset,
            y: inset,
            h_align: TextHAlign::Right,
        }
    };

    // Horizontal line: label offset direction flips near the top edge.
    let label_y = if rate_y <= height / 2.0 {
        rate_y + inset
    } else {
        rate_y - inset - style.font_size_px
    };
    let rate_label = ReferenceLabel {
        text: formatter.rate(medians.rate),
        x: width - inset,
        y: label_y,
        h_align: TextHAlign::Right,
    };

    Ok(Some(ReferenceLayout {
        principal_x,
        rate_y,
        principal_label,
        rate_label,
    }))
}

/// Renders the resolved layout into the reference layer.
pub fn push_reference_layer(
    frame: &mut LayeredRenderFrame,
    layout: &ReferenceLayout,
    viewport: Viewport,
    style: ReferenceStyle,
) {
    let width = viewport.width_f64();
    let height = viewport.height_f64();

    frame.push_line(
        ChartLayerKind::Reference,
        LinePrimitive::new(
            layout.principal_x,
            0.0,
            layout.principal_x,
            height,
            style.line_width,
            style.line_color,
        )
        .dashed(style.dash_px, style.gap_px),
    );
    frame.push_line(
        ChartLayerKind::Reference,
        LinePrimitive::new(
            0.0,
            layout.rate_y,
            width,
            layout.rate_y,
            style.line_width,
            style.line_color,
        )
        .dashed(style.dash_px, style.gap_px),
    );

    for label in [&layout.principal_label, &layout.rate_label] {
        if label.text.is_empty() {
            continue;
        }
        frame.push_text(
            ChartLayerKind::Reference,
            TextPrimitive::new(
                label.text.clone(),
                label.x,
                label.y,
                style.font_size_px,
                style.line_color,
                label.h_align,
            ),
        );
    }
}
