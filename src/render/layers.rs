use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::render::{
    CirclePrimitive, LinePrimitive, PolygonPrimitive, RectPrimitive, RenderFrame, TextPrimitive,
};

/// Z-ordered drawing layers of the offer chart.
///
/// `Marker` sits above `Marks` so the user's offer is never occluded, and
/// `Overlay` (drag crosshairs, tooltips, badges) is always on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartLayerKind {
    Density,
    Marks,
    Reference,
    Marker,
    Overlay,
}

impl ChartLayerKind {
    /// Canonical bottom-to-top stacking order.
    #[must_use]
    pub const fn canonical_order() -> [Self; 5] {
        [
            Self::Density,
            Self::Marks,
            Self::Reference,
            Self::Marker,
            Self::Overlay,
        ]
    }
}

/// Primitives collected for one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: ChartLayerKind,
    pub polygons: Vec<PolygonPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    fn empty(kind: ChartLayerKind) -> Self {
        Self {
            kind,
            polygons: Vec::new(),
            circles: Vec::new(),
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }
}

/// Scene for one draw pass, split by layer so backends can render or cache
/// layers independently.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    /// Builds an empty frame holding every canonical layer in order.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: ChartLayerKind::canonical_order()
                .into_iter()
                .map(LayerPrimitives::empty)
                .collect(),
        }
    }

    pub fn push_polygon(&mut self, kind: ChartLayerKind, polygon: PolygonPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.polygons.push(polygon);
        }
    }

    pub fn push_circle(&mut self, kind: ChartLayerKind, circle: CirclePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.circles.push(circle);
        }
    }

    pub fn push_line(&mut self, kind: ChartLayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_rect(&mut self, kind: ChartLayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_text(&mut self, kind: ChartLayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: ChartLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    /// Flattens layers in stacking order for single-pass backends.
    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &self.layers {
            frame.polygons.extend(layer.polygons.iter().cloned());
            frame.circles.extend(layer.circles.iter().copied());
            frame.lines.extend(layer.lines.iter().copied());
            frame.rects.extend(layer.rects.iter().copied());
            frame.texts.extend(layer.texts.iter().cloned());
        }
        frame
    }

    fn layer_mut(&mut self, kind: ChartLayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}
