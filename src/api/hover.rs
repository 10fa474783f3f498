//! Mark hover tooltip lifecycle.
//!
//! The tooltip is an owned value created when the pointer settles over a
//! mark and dropped when it leaves; there is no ambient singleton to leak
//! on teardown.

use crate::api::engine::OfferChartEngine;
use crate::api::format::relative_age_label;
use crate::core::{OfferKey, PixelPoint};
use crate::interaction::HoverState;
use crate::render::Renderer;

/// Floating tooltip for a hovered market mark.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverTooltip {
    pub key: OfferKey,
    /// Anchor position: pointer plus a fixed pixel offset.
    pub position: PixelPoint,
    pub lines: Vec<String>,
}

impl<R: Renderer> OfferChartEngine<R> {
    /// Pointer movement while no drag is active: hit-test marks and create,
    /// move, or drop the hover tooltip.
    pub(super) fn update_hover(&mut self, pointer: PixelPoint) {
        let offset = self.config.drag.tooltip_offset_px;
        let hit = self
            .marks
            .hit_test(pointer, self.config.drag.hover_radius_px)
            .map(|mark| mark.offer.clone());

        match hit {
            Some(offer) => {
                let key = offer.key();
                let position = PixelPoint::new(pointer.x + offset, pointer.y + offset);

                let same_target = self
                    .hover_tooltip
                    .as_ref()
                    .is_some_and(|tooltip| tooltip.key == key);
                if same_target {
                    // Pointer-move while hovering only repositions.
                    if let Some(tooltip) = self.hover_tooltip.as_mut() {
                        tooltip.position = position;
                    }
                } else {
                    let formatter = self.formatter();
                    let mut lines = vec![
                        formatter.principal(offer.principal),
                        formatter.rate(offer.rate),
                    ];
                    if let Some(duration_days) = offer.duration_days {
                        lines.push(format!("{duration_days} days"));
                    }
                    let age_seconds = self.reference_unix_seconds - offer.age_timestamp;
                    lines.push(relative_age_label(age_seconds));

                    self.hover_tooltip = Some(HoverTooltip {
                        key: key.clone(),
                        position,
                        lines,
                    });
                }

                self.interaction.set_hover(Some(HoverState { key, pointer }));
            }
            None => {
                self.hover_tooltip = None;
                self.interaction.clear_hover();
            }
        }
    }

    /// Marks the pointer as having left the surface.
    pub fn pointer_leave(&mut self) {
        self.hover_tooltip = None;
        self.interaction.clear_hover();
    }

    #[must_use]
    pub fn hover_tooltip(&self) -> Option<&HoverTooltip> {
        self.hover_tooltip.as_ref()
    }
}
