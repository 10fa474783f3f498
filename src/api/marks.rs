//! Market point layer: keyed reconciliation with per-kind transitions.
//!
//! Each render computes a three-way diff between the previous mark set and
//! the incoming offer list, keyed by [`OfferKey`]: inserts grow in from
//! radius zero, removals shrink out and are dropped when finished, updates
//! glide to their new position and color. While a drag is active every
//! attribute snaps immediately so animation never competes with the
//! pointer-move loop.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::api::MarkStyle;
use crate::core::{Offer, OfferKey, PixelPoint, ScatterProjection};
use crate::render::Color;

/// Recency interpolation parameter for one timestamp over the set's
/// observed `[min, max]` range.
///
/// Non-decreasing in `age_timestamp`; when all timestamps are equal the
/// interpolation degenerates to its upper endpoint and the whole set renders
/// as the "newest" color.
#[must_use]
pub fn age_color_parameter(age_timestamp: f64, min_timestamp: f64, max_timestamp: f64) -> f64 {
    let span = max_timestamp - min_timestamp;
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    ((age_timestamp - min_timestamp) / span).clamp(0.0, 1.0)
}

/// Drawn attributes of one mark at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkVisual {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: Color,
}

impl MarkVisual {
    fn lerp(self, target: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
            radius: self.radius + (target.radius - self.radius) * t,
            color: self.color.lerp(target.color, t),
        }
    }
}

/// Lifecycle phase of one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkPhase {
    Entering,
    Active,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Transition {
    from: MarkVisual,
    to: MarkVisual,
    elapsed_ms: f64,
    duration_ms: f64,
}

impl Transition {
    fn current(&self) -> MarkVisual {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        self.from
            .lerp(self.to, self.elapsed_ms / self.duration_ms)
    }

    fn is_finished(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }
}

/// One visual mark tracked across renders.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketMark {
    pub offer: Offer,
    pub phase: MarkPhase,
    visual: MarkVisual,
    transition: Option<Transition>,
}

impl MarketMark {
    /// Attributes to draw this frame.
    #[must_use]
    pub fn visual(&self) -> MarkVisual {
        self.transition
            .as_ref()
            .map_or(self.visual, Transition::current)
    }
}

/// Keyed mark set with enter/update/exit lifecycle.
#[derive(Debug, Default)]
pub struct MarkReconciler {
    marks: IndexMap<OfferKey, MarketMark>,
}

impl MarkReconciler {
    /// Diffs the incoming offer list against the tracked mark set.
    ///
    /// Offers whose projection is non-finite are skipped for the frame (the
    /// NaN firewall of the projection layer); an offer that keeps its key
    /// keeps its mark and its in-flight animation state.
    pub fn reconcile(
        &mut self,
        offers: &[Offer],
        projection: &ScatterProjection,
        dragging: bool,
        style: MarkStyle,
    ) {
        let mut min_timestamp = f64::INFINITY;
        let mut max_timestamp = f64::NEG_INFINITY;
        for offer in offers {
            min_timestamp = min_timestamp.min(offer.age_timestamp);
            max_timestamp = max_timestamp.max(offer.age_timestamp);
        }

        let mut seen: std::collections::HashSet<OfferKey> =
            std::collections::HashSet::with_capacity(offers.len());
        let mut entered = 0_usize;

        for offer in offers {
            let Some(pixel) = projection.project(offer.terms()) else {
                continue;
            };
            let t = age_color_parameter(offer.age_timestamp, min_timestamp, max_timestamp);
            let target = MarkVisual {
                x: pixel.x,
                y: pixel.y,
                radius: style.radius_px,
                color: style.old_color.lerp(style.new_color, t),
            };

            let key = offer.key();
            seen.insert(key.clone());

            match self.marks.get_mut(&key) {
                Some(mark) => {
                    mark.offer = offer.clone();
                    if dragging {
                        mark.phase = MarkPhase::Active;
                        mark.visual = target;
                        mark.transition = None;
                    } else {
                        let current = mark.visual();
                        if mark.phase == MarkPhase::Exiting {
                            mark.phase = MarkPhase::Active;
                        }
                        if current != target {
                            mark.transition = Some(Transition {
                                from: current,
                                to: target,
                                elapsed_ms: 0.0,
                                duration_ms: style.update_duration_ms,
                            });
                            mark.visual = target;
                        }
                    }
                }
                None => {
                    entered += 1;
                    let mark = if dragging {
                        MarketMark {
                            offer: offer.clone(),
                            phase: MarkPhase::Active,
                            visual: target,
                            transition: None,
                        }
                    } else {
                        MarketMark {
                            offer: offer.clone(),
                            phase: MarkPhase::Entering,
                            visual: target,
                            transition: Some(Transition {
                                from: MarkVisual {
                                    radius: 0.0,
                                    ..target
                                },
                                to: target,
                                elapsed_ms: 0.0,
                                duration_ms: style.enter_duration_ms,
                            }),
                        }
                    };
                    self.marks.insert(key, mark);
                }
            }
        }

        // Marks with no surviving offer shrink out; immediate removal while
        // dragging keeps the frame loop free of exit animation.
        let mut removed = 0_usize;
        self.marks.retain(|key, mark| {
            if seen.contains(key) {
                return true;
            }
            removed += 1;
            if dragging {
                return false;
            }
            if mark.phase != MarkPhase::Exiting {
                let current = mark.visual();
                mark.phase = MarkPhase::Exiting;
                mark.transition = Some(Transition {
                    from: current,
                    to: MarkVisual {
                        radius: 0.0,
                        ..current
                    },
                    elapsed_ms: 0.0,
                    duration_ms: style.exit_duration_ms,
                });
            }
            true
        });

        if entered > 0 || removed > 0 {
            debug!(entered, removed, tracked = self.marks.len(), "marks reconciled");
        }
    }

    /// Steps in-flight transitions; finished exits are dropped.
    pub fn advance_frame(&mut self, delta_ms: f64) {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return;
        }

        self.marks.retain(|_, mark| {
            let Some(transition) = mark.transition.as_mut() else {
                return true;
            };
            transition.elapsed_ms += delta_ms;
            if !transition.is_finished() {
                return true;
            }
            mark.visual = transition.to;
            mark.transition = None;
            match mark.phase {
                MarkPhase::Exiting => false,
                _ => {
                    mark.phase = MarkPhase::Active;
                    true
                }
            }
        });
    }

    /// Nearest non-exiting mark within `radius_px` of the pointer.
    #[must_use]
    pub fn hit_test(&self, pointer: PixelPoint, radius_px: f64) -> Option<&MarketMark> {
        self.marks
            .values()
            .filter(|mark| mark.phase != MarkPhase::Exiting)
            .map(|mark| {
                let visual = mark.visual();
                let distance = (visual.x - pointer.x).hypot(visual.y - pointer.y);
                (mark, distance)
            })
            .filter(|(_, distance)| *distance <= radius_px)
            .min_by_key(|(_, distance)| OrderedFloat(*distance))
            .map(|(mark, _)| mark)
    }

    #[must_use]
    pub fn get(&self, key: &OfferKey) -> Option<&MarketMark> {
        self.marks.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MarketMark> {
        self.marks.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.marks.values().any(|mark| mark.transition.is_some())
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}
