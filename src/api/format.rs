//! Value formatting seams.
//!
//! Locale and currency conversion live outside the chart core; string
//! producing call sites (tooltips, reference labels, drag badges) consult a
//! [`ValueFormatter`] so hosts can plug in their own formatting without
//! touching the engine.

/// Formats principal and rate values for labels and tooltips.
pub trait ValueFormatter {
    fn principal(&self, value: f64) -> String;
    fn rate(&self, value: f64) -> String;
}

/// Default formatter: "{amount} {unit}" and "{rate}%".
///
/// The unit label is purely a display string (set by the host per selected
/// currency); it has no numeric effect anywhere in the core.
#[derive(Debug, Clone)]
pub struct UnitValueFormatter {
    unit_label: String,
}

impl UnitValueFormatter {
    #[must_use]
    pub fn new(unit_label: impl Into<String>) -> Self {
        Self {
            unit_label: unit_label.into(),
        }
    }

    #[must_use]
    pub fn unit_label(&self) -> &str {
        &self.unit_label
    }
}

impl ValueFormatter for UnitValueFormatter {
    fn principal(&self, value: f64) -> String {
        let formatted = if value.fract().abs() < 1e-9 {
            format!("{value:.0}")
        } else {
            format!("{value:.2}")
        };
        if self.unit_label.is_empty() {
            formatted
        } else {
            format!("{formatted} {}", self.unit_label)
        }
    }

    fn rate(&self, value: f64) -> String {
        format!("{value:.2}%")
    }
}

/// Human-readable relative age: day granularity above 24 h, hour granularity
/// above 60 min, minutes otherwise. Always floor-rounded, with
/// singular/plural suffix agreement.
#[must_use]
pub fn relative_age_label(age_seconds: f64) -> String {
    let age_seconds = if age_seconds.is_finite() {
        age_seconds.max(0.0)
    } else {
        0.0
    };

    let minutes = (age_seconds / 60.0).floor() as u64;
    let hours = minutes / 60;
    let days = hours / 24;

    if days >= 1 {
        pluralized(days, "day")
    } else if hours >= 1 {
        pluralized(hours, "hour")
    } else {
        pluralized(minutes, "minute")
    }
}

fn pluralized(count: u64, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun} ago")
    } else {
        format!("{count} {noun}s ago")
    }
}
