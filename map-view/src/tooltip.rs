//! Tooltip content and the debounced-close state machine.
//!
//! Hovering a country shows a tooltip that follows the pointer; leaving it
//! schedules the close a short delay later, so sweeping across borders does
//! not flicker. Focusing a country from the selection pins its tooltip to
//! the shape instead.

use std::time::{Duration, Instant};

use egui::Pos2;

use store::{CountryShape, ScalarDatum, Snapshot};

/// Delay between leaving a country and the tooltip closing. Any hover
/// arriving within the delay cancels the close.
pub const TOOLTIP_CLOSE_DELAY: Duration = Duration::from_millis(100);

/// What the tooltip shows for one country.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub title: String,
    pub line: String,
}

/// Builds the tooltip for a country under the current selection.
pub fn tooltip_content(
    shape: &CountryShape,
    snapshot: &Snapshot,
    indicator: &str,
    year: i32,
) -> TooltipContent {
    let line = match snapshot.resolve(&shape.id, indicator, year) {
        Some(ScalarDatum::Number(v)) => {
            let has_years = snapshot
                .indicator_config(indicator)
                .map(|c| !c.years.is_empty())
                .unwrap_or(false);
            if has_years {
                format!("{} ({})", format_number(*v), year)
            } else {
                format_number(*v)
            }
        }
        Some(ScalarDatum::Category(c)) => c.clone(),
        None => "No data".to_string(),
    };
    TooltipContent {
        title: shape.name.clone(),
        line,
    }
}

/// Formats a number with thousands separators; small values keep up to two
/// decimals.
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let magnitude = value.abs();

    let (integer, fraction) = if magnitude >= 1000.0 {
        (magnitude.round() as u64, String::new())
    } else {
        let rounded = (magnitude * 100.0).round() / 100.0;
        let fraction = format!("{:.2}", rounded.fract())
            .trim_start_matches("0")
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string();
        (rounded.trunc() as u64, fraction)
    };

    let digits = integer.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}{}{}",
        if negative { "-" } else { "" },
        grouped,
        fraction
    )
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipMode {
    Hidden,
    /// Following the pointer over a country.
    Hover { country: String, pos: Pos2 },
    /// Pinned to a focused country; positioned at its centroid each frame.
    Pinned { country: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipState {
    mode: TooltipMode,
    close_at: Option<Instant>,
}

impl Default for TooltipState {
    fn default() -> Self {
        Self::new()
    }
}

impl TooltipState {
    pub fn new() -> Self {
        Self {
            mode: TooltipMode::Hidden,
            close_at: None,
        }
    }

    /// A hover always shows the tooltip and cancels any pending close.
    pub fn on_hover(&mut self, country: String, pos: Pos2) {
        self.mode = TooltipMode::Hover { country, pos };
        self.close_at = None;
    }

    /// Leaving the layer schedules the close; a pinned tooltip stays.
    pub fn on_hover_end(&mut self, now: Instant) {
        if matches!(self.mode, TooltipMode::Hover { .. }) && self.close_at.is_none() {
            self.close_at = Some(now + TOOLTIP_CLOSE_DELAY);
        }
    }

    pub fn pin(&mut self, country: String) {
        self.mode = TooltipMode::Pinned { country };
        self.close_at = None;
    }

    /// Applies a due close.
    pub fn tick(&mut self, now: Instant) {
        if self.close_at.is_some_and(|at| now >= at) {
            self.mode = TooltipMode::Hidden;
            self.close_at = None;
        }
    }

    pub fn mode(&self) -> &TooltipMode {
        &self.mode
    }

    pub fn visible_country(&self) -> Option<&str> {
        match &self.mode {
            TooltipMode::Hidden => None,
            TooltipMode::Hover { country, .. } | TooltipMode::Pinned { country } => Some(country),
        }
    }

    pub fn pinned_country(&self) -> Option<&str> {
        match &self.mode {
            TooltipMode::Pinned { country } => Some(country),
            _ => None,
        }
    }
}
