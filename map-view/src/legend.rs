//! Legend model for the current indicator: a sampled ramp with its domain
//! for numeric indicators, a swatch list for select indicators.

use egui::Color32;

use store::{IndicatorKind, Snapshot};

use crate::style::{evaluate, parse_hex, NO_DATA_FILL, NUMBER_RAMP};

/// Viewports at or below this width never show the legend.
pub const LEGEND_MIN_VIEWPORT_WIDTH: f32 = 768.0;

/// How many swatches a ramp legend samples.
const RAMP_SWATCHES: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    pub title: String,
    pub body: LegendBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LegendBody {
    Ramp {
        swatches: Vec<Color32>,
        min: f64,
        max: f64,
    },
    Categories(Vec<(String, Color32)>),
}

/// Builds the legend for an indicator, or `None` when the indicator is not
/// configured.
pub fn build_legend(snapshot: &Snapshot, indicator: &str) -> Option<Legend> {
    let config = snapshot.indicator_config(indicator)?;

    let body = match config.kind {
        IndicatorKind::Number => {
            let range = snapshot.range(indicator);
            let swatches = (0..RAMP_SWATCHES)
                .map(|i| evaluate(NUMBER_RAMP, i as f64 / (RAMP_SWATCHES - 1) as f64))
                .collect();
            LegendBody::Ramp {
                swatches,
                min: range.map(|r| r.min).unwrap_or(0.0),
                max: range.map(|r| r.max).unwrap_or(1.0),
            }
        }
        IndicatorKind::Select => {
            let mut entries: Vec<(String, Color32)> = config
                .colors
                .iter()
                .map(|(category, hex)| {
                    (category.clone(), parse_hex(hex).unwrap_or(NO_DATA_FILL))
                })
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            LegendBody::Categories(entries)
        }
    };

    Some(Legend {
        title: config.name.clone(),
        body,
    })
}
