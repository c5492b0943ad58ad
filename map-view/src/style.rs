//! Per-feature choropleth styling: the continuous ramp for numeric
//! indicators, the configured palette for select indicators, and the
//! neutral style for countries without data.

use egui::Color32;

use store::{IndicatorConfig, IndicatorKind, ScalarDatum, Snapshot, ValueRange};

/// Fill for countries with no resolvable value.
pub const NO_DATA_FILL: Color32 = Color32::from_rgb(0xee, 0xee, 0xee);

pub const STROKE_WEIGHT: f32 = 0.5;
pub const STROKE_OPACITY: f32 = 0.8;
pub const FILL_OPACITY: f32 = 0.65;
/// Fill opacity applied to the hovered country.
pub const HOVER_FILL_OPACITY: f32 = 1.0;

/// Style record for one rendered country. Recomputed for every feature on
/// every re-render; carries no identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureStyle {
    pub stroke_weight: f32,
    pub stroke_opacity: f32,
    pub stroke_color: Color32,
    pub fill_color: Color32,
    pub fill_opacity: f32,
}

impl FeatureStyle {
    fn with_fill(fill_color: Color32) -> Self {
        Self {
            stroke_weight: STROKE_WEIGHT,
            stroke_opacity: STROKE_OPACITY,
            stroke_color: Color32::WHITE,
            fill_color,
            fill_opacity: FILL_OPACITY,
        }
    }

    pub fn no_data() -> Self {
        Self::with_fill(NO_DATA_FILL)
    }
}

/// A color stop of the numeric ramp: position in [0, 1] mapped to RGB.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: [u8; 3],
}

impl ColorStop {
    const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self { t, color: [r, g, b] }
    }
}

/// Yellow -> orange -> dark red, the usual sequential choropleth ramp.
pub const NUMBER_RAMP: &[ColorStop] = &[
    ColorStop::new(0.00, 255, 255, 204),
    ColorStop::new(0.25, 254, 217, 118),
    ColorStop::new(0.50, 253, 141, 60),
    ColorStop::new(0.75, 227, 26, 28),
    ColorStop::new(1.00, 128, 0, 38),
];

/// Evaluates a multi-stop ramp at `t` in [0, 1] by linear interpolation
/// between the surrounding stops.
pub fn evaluate(stops: &[ColorStop], t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0);

    let mut lower = stops[0];
    let mut upper = stops[stops.len() - 1];
    for pair in stops.windows(2) {
        if t >= pair[0].t && t <= pair[1].t {
            lower = pair[0];
            upper = pair[1];
            break;
        }
    }

    let span = upper.t - lower.t;
    let local = if span > 0.0 { (t - lower.t) / span } else { 0.0 };
    let channel = |i: usize| {
        let a = lower.color[i] as f64;
        let b = upper.color[i] as f64;
        (a + (b - a) * local).round() as u8
    };
    Color32::from_rgb(channel(0), channel(1), channel(2))
}

/// Continuous color for a numeric value over the indicator's declared range.
pub fn number_color(value: f64, range: ValueRange) -> Color32 {
    let span = range.max - range.min;
    let t = if span > 0.0 {
        (value - range.min) / span
    } else {
        0.0
    };
    evaluate(NUMBER_RAMP, t)
}

/// Discrete color for a category, from the indicator's configured palette.
/// Unknown categories fall back to the no-data fill.
pub fn select_color(category: &str, config: &IndicatorConfig) -> Color32 {
    config
        .colors
        .get(category)
        .and_then(|hex| parse_hex(hex))
        .unwrap_or(NO_DATA_FILL)
}

/// Parses `#rrggbb` into a color.
pub fn parse_hex(hex: &str) -> Option<Color32> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

/// Computes the style of one country for the current selection.
pub fn feature_style(
    snapshot: &Snapshot,
    country_id: &str,
    indicator: &str,
    config: &IndicatorConfig,
    year: i32,
) -> FeatureStyle {
    let Some(value) = snapshot.resolve(country_id, indicator, year) else {
        return FeatureStyle::no_data();
    };

    let fill = match (config.kind, value) {
        (IndicatorKind::Number, ScalarDatum::Number(v)) => {
            let range = snapshot.range(indicator).unwrap_or(ValueRange { min: 0.0, max: 1.0 });
            number_color(*v, range)
        }
        (IndicatorKind::Select, ScalarDatum::Category(c)) => select_color(c, config),
        (IndicatorKind::Select, ScalarDatum::Number(v)) => select_color(&v.to_string(), config),
        (IndicatorKind::Number, ScalarDatum::Category(_)) => NO_DATA_FILL,
    };
    FeatureStyle::with_fill(fill)
}

/// Applies an opacity factor to a color, for fills and strokes.
pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
