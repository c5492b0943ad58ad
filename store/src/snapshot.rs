use std::collections::HashMap;

use serde::Deserialize;

/// A scalar observation: either a measured number or a named category.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarDatum {
    Number(f64),
    Category(String),
}

/// The value a location holds for one indicator. Time-series indicators
/// carry one scalar per year, keyed by the year rendered as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Series { years: HashMap<String, ScalarDatum> },
    Scalar(ScalarDatum),
}

/// Declared value type of an indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorKind {
    /// Continuous values, colored through the numeric ramp.
    Number,
    /// Discrete categories, colored through the configured palette.
    Select,
}

/// Per-indicator configuration: display name, value type, the years the
/// series covers (empty for single-valued indicators), and the category
/// palette for select indicators.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndicatorConfig {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: IndicatorKind,
    #[serde(default)]
    pub years: Vec<i32>,
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Configs {
    pub indicators: HashMap<String, IndicatorConfig>,
}

/// Numeric domain of an indicator, used by the color scale and the legend.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub ranges: HashMap<String, ValueRange>,
}

/// Indicator values per location: country id -> indicator id -> datum.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GlobalData {
    pub locations: HashMap<String, HashMap<String, Datum>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Global {
    #[serde(default)]
    pub meta: Meta,
    pub data: GlobalData,
}

/// Geographic bounds of a shape, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl Bounds {
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// A country outline parsed from the geometry file. Rings hold the outer
/// boundary of each polygon as `[lon, lat]` pairs, matching GeoJSON order.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryShape {
    pub id: String,
    pub name: String,
    pub rings: Vec<Vec<[f64; 2]>>,
    pub bounds: Bounds,
}

impl CountryShape {
    /// Center of the shape's bounds as `(lat, lon)`.
    pub fn centroid(&self) -> (f64, f64) {
        self.bounds.center()
    }
}

/// One immutable view of everything the store holds: the dataset, the
/// indicator configuration, and the country geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub global: Global,
    pub configs: Configs,
    pub geo: Vec<CountryShape>,
}

impl Snapshot {
    /// True when no location data has been loaded yet.
    pub fn is_empty(&self) -> bool {
        self.global.data.locations.is_empty()
    }

    pub fn indicator_config(&self, indicator: &str) -> Option<&IndicatorConfig> {
        self.configs.indicators.get(indicator)
    }

    pub fn range(&self, indicator: &str) -> Option<ValueRange> {
        self.global.meta.ranges.get(indicator).copied()
    }

    /// Resolves the value a country holds for an indicator at a year.
    ///
    /// Indicators whose config declares years resolve only through a series
    /// datum, and only when the selected year is present; single-valued
    /// indicators resolve only through a scalar datum. Every missing link
    /// yields `None`.
    pub fn resolve(&self, country: &str, indicator: &str, year: i32) -> Option<&ScalarDatum> {
        let datum = self
            .global
            .data
            .locations
            .get(country)?
            .get(indicator)?;
        let config = self.indicator_config(indicator)?;

        if config.years.is_empty() {
            match datum {
                Datum::Scalar(value) => Some(value),
                Datum::Series { .. } => None,
            }
        } else {
            match datum {
                Datum::Series { years } => years.get(&year.to_string()),
                Datum::Scalar(_) => None,
            }
        }
    }
}

/// Canonical country identifier derived from a feature's `ISO_NAME`
/// property: lowercased, with spaces turned into underscores.
pub fn country_name_id(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}
