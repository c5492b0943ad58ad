//! Loading of the dataset and geometry files that make up a snapshot.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geojson::{Feature, GeoJson, Value};
use serde::Deserialize;

use crate::snapshot::{country_name_id, Bounds, Configs, CountryShape, Global, Snapshot};

/// The dataset file: everything in a snapshot except the geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct Dataset {
    pub global: Global,
    pub configs: Configs,
}

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Geo(geojson::Error),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O Error: {}", e),
            LoadError::Json(e) => write!(f, "Invalid dataset: {}", e),
            LoadError::Geo(e) => write!(f, "Invalid geometry: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
            LoadError::Geo(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::Json(err)
    }
}

impl From<geojson::Error> for LoadError {
    fn from(err: geojson::Error) -> Self {
        LoadError::Geo(err)
    }
}

/// Reads the dataset JSON file.
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    let file = File::open(path)?;
    let dataset = serde_json::from_reader(BufReader::new(file))?;
    Ok(dataset)
}

/// Reads a GeoJSON feature collection into country shapes. Features without
/// an `ISO_NAME` property or a polygonal geometry are skipped.
pub fn load_geometry(path: &Path) -> Result<Vec<CountryShape>, LoadError> {
    let file = File::open(path)?;
    let geojson = GeoJson::from_reader(BufReader::new(file))?;
    Ok(shapes_from_geojson(geojson))
}

/// Builds a full snapshot from the two data files.
pub fn read_snapshot(dataset_path: &Path, geometry_path: &Path) -> Result<Snapshot, LoadError> {
    let dataset = load_dataset(dataset_path)?;
    let geo = load_geometry(geometry_path)?;
    Ok(Snapshot {
        global: dataset.global,
        configs: dataset.configs,
        geo,
    })
}

pub fn shapes_from_geojson(geojson: GeoJson) -> Vec<CountryShape> {
    match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(shape_from_feature)
            .collect(),
        _ => Vec::new(),
    }
}

fn shape_from_feature(feature: Feature) -> Option<CountryShape> {
    let name = feature
        .properties
        .as_ref()
        .and_then(|p| p.get("ISO_NAME"))
        .and_then(|v| v.as_str())?
        .to_string();

    let rings: Vec<Vec<[f64; 2]>> = match feature.geometry?.value {
        Value::Polygon(polygon) => outer_ring(polygon).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons.into_iter().filter_map(outer_ring).collect(),
        _ => return None,
    };

    let bounds = bounds_of(&rings)?;

    Some(CountryShape {
        id: country_name_id(&name),
        name,
        rings,
        bounds,
    })
}

// Interior rings (holes) are dropped: the choropleth fills whole countries.
fn outer_ring(polygon: Vec<Vec<Vec<f64>>>) -> Option<Vec<[f64; 2]>> {
    let ring = polygon.into_iter().next()?;
    let points: Vec<[f64; 2]> = ring
        .into_iter()
        .filter(|p| p.len() >= 2)
        .map(|p| [p[0], p[1]])
        .collect();
    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

fn bounds_of(rings: &[Vec<[f64; 2]>]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for point in rings.iter().flatten() {
        let (lon, lat) = (point[0], point[1]);
        bounds = Some(match bounds {
            None => Bounds {
                min_lat: lat,
                max_lat: lat,
                min_lon: lon,
                max_lon: lon,
            },
            Some(b) => Bounds {
                min_lat: b.min_lat.min(lat),
                max_lat: b.max_lat.max(lat),
                min_lon: b.min_lon.min(lon),
                max_lon: b.max_lon.max(lon),
            },
        });
    }
    bounds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Datum, IndicatorKind, ScalarDatum};

    const GEOMETRY: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "ISO_NAME": "France" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 42.0], [8.0, 42.0], [8.0, 51.0], [0.0, 51.0], [0.0, 42.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "ISO_NAME": "New Zealand" },
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[166.0, -47.0], [169.0, -47.0], [169.0, -44.0], [166.0, -47.0]]],
                        [[[172.0, -42.0], [175.0, -42.0], [175.0, -39.0], [172.0, -42.0]]]
                    ]
                }
            },
            {
                "type": "Feature",
                "properties": { "ISO_NAME": "Nowhere" },
                "geometry": { "type": "Point", "coordinates": [0.0, 0.0] }
            },
            {
                "type": "Feature",
                "properties": { "NAME": "Unnamed" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            }
        ]
    }"#;

    const DATASET: &str = r##"{
        "global": {
            "meta": { "ranges": { "gdp": { "min": 0.0, "max": 100.0 } } },
            "data": {
                "locations": {
                    "france": { "gdp": 42.0, "region": "europe" }
                }
            }
        },
        "configs": {
            "indicators": {
                "gdp": { "name": "GDP", "type": "number", "years": [] },
                "region": {
                    "name": "Region",
                    "type": "select",
                    "colors": { "europe": "#1f77b4" }
                }
            }
        }
    }"##;

    #[test]
    fn test_shapes_from_geojson_keeps_polygonal_named_features() {
        let geojson: GeoJson = GEOMETRY.parse().unwrap();
        let shapes = shapes_from_geojson(geojson);

        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].id, "france");
        assert_eq!(shapes[0].rings.len(), 1);
        assert_eq!(shapes[1].id, "new_zealand");
        assert_eq!(shapes[1].rings.len(), 2);
    }

    #[test]
    fn test_shape_bounds_cover_all_rings() {
        let geojson: GeoJson = GEOMETRY.parse().unwrap();
        let shapes = shapes_from_geojson(geojson);
        let nz = &shapes[1];

        assert_eq!(nz.bounds.min_lon, 166.0);
        assert_eq!(nz.bounds.max_lon, 175.0);
        assert_eq!(nz.bounds.min_lat, -47.0);
        assert_eq!(nz.bounds.max_lat, -39.0);
    }

    #[test]
    fn test_dataset_parses() {
        let dataset: Dataset = serde_json::from_str(DATASET).unwrap();

        let france = dataset.global.data.locations.get("france").unwrap();
        assert_eq!(
            france.get("gdp"),
            Some(&Datum::Scalar(ScalarDatum::Number(42.0)))
        );

        let gdp = dataset.configs.indicators.get("gdp").unwrap();
        assert_eq!(gdp.kind, IndicatorKind::Number);
        assert!(gdp.years.is_empty());

        let region = dataset.configs.indicators.get("region").unwrap();
        assert_eq!(region.kind, IndicatorKind::Select);
        assert_eq!(region.colors.get("europe").map(String::as_str), Some("#1f77b4"));

        let range = dataset.global.meta.ranges.get("gdp").unwrap();
        assert_eq!(range.min, 0.0);
        assert_eq!(range.max, 100.0);
    }
}
