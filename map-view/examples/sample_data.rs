use std::fs;

use serde_json::json;

/// Seeds the `demo-data/` directory the viewer reads by default: a map
/// configuration, a small indicator dataset, and rectangular stand-in
/// country outlines.
fn main() {
    fs::create_dir_all("demo-data").unwrap();

    let config = json!({
        "mapbox": {
            "token": "",
            "type": "streets",
            "location": [20.0, 10.0],
            "zoomlevel": 3.0,
            "label": false
        }
    });

    let dataset = json!({
        "global": {
            "meta": {
                "ranges": {
                    "gdp": { "min": 0.0, "max": 3000.0 },
                    "population": { "min": 0.0, "max": 1400.0 }
                }
            },
            "data": {
                "locations": {
                    "france":    { "gdp": { "years": { "2013": 2810.0, "2014": 2852.0, "2015": 2438.0 } }, "population": 66.5, "region": "europe" },
                    "germany":   { "gdp": { "years": { "2013": 3733.0, "2014": 3889.0, "2015": 3363.0 } }, "population": 81.7, "region": "europe" },
                    "nigeria":   { "gdp": { "years": { "2013": 515.0, "2014": 568.0, "2015": 494.0 } }, "population": 181.1, "region": "africa" },
                    "brazil":    { "gdp": { "years": { "2013": 2473.0, "2014": 2456.0, "2015": 1802.0 } }, "population": 204.5, "region": "americas" },
                    "india":     { "gdp": { "years": { "2013": 1857.0, "2014": 2039.0, "2015": 2104.0 } }, "population": 1310.0, "region": "asia" },
                    "australia": { "gdp": { "years": { "2013": 1576.0, "2014": 1467.0, "2015": 1345.0 } }, "population": 23.8, "region": "oceania" }
                }
            }
        },
        "configs": {
            "indicators": {
                "gdp": {
                    "name": "GDP (billion USD)",
                    "type": "number",
                    "years": [2013, 2014, 2015]
                },
                "population": {
                    "name": "Population (millions)",
                    "type": "number",
                    "years": []
                },
                "region": {
                    "name": "Region",
                    "type": "select",
                    "colors": {
                        "europe": "#1f77b4",
                        "africa": "#2ca02c",
                        "americas": "#d62728",
                        "asia": "#9467bd",
                        "oceania": "#8c564b"
                    }
                }
            }
        }
    });

    // Coarse rectangles are enough to exercise the choropleth.
    let countries = [
        ("France", [-1.0, 43.5, 6.5, 49.5]),
        ("Germany", [6.5, 47.5, 14.5, 54.5]),
        ("Nigeria", [3.0, 4.5, 14.0, 13.5]),
        ("Brazil", [-73.0, -33.0, -35.0, 5.0]),
        ("India", [68.5, 8.0, 97.0, 35.0]),
        ("Australia", [113.5, -39.0, 153.5, -11.0]),
    ];

    let features: Vec<serde_json::Value> = countries
        .iter()
        .map(|(name, [min_lon, min_lat, max_lon, max_lat])| {
            json!({
                "type": "Feature",
                "properties": { "ISO_NAME": name },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [min_lon, min_lat],
                        [max_lon, min_lat],
                        [max_lon, max_lat],
                        [min_lon, max_lat],
                        [min_lon, min_lat]
                    ]]
                }
            })
        })
        .collect();

    let geometry = json!({ "type": "FeatureCollection", "features": features });

    fs::write(
        "demo-data/config.json",
        serde_json::to_string_pretty(&config).unwrap(),
    )
    .unwrap();
    fs::write(
        "demo-data/dataset.json",
        serde_json::to_string_pretty(&dataset).unwrap(),
    )
    .unwrap();
    fs::write(
        "demo-data/countries.geojson",
        serde_json::to_string_pretty(&geometry).unwrap(),
    )
    .unwrap();

    println!("demo-data/ written; run the viewer with `cargo run -p viewer`");
}
