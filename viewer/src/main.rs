use std::cell::RefCell;
use std::env;
use std::path::Path;
use std::rc::Rc;

use logger::{Color, Logger};
use map_view::config::MapConfig;
use store::{actions, load, Store};

/// Main entry point for the indicator atlas.
///
/// Loads the map configuration and the data files, populates the store, and
/// opens the map window.
///
/// # Usage
///
/// ```sh
/// cargo run -- [config.json] [dataset.json] [countries.geojson]
/// ```
///
/// All three paths are optional and default to the files under `demo-data/`
/// (see the `sample_data` example of the `map-view` crate to generate them).
///
/// # Errors
///
/// The program returns an error if:
/// - The configuration file is missing or malformed.
/// - The dataset or geometry file is missing or malformed.
/// - The window cannot be opened.
fn main() -> Result<(), String> {
    let args: Vec<String> = env::args().collect();

    let config_path = args.get(1).map(String::as_str).unwrap_or("demo-data/config.json");
    let dataset_path = args.get(2).map(String::as_str).unwrap_or("demo-data/dataset.json");
    let geometry_path = args
        .get(3)
        .map(String::as_str)
        .unwrap_or("demo-data/countries.geojson");

    let logger = Logger::new(Path::new("logs"), "viewer").map_err(|e| e.to_string())?;

    let config = MapConfig::load(Path::new(config_path)).map_err(|e| {
        let _ = logger.error(&format!("failed to load config: {}", e), true);
        e.to_string()
    })?;
    let _ = logger.info(&format!("configuration loaded from {}", config_path), Color::Green, true);

    let snapshot = load::read_snapshot(Path::new(dataset_path), Path::new(geometry_path))
        .map_err(|e| {
            let _ = logger.error(&format!("failed to load data: {}", e), true);
            e.to_string()
        })?;
    let _ = logger.info(
        &format!(
            "dataset loaded: {} locations, {} shapes",
            snapshot.global.data.locations.len(),
            snapshot.geo.len()
        ),
        Color::Green,
        true,
    );

    // Default selection: the first indicator (alphabetically, so runs are
    // reproducible) at its most recent year.
    let initial = {
        let mut ids: Vec<&String> = snapshot.configs.indicators.keys().collect();
        ids.sort();
        ids.first().map(|id| {
            let year = snapshot
                .indicator_config(id)
                .and_then(|config| config.years.last().copied());
            (id.to_string(), year)
        })
    };

    let store = Rc::new(RefCell::new(Store::new()));
    actions::load_snapshot(&store, snapshot);
    if let Some((indicator, year)) = initial {
        actions::change_indicator(&store, &indicator);
        if let Some(year) = year {
            actions::change_year(&store, year);
        }
    }

    map_view::run(config, store, logger).map_err(|e| e.to_string())
}
