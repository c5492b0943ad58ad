pub mod choropleth;
pub mod config;
pub mod legend;
pub mod navigation;
pub mod state;
pub mod style;
pub mod tooltip;
pub mod widgets;

mod map;
mod plugins;
mod windows;

pub use map::AtlasApp;

use logger::Logger;
use store::SharedStore;

use crate::config::MapConfig;
use crate::navigation::InMemoryNavigator;

/// Opens the atlas window over an already-populated store.
pub fn run(config: MapConfig, store: SharedStore, logger: Logger) -> Result<(), eframe::Error> {
    eframe::run_native(
        "Indicator Atlas",
        Default::default(),
        Box::new(move |cc| {
            Ok(Box::new(AtlasApp::new(
                cc.egui_ctx.clone(),
                &config,
                store,
                Box::new(InMemoryNavigator::new()),
                logger,
            )))
        }),
    )
}
