use std::{
    cell::RefCell,
    rc::Rc,
    time::{Duration, Instant},
};

use egui::Context;
use walkers::sources::{Mapbox, OpenStreetMap};
use walkers::{HttpOptions, HttpTiles, Map, MapMemory, Position, Tiles};

use logger::{Color, Logger};
use store::{actions, ChangeTopic, SharedStore, Subscription};

use crate::choropleth::{zoom_for_bounds, ChoroplethView};
use crate::config::MapConfig;
use crate::navigation::{update_query, Navigator};
use crate::plugins::{self, Interactions};
use crate::state::{ControlState, LayerState, LegendState};
use crate::tooltip::TooltipMode;
use crate::widgets::{WidgetLegend, WidgetSearchBar, WidgetTimeline};
use crate::windows;

/// Repaint cadence while idle; keeps the tooltip-close timer honest.
const REPAINT_TICK_MS: u64 = 100;

/// One subscription per change topic, held for the life of the app.
/// Dropping the app drops the handles, which unsubscribes from the store.
struct StoreSubscriptions {
    data: Subscription,
    country: Subscription,
    indicator: Subscription,
    year: Subscription,
    legend: Subscription,
}

impl StoreSubscriptions {
    fn attach(store: &SharedStore) -> Self {
        let mut store = store.borrow_mut();
        Self {
            data: store.subscribe(ChangeTopic::Data),
            country: store.subscribe(ChangeTopic::Country),
            indicator: store.subscribe(ChangeTopic::Indicator),
            year: store.subscribe(ChangeTopic::Year),
            legend: store.subscribe(ChangeTopic::Legend),
        }
    }
}

/// The choropleth atlas application: binds the shared store to the map
/// surface and keeps the rendered layer, legend, and tooltip in sync with
/// the selection.
pub struct AtlasApp {
    tiles: Box<dyn Tiles>,
    map_memory: MapMemory,
    initial_position: Position,
    store: SharedStore,
    navigator: Box<dyn Navigator>,
    logger: Logger,
    view: ChoroplethView,
    interactions: Rc<RefCell<Interactions>>,
    subscriptions: StoreSubscriptions,
    timeline: WidgetTimeline,
    search_bar: WidgetSearchBar,
    pinned_tooltip_pos: Option<egui::Pos2>,
    bootstrapped: bool,
}

impl AtlasApp {
    pub fn new(
        egui_ctx: Context,
        config: &MapConfig,
        store: SharedStore,
        navigator: Box<dyn Navigator>,
        logger: Logger,
    ) -> Self {
        let mapbox = &config.mapbox;

        let tiles: Box<dyn Tiles> = if mapbox.token.is_empty() {
            Box::new(HttpTiles::with_options(
                OpenStreetMap,
                HttpOptions::default(),
                egui_ctx.to_owned(),
            ))
        } else {
            Box::new(HttpTiles::with_options(
                Mapbox {
                    style: mapbox.mapbox_style(),
                    high_resolution: false,
                    access_token: mapbox.token.clone(),
                },
                HttpOptions::default(),
                egui_ctx.to_owned(),
            ))
        };

        let mut map_memory = MapMemory::default();
        if map_memory.set_zoom(mapbox.zoomlevel).is_err() {
            let _ = logger.warn("configured zoomlevel out of range, keeping default", false);
        }

        let subscriptions = StoreSubscriptions::attach(&store);
        let _ = logger.info("map view mounted", Color::Cyan, false);

        Self {
            tiles,
            map_memory,
            initial_position: Position::from_lat_lon(mapbox.location[0], mapbox.location[1]),
            store,
            navigator,
            logger,
            view: ChoroplethView::new(mapbox.label),
            interactions: Rc::new(RefCell::new(Interactions::default())),
            subscriptions,
            timeline: WidgetTimeline::new(),
            search_bar: WidgetSearchBar::new(),
            pinned_tooltip_pos: None,
            bootstrapped: false,
        }
    }

    /// Drains the store subscriptions and runs the matching operation:
    /// data/indicator/year re-render the choropleth, country focuses the
    /// selection, legend toggles the overlay.
    fn process_store_changes(&mut self, ctx: &Context) {
        // The store may have been populated before this view mounted; the
        // first frame renders whatever is already there.
        let data_changed = self.subscriptions.data.take() || !self.bootstrapped;
        let indicator_changed = self.subscriptions.indicator.take();
        let year_changed = self.subscriptions.year.take();
        self.bootstrapped = true;

        if data_changed || indicator_changed || year_changed {
            let store = self.store.borrow();
            self.view
                .update_choropleth(&store, ctx.screen_rect().width());
            drop(store);
            let _ = self.logger.info("choropleth refreshed", Color::Blue, false);
        }

        if self.subscriptions.country.take() {
            let focus = {
                let store = self.store.borrow();
                self.view.focus_country(&store)
            };
            if let Some(target) = focus {
                self.map_memory
                    .center_at(Position::from_lat_lon(target.center.0, target.center.1));
                let _ = self.map_memory.set_zoom(target.zoom);
            }
        }

        if self.subscriptions.legend.take() {
            let store = self.store.borrow();
            self.view.toggle_legend(&store);
        }
    }

    /// Applies what the countries plugin observed this frame: hover drives
    /// the tooltip, a click selects the country.
    fn process_interactions(&mut self) {
        let observed = {
            let mut interactions = self.interactions.borrow_mut();
            std::mem::take(&mut *interactions)
        };
        let now = Instant::now();

        match (observed.hovered, observed.hover_pos) {
            (Some(country), Some(pos)) => self.view.tooltip.on_hover(country, pos),
            _ => self.view.tooltip.on_hover_end(now),
        }

        if let Some(country) = observed.clicked {
            if let Some(rendered) = self.view.layer.layer().and_then(|l| l.find(&country)) {
                let (lat, lon) = rendered.shape.centroid();
                self.map_memory.center_at(Position::from_lat_lon(lat, lon));
                let _ = self
                    .map_memory
                    .set_zoom(zoom_for_bounds(&rendered.shape.bounds));
            }
            update_query(self.navigator.as_mut(), "country", &country);
            actions::change_selected_country(&self.store, &country);
            let _ = self.logger.info(
                &format!("country selected: {}", country),
                Color::Green,
                false,
            );
        }

        self.view.tooltip.tick(now);
        self.pinned_tooltip_pos = observed.pinned_pos;
    }

    fn draw_overlays(&mut self, ctx: &Context) {
        let tooltip = match self.view.tooltip.mode() {
            TooltipMode::Hover { country, pos } => Some((country.clone(), *pos)),
            TooltipMode::Pinned { country } => {
                self.pinned_tooltip_pos.map(|pos| (country.clone(), pos))
            }
            TooltipMode::Hidden => None,
        };
        if let Some((country, pos)) = tooltip {
            if let Some(rendered) = self.view.layer.layer().and_then(|l| l.find(&country)) {
                egui::Area::new("country_tooltip".into())
                    .fixed_pos(pos + egui::vec2(12.0, 12.0))
                    .order(egui::Order::Tooltip)
                    .show(ctx, |ui| {
                        egui::Frame::popup(&ctx.style()).show(ui, |ui| {
                            ui.label(egui::RichText::new(&rendered.tooltip.title).strong());
                            ui.label(&rendered.tooltip.line);
                        });
                    });
            }
        }

        if let LegendState::Shown(legend) = &self.view.legend {
            WidgetLegend::show(ctx, legend);
        }

        if let ControlState::Created(control) = &mut self.view.control {
            control.show(ctx);
        }

        self.timeline.show(ctx, &self.store);
        self.search_bar
            .show(ctx, &self.store, self.navigator.as_mut());
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_store_changes(ctx);

        ctx.request_repaint_after(Duration::from_millis(REPAINT_TICK_MS));

        let rimless = egui::Frame {
            fill: ctx.style().visuals.panel_fill,
            ..Default::default()
        };

        egui::CentralPanel::default()
            .frame(rimless)
            .show(ctx, |ui| {
                let tiles = self.tiles.as_mut();

                let mut map = Map::new(Some(tiles), &mut self.map_memory, self.initial_position);

                if let LayerState::Present(layer) = &self.view.layer {
                    let pinned = self.view.tooltip.pinned_country().map(str::to_string);
                    map = map.with_plugin(plugins::Countries::new(
                        layer,
                        self.interactions.clone(),
                        pinned,
                    ));

                    if let ControlState::Created(control) = &self.view.control {
                        if control.show_labels {
                            map = map.with_plugin(plugins::CountryLabels::new(layer));
                        }
                    }
                }

                ui.add(map);

                windows::zoom(ui, &mut self.map_memory);
            });

        self.process_interactions();
        self.draw_overlays(ctx);
    }
}

impl Drop for AtlasApp {
    fn drop(&mut self) {
        // Subscription handles go down with the app, which unsubscribes
        // from the store.
        let _ = self
            .logger
            .info("map view unmounted, subscriptions released", Color::Cyan, false);
    }
}
