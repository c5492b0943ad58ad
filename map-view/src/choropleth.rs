//! The choropleth controller: re-render, country focus, and legend toggle,
//! driven by store change notifications. Pure state transitions over the
//! explicit view state, so the whole contract is testable without a map.

use store::{Bounds, Store};

use crate::legend::{build_legend, LEGEND_MIN_VIEWPORT_WIDTH};
use crate::state::{ControlState, CountryLayer, LayerState, LegendState, RenderedCountry};
use crate::style::feature_style;
use crate::tooltip::{tooltip_content, TooltipState};
use crate::widgets::LayersControl;

/// Where the map should move to focus a country.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    /// `(lat, lon)` center of the country.
    pub center: (f64, f64),
    pub zoom: f64,
}

/// Zoom level that fits a country's bounds in the viewport. Derived from
/// the longitude span (the wider axis on web-mercator world maps), with the
/// latitude span doubled to account for the viewport aspect.
pub fn zoom_for_bounds(bounds: &Bounds) -> f64 {
    let span = bounds
        .lon_span()
        .max(bounds.lat_span() * 2.0)
        .max(1.0e-6);
    (360.0 / span).log2().clamp(2.0, 10.0)
}

#[derive(Debug, Default)]
pub struct ChoroplethView {
    pub layer: LayerState,
    pub legend: LegendState,
    pub control: ControlState,
    pub tooltip: TooltipState,
    labels_on_by_default: bool,
}

impl ChoroplethView {
    pub fn new(labels_on_by_default: bool) -> Self {
        Self {
            labels_on_by_default,
            ..Self::default()
        }
    }

    /// Rebuilds the polygon layer and the legend from the current snapshot
    /// and selection. A missing snapshot or an unconfigured indicator makes
    /// this a no-op: nothing is touched.
    pub fn update_choropleth(&mut self, store: &Store, viewport_width: f32) {
        let snapshot = store.snapshot();
        let indicator = store.selected_indicator();

        let config = match snapshot.indicator_config(indicator) {
            Some(config) if !snapshot.is_empty() => config,
            _ => return,
        };
        let year = store.selected_year();

        // Remove before add: any existing layer goes away first.
        self.layer = LayerState::Empty;

        // Same for the legend; narrow viewports never get one back.
        self.legend = LegendState::Hidden;
        if viewport_width > LEGEND_MIN_VIEWPORT_WIDTH {
            if let Some(legend) = build_legend(snapshot, indicator) {
                self.legend = LegendState::Shown(legend);
            }
        }

        if matches!(self.layer, LayerState::Empty) {
            let countries: Vec<RenderedCountry> = snapshot
                .geo
                .iter()
                .filter(|shape| snapshot.global.data.locations.contains_key(&shape.id))
                .map(|shape| RenderedCountry {
                    shape: shape.clone(),
                    style: feature_style(snapshot, &shape.id, indicator, config, year),
                    tooltip: tooltip_content(shape, snapshot, indicator, year),
                })
                .collect();
            self.layer = LayerState::Present(CountryLayer { countries });
        }

        // The layer-toggle control is created once, on the first render.
        if matches!(self.control, ControlState::NotCreated) {
            self.control = ControlState::Created(LayersControl::new(self.labels_on_by_default));
        }
    }

    /// Reacts to a selection change: pins the country's tooltip and returns
    /// where the map should move. No selection or no layer means no-op.
    pub fn focus_country(&mut self, store: &Store) -> Option<FocusTarget> {
        let country = store.selected_country()?;
        let layer = self.layer.layer()?;
        let rendered = layer.find(country)?;

        let target = FocusTarget {
            center: rendered.shape.centroid(),
            zoom: zoom_for_bounds(&rendered.shape.bounds),
        };
        self.tooltip.pin(rendered.shape.id.clone());
        Some(target)
    }

    /// Reacts to a legend-visibility change: always removes the legend,
    /// re-adds it only when the store reports it visible.
    pub fn toggle_legend(&mut self, store: &Store) {
        self.legend = LegendState::Hidden;
        if store.legend_status() {
            if let Some(legend) = build_legend(store.snapshot(), store.selected_indicator()) {
                self.legend = LegendState::Shown(legend);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use store::{
        Bounds, Configs, CountryShape, Datum, Global, GlobalData, IndicatorConfig, IndicatorKind,
        Meta, ScalarDatum, Snapshot, ValueRange,
    };

    fn shape(id: &str, name: &str) -> CountryShape {
        CountryShape {
            id: id.to_string(),
            name: name.to_string(),
            rings: vec![vec![[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]]],
            bounds: Bounds {
                min_lat: 0.0,
                max_lat: 10.0,
                min_lon: 0.0,
                max_lon: 10.0,
            },
        }
    }

    fn snapshot() -> Snapshot {
        let mut locations = HashMap::new();
        let mut france = HashMap::new();
        france.insert("gdp".to_string(), Datum::Scalar(ScalarDatum::Number(42.0)));
        locations.insert("france".to_string(), france);

        let mut ranges = HashMap::new();
        ranges.insert("gdp".to_string(), ValueRange { min: 0.0, max: 100.0 });

        let mut indicators = HashMap::new();
        indicators.insert(
            "gdp".to_string(),
            IndicatorConfig {
                name: "GDP".to_string(),
                kind: IndicatorKind::Number,
                years: vec![],
                colors: HashMap::new(),
            },
        );

        Snapshot {
            global: Global {
                meta: Meta { ranges },
                data: GlobalData { locations },
            },
            configs: Configs { indicators },
            geo: vec![shape("france", "France"), shape("atlantis", "Atlantis")],
        }
    }

    fn store_with(snapshot: Snapshot, indicator: &str) -> Store {
        use std::cell::RefCell;
        use std::rc::Rc;
        use store::actions;

        let store = Rc::new(RefCell::new(Store::new()));
        actions::load_snapshot(&store, snapshot);
        if !indicator.is_empty() {
            actions::change_indicator(&store, indicator);
        }
        Rc::try_unwrap(store).unwrap().into_inner()
    }

    const WIDE: f32 = 1280.0;
    const NARROW: f32 = 760.0;

    #[test]
    fn test_rerender_is_noop_without_indicator() {
        let store = store_with(snapshot(), "");
        let mut view = ChoroplethView::new(false);
        // Seed state that a re-render would normally replace.
        view.layer = LayerState::Present(CountryLayer::default());
        view.legend = LegendState::Shown(build_legend(store.snapshot(), "gdp").unwrap());

        view.update_choropleth(&store, WIDE);

        assert_eq!(view.layer, LayerState::Present(CountryLayer::default()));
        assert!(matches!(view.legend, LegendState::Shown(_)));
        assert!(matches!(view.control, ControlState::NotCreated));
    }

    #[test]
    fn test_rerender_is_noop_on_empty_snapshot() {
        let store = store_with(Snapshot::default(), "gdp");
        let mut view = ChoroplethView::new(false);

        view.update_choropleth(&store, WIDE);

        assert!(matches!(view.layer, LayerState::Empty));
        assert!(matches!(view.legend, LegendState::Hidden));
    }

    #[test]
    fn test_rerender_builds_layer_filtered_to_countries_with_data() {
        let store = store_with(snapshot(), "gdp");
        let mut view = ChoroplethView::new(false);

        view.update_choropleth(&store, WIDE);

        let layer = view.layer.layer().expect("layer should exist");
        assert_eq!(layer.countries.len(), 1);
        assert_eq!(layer.countries[0].shape.id, "france");
        assert!(matches!(view.legend, LegendState::Shown(_)));
        assert!(matches!(view.control, ControlState::Created(_)));
    }

    #[test]
    fn test_rerender_on_narrow_viewport_suppresses_legend() {
        let store = store_with(snapshot(), "gdp");
        let mut view = ChoroplethView::new(false);
        view.toggle_legend(&store);
        assert!(matches!(view.legend, LegendState::Shown(_)));

        view.update_choropleth(&store, NARROW);

        assert!(matches!(view.legend, LegendState::Hidden));
        assert!(view.layer.layer().is_some());
    }

    #[test]
    fn test_rerender_replaces_existing_layer() {
        let store = store_with(snapshot(), "gdp");
        let mut view = ChoroplethView::new(false);

        view.update_choropleth(&store, WIDE);
        view.update_choropleth(&store, WIDE);

        // Still exactly one layer with one country.
        assert_eq!(view.layer.layer().unwrap().countries.len(), 1);
    }

    #[test]
    fn test_control_is_created_once_and_keeps_its_state() {
        let store = store_with(snapshot(), "gdp");
        let mut view = ChoroplethView::new(false);

        view.update_choropleth(&store, WIDE);
        if let ControlState::Created(control) = &mut view.control {
            control.show_labels = true;
        }
        view.update_choropleth(&store, WIDE);

        match &view.control {
            ControlState::Created(control) => assert!(control.show_labels),
            other => panic!("expected created control, got {:?}", other),
        }
    }

    #[test]
    fn test_focus_without_selection_or_layer_is_noop() {
        let store = store_with(snapshot(), "gdp");
        let mut view = ChoroplethView::new(false);

        // No layer yet.
        assert!(view.focus_country(&store).is_none());

        view.update_choropleth(&store, WIDE);
        // Layer, but no selection.
        assert!(view.focus_country(&store).is_none());
    }

    #[test]
    fn test_focus_centers_on_selected_country_and_pins_tooltip() {
        use std::cell::RefCell;
        use std::rc::Rc;
        use store::actions;

        let store = Rc::new(RefCell::new(Store::new()));
        actions::load_snapshot(&store, snapshot());
        actions::change_indicator(&store, "gdp");

        let mut view = ChoroplethView::new(false);
        view.update_choropleth(&store.borrow(), WIDE);

        actions::change_selected_country(&store, "france");
        let target = view.focus_country(&store.borrow()).expect("focus target");

        assert_eq!(target.center, (5.0, 5.0));
        assert!(target.zoom > 2.0);
        assert_eq!(view.tooltip.pinned_country(), Some("france"));
    }

    #[test]
    fn test_focus_on_country_without_shape_is_noop() {
        use std::cell::RefCell;
        use std::rc::Rc;
        use store::actions;

        let store = Rc::new(RefCell::new(Store::new()));
        actions::load_snapshot(&store, snapshot());
        actions::change_indicator(&store, "gdp");

        let mut view = ChoroplethView::new(false);
        view.update_choropleth(&store.borrow(), WIDE);

        actions::change_selected_country(&store, "narnia");
        assert!(view.focus_country(&store.borrow()).is_none());
    }

    #[test]
    fn test_legend_toggle_follows_store_flag() {
        use std::cell::RefCell;
        use std::rc::Rc;
        use store::actions;

        let store = Rc::new(RefCell::new(Store::new()));
        actions::load_snapshot(&store, snapshot());
        actions::change_indicator(&store, "gdp");

        let mut view = ChoroplethView::new(false);
        view.toggle_legend(&store.borrow());
        assert!(matches!(view.legend, LegendState::Shown(_)));

        actions::toggle_legend(&store);
        view.toggle_legend(&store.borrow());
        assert!(matches!(view.legend, LegendState::Hidden));
    }

    #[test]
    fn test_zoom_for_bounds_is_larger_for_smaller_countries() {
        let small = Bounds {
            min_lat: 0.0,
            max_lat: 2.0,
            min_lon: 0.0,
            max_lon: 2.0,
        };
        let large = Bounds {
            min_lat: -30.0,
            max_lat: 30.0,
            min_lon: -40.0,
            max_lon: 40.0,
        };
        assert!(zoom_for_bounds(&small) > zoom_for_bounds(&large));
        assert!(zoom_for_bounds(&small) <= 10.0);
        assert!(zoom_for_bounds(&large) >= 2.0);
    }
}
