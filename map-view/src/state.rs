//! Explicit view state for the pieces the component attaches to the map.
//!
//! Layer, legend, and control existence is an enum, not a nullable handle:
//! re-render resets to the empty variant before rebuilding, so two layers or
//! two legends can never be attached at once.

use store::CountryShape;

use crate::legend::Legend;
use crate::style::FeatureStyle;
use crate::tooltip::TooltipContent;
use crate::widgets::LayersControl;

/// One country of the rendered layer: its shape plus the style and tooltip
/// computed for the current selection.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCountry {
    pub shape: CountryShape,
    pub style: FeatureStyle,
    pub tooltip: TooltipContent,
}

/// The rendered polygon layer: the subset of shapes with data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryLayer {
    pub countries: Vec<RenderedCountry>,
}

impl CountryLayer {
    pub fn find(&self, country_id: &str) -> Option<&RenderedCountry> {
        self.countries.iter().find(|c| c.shape.id == country_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LayerState {
    #[default]
    Empty,
    Present(CountryLayer),
}

impl LayerState {
    pub fn layer(&self) -> Option<&CountryLayer> {
        match self {
            LayerState::Empty => None,
            LayerState::Present(layer) => Some(layer),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum LegendState {
    #[default]
    Hidden,
    Shown(Legend),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ControlState {
    #[default]
    NotCreated,
    Created(LayersControl),
}
