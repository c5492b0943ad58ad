mod countries;
mod labels;

pub use countries::Countries;
pub use labels::CountryLabels;

use egui::Pos2;

/// What the countries plugin observed this frame, handed back to the app
/// after the map is drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interactions {
    /// Country under the pointer, if any.
    pub hovered: Option<String>,
    /// Pointer position while hovering.
    pub hover_pos: Option<Pos2>,
    /// Country that received a click this frame.
    pub clicked: Option<String>,
    /// Screen position of the pinned tooltip's country, when one is pinned.
    pub pinned_pos: Option<Pos2>,
}
