use egui::{Align2, Color32, FontId};
use walkers::{Plugin, Position, Projector};

use crate::state::CountryLayer;

/// The "Country labels" overlay: one name per rendered country, anchored at
/// the shape's centroid.
pub struct CountryLabels<'a> {
    layer: &'a CountryLayer,
}

impl<'a> CountryLabels<'a> {
    pub fn new(layer: &'a CountryLayer) -> Self {
        Self { layer }
    }
}

impl Plugin for CountryLabels<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, _response: &egui::Response, projector: &Projector) {
        for country in &self.layer.countries {
            let (lat, lon) = country.shape.centroid();
            let pos = projector.project(Position::from_lat_lon(lat, lon)).to_pos2();
            ui.painter().text(
                pos,
                Align2::CENTER_CENTER,
                &country.shape.name,
                FontId::proportional(11.0),
                Color32::from_gray(40),
            );
        }
    }
}
