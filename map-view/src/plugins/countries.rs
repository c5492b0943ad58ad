use std::{cell::RefCell, rc::Rc};

use egui::epaint::{PathShape, PathStroke};
use egui::{Pos2, Response, Shape};
use walkers::{Plugin, Position, Projector};

use crate::state::CountryLayer;
use crate::style::{with_opacity, HOVER_FILL_OPACITY};

use super::Interactions;

/// Paints the choropleth polygon layer and reports hover and click hits.
pub struct Countries<'a> {
    layer: &'a CountryLayer,
    interactions: Rc<RefCell<Interactions>>,
    pinned: Option<String>,
}

impl<'a> Countries<'a> {
    pub fn new(
        layer: &'a CountryLayer,
        interactions: Rc<RefCell<Interactions>>,
        pinned: Option<String>,
    ) -> Self {
        Self {
            layer,
            interactions,
            pinned,
        }
    }
}

impl Plugin for Countries<'_> {
    fn run(self: Box<Self>, ui: &mut egui::Ui, response: &Response, projector: &Projector) {
        let pointer = response.hover_pos();

        // Project every ring to screen space once; both painting and hit
        // testing work on the projected points.
        let projected: Vec<Vec<Vec<Pos2>>> = self
            .layer
            .countries
            .iter()
            .map(|country| {
                country
                    .shape
                    .rings
                    .iter()
                    .map(|ring| {
                        ring.iter()
                            .map(|point| {
                                let position = Position::from_lat_lon(point[1], point[0]);
                                projector.project(position).to_pos2()
                            })
                            .collect()
                    })
                    .collect()
            })
            .collect();

        let hovered = pointer.and_then(|pos| {
            projected
                .iter()
                .position(|rings| rings.iter().any(|ring| point_in_ring(ring, pos)))
        });

        for (index, country) in self.layer.countries.iter().enumerate() {
            let style = &country.style;
            let fill_opacity = if hovered == Some(index) {
                HOVER_FILL_OPACITY
            } else {
                style.fill_opacity
            };
            let fill = with_opacity(style.fill_color, fill_opacity);
            let stroke = PathStroke::new(
                style.stroke_weight,
                with_opacity(style.stroke_color, style.stroke_opacity),
            );

            for ring in &projected[index] {
                ui.painter().add(Shape::Path(PathShape {
                    points: ring.clone(),
                    closed: true,
                    fill,
                    stroke: stroke.clone(),
                }));
            }
        }

        let mut interactions = self.interactions.borrow_mut();
        if let Some(index) = hovered {
            let id = self.layer.countries[index].shape.id.clone();
            if response.clicked() {
                interactions.clicked = Some(id.clone());
            }
            interactions.hovered = Some(id);
            interactions.hover_pos = pointer;
        }
        if let Some(pinned) = &self.pinned {
            if let Some(rendered) = self.layer.find(pinned) {
                let (lat, lon) = rendered.shape.centroid();
                let pos = projector.project(Position::from_lat_lon(lat, lon)).to_pos2();
                interactions.pinned_pos = Some(pos);
            }
        }
    }
}

/// Even-odd point-in-polygon test over one screen-space ring.
fn point_in_ring(ring: &[Pos2], point: Pos2) -> bool {
    let mut inside = false;
    let mut j = ring.len().wrapping_sub(1);
    for i in 0..ring.len() {
        let a = ring[i];
        let b = ring[j];
        let crosses = (a.y > point.y) != (b.y > point.y);
        if crosses {
            let x = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Pos2> {
        vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 10.0),
            Pos2::new(0.0, 10.0),
        ]
    }

    #[test]
    fn test_point_inside_square() {
        assert!(point_in_ring(&square(), Pos2::new(5.0, 5.0)));
    }

    #[test]
    fn test_point_outside_square() {
        assert!(!point_in_ring(&square(), Pos2::new(15.0, 5.0)));
        assert!(!point_in_ring(&square(), Pos2::new(5.0, -1.0)));
    }

    #[test]
    fn test_point_in_concave_ring() {
        // A "U" shape: the notch at the top middle is outside.
        let ring = vec![
            Pos2::new(0.0, 0.0),
            Pos2::new(10.0, 0.0),
            Pos2::new(10.0, 10.0),
            Pos2::new(7.0, 10.0),
            Pos2::new(7.0, 3.0),
            Pos2::new(3.0, 3.0),
            Pos2::new(3.0, 10.0),
            Pos2::new(0.0, 10.0),
        ];
        assert!(!point_in_ring(&ring, Pos2::new(5.0, 8.0)));
        assert!(point_in_ring(&ring, Pos2::new(1.5, 8.0)));
        assert!(point_in_ring(&ring, Pos2::new(5.0, 1.5)));
    }

    #[test]
    fn test_empty_ring_contains_nothing() {
        assert!(!point_in_ring(&[], Pos2::new(0.0, 0.0)));
    }
}
