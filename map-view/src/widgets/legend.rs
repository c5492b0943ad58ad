use egui::{Sense, Vec2};

use crate::legend::{Legend, LegendBody};
use crate::tooltip::format_number;

const SWATCH_SIZE: Vec2 = Vec2::new(18.0, 12.0);

/// Draws the legend overlay in the bottom-right corner of the map.
pub struct WidgetLegend;

impl WidgetLegend {
    pub fn show(ctx: &egui::Context, legend: &Legend) {
        egui::Area::new("legend".into())
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .show(ctx, |ui| {
                egui::Frame::window(&ctx.style()).show(ui, |ui| {
                    ui.label(egui::RichText::new(&legend.title).strong());
                    ui.add_space(4.0);

                    match &legend.body {
                        LegendBody::Ramp { swatches, min, max } => {
                            ui.horizontal(|ui| {
                                ui.spacing_mut().item_spacing.x = 0.0;
                                for color in swatches {
                                    let (rect, _) =
                                        ui.allocate_exact_size(SWATCH_SIZE, Sense::hover());
                                    ui.painter().rect_filled(rect, 0.0, *color);
                                }
                            });
                            ui.horizontal(|ui| {
                                ui.small(format_number(*min));
                                ui.add_space(SWATCH_SIZE.x * swatches_gap(swatches.len()));
                                ui.small(format_number(*max));
                            });
                        }
                        LegendBody::Categories(entries) => {
                            for (category, color) in entries {
                                ui.horizontal(|ui| {
                                    let (rect, _) =
                                        ui.allocate_exact_size(SWATCH_SIZE, Sense::hover());
                                    ui.painter().rect_filled(rect, 0.0, *color);
                                    ui.small(category);
                                });
                            }
                        }
                    }
                });
            });
    }
}

// Pushes the max label roughly under the last swatch.
fn swatches_gap(count: usize) -> f32 {
    count.saturating_sub(3) as f32
}
