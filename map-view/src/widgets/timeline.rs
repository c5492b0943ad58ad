use store::{actions, SharedStore};

/// Year slider for time-series indicators, anchored at the bottom center.
/// Presentation-only: reads the selection from the store and dispatches
/// `change_year` when the user drags the handle.
#[derive(Debug, Default)]
pub struct WidgetTimeline;

impl WidgetTimeline {
    pub fn new() -> Self {
        Self
    }

    pub fn show(&mut self, ctx: &egui::Context, store: &SharedStore) {
        let (years, selected_year) = {
            let store = store.borrow();
            let years = store
                .snapshot()
                .indicator_config(store.selected_indicator())
                .map(|config| config.years.clone())
                .unwrap_or_default();
            (years, store.selected_year())
        };
        if years.is_empty() {
            return;
        }

        let mut index = years
            .iter()
            .position(|year| *year == selected_year)
            .unwrap_or(years.len() - 1);

        egui::Area::new("timeline".into())
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -10.0])
            .show(ctx, |ui| {
                egui::Frame::window(&ctx.style()).show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.small(years[0].to_string());
                        let response = ui.add(
                            egui::Slider::new(&mut index, 0..=years.len() - 1)
                                .show_value(false),
                        );
                        ui.small(years[years.len() - 1].to_string());
                        ui.label(egui::RichText::new(years[index].to_string()).strong());

                        if response.changed() {
                            actions::change_year(store, years[index]);
                        }
                    });
                });
            });
    }
}
