use store::{actions, SharedStore};

use crate::navigation::{update_query, Navigator};

const MAX_RESULTS: usize = 8;

/// Country search box in the top-left area, next to the layers control.
/// Matches are dispatched as a country selection and mirrored into the
/// navigation query, exactly like clicking the country on the map.
#[derive(Debug, Default)]
pub struct WidgetSearchBar {
    input: String,
}

impl WidgetSearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        store: &SharedStore,
        navigator: &mut dyn Navigator,
    ) {
        let matches: Vec<(String, String)> = if self.input.len() >= 2 {
            let needle = self.input.to_lowercase();
            store
                .borrow()
                .snapshot()
                .geo
                .iter()
                .filter(|shape| shape.name.to_lowercase().contains(&needle))
                .take(MAX_RESULTS)
                .map(|shape| (shape.id.clone(), shape.name.clone()))
                .collect()
        } else {
            Vec::new()
        };

        egui::Area::new("search_bar".into())
            .anchor(egui::Align2::LEFT_TOP, [10.0, 50.0])
            .show(ctx, |ui| {
                egui::Frame::window(&ctx.style()).show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut self.input)
                            .hint_text("Search country")
                            .desired_width(180.0),
                    );
                    for (id, name) in &matches {
                        if ui.button(name).clicked() {
                            update_query(navigator, "country", id);
                            actions::change_selected_country(store, id);
                            self.input.clear();
                        }
                    }
                });
            });
    }
}
