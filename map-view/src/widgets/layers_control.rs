/// The layer-toggle control in the top-left corner, offering the
/// country-label overlay. Created once on the first render and kept for the
/// lifetime of the view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayersControl {
    pub show_labels: bool,
}

impl LayersControl {
    pub fn new(show_labels: bool) -> Self {
        Self { show_labels }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        egui::Area::new("layers_control".into())
            .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
            .show(ctx, |ui| {
                egui::Frame::window(&ctx.style()).show(ui, |ui| {
                    ui.checkbox(&mut self.show_labels, "Country labels");
                });
            });
    }
}
