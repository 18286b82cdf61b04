//! Toolbar rendering for `ViewerApp`.
//!
//! Draws the back-to-catalog button, the dataset title, the breakdown
//! filter selector, the play/pause control, and the dark-mode toggle.

use std::time::Instant;

use eframe::egui;

use statscope::series::GLOBAL_FILTER;

use super::ViewerApp;

impl ViewerApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let in_viewer = self.view.is_some();
            if in_viewer || self.error.is_some() {
                if ui
                    .add(egui::Button::new("\u{25C0} Catalog").min_size(egui::vec2(28.0, 24.0)))
                    .clicked()
                {
                    self.back_to_catalog(ctx);
                }
            }

            match &self.view {
                Some(view) => ui.heading(&view.entry.title),
                None => ui.heading("Statistics Observatory"),
            };

            if let Some(view) = self.view.as_mut() {
                ui.separator();

                // Breakdown filter selector, defaulting to "global"
                if view.filters.is_available() {
                    let field_label = match view.filters.field.as_deref() {
                        Some("segment") => "segment",
                        Some("region") => "region",
                        Some("continent") => "continent",
                        Some("country") => "country",
                        _ => "filter",
                    };
                    ui.label(format!("Filter by {}:", field_label));

                    let mut selected = view.current_filter.clone();
                    egui::ComboBox::from_id_salt("dataset_filter")
                        .selected_text(filter_display(&selected))
                        .show_ui(ui, |ui| {
                            for value in view.filters.values.clone() {
                                let label = filter_display(&value);
                                ui.selectable_value(&mut selected, value, label);
                            }
                        });
                    if selected != view.current_filter {
                        view.set_filter(&selected);
                    }
                }

                // Play / pause
                let play_label = if view.playback.is_playing() {
                    "\u{23F8} Pause"
                } else {
                    "\u{25B6} Play"
                };
                let playable = !view.series.is_empty();
                if ui.add_enabled(playable, egui::Button::new(play_label)).clicked() {
                    view.toggle_play(Instant::now());
                }

                ui.toggle_value(&mut self.show_metadata, "Info");
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Dark mode toggle
                let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
                if ui.button(dark_label).clicked() {
                    self.dark_mode = !self.dark_mode;
                }
            });
        });
    }
}

fn filter_display(value: &str) -> String {
    if value == GLOBAL_FILTER {
        "Global (all)".to_string()
    } else {
        value.to_string()
    }
}
