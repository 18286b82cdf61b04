//! Content-area rendering for `ViewerApp`.
//!
//! Contains the main view methods:
//!
//! - `draw_content`        — top-level dispatcher (spinner, error, views)
//! - `draw_catalog`        — landing view: category chips + dataset cards
//! - `draw_viewer`         — chart with progressive reveal, slider, keys
//! - `draw_metadata_panel` — description, coverage, source, field glossary

use std::time::Instant;

use eframe::egui;
use egui_plot::{AxisHints, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use statscope::catalog::{Category, CatalogEntry, ALL_CATEGORIES};
use statscope::format::format_value;

use super::ViewerApp;

const LINE_BLUE: egui::Color32 = egui::Color32::from_rgb(0x0e, 0xa5, 0xe9);
const LINE_RED: egui::Color32 = egui::Color32::from_rgb(0xef, 0x44, 0x44);

impl ViewerApp {
    // ── Dispatcher ───────────────────────────────────────────────────────────

    pub fn draw_content(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        if self.loading {
            ui.centered_and_justified(|ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() * 0.4);
                    ui.spinner();
                    match &self.pending_dataset {
                        Some(id) => ui.label(format!("Loading dataset {}...", id)),
                        None => ui.label("Loading catalog..."),
                    };
                });
            });
            return;
        }

        if let Some(message) = self.error.clone() {
            self.draw_error(ui, &message);
            return;
        }

        if self.view.is_some() {
            self.draw_viewer(ui, ctx);
        } else {
            self.draw_catalog(ui, ctx);
        }
    }

    /// Blocking error view: replaces the whole content area.
    fn draw_error(&mut self, ui: &mut egui::Ui, message: &str) {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.heading("Could not load this view");
            ui.add_space(8.0);
            ui.colored_label(LINE_RED, message);
            ui.add_space(16.0);
            ui.label("Check that the data server is reachable, then go back to the catalog.");
        });
    }

    // ── Catalog landing view ─────────────────────────────────────────────────

    fn draw_catalog(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(catalog) = &self.catalog else {
            ui.centered_and_justified(|ui| {
                ui.label("No catalog loaded.");
            });
            return;
        };

        let categories: Vec<Category> = catalog.categories.clone();
        let entries: Vec<CatalogEntry> = catalog
            .entries_in(&self.current_category)
            .cloned()
            .collect();

        // Category filter chips, "All" first
        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            ui.selectable_value(&mut self.current_category, ALL_CATEGORIES.to_string(), "All");
            for category in &categories {
                let label = if category.name.is_empty() {
                    category.id.clone()
                } else {
                    category.name.clone()
                };
                ui.selectable_value(&mut self.current_category, category.id.clone(), label);
            }
        });
        ui.separator();

        let mut clicked: Option<String> = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            for entry in &entries {
                if self.draw_catalog_card(ui, entry) {
                    clicked = Some(entry.id.clone());
                }
                ui.add_space(8.0);
            }
            if entries.is_empty() {
                ui.weak("No datasets in this category.");
            }
        });

        if let Some(id) = clicked {
            self.open_dataset(ctx, &id);
        }
    }

    /// One dataset card. Returns true when "View data" was clicked.
    fn draw_catalog_card(&self, ui: &mut egui::Ui, entry: &CatalogEntry) -> bool {
        let mut open = false;
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(12.0))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.heading(&entry.title);
                    if entry.featured {
                        ui.colored_label(egui::Color32::GOLD, "\u{2605} Featured");
                    }
                    if entry.has_filters {
                        ui.weak("\u{25A4} Filters");
                    }
                });
                if !entry.description.is_empty() {
                    ui.label(&entry.description);
                }

                let mut facts: Vec<String> = Vec::new();
                if !entry.temporal_coverage.is_empty() {
                    facts.push(entry.temporal_coverage.clone());
                }
                if let Some(records) = entry.records {
                    facts.push(format!("{} points", records));
                }
                if !entry.spatial_coverage.is_empty() {
                    facts.push(entry.spatial_coverage.clone());
                }
                if !facts.is_empty() {
                    ui.weak(facts.join(" \u{2022} "));
                }

                if ui.button("View data \u{2192}").clicked() {
                    open = true;
                }
            });
        open
    }

    // ── Dataset viewer ───────────────────────────────────────────────────────

    fn draw_viewer(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(view) = self.view.as_mut() else {
            return;
        };

        // Animation tick: advance if due, keep repainting until the next
        // deadline while playing.
        let now = Instant::now();
        view.tick(now);
        if let Some(due) = view.playback.next_tick() {
            ctx.request_repaint_after(due.saturating_duration_since(now));
        }

        // Keyboard navigation; rejected inside the controller while playing.
        let (left, right, home, end) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowLeft),
                i.key_pressed(egui::Key::ArrowRight),
                i.key_pressed(egui::Key::Home),
                i.key_pressed(egui::Key::End),
            )
        });
        if left {
            view.key_left();
        }
        if right {
            view.key_right();
        }
        if home {
            view.key_home();
        }
        if end {
            view.key_end();
        }

        if view.series.is_empty() {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.weak("No data for this selection.");
            });
            return;
        }

        let unit = view.unit().to_string();
        let is_temperature = unit.contains("°C");
        let color = if is_temperature { LINE_RED } else { LINE_BLUE };
        let index = view.current_index();

        // Progressive reveal: only the prefix up to the current index.
        let revealed: Vec<[f64; 2]> = view.series[..=index]
            .iter()
            .map(|p| [p.year as f64, p.value])
            .collect();

        // Stable axes: include the full series bounds so the chart does not
        // rescale while revealing.
        let (first_year, last_year) = match view.year_range() {
            Some(range) => range,
            None => return,
        };
        let (min_value, max_value) = view
            .series
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.value), hi.max(p.value))
            });

        let y_unit = unit.clone();
        let y_axis = AxisHints::new_y()
            .formatter(move |mark, _range| format_value(mark.value, &y_unit));
        let x_axis = AxisHints::new_x()
            .label("Year")
            .formatter(|mark, _range| format!("{:.0}", mark.value));

        let tooltip_unit = unit.clone();
        let tooltip_label = view.value_label().to_string();

        let plot = Plot::new("dataset_chart")
            .height(ui.available_height() * 0.6)
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .custom_x_axes(vec![x_axis])
            .custom_y_axes(vec![y_axis])
            .include_x(first_year as f64)
            .include_x(last_year as f64)
            .include_y(min_value)
            .include_y(max_value)
            .label_formatter(move |_name, point| {
                format!(
                    "{}\n{}: {}",
                    point.x.round(),
                    tooltip_label,
                    format_value(point.y, &tooltip_unit)
                )
            });

        let emphasized = view.current_point();
        let series_name = view.value_label().to_string();
        let point_unit = unit.clone();
        plot.show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(revealed))
                    .color(color)
                    .width(3.0)
                    .name(&series_name),
            );
            if let Some(point) = emphasized {
                let coord = [point.year as f64, point.value];
                plot_ui.points(
                    Points::new(vec![coord])
                        .radius(6.0)
                        .color(LINE_RED)
                        .name(&series_name),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(coord[0], coord[1]),
                        egui::RichText::new(format_value(point.value, &point_unit)).strong(),
                    )
                    .anchor(egui::Align2::CENTER_BOTTOM),
                );
            }
        });

        // Year scrubber
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let playing = view.playback.is_playing();
            let max_index = view.series.len() - 1;
            let mut slider_index = view.current_index();
            let response = ui.add_enabled(
                !playing,
                egui::Slider::new(&mut slider_index, 0..=max_index).show_value(false),
            );
            if response.changed() {
                view.scrub_to(slider_index);
            }
            if let Some(point) = view.current_point() {
                ui.strong(point.year.to_string());
            }
            ui.weak(format!("{} \u{2013} {}", first_year, last_year));
        });

        // Screen-reader live region: the current year/filter/value line.
        if !view.announcement.is_empty() {
            ui.add_space(4.0);
            ui.weak(&view.announcement);
        }
    }

    // ── Metadata side panel ──────────────────────────────────────────────────

    pub fn draw_metadata_panel(&mut self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            return;
        };
        let metadata = &view.doc.metadata;

        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.heading("About this dataset");
            ui.add_space(4.0);

            let description = if metadata.description.is_empty() {
                &view.entry.description
            } else {
                &metadata.description
            };
            if !description.is_empty() {
                ui.label(description);
                ui.add_space(8.0);
            }

            fact_row(ui, "Period", &fallback(&metadata.temporal_coverage, &view.entry.temporal_coverage));
            fact_row(ui, "Coverage", &fallback(&metadata.spatial_coverage, &view.entry.spatial_coverage));
            let source = if metadata.source.is_empty() {
                "Source not specified".to_string()
            } else {
                metadata.source.clone()
            };
            fact_row(ui, "Source", &source);
            fact_row(ui, "Updated", &fallback(&metadata.updated, &view.entry.last_updated));
            if !metadata.unit.is_empty() {
                fact_row(ui, "Unit", &metadata.unit);
            }

            if !view.doc.fields.is_empty() {
                ui.add_space(8.0);
                ui.separator();
                ui.strong("Fields");
                for field in &view.doc.fields {
                    ui.horizontal_wrapped(|ui| {
                        ui.strong(&field.name);
                        if !field.kind.is_empty() {
                            ui.weak(format!("({})", field.kind));
                        }
                    });
                    if !field.description.is_empty() {
                        ui.weak(&field.description);
                    }
                }
            }
        });
    }
}

fn fact_row(ui: &mut egui::Ui, label: &str, value: &str) {
    if value.is_empty() {
        return;
    }
    ui.horizontal_wrapped(|ui| {
        ui.strong(format!("{}:", label));
        ui.label(value);
    });
}

fn fallback(primary: &str, secondary: &str) -> String {
    if primary.is_empty() {
        secondary.to_string()
    } else {
        primary.to_string()
    }
}
