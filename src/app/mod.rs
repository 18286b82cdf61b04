//! `ViewerApp` — the top-level egui application state.
//!
//! This module declares the `ViewerApp` struct, its constructor, and the
//! `eframe::App` impl. All other methods are split across the sibling
//! sub-modules:
//!
//! - `navigation` — route resolution, async catalog/dataset loading
//! - `toolbar`    — back button, filter select, play/pause, dark mode
//! - `content`    — catalog grid, chart view, metadata panel, error view

pub mod content;
pub mod navigation;
pub mod toolbar;

use std::sync::{mpsc, Arc};

use eframe::egui;

use statscope::catalog::{Catalog, CatalogEntry, ALL_CATEGORIES};
use statscope::dataset::DatasetDocument;
use statscope::net::repo::{DatasetRepository, LoadError};
use statscope::viewer::ViewerState;

const LAST_VIEWED_KEY: &str = "last_viewed_dataset";
const DARK_MODE_KEY: &str = "dark_mode";
const APP_TITLE: &str = "Statistics Observatory";

/// Result of a background load: either the catalog alone (landing view)
/// or the catalog plus a validated dataset (viewer view).
pub enum FetchOutcome {
    Catalog(Catalog),
    Dataset {
        catalog: Catalog,
        entry: CatalogEntry,
        doc: DatasetDocument,
    },
}

// ─── Application state ───────────────────────────────────────────────────────

pub struct ViewerApp {
    pub repo: Arc<DatasetRepository>,
    pub catalog: Option<Catalog>,
    pub current_category: String,
    /// Active dataset view; `None` means the catalog landing view.
    pub view: Option<ViewerState>,
    pub error: Option<String>,
    pub loading: bool,
    pub fetch_rx: Option<mpsc::Receiver<Result<FetchOutcome, LoadError>>>,
    /// Cross-view transfer slot: the dataset id selected on the catalog
    /// view, consumed when its load completes.
    pub pending_dataset: Option<String>,
    /// Persisted "last viewed" fallback for the next launch.
    pub last_viewed: Option<String>,
    pub show_metadata: bool,
    pub dark_mode: bool,
}

impl ViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        repo: Arc<DatasetRepository>,
        startup_id: Option<String>,
    ) -> Self {
        let dark_mode = cc
            .storage
            .and_then(|s| s.get_string(DARK_MODE_KEY))
            .map(|v| v == "true")
            .unwrap_or(false);
        let last_viewed = cc.storage.and_then(|s| s.get_string(LAST_VIEWED_KEY));

        let mut app = ViewerApp {
            repo,
            catalog: None,
            current_category: ALL_CATEGORIES.to_string(),
            view: None,
            error: None,
            loading: false,
            fetch_rx: None,
            pending_dataset: None,
            last_viewed,
            show_metadata: true,
            dark_mode,
        };

        // Route priority: startup argument, then the persisted last-viewed
        // dataset; with neither, land on the catalog.
        let initial = startup_id.or_else(|| app.last_viewed.clone());
        app.start_load(&cc.egui_ctx, initial);
        app
    }

    pub fn set_window_title(&self, ctx: &egui::Context, title: &str) {
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.to_string()));
    }

    pub fn dataset_window_title(entry_title: &str) -> String {
        format!("{} — {}", entry_title, APP_TITLE)
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_fetch(ctx);

        // Apply dark/light visuals
        if self.dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }

        // Top toolbar
        let ctx_clone = ctx.clone();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, &ctx_clone);
        });

        // Metadata side panel (viewer only)
        if self.view.is_some() && self.show_metadata && self.error.is_none() {
            egui::SidePanel::right("metadata")
                .default_width(280.0)
                .show(ctx, |ui| {
                    self.draw_metadata_panel(ui);
                });
        }

        // Main content area
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_content(ui, &ctx_clone);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(ref id) = self.last_viewed {
            storage.set_string(LAST_VIEWED_KEY, id.clone());
        }
        storage.set_string(DARK_MODE_KEY, self.dark_mode.to_string());
    }
}
