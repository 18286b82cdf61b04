//! Navigation methods for `ViewerApp`.
//!
//! Covers route resolution (catalog vs. a specific dataset) and the
//! asynchronous load lifecycle: a background thread fetches the catalog
//! and dataset JSON, the result arrives over a channel, and `check_fetch`
//! applies it on the next frame.

use std::sync::{mpsc, Arc};

use eframe::egui;

use statscope::catalog::Catalog;
use statscope::net::repo::{DatasetRepository, LoadError};
use statscope::viewer::ViewerState;

use super::{FetchOutcome, ViewerApp};

impl ViewerApp {
    /// Start a background load. With a dataset id this resolves the id
    /// against the catalog and loads the dataset; without one it loads the
    /// catalog alone. Only one load may be in flight.
    pub fn start_load(&mut self, ctx: &egui::Context, dataset_id: Option<String>) {
        if self.loading {
            return;
        }
        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let repo = Arc::clone(&self.repo);
        let cached_catalog = self.catalog.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = load_route(&repo, cached_catalog, dataset_id.as_deref());
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Catalog card clicked: remember the selection and load it.
    pub fn open_dataset(&mut self, ctx: &egui::Context, id: &str) {
        if self.loading {
            return;
        }
        self.pending_dataset = Some(id.to_string());
        self.start_load(ctx, Some(id.to_string()));
    }

    /// Leave the viewer for the catalog landing view.
    pub fn back_to_catalog(&mut self, ctx: &egui::Context) {
        if let Some(mut view) = self.view.take() {
            view.dispose();
        }
        self.error = None;
        self.set_window_title(ctx, super::APP_TITLE);
        if self.catalog.is_none() && !self.loading {
            self.start_load(ctx, None);
        }
    }

    /// Poll the load channel and apply the result when it arrives.
    pub fn check_fetch(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.fetch_rx else {
            return;
        };
        let Ok(result) = rx.try_recv() else {
            return;
        };

        if let Some(mut old) = self.view.take() {
            old.dispose();
        }

        match result {
            Ok(FetchOutcome::Catalog(catalog)) => {
                self.catalog = Some(catalog);
                self.set_window_title(ctx, super::APP_TITLE);
            }
            Ok(FetchOutcome::Dataset { catalog, entry, doc }) => {
                self.catalog = Some(catalog);
                self.last_viewed = Some(entry.id.clone());
                self.set_window_title(ctx, &Self::dataset_window_title(&entry.title));
                self.view = Some(ViewerState::new(entry, doc));
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.set_window_title(ctx, &format!("Error — {}", super::APP_TITLE));
                log::error!("load failed: {}", e);
            }
        }

        self.loading = false;
        self.fetch_rx = None;
        self.pending_dataset = None;
    }
}

/// Resolve a route on the background thread. An id that is not in the
/// catalog is a routing condition, not an error: it falls back to the
/// catalog view.
fn load_route(
    repo: &DatasetRepository,
    cached_catalog: Option<Catalog>,
    dataset_id: Option<&str>,
) -> Result<FetchOutcome, LoadError> {
    let catalog = match cached_catalog {
        Some(catalog) => catalog,
        None => repo.load_catalog()?,
    };

    let Some(id) = dataset_id else {
        return Ok(FetchOutcome::Catalog(catalog));
    };

    match catalog.find(id) {
        Some(entry) => {
            let entry = entry.clone();
            let doc = repo.load_dataset(&entry)?;
            Ok(FetchOutcome::Dataset { catalog, entry, doc })
        }
        None => {
            log::warn!("dataset {} not in catalog, showing the catalog instead", id);
            Ok(FetchOutcome::Catalog(catalog))
        }
    }
}
