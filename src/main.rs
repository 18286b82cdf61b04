use std::sync::Arc;

use eframe::egui;

use statscope::net::repo::DatasetRepository;

mod app;

use app::ViewerApp;

/// Where the static catalog + dataset JSON files are served from.
const DEFAULT_BASE_URL: &str = "http://localhost:8000";

fn main() {
    env_logger::init();

    // `statscope [--base=URL] [dataset-id]` — the dataset id argument is
    // the desktop analog of the site's `?id=` query parameter.
    let mut base_url =
        std::env::var("STATSCOPE_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    let mut startup_id: Option<String> = None;
    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--base=") {
            base_url = value.to_string();
        } else if !arg.starts_with('-') {
            startup_id = Some(arg);
        }
    }

    let repo = match DatasetRepository::new(&base_url) {
        Ok(repo) => Arc::new(repo),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(2);
        }
    };
    log::info!("serving datasets from {}", repo.base());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Statistics Observatory",
        options,
        Box::new(move |cc| Ok(Box::new(ViewerApp::new(cc, repo, startup_id)))),
    )
    .expect("Failed to start statscope");
}
