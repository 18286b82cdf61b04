//! Dataset repository boundary: resolves catalog and dataset documents
//! against a base URL and validates datasets at the edge, so everything
//! past this point works with a well-formed [`DatasetDocument`].

use url::Url;

use crate::catalog::{Catalog, CatalogEntry};
use crate::dataset::{DatasetDocument, DatasetFile};
use crate::net::fetch::{fetch_json, parse_base};

/// Error while loading a view's data, tagged with the phase that failed.
#[derive(Debug)]
pub struct LoadError {
    pub message: String,
    pub phase: &'static str,
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.phase, self.message)
    }
}

pub struct DatasetRepository {
    base: Url,
}

impl DatasetRepository {
    pub fn new(base: &str) -> Result<Self, LoadError> {
        let base = parse_base(base).map_err(|e| LoadError {
            message: e.message,
            phase: "config",
        })?;
        Ok(DatasetRepository { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Fetch the catalog index.
    pub fn load_catalog(&self) -> Result<Catalog, LoadError> {
        let url = self.join("data/catalog.json")?;
        log::info!("loading catalog from {}", url);
        fetch_json(&url).map_err(|e| LoadError {
            message: format!("Could not load catalog: {}", e),
            phase: "fetch",
        })
    }

    /// Fetch and validate one dataset document.
    pub fn load_dataset(&self, entry: &CatalogEntry) -> Result<DatasetDocument, LoadError> {
        let url = self.dataset_url(entry)?;
        log::info!("loading dataset {} from {}", entry.id, url);
        let file: DatasetFile = fetch_json(&url).map_err(|e| LoadError {
            message: format!("Could not load dataset: {}", e),
            phase: "fetch",
        })?;
        DatasetDocument::from_file(file).map_err(|e| LoadError {
            message: e.to_string(),
            phase: "validate",
        })
    }

    /// Absolute URL of a dataset file. Catalog paths may carry a leading
    /// slash; it is stripped so they resolve under the base.
    pub fn dataset_url(&self, entry: &CatalogEntry) -> Result<Url, LoadError> {
        self.join(entry.file_path.trim_start_matches('/'))
    }

    fn join(&self, path: &str) -> Result<Url, LoadError> {
        self.base.join(path).map_err(|e| LoadError {
            message: format!("Invalid path {}: {}", path, e),
            phase: "fetch",
        })
    }
}
