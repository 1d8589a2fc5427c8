//! Catalog document model for the data.cms.gov open-data index.
//!
//! The catalog is the externally published `data.json` file. This crate only
//! reads it; nothing here mutates the document.

mod identifier;
mod layout;
mod model;

use std::path::{Path, PathBuf};

pub use identifier::extract_uuid;
pub use layout::ProjectLayout;
pub use model::{Catalog, ContactPoint, Dataset};
pub use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Load and parse the catalog document at `path`.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    tracing::info!("Loading datasets from: {}", path.display());

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let catalog: Catalog = serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::info!("Found {} datasets in catalog", catalog.dataset.len());
    Ok(catalog)
}
