//! dbt source descriptor generation.
//!
//! Reads the catalog plus any cached column records and renders one
//! `sources:` YML file per dataset.

mod generate;
mod metadata;
mod naming;
mod render;

use std::path::PathBuf;

pub use generate::{generate_sources, GenerateSummary, SourceGenerator};
pub use metadata::SourceMetadata;
pub use naming::{source_file_name, strip_mailto, table_name, tags};
pub use render::{render_source, wrap_description, MAX_LINE_LENGTH};

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Catalog(#[from] cmsdbt_catalog::CatalogError),
    #[error("failed to create output directory '{path}': {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, GenerateError>;
