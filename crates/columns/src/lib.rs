//! Column metadata fetcher.
//!
//! Populates a local cache of per-dataset column metadata from the
//! data.cms.gov data-viewer API. Requests are strictly sequential with a fixed
//! delay between them; datasets already cached are never requested again
//! unless a forced refresh is asked for.

mod cache;
mod fetcher;
mod parse;
mod record;
mod source;

use std::path::PathBuf;
use uuid::Uuid;

pub use cache::ColumnCache;
pub use fetcher::{fetch_columns, ColumnFetcher, FetchOptions, RunSummary};
pub use parse::parse_columns;
pub use record::{Column, ColumnRecord};
pub use source::{ColumnSource, HttpColumnSource, HttpSourceConfig, DEFAULT_ENDPOINT};

/// Network or HTTP failure for one dataset.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("rate limit exceeded (remaining: {remaining})")]
    RateLimited { remaining: String },
    #[error("HTTP error {0}")]
    Status(u16),
    #[error("request error: {0}")]
    Request(String),
}

/// The response body did not have the expected shape.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid JSON response: {0}")]
    InvalidJson(String),
    #[error("response has no meta.data_file_meta_data.tableSchema.descriptor.fields")]
    MissingFields,
    #[error("field {index} is missing '{key}'")]
    InvalidField { index: usize, key: &'static str },
}

/// Why a single catalog entry could not be cached. Never aborts a run.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("no dataset UUID in identifier for '{0}'")]
    MissingUuid(String),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("failed to write cache file '{path}': {source}")]
    CacheWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a whole run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    CatalogLoad(#[from] cmsdbt_catalog::CatalogError),
    #[error("dataset {0} not found in catalog")]
    NotFound(Uuid),
}

pub type Result<T> = std::result::Result<T, RunError>;
