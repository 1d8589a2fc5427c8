use crate::{ColumnCache, ColumnRecord, ColumnSource, DatasetError, Result, RunError};
use cmsdbt_catalog::{load_catalog, Catalog, Dataset};
use std::path::{Path, PathBuf};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Restrict the run to this one catalog entry.
    pub uuid: Option<Uuid>,
    /// Re-fetch entries that are already cached.
    pub force: bool,
    /// Pause between consecutive network requests.
    pub delay: Duration,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            uuid: None,
            force: false,
            delay: Duration::from_secs(1),
        }
    }
}

/// Outcome of a run. Every selected entry lands in exactly one list.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub total: usize,
    pub fetched: Vec<Uuid>,
    pub skipped: Vec<Uuid>,
    /// Entry label (UUID, or title when there is none) and the reason.
    pub failed: Vec<(String, DatasetError)>,
}

impl RunSummary {
    pub fn successful_count(&self) -> usize {
        self.fetched.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }

    fn log(&self) {
        tracing::info!("=== Final Summary ===");
        tracing::info!("Total datasets: {}", self.total);
        tracing::info!("Successful: {}", self.successful_count());
        tracing::info!("Failed: {}", self.failed_count());
        tracing::info!("Skipped (cached): {}", self.skipped_count());
    }
}

pub struct ColumnFetcher<S> {
    source: S,
    cache: ColumnCache,
}

impl<S: ColumnSource> ColumnFetcher<S> {
    pub fn new(source: S, cache: ColumnCache) -> Self {
        Self { source, cache }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &ColumnCache {
        &self.cache
    }

    /// Bring the cache up to date for the selected catalog entries.
    ///
    /// Only an unknown `options.uuid` fails the run; per-entry problems are
    /// logged and collected in the summary.
    pub async fn run(&self, catalog: &Catalog, options: &FetchOptions) -> Result<RunSummary> {
        let selected: Vec<&Dataset> = match options.uuid {
            Some(uuid) => {
                let dataset = catalog.find(&uuid).ok_or(RunError::NotFound(uuid))?;
                tracing::info!("=== Single dataset mode: {} ===", uuid);
                vec![dataset]
            }
            None => {
                tracing::info!("=== Full mode: {} datasets to process ===", catalog.len());
                catalog.dataset.iter().collect()
            }
        };

        match self.cache.remove_partial() {
            Ok(0) => {}
            Ok(n) => tracing::debug!("Removed {} partial cache files", n),
            Err(e) => tracing::warn!("Could not clean partial cache files: {}", e),
        }

        let total = selected.len();
        let mut summary = RunSummary {
            total,
            ..Default::default()
        };
        let mut requested = false;

        for (idx, dataset) in selected.into_iter().enumerate() {
            let idx = idx + 1;

            let Some(uuid) = dataset.uuid() else {
                let title = dataset.display_title().to_string();
                tracing::warn!("[{}/{}] No UUID found for: {}", idx, total, title);
                summary
                    .failed
                    .push((title.clone(), DatasetError::MissingUuid(title)));
                continue;
            };

            if !options.force && self.cache.contains(&uuid) {
                tracing::info!("[{}/{}] Skipping {} (already cached)", idx, total, uuid);
                summary.skipped.push(uuid);
                continue;
            }

            if requested && !options.delay.is_zero() {
                tokio::time::sleep(options.delay).await;
            }
            requested = true;

            tracing::info!("[{}/{}] Processing {}...", idx, total, uuid);
            match self.fetch_one(&uuid, options.uuid.is_some()).await {
                Ok(()) => summary.fetched.push(uuid),
                Err(e) => {
                    tracing::error!("[{}/{}] Failed {}: {}", idx, total, uuid, e);
                    summary.failed.push((uuid.to_string(), e));
                }
            }
        }

        summary.log();
        Ok(summary)
    }

    async fn fetch_one(
        &self,
        uuid: &Uuid,
        show_fields: bool,
    ) -> std::result::Result<(), DatasetError> {
        let columns = self.source.fetch_columns(uuid).await?;
        let record = ColumnRecord::new(*uuid, columns);

        let path = self
            .cache
            .write(&record)
            .map_err(|e| DatasetError::CacheWrite {
                path: self.cache.path_for(uuid),
                source: e,
            })?;

        tracing::info!("Saved {} columns to {}", record.fields.len(), path.display());
        if show_fields {
            for column in record.fields.iter().take(5) {
                tracing::info!("  - {} ({})", column.name, column.data_type);
            }
        }

        Ok(())
    }
}

/// Load the catalog at `catalog_path` and fetch column metadata into
/// `cache_dir`.
pub async fn fetch_columns<S: ColumnSource>(
    source: S,
    catalog_path: &Path,
    cache_dir: impl Into<PathBuf>,
    options: &FetchOptions,
) -> Result<RunSummary> {
    let catalog = load_catalog(catalog_path)?;
    ColumnFetcher::new(source, ColumnCache::new(cache_dir))
        .run(&catalog, options)
        .await
}
