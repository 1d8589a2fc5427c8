use crate::naming::source_file_name;
use crate::render::render_source;
use crate::{GenerateError, Result, SourceMetadata};
use cmsdbt_catalog::{load_catalog, Catalog, Dataset};
use cmsdbt_columns::{Column, ColumnCache};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Default)]
pub struct GenerateSummary {
    pub total: usize,
    pub written: Vec<PathBuf>,
    /// Dataset title and the write error.
    pub failed: Vec<(String, std::io::Error)>,
}

/// Writes one `cms_{table}_sources.yml` per catalog entry.
pub struct SourceGenerator {
    columns: ColumnCache,
    output_dir: PathBuf,
}

impl SourceGenerator {
    pub fn new(columns_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            columns: ColumnCache::new(columns_dir),
            output_dir: output_dir.into(),
        }
    }

    pub fn generate(&self, catalog: &Catalog) -> Result<GenerateSummary> {
        let total = catalog.len();
        let mut summary = GenerateSummary {
            total,
            ..Default::default()
        };

        if catalog.is_empty() {
            tracing::warn!("No datasets found in input JSON");
            return Ok(summary);
        }

        std::fs::create_dir_all(&self.output_dir).map_err(|e| GenerateError::CreateDir {
            path: self.output_dir.clone(),
            source: e,
        })?;
        tracing::info!("Output directory: {}", self.output_dir.display());

        let mut seen_tables = HashSet::new();
        for (idx, dataset) in catalog.dataset.iter().enumerate() {
            let meta = SourceMetadata::from_dataset(dataset);
            tracing::info!("Processing {}/{}: {}", idx + 1, total, meta.title);

            if !seen_tables.insert(meta.table_name.clone()) {
                tracing::warn!(
                    "Table name '{}' already generated; overwriting with '{}'",
                    meta.table_name,
                    meta.title
                );
            }

            match self.write_one(dataset, &meta) {
                Ok(path) => summary.written.push(path),
                Err(e) => {
                    tracing::error!("Error processing dataset {}: {}", idx + 1, e);
                    summary.failed.push((meta.title, e));
                }
            }
        }

        tracing::info!(
            "Successfully generated {}/{} YML files",
            summary.written.len(),
            total
        );
        tracing::info!("Output location: {}", self.output_dir.display());
        Ok(summary)
    }

    fn write_one(&self, dataset: &Dataset, meta: &SourceMetadata) -> std::io::Result<PathBuf> {
        let columns = self.cached_columns(dataset);
        let content = render_source(meta, &columns);

        let path = self.output_dir.join(source_file_name(&meta.table_name));
        std::fs::write(&path, content)?;

        tracing::debug!("Created: {} ({} columns)", path.display(), columns.len());
        Ok(path)
    }

    fn cached_columns(&self, dataset: &Dataset) -> Vec<Column> {
        let Some(uuid) = dataset.uuid() else {
            return Vec::new();
        };

        match self.columns.read(&uuid) {
            Ok(Some(record)) => record.fields,
            Ok(None) => {
                tracing::debug!("Column data not found for UUID {}", uuid);
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Error loading columns for {}: {}", uuid, e);
                Vec::new()
            }
        }
    }
}

/// Load the catalog and write a source descriptor for every entry.
pub fn generate_sources(
    catalog_path: &Path,
    columns_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateSummary> {
    let catalog = load_catalog(catalog_path)?;
    SourceGenerator::new(columns_dir, output_dir).generate(&catalog)
}
