use crate::cli::FetchArgs;
use anyhow::Context;
use cmsdbt_catalog::ProjectLayout;
use cmsdbt_columns::HttpColumnSource;

/// Per-dataset failures are reported in the log but do not fail the command.
pub async fn fetch_columns(layout: &ProjectLayout, args: &FetchArgs) -> anyhow::Result<()> {
    let source = HttpColumnSource::new(args.source_config())
        .context("failed to build HTTP client")?;

    let summary = cmsdbt_columns::fetch_columns(
        source,
        &layout.catalog_path,
        layout.columns_dir.clone(),
        &args.options(),
    )
    .await?;

    if summary.failed_count() > 0 {
        tracing::warn!(
            "{} of {} datasets were not cached",
            summary.failed_count(),
            summary.total
        );
    }
    Ok(())
}

pub fn generate_sources(layout: &ProjectLayout) -> anyhow::Result<()> {
    let summary = cmsdbt_sources::generate_sources(
        &layout.catalog_path,
        &layout.columns_dir,
        &layout.sources_dir,
    )
    .with_context(|| {
        format!(
            "source generation failed for catalog '{}'",
            layout.catalog_path.display()
        )
    })?;

    if !summary.failed.is_empty() {
        tracing::warn!(
            "{} of {} source files could not be written",
            summary.failed.len(),
            summary.total
        );
    }
    Ok(())
}
