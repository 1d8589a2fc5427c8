use clap::{Args, Parser, Subcommand};
use cmsdbt_catalog::ProjectLayout;
use cmsdbt_columns::{FetchOptions, HttpSourceConfig, DEFAULT_ENDPOINT};
use std::path::PathBuf;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "cmsdbt", version)]
#[command(about = "Maintain dbt source descriptors for data.cms.gov datasets")]
#[command(after_help = "Environment:\n  CMSDBT_ROOT   Project root (default: current directory)\n  RUST_LOG      Log filter (default: info)")]
pub struct Cli {
    /// Project root holding input/ and models/.
    #[arg(long, global = true, env = "CMSDBT_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Catalog document (default: <root>/input/data.json).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Column cache directory (default: <root>/input/columns).
    #[arg(long = "columns-dir", global = true)]
    pub columns_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch column metadata for catalog datasets into the cache
    FetchColumns(FetchArgs),
    /// Render dbt source YML files from the catalog and cached columns
    GenerateSources {
        /// Output directory (default: <root>/models/sources).
        #[arg(long = "output-dir")]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Fetch only this dataset UUID.
    #[arg(long)]
    pub uuid: Option<Uuid>,

    /// Re-fetch even if a cached file exists.
    #[arg(long)]
    pub force: bool,

    /// Seconds to wait between requests.
    #[arg(long, default_value = "1.0", value_parser = parse_seconds)]
    pub delay: Duration,

    /// Data-viewer API base URL.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Request timeout in seconds.
    #[arg(long, default_value = "30", value_parser = parse_timeout)]
    pub timeout: Duration,
}

impl Cli {
    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::from_root(&self.root)
            .with_catalog_path(self.catalog.clone())
            .with_columns_dir(self.columns_dir.clone())
    }
}

impl FetchArgs {
    pub fn options(&self) -> FetchOptions {
        FetchOptions {
            uuid: self.uuid,
            force: self.force,
            delay: self.delay,
        }
    }

    pub fn source_config(&self) -> HttpSourceConfig {
        HttpSourceConfig {
            endpoint: self.endpoint.clone(),
            timeout: self.timeout,
        }
    }
}

fn parse_seconds(s: &str) -> Result<Duration, String> {
    let secs: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number of seconds"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("'{s}' must be a non-negative number of seconds"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| format!("'{s}': {e}"))
}

fn parse_timeout(s: &str) -> Result<Duration, String> {
    let timeout = parse_seconds(s)?;
    if timeout.is_zero() {
        return Err("timeout must be greater than zero".to_string());
    }
    Ok(timeout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::try_parse_from(["cmsdbt", "fetch-columns"]).unwrap();
        let Command::FetchColumns(args) = cli.command else {
            panic!("expected fetch-columns");
        };

        let options = args.options();
        assert!(options.uuid.is_none());
        assert!(!options.force);
        assert_eq!(options.delay, Duration::from_secs(1));
        assert_eq!(args.source_config().endpoint, DEFAULT_ENDPOINT);
        assert_eq!(args.source_config().timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_fetch_flags() {
        let cli = Cli::try_parse_from([
            "cmsdbt",
            "fetch-columns",
            "--uuid",
            "9767cb68-8ea9-4f0b-8179-9431abc89f11",
            "--force",
            "--delay",
            "0.25",
        ])
        .unwrap();
        let Command::FetchColumns(args) = cli.command else {
            panic!("expected fetch-columns");
        };

        let options = args.options();
        assert_eq!(
            options.uuid.map(|u| u.to_string()).as_deref(),
            Some("9767cb68-8ea9-4f0b-8179-9431abc89f11")
        );
        assert!(options.force);
        assert_eq!(options.delay, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_uuid_and_delay_are_rejected() {
        assert!(Cli::try_parse_from(["cmsdbt", "fetch-columns", "--uuid", "nope"]).is_err());
        assert!(Cli::try_parse_from(["cmsdbt", "fetch-columns", "--delay", "-1"]).is_err());
        assert!(Cli::try_parse_from(["cmsdbt", "fetch-columns", "--delay", "soon"]).is_err());
        assert!(Cli::try_parse_from(["cmsdbt", "fetch-columns", "--delay", "1e20"]).is_err());
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["cmsdbt", "fetch-columns", "--timeout", "0"]).is_err());
        assert!(Cli::try_parse_from(["cmsdbt", "fetch-columns", "--timeout", "1e20"]).is_err());

        let cli = Cli::try_parse_from(["cmsdbt", "fetch-columns", "--timeout", "0.5"]).unwrap();
        let Command::FetchColumns(args) = cli.command else {
            panic!("expected fetch-columns");
        };
        assert_eq!(args.timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_layout_overrides() {
        let cli = Cli::try_parse_from([
            "cmsdbt",
            "--root",
            "/proj",
            "generate-sources",
            "--columns-dir",
            "/cache",
        ])
        .unwrap();

        let layout = cli.layout();
        assert_eq!(layout.catalog_path, PathBuf::from("/proj/input/data.json"));
        assert_eq!(layout.columns_dir, PathBuf::from("/cache"));
    }
}
