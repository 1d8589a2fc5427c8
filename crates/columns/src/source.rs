use crate::parse::parse_columns;
use crate::{Column, DatasetError, FetchError};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use uuid::Uuid;

pub const DEFAULT_ENDPOINT: &str = "https://data.cms.gov/data-api/v1/dataset";

const USER_AGENT: &str = concat!("cmsdbt/", env!("CARGO_PKG_VERSION"));

/// Where column metadata comes from.
///
/// Implementations issue at most one network request per call.
#[async_trait]
pub trait ColumnSource: Send + Sync {
    async fn fetch_columns(&self, uuid: &Uuid) -> Result<Vec<Column>, DatasetError>;
}

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    /// Base URL; the request goes to `{endpoint}/{uuid}/data-viewer`.
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// data.cms.gov data-viewer API client.
pub struct HttpColumnSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpColumnSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self::with_client(client, &config.endpoint))
    }

    /// Use a preconfigured client. Timeouts and headers are the caller's.
    pub fn with_client(client: reqwest::Client, endpoint: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, uuid: &Uuid) -> String {
        format!("{}/{uuid}/data-viewer", self.endpoint)
    }
}

fn request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Request(e.to_string())
    }
}

#[async_trait]
impl ColumnSource for HttpColumnSource {
    async fn fetch_columns(&self, uuid: &Uuid) -> Result<Vec<Column>, DatasetError> {
        let url = self.url_for(uuid);
        tracing::info!("Fetching: {}", url);

        let response = self.client.get(&url).send().await.map_err(request_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let remaining = response
                .headers()
                .get("X-RateLimit-Remaining")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown")
                .to_string();
            tracing::warn!(
                "Rate limit exceeded for {} - consider increasing delay (remaining: {})",
                uuid,
                remaining
            );
            return Err(FetchError::RateLimited { remaining }.into());
        }
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()).into());
        }

        let body = response.bytes().await.map_err(request_error)?;
        let columns = parse_columns(&body)?;

        tracing::debug!("Parsed {} columns for {}", columns.len(), uuid);
        Ok(columns)
    }
}
