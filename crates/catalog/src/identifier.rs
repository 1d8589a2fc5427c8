use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

static UUID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}")
        .expect("uuid pattern is valid")
});

/// Find the dataset UUID embedded in a catalog identifier.
///
/// Identifiers are API URLs such as
/// `https://data.cms.gov/data-api/v1/dataset/<uuid>/data-viewer`. The first
/// UUID-shaped run wins; hex digits may be in either case.
pub fn extract_uuid(identifier: &str) -> Option<Uuid> {
    UUID_PATTERN
        .find(identifier)
        .and_then(|m| Uuid::parse_str(m.as_str()).ok())
}
