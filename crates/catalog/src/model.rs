use crate::identifier::extract_uuid;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// The catalog document. Keys other than `dataset` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub dataset: Vec<Dataset>,
}

impl Catalog {
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    /// Find the entry whose identifier carries `uuid`.
    pub fn find(&self, uuid: &Uuid) -> Option<&Dataset> {
        self.dataset.iter().find(|d| d.uuid().as_ref() == Some(uuid))
    }
}

/// A single catalog entry. Every field is optional in the published document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub keyword: Vec<String>,
    #[serde(default)]
    pub contact_point: Option<ContactPoint>,
    #[serde(default)]
    pub landing_page: Option<String>,
    #[serde(default)]
    pub described_by: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub references: Vec<String>,
}

impl Dataset {
    pub fn uuid(&self) -> Option<Uuid> {
        self.identifier.as_deref().and_then(extract_uuid)
    }

    /// Title for log lines.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }
}

/// Some published entries carry `null` where a list is expected.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPoint {
    #[serde(default, rename = "fn")]
    pub name: Option<String>,
    #[serde(default)]
    pub has_email: Option<String>,
}
