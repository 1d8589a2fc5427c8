use crate::naming::{strip_mailto, table_name, tags};
use cmsdbt_catalog::{Dataset, Uuid};

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN_TITLE: &str = "Unknown Dataset";
const TABLE_LIST_MARKER: &str = "Below is the list of tables";

/// Everything a source descriptor needs from one catalog entry, with
/// placeholders already filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    pub table_name: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub cms_category: String,
    pub data_source_url: String,
    pub data_dictionary_url: String,
    pub data_methodology_url: String,
    pub sample_data_url: String,
    pub contact: String,
    pub dataset_uuid: Option<Uuid>,
}

impl SourceMetadata {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let title = dataset.title.as_deref().unwrap_or(UNKNOWN_TITLE).to_string();

        let mut description = dataset
            .description
            .as_deref()
            .unwrap_or(NOT_AVAILABLE)
            .to_string();
        if let Some(pos) = description.find(TABLE_LIST_MARKER) {
            description = description[..pos].trim().to_string();
        }

        let contact_point = dataset.contact_point.as_ref();
        let cms_category = contact_point
            .and_then(|c| c.name.as_deref())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();
        let contact = strip_mailto(
            contact_point
                .and_then(|c| c.has_email.as_deref())
                .unwrap_or(NOT_AVAILABLE),
        );

        let data_methodology_url = match dataset.references.first() {
            Some(url) => url.clone(),
            None => {
                if dataset.title.is_some() {
                    tracing::warn!("Missing 'references' field for dataset: {}", title);
                }
                NOT_AVAILABLE.to_string()
            }
        };

        let identifier = dataset.identifier.as_deref().unwrap_or(NOT_AVAILABLE);
        let dataset_uuid = dataset.uuid();
        if dataset_uuid.is_none() {
            tracing::warn!("Could not extract UUID from identifier: {}", identifier);
        }

        Self {
            table_name: table_name(&title),
            description,
            tags: tags(&dataset.keyword),
            cms_category,
            data_source_url: or_not_available(dataset.landing_page.as_deref()),
            data_dictionary_url: or_not_available(dataset.described_by.as_deref()),
            data_methodology_url,
            sample_data_url: identifier.to_string(),
            contact,
            dataset_uuid,
            title,
        }
    }

    pub fn uuid_label(&self) -> String {
        self.dataset_uuid
            .map(|u| u.to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }
}

fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
