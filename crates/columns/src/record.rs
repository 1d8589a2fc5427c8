use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// Contents of one `{uuid}.json` cache file.
///
/// `fields` keeps the column order declared by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub dataset_uuid: Uuid,
    pub fields: Vec<Column>,
}

impl ColumnRecord {
    pub fn new(dataset_uuid: Uuid, fields: Vec<Column>) -> Self {
        Self {
            dataset_uuid,
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_shape() {
        let uuid = Uuid::parse_str("9767cb68-8ea9-4f0b-8179-9431abc89f11").unwrap();
        let record = ColumnRecord::new(uuid, vec![Column::new("npi", "string")]);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["dataset_uuid"], "9767cb68-8ea9-4f0b-8179-9431abc89f11");
        assert_eq!(value["fields"][0]["name"], "npi");
        assert_eq!(value["fields"][0]["type"], "string");
    }
}
