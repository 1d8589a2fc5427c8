use crate::{Column, ParseError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DataViewerResponse {
    #[serde(default)]
    meta: Option<Meta>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    #[serde(default)]
    data_file_meta_data: Option<FileMeta>,
}

#[derive(Debug, Deserialize)]
struct FileMeta {
    #[serde(default, rename = "tableSchema")]
    table_schema: Option<TableSchema>,
}

#[derive(Debug, Deserialize)]
struct TableSchema {
    #[serde(default)]
    descriptor: Option<Descriptor>,
}

#[derive(Debug, Deserialize)]
struct Descriptor {
    #[serde(default)]
    fields: Option<Vec<RawField>>,
}

#[derive(Debug, Deserialize)]
struct RawField {
    #[serde(default)]
    name: Option<String>,
    #[serde(default, rename = "type")]
    data_type: Option<String>,
}

/// Extract the column list from a data-viewer response body.
///
/// Names are lowercased; types are kept as declared. A field without a name
/// or a type is rejected rather than defaulted.
pub fn parse_columns(body: &[u8]) -> Result<Vec<Column>, ParseError> {
    let response: DataViewerResponse =
        serde_json::from_slice(body).map_err(|e| ParseError::InvalidJson(e.to_string()))?;

    let fields = response
        .meta
        .and_then(|m| m.data_file_meta_data)
        .and_then(|f| f.table_schema)
        .and_then(|t| t.descriptor)
        .and_then(|d| d.fields)
        .ok_or(ParseError::MissingFields)?;

    fields
        .into_iter()
        .enumerate()
        .map(|(index, field)| {
            let name = field
                .name
                .ok_or(ParseError::InvalidField { index, key: "name" })?;
            let data_type = field
                .data_type
                .ok_or(ParseError::InvalidField { index, key: "type" })?;
            Ok(Column::new(name.to_lowercase(), data_type))
        })
        .collect()
}
