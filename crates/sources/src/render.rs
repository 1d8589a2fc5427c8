//! dbt source YML rendering.
//!
//! Output is assembled line by line, not through a YAML serializer:
//! descriptions are wrapped `|` blocks and keys keep a fixed order.

use crate::SourceMetadata;
use cmsdbt_columns::Column;

const STATIC_HEADER: &str = "\
sources:
  - name: Data.CMS.gov
    description: Public data released by the Centers for Medicare & Medicaid Services (CMS)
    meta:
      data_source_url: https://data.cms.gov
    tables:";

const DESCRIPTION_INDENT: usize = 10;
const COLUMNS_INDENT: usize = 8;
pub const MAX_LINE_LENGTH: usize = 120;

/// Render the complete descriptor for one table.
pub fn render_source(meta: &SourceMetadata, columns: &[Column]) -> String {
    let mut lines = vec![STATIC_HEADER.to_string()];

    lines.push(format!("      - name: {}", meta.table_name));

    lines.push("        tags:".to_string());
    for tag in &meta.tags {
        lines.push(format!("          - {tag}"));
    }

    lines.push("        description: |".to_string());
    lines.push(wrap_description(
        &meta.description,
        DESCRIPTION_INDENT,
        MAX_LINE_LENGTH,
    ));

    lines.push("        meta:".to_string());
    lines.push(format!("          cms_category: {}", meta.cms_category));
    lines.push(format!("          data_source_url: {}", meta.data_source_url));
    lines.push(format!(
        "          data_dictionary_url: {}",
        meta.data_dictionary_url
    ));
    lines.push(format!(
        "          data_methodology_url: {}",
        meta.data_methodology_url
    ));
    lines.push(format!("          sample_data_url: {}", meta.sample_data_url));
    lines.push(format!("          contact: {}", meta.contact));
    lines.push(format!("          dataset_uuid: {}", meta.uuid_label()));

    if !columns.is_empty() {
        lines.push(render_columns(columns, COLUMNS_INDENT));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Wrap a free-text description into indented lines for a `|` block.
///
/// Paragraphs are separated by blank lines in the input and in the output.
/// Within a paragraph whitespace is collapsed and words are packed greedily so
/// that no line (indent included) exceeds `max_line_length`, except a single
/// word that is longer than the limit on its own.
pub fn wrap_description(description: &str, indent: usize, max_line_length: usize) -> String {
    let pad = " ".repeat(indent);

    let paragraphs: Vec<&str> = description
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return format!("{pad}N/A");
    }

    let mut lines = Vec::new();
    for (idx, paragraph) in paragraphs.iter().enumerate() {
        let mut current: Vec<&str> = Vec::new();
        let mut current_length = indent;

        for word in paragraph.split_whitespace() {
            let word_length = word.chars().count() + 1;
            if current_length + word_length > max_line_length && !current.is_empty() {
                lines.push(format!("{pad}{}", current.join(" ")));
                current = vec![word];
                current_length = indent + word_length - 1;
            } else {
                current.push(word);
                current_length += word_length;
            }
        }

        if !current.is_empty() {
            lines.push(format!("{pad}{}", current.join(" ")));
        }

        if idx + 1 < paragraphs.len() {
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn render_columns(columns: &[Column], indent: usize) -> String {
    let mut lines = vec![format!("{}columns:", " ".repeat(indent))];

    for column in columns {
        let name = column.name.replace('\\', "\\\\").replace('"', "\\\"");
        lines.push(format!("{}- name: \"{name}\"", " ".repeat(indent + 2)));
        lines.push(format!(
            "{}type: {}",
            " ".repeat(indent + 4),
            column.data_type
        ));
    }

    lines.join("\n")
}
