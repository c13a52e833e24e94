//! Renders a [`StructuredRecord`] for download or terminal output.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::record::StructuredRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Xml,
    Text,
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "xml" => Ok(Self::Xml),
            "text" | "txt" => Ok(Self::Text),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

pub fn render(record: &StructuredRecord, format: ExportFormat) -> serde_json::Result<String> {
    match format {
        ExportFormat::Json => serde_json::to_string_pretty(record),
        ExportFormat::Csv => Ok(render_csv(record)),
        ExportFormat::Xml => Ok(render_xml(record)),
        ExportFormat::Text => Ok(render_text(record)),
    }
}

/// One column per field; row `i` holds each field's `i`-th value.
fn render_csv(record: &StructuredRecord) -> String {
    let fields = record.fields();
    let rows = fields.iter().map(|(_, list)| list.len()).max().unwrap_or(0);

    let mut out = StructuredRecord::FIELD_NAMES.join(",");
    out.push('\n');
    for i in 0..rows {
        let row: Vec<String> = fields
            .iter()
            .map(|(_, list)| format!("\"{}\"", list.get(i).unwrap_or("").replace('"', "\"\"")))
            .collect();
        out.push_str(&row.join(","));
        out.push('\n');
    }
    out
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn render_xml(record: &StructuredRecord) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<extraction>\n");
    for (key, list) in record.fields() {
        if list.is_empty() {
            continue;
        }
        let _ = writeln!(out, "  <{key}>");
        for value in list {
            let _ = writeln!(out, "    <item>{}</item>", escape_xml(value));
        }
        let _ = writeln!(out, "  </{key}>");
    }
    out.push_str("</extraction>");
    out
}

fn render_text(record: &StructuredRecord) -> String {
    let mut out = String::from("EXTRACTED DOCUMENT INFORMATION\n");
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");
    for (key, list) in record.fields() {
        if list.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{}:", key.replace('_', " ").to_uppercase());
        for value in list {
            let _ = writeln!(out, "  - {value}");
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldList;

    fn sample() -> StructuredRecord {
        StructuredRecord {
            name: FieldList::from(vec!["Ada \"The Countess\" Lovelace".to_string(), "Charles Babbage".to_string()]),
            emails: FieldList::from(vec!["ada@example.com".to_string()]),
            job_titles: FieldList::from(vec!["R&D <Lead>".to_string()]),
            ..StructuredRecord::default()
        }
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!("JSON".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert_eq!("txt".parse::<ExportFormat>().unwrap(), ExportFormat::Text);
        assert!("yaml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Text.to_string(), "text");
    }

    #[test]
    fn test_json_has_every_key() {
        let json = render(&sample(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 14);
        assert_eq!(value["emails"][0], "ada@example.com");
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_csv_columns_and_quoting() {
        let csv = render(&sample(), ExportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("name,organization,location,dates,emails"));
        assert!(lines[1].starts_with(r#""Ada ""The Countess"" Lovelace","","","","ada@example.com""#));
        assert!(lines[2].starts_with(r#""Charles Babbage","","","","""#));
        assert_eq!(lines[1].split("\",\"").count(), 14);
    }

    #[test]
    fn test_csv_of_empty_record_is_header_only() {
        let csv = render(&StructuredRecord::default(), ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_xml_escapes_and_skips_empty_fields() {
        let xml = render(&sample(), ExportFormat::Xml).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<extraction>\n"));
        assert!(xml.contains("    <item>R&amp;D &lt;Lead&gt;</item>\n"));
        assert!(xml.contains("  <emails>\n    <item>ada@example.com</item>\n  </emails>\n"));
        assert!(!xml.contains("<organization>"));
        assert!(xml.ends_with("</extraction>"));
    }

    #[test]
    fn test_text_layout() {
        let text = render(&sample(), ExportFormat::Text).unwrap();
        let expected_head = format!("EXTRACTED DOCUMENT INFORMATION\n{}\n\nNAME:\n", "=".repeat(50));
        assert!(text.starts_with(&expected_head));
        assert!(text.contains("JOB TITLES:\n  - R&D <Lead>\n\n"));
        assert!(!text.contains("ORGANIZATION"));
    }
}
