use std::sync::LazyLock;

use super::{candidates, Rule};
use crate::record::{FieldList, FieldListBuilder};

static ID_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // SSN: 123-45-6789
        Rule::new(r"(?i)\b\d{3}-\d{2}-\d{4}\b"),
        // Aadhaar: 1234 5678 9012
        Rule::new(r"(?i)\b\d{4}\s?\d{4}\s?\d{4}\b"),
        // PAN-shaped
        Rule::new(r"(?i)\b\d{2}[A-Z]{5}\d{4}[A-Z]{1}\b"),
        // generic alphanumeric ID
        Rule::new(r"(?i)\b[A-Z]{2}[A-Z0-9]{4}\d{4}[A-Z0-9]{1}\b"),
        Rule::new(r"(?i)\b\d{12}\b"),
    ]
});

static FILE_NUMBER_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // File #12345, Case: ABC-123, Ref: 2024/001
        Rule::new(r"(?i)(?:file|case|ref|reference|document|doc|id|number|no)[:\s#]+[A-Z0-9\-/]+"),
        // DOC-2024-001
        Rule::new(r"(?i)\b[A-Z]{2,}[-/]\d{4}[-/]\d{3,}\b"),
        // 2024/001
        Rule::new(r"(?i)\b\d{4}[/-]\d{3,}\b"),
        // ABC1234
        Rule::new(r"(?i)\b[A-Z]{2,}\d{4,}\b"),
    ]
});

/// Identity numbers, upper-cased.
pub fn extract_ids(text: &str) -> FieldList {
    let mut ids = FieldListBuilder::case_insensitive();
    ids.extend(candidates(&ID_RULES, text).map(|id| id.trim().to_uppercase()));
    ids.build()
}

/// File, case and reference numbers in their original case.
pub fn extract_file_numbers(text: &str) -> FieldList {
    let mut numbers = FieldListBuilder::case_insensitive();
    numbers.extend(candidates(&FILE_NUMBER_RULES, text).map(|n| n.trim().to_string()));
    numbers.build()
}
