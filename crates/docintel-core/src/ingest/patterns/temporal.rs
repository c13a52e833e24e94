use std::sync::LazyLock;

use super::{candidates, Rule};
use crate::record::{FieldList, FieldListBuilder};

const MONTHS: &str =
    "January|February|March|April|May|June|July|August|September|October|November|December";

static DATE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // 03/15/2024, 15-03-24
        Rule::new(r"(?i)\b\d{1,2}[/-]\d{1,2}[/-]\d{2,4}\b"),
        // March 15, 2024
        Rule::new(&format!(r"(?i)\b(?:{MONTHS})\s+\d{{1,2}},?\s+\d{{4}}\b")),
        // 15 March 2024
        Rule::new(&format!(r"(?i)\b\d{{1,2}}\s+(?:{MONTHS})\s+\d{{4}}\b")),
        // 2024-03-15
        Rule::new(r"(?i)\b\d{4}-\d{2}-\d{2}\b"),
    ]
});

/// Dates as written; numeric, month-name and ISO forms are kept verbatim.
pub fn extract_dates(text: &str) -> FieldList {
    let mut dates = FieldListBuilder::case_insensitive();
    dates.extend(candidates(&DATE_RULES, text).map(str::to_string));
    dates.build()
}
