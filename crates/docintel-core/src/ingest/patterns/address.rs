use std::sync::LazyLock;

use super::{candidates, Rule};
use crate::record::{collapse_whitespace, FieldList, FieldListBuilder};

static ADDRESS_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // 123 Main St, Springfield, IL 62704-1234
        Rule::new(
            r"(?i)\d+\s+[A-Za-z0-9\s,.-]+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Lane|Ln|Boulevard|Blvd|Court|Ct|Place|Pl)[,\s]+[A-Za-z\s]+,\s*[A-Z]{2}\s+\d{5}(?:-\d{4})?",
        ),
        // 123 Main Road, Springfield, 62704
        Rule::new(
            r"(?i)\d+\s+[A-Za-z0-9\s,.-]+(?:Street|St|Avenue|Ave|Road|Rd|Drive|Dr|Lane|Ln)[,\s]+[A-Za-z\s]+,\s*\d{5,}",
        ),
        // 12 MG Road, Indiranagar, Bengaluru, 560038
        Rule::new(
            r"(?i)[A-Za-z0-9\s,.-]+(?:Street|St|Avenue|Ave|Road|Rd|Colony|Nagar|Village)[,\s]+[A-Za-z\s]+,\s*[A-Za-z\s]+,\s*\d{6}",
        ),
        // 123 Main St, Springfield, IL
        Rule::new(
            r"(?i)\d+\s+[A-Za-z\s]+(?:Street|St|Avenue|Ave|Road|Rd),\s*[A-Za-z\s]+,\s*[A-Z]{2}",
        ),
    ]
});

const CONTEXT_KEYWORDS: [&str; 5] = ["address", "location", "residence", "office", "headquarters"];

static CONTEXT_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    CONTEXT_KEYWORDS
        .iter()
        .map(|keyword| Rule::capturing(&format!(r"(?i){keyword}[:\s]+([A-Za-z0-9\s,.-]{{10,200}})"), 1))
        .collect()
});

/// Text after an address keyword only counts when it looks like an address.
fn is_plausible_address(candidate: &str) -> bool {
    candidate.chars().count() > 10 && candidate.chars().any(|c| c.is_ascii_digit())
}

/// Street addresses with whitespace collapsed.
pub fn extract_addresses(text: &str) -> FieldList {
    let structural = candidates(&ADDRESS_RULES, text).map(collapse_whitespace);
    let contextual = candidates(&CONTEXT_RULES, text)
        .map(collapse_whitespace)
        .filter(|candidate| is_plausible_address(candidate));

    let mut addresses = FieldListBuilder::case_insensitive();
    addresses.extend(structural.chain(contextual));
    addresses.build()
}
