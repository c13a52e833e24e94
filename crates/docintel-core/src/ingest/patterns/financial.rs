use std::sync::LazyLock;

use super::{candidates, Rule};
use crate::record::{FieldList, FieldListBuilder};

static MONEY_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // $50,000  $50K
        Rule::new(r"(?i)\$[\d,]+(?:\.\d{2})?(?:K|k|M|m)?\b"),
        // ₹50,000  ₹5L  ₹2Cr
        Rule::new(r"(?i)₹[\d,]+(?:\.\d{2})?(?:K|k|L|l|Cr|cr)?\b"),
        // USD 1,200
        Rule::new(r"(?i)(?:USD|INR|EUR|GBP|JPY)\s?[\d,]+(?:\.\d{2})?(?:K|k|M|m)?\b"),
        // 1,200 USD  500 rupees
        Rule::new(r"(?i)[\d,]+(?:\.\d{2})?\s?(?:USD|INR|EUR|GBP|JPY|dollars?|rupees?)\b"),
        // Salary: 85000
        Rule::new(
            r"(?i)(?:salary|pay|wage|income|compensation|CTC|package)[:\s]+[\$₹]?[\d,]+(?:\.\d{2})?(?:K|k|M|m|L|l)?",
        ),
        // 50000 per month
        Rule::new(r"(?i)[\d,]+(?:\.\d{2})?\s?(?:per\s+)?(?:year|month|annum|annually|monthly)"),
    ]
});

static PERCENT_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(r"(?i)\b\d+(?:\.\d+)?%"),
        Rule::new(r"(?i)\b\d+(?:\.\d+)?\s+percent\b"),
    ]
});

pub fn extract_money_salary(text: &str) -> FieldList {
    let mut money = FieldListBuilder::case_insensitive();
    money.extend(candidates(&MONEY_RULES, text).map(|m| m.trim().to_string()));
    money.build()
}

pub fn extract_percentages(text: &str) -> FieldList {
    let mut percentages = FieldListBuilder::case_insensitive();
    percentages.extend(candidates(&PERCENT_RULES, text).map(|p| p.trim().to_string()));
    percentages.build()
}
