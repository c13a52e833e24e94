use std::sync::LazyLock;

use super::{candidates, Rule};
use crate::record::{collapse_whitespace, FieldList, FieldListBuilder};

static EMAIL_RULES: LazyLock<Vec<Rule>> =
    LazyLock::new(|| vec![Rule::new(r"(?i)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b")]);

static PHONE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        // international / loose grouping
        Rule::new(r"\+?\d{1,3}[-.\s]?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,9}"),
        // 415-555-0134, 415.555.0134
        Rule::new(r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b"),
        // +91 98765 43210
        Rule::new(r"\+?\d{1,3}[-.\s]?\d{5}[-.\s]?\d{5}\b"),
        // (415) 555-0134
        Rule::new(r"\(\d{3}\)\s?\d{3}[-.]?\d{4}"),
    ]
});

static HTTP_URL_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![Rule::new(
        r"(?i)https?://(?:[-\w.])+(?:[:\d]+)?(?:/(?:[\w/_.])*(?:\?(?:[\w&=%.])*)?(?:#(?:\w)*)?)?",
    )]
});

static WWW_URL_RULES: LazyLock<Vec<Rule>> =
    LazyLock::new(|| vec![Rule::new(r"(?i)www\.(?:[-\w.])+(?:/(?:[\w/_.])*)?")]);

pub fn extract_emails(text: &str) -> FieldList {
    let mut emails = FieldListBuilder::case_insensitive();
    emails.extend(candidates(&EMAIL_RULES, text).map(str::to_string));
    emails.build()
}

/// Phone numbers with whitespace runs collapsed; other punctuation is kept.
pub fn extract_phone_numbers(text: &str) -> FieldList {
    let mut phones = FieldListBuilder::case_insensitive();
    phones.extend(candidates(&PHONE_RULES, text).map(collapse_whitespace));
    phones.build()
}

/// `http(s)://` links first, then bare `www.` hosts given an `http://` scheme.
pub fn extract_urls(text: &str) -> FieldList {
    let mut urls = FieldListBuilder::case_insensitive();
    urls.extend(candidates(&HTTP_URL_RULES, text).map(str::to_string));
    urls.extend(candidates(&WWW_URL_RULES, text).map(|host| format!("http://{host}")));
    urls.build()
}
