//! Stateless pattern extractors, one per structured output field.
//!
//! Every extractor has the same shape, `fn(&str) -> FieldList`: each of its
//! rules is applied to the whole text in turn, candidates are normalized, and
//! the first occurrence of each de-duplication key wins.

mod address;
mod career;
mod contact;
mod financial;
mod identifiers;
mod temporal;

use regex::Regex;
use serde::Serialize;

use crate::record::FieldList;

pub use address::extract_addresses;
pub use career::{extract_job_titles, extract_skills};
pub use contact::{extract_emails, extract_phone_numbers, extract_urls};
pub use financial::{extract_money_salary, extract_percentages};
pub use identifiers::{extract_file_numbers, extract_ids};
pub use temporal::extract_dates;

pub type PatternExtractor = fn(&str) -> FieldList;

/// Every extractor keyed by the record field it fills.
pub const EXTRACTORS: [(&str, PatternExtractor); 11] = [
    ("dates", extract_dates),
    ("emails", extract_emails),
    ("phone_numbers", extract_phone_numbers),
    ("ids", extract_ids),
    ("money_salary", extract_money_salary),
    ("urls", extract_urls),
    ("file_numbers", extract_file_numbers),
    ("percentages", extract_percentages),
    ("job_titles", extract_job_titles),
    ("skills", extract_skills),
    ("addresses", extract_addresses),
];

/// A compiled pattern and the capture group that holds its candidate.
pub(crate) struct Rule {
    regex: Regex,
    group: usize,
}

impl Rule {
    /// The whole match is the candidate.
    pub(crate) fn new(pattern: &str) -> Self {
        Self::capturing(pattern, 0)
    }

    /// Only the given capture group is the candidate; matches where the
    /// group did not participate yield nothing.
    pub(crate) fn capturing(pattern: &str, group: usize) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid built-in pattern {pattern:?}: {e}"));
        Self { regex, group }
    }

    pub(crate) fn candidates<'t>(&'t self, text: &'t str) -> Box<dyn Iterator<Item = &'t str> + 't> {
        let group = self.group;
        if group == 0 {
            Box::new(self.regex.find_iter(text).map(|m| m.as_str()))
        } else {
            Box::new(
                self.regex
                    .captures_iter(text)
                    .filter_map(move |caps| caps.get(group))
                    .map(|m| m.as_str()),
            )
        }
    }
}

/// Candidates of every rule, rule by rule, each in match order.
pub(crate) fn candidates<'t>(rules: &'t [Rule], text: &'t str) -> impl Iterator<Item = &'t str> + 't {
    rules.iter().flat_map(move |rule| rule.candidates(text))
}

/// Output of the whole pattern library for one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatternFields {
    pub dates: FieldList,
    pub emails: FieldList,
    pub phone_numbers: FieldList,
    pub ids: FieldList,
    pub money_salary: FieldList,
    pub urls: FieldList,
    pub file_numbers: FieldList,
    pub percentages: FieldList,
    pub job_titles: FieldList,
    pub skills: FieldList,
    pub addresses: FieldList,
}

impl PatternFields {
    pub fn extract(text: &str) -> Self {
        Self {
            dates: extract_dates(text),
            emails: extract_emails(text),
            phone_numbers: extract_phone_numbers(text),
            ids: extract_ids(text),
            money_salary: extract_money_salary(text),
            urls: extract_urls(text),
            file_numbers: extract_file_numbers(text),
            percentages: extract_percentages(text),
            job_titles: extract_job_titles(text),
            skills: extract_skills(text),
            addresses: extract_addresses(text),
        }
    }

    pub fn total(&self) -> usize {
        [
            &self.dates,
            &self.emails,
            &self.phone_numbers,
            &self.ids,
            &self.money_salary,
            &self.urls,
            &self.file_numbers,
            &self.percentages,
            &self.job_titles,
            &self.skills,
            &self.addresses,
        ]
        .iter()
        .map(|list| list.len())
        .sum()
    }
}
