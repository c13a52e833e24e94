use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Ordered, de-duplicated values for one output field.
///
/// Order is first-seen order. Duplicate detection is decided by whoever builds
/// the list, see [`FieldListBuilder`]. Lists built from a plain `Vec`, including
/// deserialized ones, go through [`FieldListBuilder::case_insensitive`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct FieldList(Vec<String>);

impl FieldList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn contains(&self, value: &str) -> bool {
        self.0.iter().any(|v| v == value)
    }

}

impl From<Vec<String>> for FieldList {
    fn from(values: Vec<String>) -> Self {
        let mut builder = FieldListBuilder::case_insensitive();
        builder.extend(values);
        builder.build()
    }
}

impl From<FieldList> for Vec<String> {
    fn from(list: FieldList) -> Self {
        list.0
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for FieldList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Accumulates a [`FieldList`], dropping any value whose key was already seen.
pub struct FieldListBuilder {
    key: fn(&str) -> String,
    seen: HashSet<String>,
    values: Vec<String>,
}

impl FieldListBuilder {
    /// `key` maps a value to the string compared for duplicates.
    #[must_use]
    pub fn new(key: fn(&str) -> String) -> Self {
        Self {
            key,
            seen: HashSet::new(),
            values: Vec::new(),
        }
    }

    /// Values equal after lower-casing and collapsing whitespace are duplicates.
    /// The first spelling seen is the one stored.
    #[must_use]
    pub fn case_insensitive() -> Self {
        Self::new(folded)
    }

    #[must_use]
    pub fn case_sensitive() -> Self {
        Self::new(str::to_string)
    }

    /// Returns `true` when the value was new. Empty values are never stored.
    pub fn push(&mut self, value: String) -> bool {
        if value.is_empty() {
            return false;
        }
        if self.seen.insert((self.key)(&value)) {
            self.values.push(value);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn build(self) -> FieldList {
        FieldList(self.values)
    }
}

impl Extend<String> for FieldListBuilder {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Comparison key for case-insensitive de-duplication.
#[must_use]
pub fn folded(text: &str) -> String {
    collapse_whitespace(text).to_lowercase()
}

/// Collapses every whitespace run to a single space and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The complete result of one extraction. Every field is always present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredRecord {
    pub name: FieldList,
    pub organization: FieldList,
    pub location: FieldList,
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

impl StructuredRecord {
    pub const FIELD_NAMES: [&'static str; 14] = [
        "name",
        "organization",
        "location",
        "dates",
        "emails",
        "phone_numbers",
        "ids",
        "money_salary",
        "urls",
        "file_numbers",
        "percentages",
        "job_titles",
        "skills",
        "addresses",
    ];

    /// Fields paired with their serialized key, in output order.
    pub fn fields(&self) -> [(&'static str, &FieldList); 14] {
        [
            ("name", &self.name),
            ("organization", &self.organization),
            ("location", &self.location),
            ("dates", &self.dates),
            ("emails", &self.emails),
            ("phone_numbers", &self.phone_numbers),
            ("ids", &self.ids),
            ("money_salary", &self.money_salary),
            ("urls", &self.urls),
            ("file_numbers", &self.file_numbers),
            ("percentages", &self.percentages),
            ("job_titles", &self.job_titles),
            ("skills", &self.skills),
            ("addresses", &self.addresses),
        ]
    }

    pub fn field(&self, name: &str) -> Option<&FieldList> {
        self.fields()
            .into_iter()
            .find(|(key, _)| *key == name)
            .map(|(_, list)| list)
    }

    pub fn total(&self) -> usize {
        self.fields().iter().map(|(_, list)| list.len()).sum()
    }

    pub fn breakdown(&self) -> Vec<(&'static str, usize)> {
        self.fields()
            .iter()
            .map(|(key, list)| (*key, list.len()))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_first_seen() {
        let mut builder = FieldListBuilder::case_insensitive();
        assert!(builder.push("Rust".into()));
        assert!(!builder.push("RUST".into()));
        assert!(builder.push("Go".into()));
        assert!(!builder.push(String::new()));

        let list = builder.build();
        assert_eq!(list.as_slice(), ["Rust", "Go"]);
    }

    #[test]
    fn test_case_sensitive_builder() {
        let mut builder = FieldListBuilder::case_sensitive();
        builder.extend(["Paris".to_string(), "PARIS".to_string(), "Paris".to_string()]);
        assert_eq!(builder.build().as_slice(), ["Paris", "PARIS"]);
    }

    #[test]
    fn test_from_vec_applies_invariant() {
        let list = FieldList::from(vec![
            "Rust".to_string(),
            "rust".to_string(),
            String::new(),
            "Machine  Learning".to_string(),
            "machine learning".to_string(),
        ]);
        assert_eq!(list.as_slice(), ["Rust", "Machine  Learning"]);
    }

    #[test]
    fn test_deserialize_dedupes() {
        let list: FieldList = serde_json::from_str(r#"["a@b.io", "A@B.IO", "c@d.io"]"#).unwrap();
        assert_eq!(list.as_slice(), ["a@b.io", "c@d.io"]);
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["a@b.io","c@d.io"]"#);
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Senior \n\t Engineer "), "Senior Engineer");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_empty_record_serializes_every_key() {
        let record = StructuredRecord::default();
        let value = serde_json::to_value(&record).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 14);
        for key in StructuredRecord::FIELD_NAMES {
            assert_eq!(object[key], serde_json::json!([]), "{key}");
        }
    }

    #[test]
    fn test_fields_match_serialized_keys() {
        let record = StructuredRecord::default();
        let names: Vec<_> = record.fields().iter().map(|(k, _)| *k).collect();
        assert_eq!(names, StructuredRecord::FIELD_NAMES);
    }

    #[test]
    fn test_counts() {
        let mut emails = FieldListBuilder::case_insensitive();
        emails.push("a@example.com".into());
        emails.push("b@example.com".into());
        let record = StructuredRecord {
            emails: emails.build(),
            ..Default::default()
        };

        assert_eq!(record.total(), 2);
        assert!(!record.is_empty());
        assert_eq!(record.field("emails").map(FieldList::len), Some(2));
        assert!(record.breakdown().contains(&("emails", 2)));
        assert!(record.field("bogus").is_none());
    }
}
