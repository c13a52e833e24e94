use super::patterns::PatternFields;
use super::recognizer::{EntityField, Span};
use crate::record::{collapse_whitespace, FieldListBuilder, StructuredRecord};

/// Folds recognizer spans and pattern output into one record.
///
/// Span text is whitespace-collapsed and de-duplicated per field by exact
/// value, keeping the first occurrence. Spans whose label has no field are
/// dropped. Pattern fields are taken as they are.
pub fn structure(spans: &[Span], patterns: PatternFields) -> StructuredRecord {
    let mut names = FieldListBuilder::case_sensitive();
    let mut organizations = FieldListBuilder::case_sensitive();
    let mut locations = FieldListBuilder::case_sensitive();

    for span in spans {
        let Some(field) = span.field() else {
            tracing::trace!(label = %span.label, "dropping span without a record field");
            continue;
        };
        let text = collapse_whitespace(&span.text);
        match field {
            EntityField::Name => names.push(text),
            EntityField::Organization => organizations.push(text),
            EntityField::Location => locations.push(text),
        };
    }

    StructuredRecord {
        name: names.build(),
        organization: organizations.build(),
        location: locations.build(),
        dates: patterns.dates,
        emails: patterns.emails,
        phone_numbers: patterns.phone_numbers,
        ids: patterns.ids,
        money_salary: patterns.money_salary,
        urls: patterns.urls,
        file_numbers: patterns.file_numbers,
        percentages: patterns.percentages,
        job_titles: patterns.job_titles,
        skills: patterns.skills,
        addresses: patterns.addresses,
    }
}
