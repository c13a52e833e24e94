use std::sync::LazyLock;

use super::{candidates, Rule};
use crate::record::{collapse_whitespace, FieldList, FieldListBuilder};

static JOB_TITLE_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            r"\b(?:Senior|Junior|Lead|Principal|Chief|Executive|Associate|Assistant)\s+[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*",
        ),
        Rule::new(
            r"\b[A-Z][a-z]+\s+(?:Engineer|Developer|Manager|Director|Analyst|Specialist|Consultant|Architect|Designer|Officer|Coordinator|Administrator|Supervisor|Technician)",
        ),
        Rule::new(
            r"\b(?:Software|Data|Systems|Product|Project|Operations|Marketing|Sales|HR|Finance|IT)\s+[A-Z][a-z]+",
        ),
        Rule::new(r"\b(?:CEO|CTO|CFO|COO|VP|President|Manager|Director|Head|Lead)\b"),
        // Position: Staff Accountant
        Rule::capturing(r"(?i)(?:position|role|title|designation|job)[:\s]+([A-Z][A-Za-z\s&]+)", 1),
    ]
});

static SKILL_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::new(
            r"(?i)\b(?:Python|Java|JavaScript|TypeScript|C\+\+|C#|Ruby|Go|Rust|Swift|Kotlin|PHP|SQL|HTML|CSS|R|Scala|Perl)\b",
        ),
        Rule::new(
            r"(?i)\b(?:React|Angular|Vue|Node\.js|Django|Flask|Spring|Laravel|Express|TensorFlow|PyTorch|Keras|Pandas|NumPy)\b",
        ),
        Rule::new(r"(?i)\b(?:AWS|Azure|GCP|Docker|Kubernetes|Jenkins|Git|CI/CD|Terraform|Ansible)\b"),
        Rule::new(
            r"(?i)\b(?:MySQL|PostgreSQL|MongoDB|Redis|Oracle|SQL Server|Cassandra|Elasticsearch)\b",
        ),
        Rule::new(
            r"(?i)\b(?:Machine Learning|Deep Learning|Data Science|Big Data|Analytics|Agile|Scrum|DevOps|Microservices|REST API|GraphQL)\b",
        ),
    ]
});

static SKILL_LIST_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![Rule::capturing(
        r"(?i)(?:skills?|technologies?|expertise|proficiency)[:\s]+([A-Za-z,\s&]+)",
        1,
    )]
});

/// Job titles with internal whitespace collapsed.
pub fn extract_job_titles(text: &str) -> FieldList {
    let mut titles = FieldListBuilder::case_insensitive();
    titles.extend(candidates(&JOB_TITLE_RULES, text).map(collapse_whitespace));
    titles.build()
}

/// Known skill keywords, then every entry of `Skills:`-style lists.
/// Single-character candidates are dropped.
pub fn extract_skills(text: &str) -> FieldList {
    let keywords = candidates(&SKILL_RULES, text);
    let listed = candidates(&SKILL_LIST_RULES, text).flat_map(|list| list.split(','));

    let mut skills = FieldListBuilder::case_insensitive();
    skills.extend(
        keywords
            .chain(listed)
            .map(str::trim)
            .filter(|skill| skill.chars().count() > 1)
            .map(str::to_string),
    );
    skills.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seniority_title() {
        let titles = extract_job_titles("She works as Senior Data Scientist now.");
        assert_eq!(titles.get(0), Some("Senior Data Scientist"));
        assert!(titles.contains("Data Scientist"), "{titles:?}");
    }

    #[test]
    fn test_executive_acronyms() {
        let titles = extract_job_titles("Reports to the CEO and the CFO.");
        assert_eq!(titles.as_slice(), ["CEO", "CFO"]);
    }

    #[test]
    fn test_context_title_is_collapsed() {
        let titles = extract_job_titles("position:  Staff\n  Accountant");
        assert!(titles.contains("Staff Accountant"), "{titles:?}");
    }

    #[test]
    fn test_titles_dedupe_ignoring_case() {
        let titles = extract_job_titles("Director. role: director");
        assert_eq!(titles.as_slice(), ["Director"]);
    }

    #[test]
    fn test_skill_keywords() {
        let skills = extract_skills("Built services in Rust and python on AWS with PostgreSQL.");
        assert_eq!(skills.as_slice(), ["Rust", "python", "AWS", "PostgreSQL"]);
    }

    #[test]
    fn test_skill_list_entries() {
        let skills = extract_skills("Skills: Rust, Leadership, Public Speaking");
        assert!(skills.contains("Rust"), "{skills:?}");
        assert!(skills.contains("Leadership"), "{skills:?}");
        assert!(skills.contains("Public Speaking"), "{skills:?}");
        assert_eq!(skills.iter().filter(|s| s.eq_ignore_ascii_case("rust")).count(), 1);
    }

    #[test]
    fn test_single_letter_skills_are_dropped() {
        let skills = extract_skills("Knows R and C");
        assert!(skills.is_empty(), "{skills:?}");
    }
}
