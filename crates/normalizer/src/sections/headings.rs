//! Heading classification: maps a free-text line to a canonical section
//! key using a fixed synonym table. Deterministic and side-effect free;
//! every other stage of the pipeline leans on this.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::section::SectionKey;
use crate::text::word_count;

/// The synonym table. Every keyword is already normalized (lowercase,
/// `[a-z0-9&+/ ]` only) so lookups can be exact.
pub(crate) const HEADING_SYNONYMS: &[(SectionKey, &[&str])] = &[
    (
        SectionKey::About,
        &[
            "about",
            "about me",
            "summary",
            "professional summary",
            "career summary",
            "profile",
            "personal profile",
            "objective",
            "career objective",
            "contact",
            "contact information",
            "personal information",
            "personal details",
        ],
    ),
    (
        SectionKey::Skills,
        &[
            "skills",
            "technical skills",
            "key skills",
            "core competencies",
            "competencies",
            "areas of expertise",
            "technologies",
            "tech stack",
            "skills & abilities",
            "skills and abilities",
        ],
    ),
    (
        SectionKey::Experience,
        &[
            "experience",
            "work experience",
            "professional experience",
            "employment",
            "employment history",
            "work history",
            "career history",
            "professional background",
        ],
    ),
    (
        SectionKey::Education,
        &[
            "education",
            "academic background",
            "academics",
            "qualifications",
            "educational qualifications",
            "academic qualifications",
        ],
    ),
    (
        SectionKey::Projects,
        &[
            "projects",
            "personal projects",
            "key projects",
            "academic projects",
            "selected projects",
            "portfolio",
        ],
    ),
    (
        SectionKey::Achievements,
        &[
            "achievements",
            "accomplishments",
            "awards",
            "honors",
            "honours",
            "awards & honors",
            "awards and honors",
        ],
    ),
    (
        SectionKey::Certifications,
        &[
            "certifications",
            "certificates",
            "licenses",
            "licenses & certifications",
            "licenses and certifications",
            "courses",
            "training",
        ],
    ),
    (
        SectionKey::Volunteer,
        &[
            "volunteer",
            "volunteering",
            "volunteer experience",
            "volunteer work",
            "community service",
            "extracurricular activities",
            "extracurriculars",
        ],
    ),
    (
        SectionKey::Languages,
        &["languages", "language proficiency", "spoken languages"],
    ),
    (
        SectionKey::Other,
        &[
            "other",
            "additional information",
            "interests",
            "hobbies",
            "references",
            "miscellaneous",
            "declaration",
        ],
    ),
];

static SYNONYM_INDEX: Lazy<HashMap<&'static str, SectionKey>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (key, synonyms) in HEADING_SYNONYMS {
        for synonym in *synonyms {
            index.insert(*synonym, *key);
        }
    }
    index
});

/// Lowercases, strips trailing `:`/`-`, drops anything outside
/// `[a-z0-9&+/ ]` and collapses whitespace.
pub(crate) fn normalize_heading(line: &str) -> String {
    let mut s = line.trim().to_lowercase();
    while s.ends_with(':') || s.ends_with('-') || s.ends_with('–') || s.ends_with('—') {
        s.pop();
        s.truncate(s.trim_end().len());
    }
    let filtered: String = s
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '&' | '+' | '/') {
                c
            } else {
                ' '
            }
        })
        .collect();
    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Classifies a candidate heading line. Exact synonym match first; then a
/// starts-with match where the line may exceed the keyword by at most two
/// words (so "education details" matches but a body sentence that merely
/// begins with "experience" in a longer clause does not). Callers decide
/// whether a non-null result on a long or bulleted line should count.
pub fn classify_heading(line: &str) -> Option<SectionKey> {
    let normalized = normalize_heading(line);
    if normalized.is_empty() {
        return None;
    }
    if let Some(key) = SYNONYM_INDEX.get(normalized.as_str()) {
        return Some(*key);
    }

    let line_words = word_count(&normalized);
    let mut best: Option<(usize, SectionKey)> = None;
    for (key, synonyms) in HEADING_SYNONYMS {
        for keyword in *synonyms {
            if !starts_with_word(&normalized, keyword) {
                continue;
            }
            if line_words > word_count(keyword) + 2 {
                continue;
            }
            // Prefer the longest matching keyword; ties resolve in table
            // order so the result is deterministic.
            if best.map_or(true, |(len, _)| keyword.len() > len) {
                best = Some((keyword.len(), *key));
            }
        }
    }
    best.map(|(_, key)| key)
}

/// True when `s` starts with `prefix` ending at a word boundary.
fn starts_with_word(s: &str, prefix: &str) -> bool {
    match s.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with(' '),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_synonym_maps_to_its_key() {
        for (key, synonyms) in HEADING_SYNONYMS {
            for synonym in *synonyms {
                assert_eq!(
                    classify_heading(synonym),
                    Some(*key),
                    "synonym {synonym:?} did not classify"
                );
            }
        }
    }

    #[test]
    fn test_synonyms_are_unique_across_keys() {
        let mut seen = std::collections::HashSet::new();
        for (_, synonyms) in HEADING_SYNONYMS {
            for synonym in *synonyms {
                assert!(seen.insert(*synonym), "duplicate synonym {synonym:?}");
            }
        }
    }

    #[test]
    fn test_trailing_colon_and_case_are_ignored() {
        assert_eq!(classify_heading("WORK EXPERIENCE:"), Some(SectionKey::Experience));
        assert_eq!(classify_heading("Skills -"), Some(SectionKey::Skills));
    }

    #[test]
    fn test_decorated_headings_classify() {
        assert_eq!(classify_heading("== Education =="), Some(SectionKey::Education));
        assert_eq!(classify_heading("*Projects*"), Some(SectionKey::Projects));
    }

    #[test]
    fn test_starts_with_allows_two_extra_words() {
        assert_eq!(classify_heading("Education Details"), Some(SectionKey::Education));
        assert_eq!(classify_heading("Skills and tools"), Some(SectionKey::Skills));
    }

    #[test]
    fn test_starts_with_rejects_long_sentences() {
        assert_eq!(
            classify_heading("Experience working with large distributed teams daily"),
            None
        );
    }

    #[test]
    fn test_prefix_of_unrelated_word_is_not_a_match() {
        assert_eq!(classify_heading("Skillset overview summary notes"), None);
    }

    #[test]
    fn test_longest_keyword_wins() {
        // "volunteer experience" must not resolve via the shorter
        // "volunteer" prefix to some other key.
        assert_eq!(classify_heading("Volunteer Experience"), Some(SectionKey::Volunteer));
        assert_eq!(classify_heading("Work Experience"), Some(SectionKey::Experience));
    }

    #[test]
    fn test_unrelated_line_returns_none() {
        assert_eq!(classify_heading("Led a team of five engineers"), None);
        assert_eq!(classify_heading(""), None);
    }
}
