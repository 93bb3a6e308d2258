//! Suggestion engine: a fixed-order rule list over the normalized
//! document. Each rule emits at most one suggestion; the whole pass is
//! pure, so identical input always yields identical output.

use crate::config::NormalizerConfig;
use crate::models::cv::{StructuredCv, Suggestion};
use crate::text::word_count;

/// Derives gap-fill suggestions. `missing_keywords` is supplied by the
/// caller (typically from a job-description comparison done upstream) and
/// may be empty.
pub fn generate_suggestions(
    cv: &StructuredCv,
    missing_keywords: &[String],
    config: &NormalizerConfig,
) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    let summary_words = word_count(&cv.professional_summary);
    if summary_words == 0 {
        suggestions.push(Suggestion::new(
            "summary",
            "Add a professional summary near the top: two or three sentences covering your role, experience, and focus.",
        ));
    } else if summary_words < config.min_summary_words {
        suggestions.push(Suggestion::new(
            "summary",
            format!(
                "Expand the professional summary; {summary_words} words reads thin, aim for at least {}.",
                config.min_summary_words
            ),
        ));
    }

    if cv.skills.technical.is_empty() {
        suggestions.push(Suggestion::new(
            "skills",
            "Add a technical skills section listing languages, frameworks, and tools.",
        ));
    }
    if cv.skills.soft.is_empty() {
        suggestions.push(Suggestion::new(
            "skills",
            "Consider listing a few soft skills such as communication or leadership.",
        ));
    }

    if cv.work_experience.is_empty() {
        suggestions.push(Suggestion::new(
            "experience",
            "Add work experience entries with role, company, and dates.",
        ));
    } else {
        let thin = cv
            .work_experience
            .iter()
            .filter(|e| e.points.len() < config.min_points_per_entry)
            .count();
        if thin > 0 {
            suggestions.push(Suggestion::new(
                "experience",
                format!(
                    "{thin} experience entr{} fewer than {} bullet points; add measurable outcomes.",
                    if thin == 1 { "y has" } else { "ies have" },
                    config.min_points_per_entry
                ),
            ));
        }
    }

    let bare_projects = cv
        .projects
        .iter()
        .filter(|p| p.description.is_empty() && p.technologies.is_empty())
        .count();
    if bare_projects > 0 {
        suggestions.push(Suggestion::new(
            "projects",
            format!("{bare_projects} project(s) list only a name; describe what each does and what it was built with."),
        ));
    }

    if cv.education.iter().any(|e| e.year.is_empty()) && !cv.education.is_empty() {
        suggestions.push(Suggestion::new(
            "education",
            "Add graduation years to the education entries that lack them.",
        ));
    }

    if !missing_keywords.is_empty() {
        let top: Vec<&str> = missing_keywords.iter().take(3).map(String::as_str).collect();
        suggestions.push(Suggestion::new(
            "keywords",
            format!(
                "The target role mentions {} which the resume does not cover; work them in where truthful.",
                top.join(", ")
            ),
        ));
    }

    if cv.languages.is_empty() {
        suggestions.push(Suggestion::new(
            "languages",
            "List spoken languages if they are relevant to the role.",
        ));
    }

    if cv.additional_information.chars().count() > config.max_additional_info_chars {
        suggestions.push(Suggestion::new(
            "additional_info",
            "Trim the additional information section; keep only what supports the application.",
        ));
    }

    suggestions
}
