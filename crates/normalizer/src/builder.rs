//! The orchestrator: wires the splitter, the extractors, and the
//! suggestion engine into one `normalize` call. This is the only entry
//! point client code uses directly.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::analysis::suggestions::generate_suggestions;
use crate::config::NormalizerConfig;
use crate::errors::NormalizeError;
use crate::extract::contact::extract_contact;
use crate::extract::education::parse_education;
use crate::extract::experience::parse_experience;
use crate::extract::list_items;
use crate::extract::projects::parse_projects;
use crate::extract::recognizer::{EntityRecognizer, HeuristicRecognizer};
use crate::extract::skills::{categorize_skills, split_skill_list};
use crate::models::cv::{ContactInfo, PreviewSection, StructuredCv, Suggestion};
use crate::models::section::SectionKey;
use crate::sections::splitter::split_sections;

/// A normalized document plus its derived views.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedCv {
    pub cv: StructuredCv,
    /// Ordered non-empty sections for UI display.
    pub preview: Vec<PreviewSection>,
    /// The preview sections assembled into one display string.
    pub preview_text: String,
    pub suggestions: Vec<Suggestion>,
}

impl NormalizedCv {
    /// Strict JSON projection of the whole result.
    pub fn to_payload(&self) -> Result<serde_json::Value, NormalizeError> {
        serde_json::to_value(self).map_err(Into::into)
    }
}

/// Stateless normalization pipeline. Holds only read-only configuration
/// and the injected entity recognizer, so one instance can serve
/// concurrent callers.
pub struct CvNormalizer {
    config: NormalizerConfig,
    recognizer: Arc<dyn EntityRecognizer>,
}

impl Default for CvNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

impl CvNormalizer {
    /// Pipeline with the built-in heuristic recognizer.
    pub fn new(config: NormalizerConfig) -> Self {
        Self::with_recognizer(config, Arc::new(HeuristicRecognizer))
    }

    /// Pipeline with a caller-supplied recognizer. The composition root
    /// owns the instance; pass a clone of its `Arc`.
    pub fn with_recognizer(config: NormalizerConfig, recognizer: Arc<dyn EntityRecognizer>) -> Self {
        Self { config, recognizer }
    }

    /// Normalizes raw resume text into a fresh [`NormalizedCv`].
    ///
    /// Never fails: an empty or unstructured document yields a result with
    /// empty fields rather than an error.
    ///
    /// ```
    /// use cv_normalizer::CvNormalizer;
    ///
    /// let out = CvNormalizer::default()
    ///     .normalize("Jane Doe\njane@example.com\n\nSkills: Python, SQL");
    /// assert_eq!(out.cv.contact_information.email, "jane@example.com");
    /// assert!(out.cv.skills.technical.iter().any(|s| s == "Python"));
    /// ```
    pub fn normalize(&self, raw_text: &str) -> NormalizedCv {
        self.normalize_with_keywords(raw_text, &[])
    }

    /// Like [`normalize`](Self::normalize), threading a missing-keyword
    /// list (computed upstream against a target role) into the suggestion
    /// engine.
    pub fn normalize_with_keywords(
        &self,
        raw_text: &str,
        missing_keywords: &[String],
    ) -> NormalizedCv {
        let sections = split_sections(raw_text, &self.config);
        debug!(
            about = !sections.is_empty_section(SectionKey::About),
            skills = !sections.is_empty_section(SectionKey::Skills),
            experience = !sections.is_empty_section(SectionKey::Experience),
            "split raw text into sections"
        );

        let contact = extract_contact(
            sections.get(SectionKey::About),
            raw_text,
            self.recognizer.as_ref(),
            &self.config,
        );
        let professional_summary = derive_summary(sections.get(SectionKey::About), &contact);

        let cv = StructuredCv {
            professional_summary,
            skills: categorize_skills(&split_skill_list(sections.get(SectionKey::Skills))),
            work_experience: parse_experience(sections.get(SectionKey::Experience), &self.config),
            projects: parse_projects(sections.get(SectionKey::Projects)),
            education: parse_education(sections.get(SectionKey::Education)),
            certifications: list_items(sections.get(SectionKey::Certifications)),
            achievements: list_items(sections.get(SectionKey::Achievements)),
            languages: split_language_list(sections.get(SectionKey::Languages)),
            volunteer_experience: parse_experience(sections.get(SectionKey::Volunteer), &self.config),
            additional_information: sections.get(SectionKey::Other).trim().to_string(),
            contact_information: contact,
        };

        let preview = build_preview(&cv);
        let preview_text = assemble_preview_text(&preview);
        let suggestions = generate_suggestions(&cv, missing_keywords, &self.config);
        debug!(
            sections = preview.len(),
            suggestions = suggestions.len(),
            "normalization complete"
        );

        NormalizedCv { cv, preview, preview_text, suggestions }
    }
}

/// The professional summary is the about block minus contact lines,
/// label-only lines, and placeholders.
pub(crate) fn derive_summary(about_text: &str, contact: &ContactInfo) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in about_text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.contains('@') || line.contains("http") || line.contains("www.") {
            continue;
        }
        if line.chars().filter(|c| c.is_ascii_digit()).count() >= 7 {
            continue;
        }
        if !contact.name.is_empty() && line == contact.name {
            continue;
        }
        if !contact.location.is_empty() && line == contact.location {
            continue;
        }
        if regex!(r"(?i)^(?:name|phone|mobile|email|address|location|d\.?o\.?b\.?|date of birth)\s*[:\-]").is_match(line)
        {
            continue;
        }
        if crate::text::is_placeholder(line) {
            continue;
        }
        kept.push(line);
    }
    kept.join("\n").trim().to_string()
}

/// Languages usually arrive as one comma-separated line.
fn split_language_list(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut languages = Vec::new();
    for item in split_skill_list(raw) {
        // "English (fluent)" style annotations stay intact.
        if seen.insert(item.to_lowercase()) {
            languages.push(item);
        }
    }
    languages
}

fn build_preview(cv: &StructuredCv) -> Vec<PreviewSection> {
    SectionKey::ALL
        .iter()
        .filter_map(|key| {
            let content = section_content(cv, *key);
            if content.trim().is_empty() {
                return None;
            }
            Some(PreviewSection {
                key: *key,
                label: key.label().to_string(),
                content,
            })
        })
        .collect()
}

fn section_content(cv: &StructuredCv, key: SectionKey) -> String {
    match key {
        SectionKey::About => about_content(cv),
        SectionKey::Skills => {
            let mut lines = Vec::new();
            if !cv.skills.technical.is_empty() {
                lines.push(format!("Technical: {}", cv.skills.technical.join(", ")));
            }
            if !cv.skills.soft.is_empty() {
                lines.push(format!("Soft: {}", cv.skills.soft.join(", ")));
            }
            if !cv.skills.other.is_empty() {
                lines.push(format!("Other: {}", cv.skills.other.join(", ")));
            }
            lines.join("\n")
        }
        SectionKey::Experience => experience_content(&cv.work_experience),
        SectionKey::Education => cv
            .education
            .iter()
            .map(|e| {
                let mut line = [e.degree.as_str(), e.school.as_str()]
                    .iter()
                    .filter(|s| !s.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ");
                if !e.year.is_empty() {
                    line.push_str(&format!(" ({})", e.year));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n"),
        SectionKey::Projects => cv
            .projects
            .iter()
            .map(|p| {
                let mut lines = Vec::new();
                match (p.name.is_empty(), p.description.is_empty()) {
                    (false, false) => lines.push(format!("{}: {}", p.name, p.description)),
                    (false, true) => lines.push(p.name.clone()),
                    (true, false) => lines.push(p.description.clone()),
                    (true, true) => {}
                }
                if !p.technologies.is_empty() {
                    lines.push(format!("Technologies: {}", p.technologies.join(", ")));
                }
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
        SectionKey::Achievements => bullet_lines(&cv.achievements),
        SectionKey::Certifications => bullet_lines(&cv.certifications),
        SectionKey::Volunteer => experience_content(&cv.volunteer_experience),
        SectionKey::Languages => cv.languages.join(", "),
        SectionKey::Other => cv.additional_information.clone(),
    }
}

fn about_content(cv: &StructuredCv) -> String {
    let c = &cv.contact_information;
    let mut lines = Vec::new();
    if !c.name.is_empty() {
        lines.push(c.name.clone());
    }
    let reach: Vec<&str> = [c.email.as_str(), c.phone.as_str(), c.location.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !reach.is_empty() {
        lines.push(reach.join(" | "));
    }
    let links: Vec<&str> = [c.linkedin.as_str(), c.github.as_str(), c.website.as_str()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
    if !links.is_empty() {
        lines.push(links.join(" | "));
    }
    if !cv.professional_summary.is_empty() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.push(cv.professional_summary.clone());
    }
    lines.join("\n")
}

fn experience_content(entries: &[crate::models::cv::ExperienceEntry]) -> String {
    entries
        .iter()
        .map(|e| {
            let mut header = match (e.title.is_empty(), e.company.is_empty()) {
                (false, false) => format!("{} at {}", e.title, e.company),
                (false, true) => e.title.clone(),
                (true, false) => e.company.clone(),
                (true, true) => String::new(),
            };
            if !e.dates.is_empty() {
                header.push_str(&format!(" ({})", e.dates));
            }
            if !e.location.is_empty() {
                header.push_str(&format!(", {}", e.location));
            }
            let mut lines = vec![header];
            lines.extend(e.points.iter().map(|p| format!("- {p}")));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn bullet_lines(items: &[String]) -> String {
    items
        .iter()
        .map(|i| format!("- {i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn assemble_preview_text(preview: &[PreviewSection]) -> String {
    preview
        .iter()
        .map(|section| format!("{}\n{}", section.label, section.content))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Jane Doe\njane@example.com\n+1 (555) 123-4567\n\nProfessional Summary\nBackend engineer focused on storage systems and reliability.\n\nSkills\nPython, SQL, Leadership\n\nExperience\nSoftware Engineer at Acme Corp (2020-2023)\n- Led development of X\n- Improved performance by 30%\n\nEducation\nBSc Computer Science - Top University (2018)\n\nLanguages\nEnglish, French";

    fn normalizer() -> CvNormalizer {
        CvNormalizer::default()
    }

    #[test]
    fn test_full_document_end_to_end() {
        let out = normalizer().normalize(SAMPLE);
        let cv = &out.cv;
        assert_eq!(cv.contact_information.name, "Jane Doe");
        assert_eq!(cv.contact_information.email, "jane@example.com");
        assert_eq!(cv.contact_information.phone, "+1 (555) 123-4567");
        assert!(cv.professional_summary.contains("storage systems"));
        assert!(cv.skills.technical.iter().any(|s| s == "Python"));
        assert!(cv.skills.soft.iter().any(|s| s == "Leadership"));
        assert_eq!(cv.work_experience.len(), 1);
        assert_eq!(cv.work_experience[0].company, "Acme Corp");
        assert_eq!(cv.education.len(), 1);
        assert_eq!(cv.education[0].year, "2018");
        assert_eq!(cv.languages, vec!["English", "French"]);
    }

    #[test]
    fn test_empty_input_yields_fully_empty_cv() {
        let out = normalizer().normalize("");
        let payload = out.cv.to_payload().unwrap();
        let obj = payload.as_object().unwrap();
        for (key, value) in obj {
            match value {
                serde_json::Value::String(s) => assert!(s.is_empty(), "{key} not empty"),
                serde_json::Value::Array(a) => assert!(a.is_empty(), "{key} not empty"),
                serde_json::Value::Object(_) => {}
                other => panic!("unexpected value in {key}: {other:?}"),
            }
        }
        assert!(out.preview.is_empty());
        assert_eq!(out.preview_text, "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = normalizer().normalize(SAMPLE).to_payload().unwrap();
        let second = normalizer().normalize(SAMPLE).to_payload().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_preview_sections_are_ordered_and_nonempty() {
        let out = normalizer().normalize(SAMPLE);
        let keys: Vec<SectionKey> = out.preview.iter().map(|s| s.key).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted, "preview must follow canonical order");
        assert!(out.preview.iter().all(|s| !s.content.trim().is_empty()));
        assert!(out.preview_text.contains("Work Experience"));
    }

    #[test]
    fn test_summary_excludes_contact_lines() {
        let out = normalizer().normalize(SAMPLE);
        let summary = &out.cv.professional_summary;
        assert!(!summary.contains("jane@example.com"));
        assert!(!summary.contains("555"));
        assert!(!summary.contains("Jane Doe"));
    }

    #[test]
    fn test_unstructured_document_degrades_to_about() {
        let text = "Jane Doe is an engineer who enjoys compilers and climbing.";
        let out = normalizer().normalize(text);
        assert!(out.cv.professional_summary.contains("compilers"));
        assert!(out.cv.work_experience.is_empty());
    }

    #[test]
    fn test_inline_skills_heading_is_recovered() {
        let out = normalizer().normalize("Skills: Python, SQL, AWS");
        assert_eq!(out.cv.skills.technical, vec!["Python", "SQL", "AWS"]);
    }

    #[test]
    fn test_volunteer_section_parses_like_experience() {
        let text = "Volunteer Experience\nOrganizer at Food Bank (2021 - Present)\n- Coordinated weekend drives";
        let out = normalizer().normalize(text);
        assert_eq!(out.cv.volunteer_experience.len(), 1);
        assert_eq!(out.cv.volunteer_experience[0].company, "Food Bank");
        assert!(out.cv.work_experience.is_empty());
    }

    #[test]
    fn test_missing_keywords_reach_suggestions() {
        let missing = vec!["Kafka".to_string()];
        let out = normalizer().normalize_with_keywords(SAMPLE, &missing);
        assert!(out
            .suggestions
            .iter()
            .any(|s| s.category == "keywords" && s.message.contains("Kafka")));
    }

    #[test]
    fn test_no_fabricated_literals_in_structured_fields() {
        let out = normalizer().normalize(SAMPLE);
        let cv = &out.cv;
        for value in [
            &cv.contact_information.name,
            &cv.contact_information.email,
            &cv.contact_information.phone,
            &cv.work_experience[0].title,
            &cv.work_experience[0].company,
            &cv.education[0].degree,
            &cv.education[0].school,
        ] {
            if !value.is_empty() {
                assert!(SAMPLE.contains(value.as_str()), "{value:?} not in input");
            }
        }
    }

    #[test]
    fn test_custom_recognizer_is_used() {
        use crate::extract::recognizer::{EntityKind, RecognizedEntity};

        struct FixedName;
        impl EntityRecognizer for FixedName {
            fn recognize(&self, _text: &str) -> Vec<RecognizedEntity> {
                vec![RecognizedEntity {
                    kind: EntityKind::Person,
                    text: "Maria de la Cruz".to_string(),
                }]
            }
        }

        let normalizer = CvNormalizer::with_recognizer(
            NormalizerConfig::default(),
            Arc::new(FixedName),
        );
        let out = normalizer.normalize("Maria de la Cruz\nmaria@example.com");
        assert_eq!(out.cv.contact_information.name, "Maria de la Cruz");
    }

    #[test]
    fn test_logging_does_not_disturb_output() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("cv_normalizer=debug")
            .try_init();
        let out = normalizer().normalize(SAMPLE);
        assert_eq!(out.cv.contact_information.email, "jane@example.com");
    }
}
