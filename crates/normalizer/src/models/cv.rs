use serde::{Deserialize, Serialize};

use crate::errors::NormalizeError;
use crate::models::section::SectionKey;

/// Contact details pulled from the top of a resume. Fields are plain
/// strings, empty when unknown, so the JSON payload always carries every
/// key. Placeholder literals are never stored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub address: String,
    pub date_of_birth: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

/// Skills partitioned into disjoint buckets. The union of the three lists
/// holds no case-insensitive duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
    pub technical: Vec<String>,
    pub soft: Vec<String>,
    pub other: Vec<String>,
}

impl SkillSet {
    pub fn is_empty(&self) -> bool {
        self.technical.is_empty() && self.soft.is_empty() && self.other.is_empty()
    }

    pub fn len(&self) -> usize {
        self.technical.len() + self.soft.len() + self.other.len()
    }
}

/// One job (or volunteer role). Kept only when at least one of
/// `title`/`company` is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub dates: String,
    pub location: String,
    pub points: Vec<String>,
}

/// One degree. Kept only when at least one of `degree`/`school` is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationEntry {
    pub degree: String,
    pub school: String,
    pub year: String,
}

/// One project. Kept only when `name` or `description` is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
}

/// The canonical normalized document. Built fresh for every input and
/// never mutated after being returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredCv {
    pub contact_information: ContactInfo,
    pub professional_summary: String,
    pub skills: SkillSet,
    pub work_experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<String>,
    pub achievements: Vec<String>,
    pub languages: Vec<String>,
    pub volunteer_experience: Vec<ExperienceEntry>,
    pub additional_information: String,
}

impl StructuredCv {
    /// Strict JSON projection: every key present, empty values serialized
    /// as `""`/`[]` rather than omitted.
    pub fn to_payload(&self) -> Result<serde_json::Value, NormalizeError> {
        serde_json::to_value(self).map_err(Into::into)
    }
}

/// A single gap-fill suggestion derived from the normalized document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub category: String,
    pub message: String,
}

impl Suggestion {
    pub fn new(category: &str, message: impl Into<String>) -> Self {
        Suggestion { category: category.to_string(), message: message.into() }
    }
}

/// One section of the flattened preview shown to UI collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewSection {
    pub key: SectionKey,
    pub label: String,
    pub content: String,
}
