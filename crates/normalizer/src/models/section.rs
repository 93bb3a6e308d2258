use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Canonical resume section identifiers. Every raw line is assigned to
/// exactly one key; `About` doubles as the default bucket for unclassified
/// leading content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKey {
    About,
    Skills,
    Experience,
    Education,
    Projects,
    Achievements,
    Certifications,
    Volunteer,
    Languages,
    Other,
}

impl SectionKey {
    /// Canonical display order, used for preview assembly.
    pub const ALL: [SectionKey; 10] = [
        SectionKey::About,
        SectionKey::Skills,
        SectionKey::Experience,
        SectionKey::Education,
        SectionKey::Projects,
        SectionKey::Achievements,
        SectionKey::Certifications,
        SectionKey::Volunteer,
        SectionKey::Languages,
        SectionKey::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionKey::About => "about",
            SectionKey::Skills => "skills",
            SectionKey::Experience => "experience",
            SectionKey::Education => "education",
            SectionKey::Projects => "projects",
            SectionKey::Achievements => "achievements",
            SectionKey::Certifications => "certifications",
            SectionKey::Volunteer => "volunteer",
            SectionKey::Languages => "languages",
            SectionKey::Other => "other",
        }
    }

    /// Human-readable label for preview display.
    pub fn label(self) -> &'static str {
        match self {
            SectionKey::About => "Professional Summary",
            SectionKey::Skills => "Skills",
            SectionKey::Experience => "Work Experience",
            SectionKey::Education => "Education",
            SectionKey::Projects => "Projects",
            SectionKey::Achievements => "Achievements",
            SectionKey::Certifications => "Certifications",
            SectionKey::Volunteer => "Volunteer Experience",
            SectionKey::Languages => "Languages",
            SectionKey::Other => "Additional Information",
        }
    }
}

/// Raw text accumulated per section during a single split pass.
/// Append-only; consumed by the per-section extractors and then discarded.
#[derive(Debug, Clone, Default)]
pub struct RawSections {
    blocks: BTreeMap<SectionKey, String>,
}

impl RawSections {
    /// Appends a block of text under `key`, separated from earlier content
    /// by a newline. Empty blocks are ignored.
    pub fn append(&mut self, key: SectionKey, block: &str) {
        let block = block.trim_matches('\n');
        if block.trim().is_empty() {
            return;
        }
        let slot = self.blocks.entry(key).or_default();
        if !slot.is_empty() {
            slot.push('\n');
        }
        slot.push_str(block);
    }

    /// The accumulated text for `key`, empty string when nothing was filed.
    pub fn get(&self, key: SectionKey) -> &str {
        self.blocks.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn is_empty_section(&self, key: SectionKey) -> bool {
        self.get(key).trim().is_empty()
    }
}
