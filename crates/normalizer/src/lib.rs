//! Rule-based CV normalization pipeline.
//!
//! Takes raw resume text (already extracted from PDF/DOCX upstream) and
//! produces a canonical, section-keyed [`StructuredCv`] plus preview
//! sections and improvement suggestions. Everything is deterministic
//! heuristics: heading synonyms, date and bullet patterns, keyword
//! bucketing. No model calls, no I/O, no shared mutable state, so one
//! [`CvNormalizer`] can serve concurrent callers.
//!
//! The pipeline has no fatal error states: missing fields come back as
//! empty strings and lists, and an empty document normalizes to an empty
//! result rather than an error.

#[macro_use]
mod macros;

pub mod adapter;
pub mod analysis;
pub mod builder;
pub mod config;
pub mod errors;
pub mod extract;
pub mod models;
pub mod sections;
mod text;

pub use adapter::structured_cv_from_stored;
pub use builder::{CvNormalizer, NormalizedCv};
pub use config::NormalizerConfig;
pub use errors::NormalizeError;
pub use extract::recognizer::{
    EntityKind, EntityRecognizer, HeuristicRecognizer, RecognizedEntity,
};
pub use models::cv::{
    ContactInfo, EducationEntry, ExperienceEntry, PreviewSection, ProjectEntry, SkillSet,
    StructuredCv, Suggestion,
};
pub use models::section::{RawSections, SectionKey};
