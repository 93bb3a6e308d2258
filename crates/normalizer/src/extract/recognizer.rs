//! Entity recognition seam. The pipeline never talks to an NLP model
//! directly: it is handed an [`EntityRecognizer`] by the composition root,
//! with [`HeuristicRecognizer`] as the built-in, dependency-free default.
//! Swap in a model-backed implementation without touching the extractors.

use crate::sections::headings::classify_heading;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Person,
    Place,
}

/// A candidate entity found in text, in document order.
#[derive(Debug, Clone)]
pub struct RecognizedEntity {
    pub kind: EntityKind,
    pub text: String,
}

/// Finds person and place mentions in a snippet of text.
///
/// Implementations must be deterministic for the same input; the pipeline
/// relies on reproducible output.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity>;
}

/// Rule-based recognizer: capitalization and shape heuristics, line by
/// line. No model, no I/O.
#[derive(Debug, Default)]
pub struct HeuristicRecognizer;

/// Words that disqualify a line from being a person name. Mostly job
/// titles and document furniture that share the capitalized two-word shape.
const NON_NAME_WORDS: &[&str] = &[
    "resume",
    "curriculum",
    "vitae",
    "engineer",
    "developer",
    "manager",
    "analyst",
    "consultant",
    "designer",
    "scientist",
    "architect",
    "specialist",
    "administrator",
    "intern",
    "lead",
    "senior",
    "junior",
    "director",
    "officer",
    "coordinator",
    "technician",
    "freelancer",
    "student",
];

/// Trailing tokens that mark a comma-separated line as a place.
const REGION_HINTS: &[&str] = &[
    "usa", "uk", "india", "canada", "germany", "france", "spain", "italy",
    "netherlands", "norway", "sweden", "denmark", "finland", "poland",
    "brazil", "mexico", "china", "japan", "korea", "australia", "ireland",
    "switzerland", "austria", "belgium", "portugal", "singapore", "remote",
    "england", "scotland", "pakistan", "bangladesh", "nigeria", "kenya",
    "egypt", "turkey", "ukraine", "romania", "argentina", "chile",
];

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity> {
        let mut entities = Vec::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if looks_like_person(line) {
                entities.push(RecognizedEntity {
                    kind: EntityKind::Person,
                    text: line.to_string(),
                });
            } else if looks_like_place(line) {
                entities.push(RecognizedEntity {
                    kind: EntityKind::Place,
                    text: line.to_string(),
                });
            }
        }
        entities
    }
}

fn looks_like_person(line: &str) -> bool {
    if line.contains('@')
        || line.contains("http")
        || line.contains("www.")
        || line.contains(',')
        || line.contains(':')
        || line.chars().any(|c| c.is_ascii_digit())
    {
        return false;
    }
    if classify_heading(line).is_some() {
        return false;
    }
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 || tokens.len() > 4 {
        return false;
    }
    if tokens
        .iter()
        .any(|t| NON_NAME_WORDS.contains(&t.to_lowercase().as_str()))
    {
        return false;
    }
    tokens.iter().all(|t| name_token(t))
}

/// A name token is alphabetic (plus `.`/`-`/`'`) and starts uppercase.
fn name_token(token: &str) -> bool {
    let mut chars = token.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return false,
    };
    first.is_uppercase()
        && token
            .chars()
            .all(|c| c.is_alphabetic() || matches!(c, '.' | '-' | '\''))
}

fn looks_like_place(line: &str) -> bool {
    if line.contains('@') || line.contains("http") || line.contains("www.") {
        return false;
    }
    let segments: Vec<&str> = line.split(',').map(str::trim).collect();
    if segments.len() < 2 || segments.len() > 3 {
        return false;
    }
    let last = segments[segments.len() - 1];
    if !region_like(last) {
        return false;
    }
    // Leading segments look like city/area names: short, capitalized,
    // digit-free.
    segments[..segments.len() - 1].iter().all(|segment| {
        let words: Vec<&str> = segment.split_whitespace().collect();
        !words.is_empty()
            && words.len() <= 3
            && words.iter().all(|w| {
                w.chars().next().is_some_and(|c| c.is_uppercase())
                    && w.chars().all(|c| c.is_alphabetic() || c == '.')
            })
    })
}

/// The final comma segment must be a state/country code ("CA"), a zip-ish
/// number, or a known region word.
fn region_like(segment: &str) -> bool {
    let words: Vec<&str> = segment.split_whitespace().collect();
    if words.is_empty() || words.len() > 2 {
        return false;
    }
    words.iter().all(|w| {
        let lower = w.to_lowercase();
        (w.len() <= 3 && w.chars().all(|c| c.is_ascii_uppercase()))
            || (w.len() >= 4 && w.chars().all(|c| c.is_ascii_digit()))
            || REGION_HINTS.contains(&lower.as_str())
    })
}
