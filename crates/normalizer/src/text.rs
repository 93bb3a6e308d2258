//! Small shared text helpers used across the splitter and the extractors.

/// Filler values injected by upstream extraction that must be treated as
/// absence, never surfaced as data.
pub(crate) const PLACEHOLDER_VALUES: &[&str] = &[
    "not provided",
    "your name",
    "company name",
    "institution",
    "degree",
    "n/a",
    "none",
    "not specified",
];

/// True when `value` is one of the known placeholder literals.
pub(crate) fn is_placeholder(value: &str) -> bool {
    let v = value.trim().trim_end_matches('.').to_lowercase();
    PLACEHOLDER_VALUES.iter().any(|p| *p == v)
}

/// Blanks a field when it holds a placeholder.
pub(crate) fn scrub_placeholder(value: &mut String) {
    if is_placeholder(value) {
        value.clear();
    }
}

pub(crate) fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Strips a leading bullet marker (`-`, `*`, `•`) and reports whether the
/// line was bulleted. `-` and `*` require following whitespace so that
/// negative numbers and emphasis markers are left alone.
pub(crate) fn strip_bullet(line: &str) -> (&str, bool) {
    let trimmed = line.trim_start();
    if let Some(rest) = trimmed.strip_prefix('•') {
        return (rest.trim_start(), true);
    }
    for marker in ['-', '*'] {
        if let Some(rest) = trimmed.strip_prefix(marker) {
            if rest.starts_with(' ') || rest.starts_with('\t') {
                return (rest.trim_start(), true);
            }
        }
    }
    (trimmed, false)
}

/// Collapses internal whitespace runs to single spaces.
pub(crate) fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
