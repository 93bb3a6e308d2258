//! Education parsing: one entry per blank-line paragraph. Degree/school
//! sides are decided by degree-keyword substrings; pipe lines assume
//! `school | degree` ordering.

use crate::extract::dates::split_off_year;
use crate::models::cv::EducationEntry;
use crate::text::{is_placeholder, strip_bullet};

/// Substrings that mark a fragment as the degree side of a separator.
const DEGREE_KEYWORDS: &[&str] = &[
    "bachelor", "master", "phd", "ph.d", "doctorate", "diploma",
    "certificate", "associate", "b.", "m.", "bsc", "msc", "mba", "btech",
    "mtech", "beng", "meng",
];

pub fn parse_education(block: &str) -> Vec<EducationEntry> {
    let mut entries = Vec::new();
    for paragraph in block.split("\n\n") {
        if let Some(entry) = parse_paragraph(paragraph) {
            entries.push(entry);
        }
    }
    entries
}

fn parse_paragraph(paragraph: &str) -> Option<EducationEntry> {
    let mut entry = EducationEntry::default();

    for line in paragraph.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (content, is_bullet) = strip_bullet(line);
        if is_bullet {
            // Bullets are detail lines, not entry boundaries.
            continue;
        }
        let (year, remainder) = split_off_year(content);
        if entry.year.is_empty() && !year.is_empty() {
            entry.year = year;
        }
        if remainder.is_empty() {
            continue;
        }
        if entry.degree.is_empty() && entry.school.is_empty() {
            parse_main_line(&remainder, &mut entry);
        } else if entry.school.is_empty() {
            entry.school = remainder;
        } else if entry.degree.is_empty() {
            entry.degree = remainder;
        }
    }

    // Both sides reading as placeholders means the upstream extractor
    // invented the entry.
    if is_placeholder(&entry.degree) && is_placeholder(&entry.school) {
        return None;
    }
    if is_placeholder(&entry.degree) {
        entry.degree.clear();
    }
    if is_placeholder(&entry.school) {
        entry.school.clear();
    }
    if entry.degree.is_empty() && entry.school.is_empty() {
        return None;
    }
    Some(entry)
}

fn parse_main_line(line: &str, entry: &mut EducationEntry) {
    if line.contains(" | ") {
        let (school, degree) = line.split_once(" | ").unwrap();
        entry.school = school.trim().to_string();
        entry.degree = degree.trim().to_string();
        return;
    }
    if let Some((left, right)) = split_on_dash(line) {
        let left = left.trim();
        let right = right.trim();
        if has_degree_keyword(left) || !has_degree_keyword(right) {
            entry.degree = left.to_string();
            entry.school = right.to_string();
        } else {
            entry.school = left.to_string();
            entry.degree = right.to_string();
        }
        return;
    }
    entry.degree = line.trim().to_string();
}

fn split_on_dash(line: &str) -> Option<(&str, &str)> {
    if let Some(pair) = line.split_once(" - ") {
        return Some(pair);
    }
    if let Some(pair) = line.split_once('–') {
        return Some(pair);
    }
    line.split_once('—')
}

fn has_degree_keyword(fragment: &str) -> bool {
    let lower = format!("{} ", fragment.to_lowercase());
    DEGREE_KEYWORDS.iter().any(|kw| lower.contains(kw))
}
