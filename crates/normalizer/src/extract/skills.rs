//! Skill list handling: flattening a raw skills block into individual
//! skills, then partitioning them into technical / soft / other buckets.
//! Buckets are disjoint and the partition is stable across runs.

use std::collections::HashSet;

use crate::models::cv::SkillSet;
use crate::text::{is_placeholder, strip_bullet};

/// Technical vocabulary: languages, frameworks, data stores, cloud and
/// devops terms. Checked as substrings for multi-word/longer keywords and
/// as whole tokens for the short ones.
const TECHNICAL_KEYWORDS: &[&str] = &[
    "python", "java", "javascript", "typescript", "rust", "golang", "go",
    "c++", "c#", "ruby", "php", "swift", "kotlin", "scala", "perl", "sql",
    "nosql", "html", "css", "react", "angular", "vue", "svelte", "node",
    "django", "flask", "spring", "rails", "laravel", ".net", "express",
    "fastapi", "pandas", "numpy", "tensorflow", "pytorch", "keras",
    "scikit", "spark", "hadoop", "kafka", "docker", "kubernetes",
    "terraform", "ansible", "jenkins", "git", "linux", "unix", "bash",
    "powershell", "aws", "azure", "gcp", "cloud", "mongodb", "postgres",
    "postgresql", "mysql", "sqlite", "redis", "elasticsearch", "graphql",
    "grpc", "microservice", "machine learning", "deep learning",
    "data analysis", "data engineering", "etl", "ci/cd", "devops",
    "android", "ios", "flutter", "react native", "tableau", "power bi",
    "excel", "matlab", "sas", "selenium", "jira",
];

/// Soft-skill vocabulary, checked as substrings.
const SOFT_KEYWORDS: &[&str] = &[
    "communication", "leadership", "teamwork", "team work", "collaboration",
    "problem solving", "problem-solving", "time management", "adaptability",
    "creativity", "critical thinking", "negotiation", "presentation",
    "public speaking", "mentoring", "coaching", "conflict resolution",
    "decision making", "decision-making", "organization", "organisation",
    "empathy", "work ethic", "attention to detail", "interpersonal",
    "stakeholder management", "project management",
];

/// Flattens a raw skills block into individual skill strings: bullets and
/// lines first, then comma/semicolon/pipe/middot runs inside each line. A
/// short `Label:` prefix (e.g. "Languages:") is dropped.
pub fn split_skill_list(raw: &str) -> Vec<String> {
    let mut skills = Vec::new();
    for line in raw.lines() {
        let (content, _) = strip_bullet(line.trim());
        let content = strip_short_label(content);
        for piece in content.split(|c| matches!(c, ',' | ';' | '|' | '·' | '•')) {
            let piece = piece.trim().trim_end_matches('.').trim();
            if !piece.is_empty() {
                skills.push(piece.to_string());
            }
        }
    }
    skills
}

/// Drops a leading `Label:` when the label is at most three words, so
/// grouped lists like "Languages: Python, Go" flatten cleanly.
fn strip_short_label(line: &str) -> &str {
    if let Some((label, rest)) = line.split_once(':') {
        if !label.is_empty()
            && label.split_whitespace().count() <= 3
            && label.chars().all(|c| c.is_alphabetic() || c.is_whitespace() || c == '&')
        {
            return rest.trim();
        }
    }
    line
}

/// Partitions skills into technical / soft / other. Input order and
/// first-seen casing are preserved; duplicates (case-insensitive) and
/// placeholder values are dropped. Every surviving skill lands in exactly
/// one bucket.
pub fn categorize_skills(skills: &[String]) -> SkillSet {
    let mut seen = HashSet::new();
    let mut set = SkillSet::default();
    for skill in skills {
        let skill = skill.trim();
        if skill.is_empty() || is_placeholder(skill) {
            continue;
        }
        let lower = skill.to_lowercase();
        if !seen.insert(lower.clone()) {
            continue;
        }
        if is_technical(&lower) {
            set.technical.push(skill.to_string());
        } else if is_soft(&lower) {
            set.soft.push(skill.to_string());
        } else if is_acronym(skill) {
            set.technical.push(skill.to_string());
        } else {
            set.other.push(skill.to_string());
        }
    }
    set
}

fn is_technical(lower: &str) -> bool {
    if lower.chars().any(|c| c.is_ascii_digit()) || lower.contains('+') || lower.contains('/') {
        return true;
    }
    if lower.contains("api") {
        return true;
    }
    TECHNICAL_KEYWORDS.iter().any(|kw| matches_keyword(lower, kw))
}

fn is_soft(lower: &str) -> bool {
    SOFT_KEYWORDS.iter().any(|kw| lower.contains(kw))
}

/// Short all-caps strings read as tech acronyms ("AWS", "SQL", "NLP").
fn is_acronym(skill: &str) -> bool {
    skill.len() <= 5 && !skill.is_empty() && skill.chars().all(|c| c.is_ascii_uppercase())
}

/// Substring match for long keywords; whole-token match for short ones so
/// "go" cannot fire inside "negotiation".
fn matches_keyword(lower: &str, keyword: &str) -> bool {
    if keyword.len() >= 4 || keyword.contains(' ') {
        lower.contains(keyword)
    } else {
        lower
            .split(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '.')))
            .any(|token| token == keyword)
    }
}
