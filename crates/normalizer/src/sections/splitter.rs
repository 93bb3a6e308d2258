//! Section splitting: a single line-by-line pass that partitions raw
//! resume text into named blocks, followed by a regex augmentation pass
//! for documents with no line-based structure. Never fails; a fully
//! unstructured document degrades to everything landing in `about`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::NormalizerConfig;
use crate::models::section::{RawSections, SectionKey};
use crate::sections::headings::{classify_heading, HEADING_SYNONYMS};
use crate::text::{strip_bullet, word_count};

/// Per-key augmentation patterns: `<synonym> [:\-–] content-to-eol`,
/// compiled once from the synonym table.
static AUGMENT_PATTERNS: Lazy<Vec<(SectionKey, Regex)>> = Lazy::new(|| {
    HEADING_SYNONYMS
        .iter()
        .map(|(key, synonyms)| {
            let alternation = synonyms
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\b(?:{alternation})\s*[:\-–]\s*([^\r\n]+)");
            (*key, Regex::new(&pattern).unwrap())
        })
        .collect()
});

/// Splits raw text into per-section blocks.
///
/// State machine over the section keys, starting in `about`. Blank lines
/// collapse to a single paragraph separator. A line switches state when it
/// is an inline `Label: rest` heading whose label classifies, or when the
/// whole (unbulleted, short) line classifies. Everything else accumulates
/// under the current state, bullets kept verbatim.
pub fn split_sections(text: &str, config: &NormalizerConfig) -> RawSections {
    let mut sections = RawSections::default();
    let mut state = SectionKey::About;
    let mut buffer: Vec<String> = Vec::new();
    let mut pending_blank = false;

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            if !buffer.is_empty() {
                pending_blank = true;
            }
            continue;
        }

        let (content, is_bullet) = strip_bullet(line);

        if !is_bullet {
            if let Some((label, rest)) = match_inline_heading(content) {
                if let Some(key) = classify_heading(label) {
                    commit(&mut sections, state, &mut buffer);
                    pending_blank = false;
                    state = key;
                    if !rest.trim().is_empty() {
                        buffer.push(rest.trim().to_string());
                    }
                    continue;
                }
            }
            if word_count(content) <= config.heading_max_words {
                if let Some(key) = classify_heading(content) {
                    commit(&mut sections, state, &mut buffer);
                    pending_blank = false;
                    state = key;
                    continue;
                }
            }
        }

        if pending_blank {
            buffer.push(String::new());
            pending_blank = false;
        }
        buffer.push(line.to_string());
    }
    commit(&mut sections, state, &mut buffer);

    augment_from_full_text(&mut sections, text);
    sections
}

/// Matches `Label: rest` or `Label - rest` where the label is 1-80
/// word-ish characters. The dash form requires surrounding spaces so
/// hyphenated words are left alone.
fn match_inline_heading(line: &str) -> Option<(&str, &str)> {
    let colon = regex!(r"^([A-Za-z][A-Za-z0-9 &+/.'’]{0,79}):\s*(.*)$");
    if let Some(caps) = colon.captures(line) {
        let label = caps.get(1).unwrap().as_str().trim_end();
        let rest = caps.get(2).unwrap().as_str();
        if !label.is_empty() && label.len() <= 80 {
            return Some((label, rest));
        }
    }
    let dash = regex!(r"^([A-Za-z][A-Za-z0-9 &+/.'’]{0,79}?)\s+[-–—]\s+(.*)$");
    if let Some(caps) = dash.captures(line) {
        let label = caps.get(1).unwrap().as_str().trim_end();
        let rest = caps.get(2).unwrap().as_str();
        if !label.is_empty() && label.len() <= 80 {
            return Some((label, rest));
        }
    }
    None
}

fn commit(sections: &mut RawSections, state: SectionKey, buffer: &mut Vec<String>) {
    if buffer.is_empty() {
        return;
    }
    let block = buffer.join("\n");
    sections.append(state, block.trim());
    buffer.clear();
}

/// Secondary extraction for sections the line pass left empty: scans the
/// full original text for `<synonym>: content` occurrences anywhere,
/// including mid-paragraph. Handles documents that arrive as one wrapped
/// paragraph.
fn augment_from_full_text(sections: &mut RawSections, text: &str) {
    for (key, pattern) in AUGMENT_PATTERNS.iter() {
        if !sections.is_empty_section(*key) {
            continue;
        }
        if let Some(caps) = pattern.captures(text) {
            let content = caps.get(1).unwrap().as_str().trim();
            if !content.is_empty() {
                sections.append(*key, content);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> RawSections {
        split_sections(text, &NormalizerConfig::default())
    }

    #[test]
    fn test_headerless_document_lands_in_about() {
        let sections = split("Jane Doe\njane@example.com\nSeasoned backend engineer.");
        assert!(sections.get(SectionKey::About).contains("Seasoned backend engineer."));
        assert!(sections.is_empty_section(SectionKey::Experience));
    }

    #[test]
    fn test_whole_line_heading_switches_state() {
        let text = "Experience\nEngineer at Acme\n- Built things\n\nEducation\nBSc - State University";
        let sections = split(text);
        assert!(sections.get(SectionKey::Experience).contains("Engineer at Acme"));
        assert!(sections.get(SectionKey::Experience).contains("- Built things"));
        assert!(sections.get(SectionKey::Education).contains("State University"));
    }

    #[test]
    fn test_inline_heading_seeds_new_section() {
        let sections = split("Skills: Python, SQL, AWS");
        assert_eq!(sections.get(SectionKey::Skills), "Python, SQL, AWS");
    }

    #[test]
    fn test_inline_heading_mid_document() {
        let text = "Jane Doe\n\nSummary: Ten years of plumbing.\nSkills: Python, Go";
        let sections = split(text);
        assert!(sections.get(SectionKey::About).contains("Ten years of plumbing."));
        assert_eq!(sections.get(SectionKey::Skills), "Python, Go");
    }

    #[test]
    fn test_bulleted_lines_keep_their_marker() {
        let text = "Experience\nEngineer at Acme\n- Led development of X";
        let sections = split(text);
        assert!(sections.get(SectionKey::Experience).contains("- Led development of X"));
    }

    #[test]
    fn test_bulleted_keyword_line_is_not_a_heading() {
        let text = "Experience\nEngineer at Acme\n- Education outreach for schools";
        let sections = split(text);
        assert!(sections.is_empty_section(SectionKey::Education) || !sections
            .get(SectionKey::Education)
            .contains("outreach"));
        assert!(sections.get(SectionKey::Experience).contains("Education outreach"));
    }

    #[test]
    fn test_blank_runs_collapse_to_one_separator() {
        let text = "Experience\nEngineer at Acme\n\n\n\nManager at Beta";
        let sections = split(text);
        assert_eq!(
            sections.get(SectionKey::Experience),
            "Engineer at Acme\n\nManager at Beta"
        );
    }

    #[test]
    fn test_duplicate_sections_merge_in_order() {
        let text = "Skills\nPython\n\nExperience\nEngineer at Acme\n\nSkills\nGo";
        let sections = split(text);
        assert_eq!(sections.get(SectionKey::Skills), "Python\nGo");
    }

    #[test]
    fn test_augmentation_recovers_inline_mention_in_paragraph() {
        // One wrapped paragraph, no structure: the skills mention sits
        // mid-line, so only the augmentation pass can find it.
        let text = "Jane Doe is an engineer. Skills: Python, Go. She lives in Oslo.";
        let sections = split(text);
        assert!(sections.get(SectionKey::Skills).starts_with("Python, Go"));
    }

    #[test]
    fn test_long_keyword_bearing_sentence_stays_in_body() {
        let text = "Experience\nEngineer at Acme\nExperience with distributed systems was essential there";
        let sections = split(text);
        assert!(sections
            .get(SectionKey::Experience)
            .contains("distributed systems was essential"));
    }

    #[test]
    fn test_empty_input_produces_no_sections() {
        let sections = split("");
        for key in SectionKey::ALL {
            assert!(sections.is_empty_section(key));
        }
    }
}
