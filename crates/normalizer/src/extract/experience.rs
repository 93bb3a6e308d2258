//! Experience parsing: turns a raw experience block into ordered entries.
//! Header lines are recognized by separator; bullets attach to the open
//! entry. Heuristic order is fixed and must not be reordered: "Title at
//! Company", then pipe fields, then dash forms.

use crate::config::NormalizerConfig;
use crate::extract::dates::{is_date_like, split_off_date_range};
use crate::models::cv::ExperienceEntry;
use crate::text::{scrub_placeholder, strip_bullet};

/// Leading verbs that already read as action statements. Bullets starting
/// with anything else get the default verb prepended.
const ACTION_VERBS: &[&str] = &[
    "architected", "spearheaded", "owned", "drove", "built", "shipped",
    "launched", "led", "developed", "designed", "implemented", "created",
    "managed", "delivered", "improved", "reduced", "increased", "optimized",
    "automated", "migrated", "refactored", "established", "initiated",
    "coordinated", "analyzed", "researched", "published", "investigated",
    "contributed", "partnered", "collaborated", "facilitated", "enabled",
    "supported", "mentored", "trained", "deployed", "integrated",
    "maintained", "tested", "authored", "streamlined", "accelerated",
    "engineered", "scaled", "evaluated", "proposed", "organized", "wrote",
    "presented", "achieved", "won", "founded",
];

const DEFAULT_ACTION_VERB: &str = "Contributed to";

/// Parses an experience (or volunteer) block into entries. Entries with
/// neither title nor company are dropped; points preserve source order and
/// are capped by `config.max_points_per_entry`.
pub fn parse_experience(block: &str, config: &NormalizerConfig) -> Vec<ExperienceEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ExperienceEntry> = None;

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            close(&mut current, &mut entries);
            continue;
        }
        let (content, is_bullet) = strip_bullet(line);
        if !is_bullet && is_entry_header(content) {
            close(&mut current, &mut entries);
            current = Some(parse_header(content));
        } else if let Some(entry) = current.as_mut() {
            if entry.points.len() < config.max_points_per_entry {
                entry.points.push(content.to_string());
            }
        }
        // Text before any header has no entry to attach to and is left to
        // the raw section preview.
    }
    close(&mut current, &mut entries);

    for entry in &mut entries {
        for point in &mut entry.points {
            *point = strengthen_point(point);
        }
    }
    entries
}

fn close(current: &mut Option<ExperienceEntry>, entries: &mut Vec<ExperienceEntry>) {
    if let Some(mut entry) = current.take() {
        scrub_placeholder(&mut entry.title);
        scrub_placeholder(&mut entry.company);
        if !entry.title.is_empty() || !entry.company.is_empty() {
            entries.push(entry);
        }
    }
}

/// A non-bulleted line starts a new entry when it carries one of the
/// header separators.
fn is_entry_header(line: &str) -> bool {
    line.contains(" at ") || line.contains(" | ") || line.contains(" - ") || line.contains('–')
}

fn parse_header(line: &str) -> ExperienceEntry {
    let (mut dates, remainder) = split_off_date_range(line);
    let mut entry = ExperienceEntry::default();

    if let Some((title, company)) = remainder.split_once(" at ") {
        entry.title = title.trim().to_string();
        entry.company = company.trim().to_string();
    } else if remainder.contains(" | ") {
        let fields: Vec<&str> = remainder.split(" | ").map(str::trim).collect();
        entry.company = fields[0].to_string();
        if fields.len() > 1 {
            entry.title = fields[1].to_string();
        }
        if fields.len() > 2 && dates.is_empty() {
            dates = fields[2].to_string();
        }
    } else if let Some((left, right)) = split_on_dash(&remainder) {
        if dates.is_empty() && is_date_like(right) {
            entry.title = left.trim().to_string();
            dates = right.trim().to_string();
        } else {
            // "Data Scientist - Remote" and friends: keep both sides
            // rather than guessing one away.
            entry.title = left.trim().to_string();
            entry.company = right.trim().to_string();
        }
    } else {
        entry.title = remainder.trim().to_string();
    }

    entry.dates = dates;
    entry
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

/// Cosmetic pass: bullets whose first word is not a recognized action verb
/// get the default verb prepended. Never rewrites anything beyond that.
fn strengthen_point(point: &str) -> String {
    let first = point
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    if ACTION_VERBS.contains(&first.as_str()) {
        return point.to_string();
    }
    let mut chars = point.chars();
    let decapitalized = match chars.next() {
        Some(c) => c.to_lowercase().collect::<String>() + chars.as_str(),
        None => return point.to_string(),
    };
    format!("{DEFAULT_ACTION_VERB} {decapitalized}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(block: &str) -> Vec<ExperienceEntry> {
        parse_experience(block, &NormalizerConfig::default())
    }

    #[test]
    fn test_two_entries_with_points() {
        let block = "Software Engineer at Acme Corp (2020-2023)\n- Led development of X\n- Improved performance by 30%\n\nEngineer at Beta LLC (2018-2020)\n- Built API";
        let entries = parse(block);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Software Engineer");
        assert_eq!(entries[0].company, "Acme Corp");
        assert_eq!(entries[0].dates, "2020-2023");
        assert_eq!(
            entries[0].points,
            vec!["Led development of X", "Improved performance by 30%"]
        );
        assert_eq!(entries[1].company, "Beta LLC");
        assert_eq!(entries[1].points, vec!["Built API"]);
    }

    #[test]
    fn test_pipe_header_company_title_dates() {
        let entries = parse("Acme Corp | Senior Engineer | Jan 2020 - Mar 2023");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].company, "Acme Corp");
        assert_eq!(entries[0].title, "Senior Engineer");
        assert_eq!(entries[0].dates, "Jan 2020 - Mar 2023");
    }

    #[test]
    fn test_pipe_header_two_fields() {
        let entries = parse("Beta LLC | Engineer");
        assert_eq!(entries[0].company, "Beta LLC");
        assert_eq!(entries[0].title, "Engineer");
    }

    #[test]
    fn test_dash_header_with_dates() {
        let entries = parse("Platform Engineer - 2019 to 2022");
        assert_eq!(entries[0].title, "Platform Engineer");
        assert_eq!(entries[0].dates, "2019 to 2022");
        assert_eq!(entries[0].company, "");
    }

    #[test]
    fn test_dash_header_without_dates_keeps_both_sides() {
        let entries = parse("Data Scientist - Remote\n- Modeled churn");
        assert_eq!(entries[0].title, "Data Scientist");
        assert_eq!(entries[0].company, "Remote");
    }

    #[test]
    fn test_headerless_bullets_produce_nothing() {
        assert!(parse("- floating bullet\n- another").is_empty());
    }

    #[test]
    fn test_entry_without_title_or_company_is_dropped() {
        // Placeholder header scrubs to empty on both sides.
        assert!(parse("Company Name - Not Provided").is_empty());
    }

    #[test]
    fn test_points_are_capped() {
        let bullets: Vec<String> = (0..12).map(|i| format!("- did thing number {i}")).collect();
        let block = format!("Engineer at Acme\n{}", bullets.join("\n"));
        let entries = parse(&block);
        assert_eq!(entries[0].points.len(), 8);
    }

    #[test]
    fn test_unbulleted_continuation_becomes_point() {
        let entries = parse("Engineer at Acme\nOwned the billing system rewrite");
        assert_eq!(entries[0].points, vec!["Owned the billing system rewrite"]);
    }

    #[test]
    fn test_strengthening_prepends_default_verb() {
        let entries = parse("Engineer at Acme\n- Responsible for deployments");
        assert_eq!(entries[0].points, vec!["Contributed to responsible for deployments"]);
    }

    #[test]
    fn test_strengthening_leaves_action_verbs_alone() {
        let entries = parse("Engineer at Acme\n- Led migration to Kubernetes");
        assert_eq!(entries[0].points, vec!["Led migration to Kubernetes"]);
    }

    #[test]
    fn test_titles_and_companies_come_from_input() {
        let block = "Staff Engineer at Initech (2021 - Present)";
        let entries = parse(block);
        assert!(block.contains(&entries[0].title));
        assert!(block.contains(&entries[0].company));
        assert!(block.contains(&entries[0].dates));
    }
}
