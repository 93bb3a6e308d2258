//! Project parsing: non-bulleted lines open a project, bullets attach as
//! description first, then technologies.

use crate::models::cv::ProjectEntry;
use crate::text::{scrub_placeholder, strip_bullet};

pub fn parse_projects(block: &str) -> Vec<ProjectEntry> {
    let mut entries = Vec::new();
    let mut current: Option<ProjectEntry> = None;

    for line in block.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (content, is_bullet) = strip_bullet(line);
        if !is_bullet {
            close(&mut current, &mut entries);
            current = Some(open_project(content));
        } else if let Some(project) = current.as_mut() {
            attach_bullet(project, content);
        }
    }
    close(&mut current, &mut entries);
    entries
}

fn close(current: &mut Option<ProjectEntry>, entries: &mut Vec<ProjectEntry>) {
    if let Some(mut project) = current.take() {
        scrub_placeholder(&mut project.name);
        scrub_placeholder(&mut project.description);
        if !project.name.is_empty() || !project.description.is_empty() {
            entries.push(project);
        }
    }
}

/// A project line may carry its description inline after a separator.
fn open_project(line: &str) -> ProjectEntry {
    let mut project = ProjectEntry::default();
    for separator in [": ", " - ", "–", "—"] {
        if let Some((name, description)) = line.split_once(separator) {
            project.name = name.trim().to_string();
            project.description = description.trim().to_string();
            return project;
        }
    }
    project.name = line.trim().to_string();
    project
}

fn attach_bullet(project: &mut ProjectEntry, content: &str) {
    if let Some(caps) = regex!(
        r"(?i)^(?:technologies|tech\s+stack|tech|stack|built\s+with|tools)\s*(?:used)?\s*[:\-]\s*(.+)$"
    )
    .captures(content)
    {
        let list = caps.get(1).unwrap().as_str();
        project.technologies.extend(
            list.split([',', ';', '|'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        return;
    }
    if project.description.is_empty() {
        project.description = content.to_string();
    } else {
        project.technologies.push(content.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_with_inline_description() {
        let entries = parse_projects("CacheWarmer: prefetches hot keys into Redis");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "CacheWarmer");
        assert_eq!(entries[0].description, "prefetches hot keys into Redis");
    }

    #[test]
    fn test_first_bullet_becomes_description() {
        let block = "CacheWarmer\n- Prefetches hot keys\n- Rust";
        let entries = parse_projects(block);
        assert_eq!(entries[0].description, "Prefetches hot keys");
        assert_eq!(entries[0].technologies, vec!["Rust"]);
    }

    #[test]
    fn test_technology_label_bullet_is_split() {
        let block = "CacheWarmer\n- A cache prefetcher\n- Technologies: Rust, Redis, Tokio";
        let entries = parse_projects(block);
        assert_eq!(entries[0].technologies, vec!["Rust", "Redis", "Tokio"]);
    }

    #[test]
    fn test_multiple_projects() {
        let block = "Alpha - first thing\nBeta - second thing\n- detail for beta";
        let entries = parse_projects(block);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "Alpha");
        assert_eq!(entries[1].name, "Beta");
        assert_eq!(entries[1].description, "second thing");
        assert_eq!(entries[1].technologies, vec!["detail for beta"]);
    }

    #[test]
    fn test_leading_bullets_without_project_are_ignored() {
        assert!(parse_projects("- stray detail").is_empty());
    }

    #[test]
    fn test_placeholder_project_is_dropped() {
        assert!(parse_projects("Not Provided").is_empty());
    }

    #[test]
    fn test_empty_block() {
        assert!(parse_projects("").is_empty());
    }
}
