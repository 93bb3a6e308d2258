//! Stored-payload adapter: the single place where historical schema
//! variants are mapped into the canonical [`StructuredCv`]. Older payloads
//! drifted over time (capitalized keys, `technical_skills` vs `skills`,
//! freeform description strings vs bullet lists); every variant is
//! resolved here, once, instead of being re-inspected by consumers.

use serde_json::Value;

use crate::config::NormalizerConfig;
use crate::errors::NormalizeError;
use crate::extract::experience::parse_experience;
use crate::extract::skills::{categorize_skills, split_skill_list};
use crate::models::cv::{
    ContactInfo, EducationEntry, ExperienceEntry, ProjectEntry, SkillSet, StructuredCv,
};
use crate::text::is_placeholder;

/// Builds a `StructuredCv` from a stored JSON payload of any historical
/// shape. Absent fields default to empty; the only error is a payload that
/// is not an object at all.
pub fn structured_cv_from_stored(value: &Value) -> Result<StructuredCv, NormalizeError> {
    let obj = value
        .as_object()
        .ok_or_else(|| NormalizeError::InvalidPayload("expected a JSON object".to_string()))?;

    let mut cv = StructuredCv::default();

    if let Some(v) = first_of(obj, &["contact_information", "contact_info", "contact", "personal_information", "personal_details"]) {
        cv.contact_information = contact_from(v);
    }
    cv.professional_summary = clean_string(string_of(first_of(
        obj,
        &["professional_summary", "summary", "about", "profile", "objective"],
    )));
    if let Some(v) = first_of(obj, &["skills", "Skills", "technical_skills", "skill_set"]) {
        cv.skills = skills_from(v);
    }
    if let Some(v) = first_of(
        obj,
        &["work_experience", "experience", "Experience", "employment_history", "work_history"],
    ) {
        cv.work_experience = experience_from(v);
    }
    if let Some(v) = first_of(obj, &["projects", "Projects", "personal_projects"]) {
        cv.projects = projects_from(v);
    }
    if let Some(v) = first_of(obj, &["education", "Education", "qualifications"]) {
        cv.education = education_from(v);
    }
    cv.certifications =
        string_list_of(first_of(obj, &["certifications", "Certifications", "certificates"]));
    cv.achievements =
        string_list_of(first_of(obj, &["achievements", "Achievements", "accomplishments", "awards"]));
    cv.languages = string_list_of(first_of(obj, &["languages", "Languages"]));
    if let Some(v) = first_of(obj, &["volunteer_experience", "volunteer", "volunteering"]) {
        cv.volunteer_experience = experience_from(v);
    }
    cv.additional_information = clean_string(string_of(first_of(
        obj,
        &["additional_information", "additional_info", "other", "misc"],
    )));

    Ok(cv)
}

fn first_of<'a>(obj: &'a serde_json::Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .find_map(|k| obj.get(*k))
        .filter(|v| !v.is_null())
}

fn string_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n"),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn clean_string(s: String) -> String {
    if is_placeholder(&s) {
        String::new()
    } else {
        s
    }
}

/// A list field stored as an array of strings, or as one delimited string.
fn string_list_of(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| string_of(Some(v)))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty() && !is_placeholder(s))
            .collect(),
        Some(Value::String(s)) => s
            .split([',', ';', '\n'])
            .map(str::trim)
            .filter(|s| !s.is_empty() && !is_placeholder(s))
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn field(obj: &serde_json::Map<String, Value>, keys: &[&str]) -> String {
    clean_string(string_of(first_of(obj, keys)))
}

fn contact_from(value: &Value) -> ContactInfo {
    let obj = match value.as_object() {
        Some(o) => o,
        None => return ContactInfo::default(),
    };
    ContactInfo {
        name: field(obj, &["name", "full_name", "Name"]),
        email: field(obj, &["email", "email_address", "Email"]),
        phone: field(obj, &["phone", "phone_number", "mobile", "Phone"]),
        location: field(obj, &["location", "city", "Location"]),
        address: field(obj, &["address", "Address"]),
        date_of_birth: field(obj, &["date_of_birth", "dob"]),
        linkedin: field(obj, &["linkedin", "linkedin_url"]),
        github: field(obj, &["github", "github_url"]),
        website: field(obj, &["website", "portfolio", "url"]),
    }
}

/// Skills stored as a bucketed object, a flat list, or one comma string.
/// Flat shapes are re-bucketed through the categorizer.
fn skills_from(value: &Value) -> SkillSet {
    match value {
        Value::Object(obj) => SkillSet {
            technical: string_list_of(first_of(obj, &["technical", "technical_skills", "hard"])),
            soft: string_list_of(first_of(obj, &["soft", "soft_skills"])),
            other: string_list_of(first_of(obj, &["other", "misc"])),
        },
        Value::Array(_) => categorize_skills(&string_list_of(Some(value))),
        Value::String(s) => categorize_skills(&split_skill_list(s)),
        _ => SkillSet::default(),
    }
}

/// Experience stored as a list of entry objects, a single object, or raw
/// text (which goes back through the text parser).
fn experience_from(value: &Value) -> Vec<ExperienceEntry> {
    match value {
        Value::Array(items) => items.iter().filter_map(experience_entry_from).collect(),
        Value::Object(_) => experience_entry_from(value).into_iter().collect(),
        Value::String(s) => parse_experience(s, &NormalizerConfig::default()),
        _ => Vec::new(),
    }
}

fn experience_entry_from(value: &Value) -> Option<ExperienceEntry> {
    let obj = value.as_object()?;
    let entry = ExperienceEntry {
        title: field(obj, &["title", "role", "position", "job_title"]),
        company: field(obj, &["company", "employer", "organization", "organisation"]),
        dates: field(obj, &["dates", "duration", "period", "date_range"]),
        location: field(obj, &["location", "city"]),
        // The old schema stored either a bullet list or one freeform
        // description string; both collapse to ordered points here.
        points: points_from(obj),
    };
    if entry.title.is_empty() && entry.company.is_empty() {
        return None;
    }
    Some(entry)
}

fn points_from(obj: &serde_json::Map<String, Value>) -> Vec<String> {
    if let Some(v) = first_of(obj, &["points", "bullets", "highlights", "responsibilities"]) {
        return string_list_of(Some(v));
    }
    match first_of(obj, &["description", "details"]) {
        Some(Value::String(s)) => s
            .lines()
            .map(|l| crate::text::strip_bullet(l.trim()).0.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect(),
        Some(v) => string_list_of(Some(v)),
        None => Vec::new(),
    }
}

fn education_from(value: &Value) -> Vec<EducationEntry> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => return Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|v| {
            let obj = v.as_object()?;
            let entry = EducationEntry {
                degree: field(obj, &["degree", "qualification", "Degree"]),
                school: field(obj, &["school", "institution", "university", "college"]),
                year: field(obj, &["year", "graduation_year", "dates"]),
            };
            if entry.degree.is_empty() && entry.school.is_empty() {
                return None;
            }
            Some(entry)
        })
        .collect()
}

fn projects_from(value: &Value) -> Vec<ProjectEntry> {
    let items: Vec<&Value> = match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![value],
        _ => return Vec::new(),
    };
    items
        .into_iter()
        .filter_map(|v| {
            let obj = v.as_object()?;
            let entry = ProjectEntry {
                name: field(obj, &["name", "title", "project_name"]),
                description: field(obj, &["description", "summary", "details"]),
                technologies: string_list_of(first_of(
                    obj,
                    &["technologies", "tech_stack", "stack", "tools"],
                )),
            };
            if entry.name.is_empty() && entry.description.is_empty() {
                return None;
            }
            Some(entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_object_payload_is_rejected() {
        let err = structured_cv_from_stored(&json!("just a string")).unwrap_err();
        assert!(matches!(err, NormalizeError::InvalidPayload(_)));
    }

    #[test]
    fn test_canonical_payload_round_trips() {
        let mut cv = StructuredCv::default();
        cv.professional_summary = "Engineer.".to_string();
        cv.skills.technical.push("Rust".to_string());
        let value = cv.to_payload().unwrap();
        let back = structured_cv_from_stored(&value).unwrap();
        assert_eq!(back.professional_summary, "Engineer.");
        assert_eq!(back.skills.technical, vec!["Rust"]);
    }

    #[test]
    fn test_capitalized_variant_keys() {
        let payload = json!({
            "Skills": ["Python", "Leadership"],
            "Experience": [{"role": "Engineer", "employer": "Acme"}],
        });
        let cv = structured_cv_from_stored(&payload).unwrap();
        assert_eq!(cv.skills.technical, vec!["Python"]);
        assert_eq!(cv.skills.soft, vec!["Leadership"]);
        assert_eq!(cv.work_experience[0].title, "Engineer");
        assert_eq!(cv.work_experience[0].company, "Acme");
    }

    #[test]
    fn test_skills_as_comma_string() {
        let payload = json!({"technical_skills": "Python, SQL, AWS"});
        let cv = structured_cv_from_stored(&payload).unwrap();
        assert_eq!(cv.skills.technical, vec!["Python", "SQL", "AWS"]);
    }

    #[test]
    fn test_bucketed_skills_object_is_kept_verbatim() {
        let payload = json!({"skills": {"technical": ["Rust"], "soft": ["Empathy"]}});
        let cv = structured_cv_from_stored(&payload).unwrap();
        assert_eq!(cv.skills.technical, vec!["Rust"]);
        assert_eq!(cv.skills.soft, vec!["Empathy"]);
    }

    #[test]
    fn test_freeform_description_becomes_points() {
        let payload = json!({
            "experience": [{
                "title": "Engineer",
                "company": "Acme",
                "description": "- Built the API\n- Ran the migration"
            }]
        });
        let cv = structured_cv_from_stored(&payload).unwrap();
        assert_eq!(cv.work_experience[0].points, vec!["Built the API", "Ran the migration"]);
    }

    #[test]
    fn test_experience_as_raw_text_reparses() {
        let payload = json!({"experience": "Engineer at Acme (2020-2023)\n- Led a team"});
        let cv = structured_cv_from_stored(&payload).unwrap();
        assert_eq!(cv.work_experience[0].company, "Acme");
        assert_eq!(cv.work_experience[0].dates, "2020-2023");
    }

    #[test]
    fn test_entry_without_identity_is_dropped() {
        let payload = json!({"experience": [{"description": "orphan text"}]});
        let cv = structured_cv_from_stored(&payload).unwrap();
        assert!(cv.work_experience.is_empty());
    }

    #[test]
    fn test_placeholder_fields_are_scrubbed() {
        let payload = json!({
            "contact": {"name": "Not Provided", "email": "a@b.co"},
            "education": [{"degree": "Degree", "institution": "Real University"}]
        });
        let cv = structured_cv_from_stored(&payload).unwrap();
        assert_eq!(cv.contact_information.name, "");
        assert_eq!(cv.contact_information.email, "a@b.co");
        assert_eq!(cv.education[0].degree, "");
        assert_eq!(cv.education[0].school, "Real University");
    }

    #[test]
    fn test_empty_object_defaults_everything() {
        let cv = structured_cv_from_stored(&json!({})).unwrap();
        assert_eq!(cv, StructuredCv::default());
    }
}
