//! Contact extraction: confidence-ordered field fills over the about
//! block, falling back to the full document. No step overwrites a field an
//! earlier step already set, and no step ever fails; absence is an empty
//! string.

use chrono::NaiveDate;

use crate::config::NormalizerConfig;
use crate::extract::recognizer::{EntityKind, EntityRecognizer};
use crate::models::cv::ContactInfo;
use crate::sections::headings::classify_heading;
use crate::text::{is_placeholder, scrub_placeholder, word_count};

/// Extracts contact details from the about block, then from the full text
/// for anything still missing.
pub fn extract_contact(
    about_text: &str,
    full_text: &str,
    recognizer: &dyn EntityRecognizer,
    config: &NormalizerConfig,
) -> ContactInfo {
    let mut contact = ContactInfo::default();
    let head = leading_lines(full_text, config.name_scan_lines);

    contact.email = find_email(about_text)
        .or_else(|| find_email(full_text))
        .unwrap_or_default();

    contact.phone = find_phone(about_text, full_text);

    fill_links(&mut contact, about_text);
    fill_links(&mut contact, full_text);

    contact.name = find_name(&head, recognizer, &contact);

    fill_location(&mut contact, about_text, full_text, recognizer, &head);

    contact.date_of_birth = find_date_of_birth(about_text)
        .or_else(|| find_date_of_birth(full_text))
        .unwrap_or_default();

    scrub_placeholder(&mut contact.name);
    scrub_placeholder(&mut contact.location);
    scrub_placeholder(&mut contact.address);
    contact
}

fn leading_lines(text: &str, count: usize) -> String {
    text.lines().take(count).collect::<Vec<_>>().join("\n")
}

// --- email ------------------------------------------------------------------

fn find_email(text: &str) -> Option<String> {
    regex!(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}")
        .find(text)
        .map(|m| m.as_str().to_string())
}

// --- phone ------------------------------------------------------------------

/// Four fallback steps, each over the about block and then the full text:
/// a locale-agnostic grouped-number scan, a labeled `Phone:` field, a
/// generic separated digit group, and finally any contiguous digit run.
/// Candidates must carry at least 7 digits and must not read as a date.
fn find_phone(about_text: &str, full_text: &str) -> String {
    for text in [about_text, full_text] {
        if let Some(p) = scan_grouped_numbers(text) {
            return p;
        }
    }
    for text in [about_text, full_text] {
        if let Some(caps) = regex!(
            r"(?i)(?:phone|mobile|cell|tel|contact\s*no)\.?\s*(?:number|no\.?)?\s*[:\-]\s*([+(]?\d[\d \t().\-/–]*\d)"
        )
        .captures(text)
        {
            let candidate = caps.get(1).unwrap().as_str().trim();
            if phone_plausible(candidate) {
                return candidate.to_string();
            }
        }
    }
    for text in [about_text, full_text] {
        for m in regex!(r"\+?\d[\d \t().\-/–]{5,}\d").find_iter(text) {
            if phone_plausible(m.as_str()) {
                return m.as_str().trim().to_string();
            }
        }
    }
    for text in [about_text, full_text] {
        for m in regex!(r"\d{7,}").find_iter(text) {
            if phone_plausible(m.as_str()) {
                return m.as_str().to_string();
            }
        }
    }
    String::new()
}

/// High-confidence pass: international prefix or parenthesized group
/// required, mimicking a strict phone-number parser doing a multi-match
/// sweep.
fn scan_grouped_numbers(text: &str) -> Option<String> {
    for m in regex!(r"(?:\+|\()\d[\d \t().\-/–]{5,}\d").find_iter(text) {
        if phone_plausible(m.as_str()) {
            return Some(m.as_str().trim().to_string());
        }
    }
    None
}

fn phone_plausible(candidate: &str) -> bool {
    let digits = candidate.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        return false;
    }
    let c = candidate.trim();
    // Year ranges and slash/dot dates are not phone numbers.
    if regex!(r"^(?:19|20)\d{2}\s*[-–—/]\s*(?:19|20)\d{2}$").is_match(c) {
        return false;
    }
    if regex!(r"^\d{1,4}[/.\-]\d{1,2}[/.\-]\d{1,4}$").is_match(c) {
        return false;
    }
    true
}

// --- links ------------------------------------------------------------------

fn fill_links(contact: &mut ContactInfo, text: &str) {
    if contact.linkedin.is_empty() {
        if let Some(m) = regex!(r"(?i)(?:https?://)?(?:[a-z]{2,3}\.)?linkedin\.com/[A-Za-z0-9_%/\-.]+").find(text)
        {
            contact.linkedin = with_scheme(m.as_str());
        }
    }
    if contact.github.is_empty() {
        if let Some(m) =
            regex!(r"(?i)(?:https?://)?(?:www\.)?github\.com/[A-Za-z0-9_%/\-.]+").find(text)
        {
            contact.github = with_scheme(m.as_str());
        }
    }
    if contact.website.is_empty() {
        for m in regex!(r#"(?i)(?:https?://|www\.)[^\s|,;<>()\[\]"']+"#).find_iter(text) {
            let lower = m.as_str().to_lowercase();
            if lower.contains("linkedin.com") || lower.contains("github.com") {
                continue;
            }
            contact.website = with_scheme(m.as_str());
            break;
        }
    }
}

fn with_scheme(url: &str) -> String {
    let url = url.trim_end_matches(&['.', ','][..]);
    if url.to_lowercase().starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

// --- name -------------------------------------------------------------------

/// Recognizer first: the first PERSON-like entity in the document head
/// with no digits and at least two tokens. Fallback: the first line that
/// is not a contact line, stripped of a `Name:` label, accepted only when
/// short and digit-free.
fn find_name(head: &str, recognizer: &dyn EntityRecognizer, contact: &ContactInfo) -> String {
    for entity in recognizer.recognize(head) {
        if entity.kind != EntityKind::Person {
            continue;
        }
        let text = entity.text.trim();
        if text.chars().any(|c| c.is_ascii_digit()) {
            continue;
        }
        if word_count(text) >= 2 {
            return text.to_string();
        }
    }

    for line in head.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if is_contact_line(line, contact) {
            continue;
        }
        let stripped = regex!(r"(?i)^name\s*[:\-]\s*")
            .replace(line, "")
            .trim()
            .to_string();
        if stripped.is_empty() {
            return String::new();
        }
        let ok = word_count(&stripped) <= 6
            && !stripped.contains(':')
            && !stripped.split_whitespace().any(|w| w.chars().any(|c| c.is_ascii_digit()))
            && !is_placeholder(&stripped)
            && classify_heading(&stripped).is_none();
        return if ok { stripped } else { String::new() };
    }
    String::new()
}

fn is_contact_line(line: &str, contact: &ContactInfo) -> bool {
    if line.contains('@') || line.contains("http") || line.contains("www.") {
        return true;
    }
    if !contact.phone.is_empty() && line.contains(contact.phone.as_str()) {
        return true;
    }
    // A line that is mostly digits is a bare phone/fax line.
    line.chars().filter(|c| c.is_ascii_digit()).count() >= 7
}

// --- location ---------------------------------------------------------------

fn fill_location(
    contact: &mut ContactInfo,
    about_text: &str,
    full_text: &str,
    recognizer: &dyn EntityRecognizer,
    head: &str,
) {
    if contact.location.is_empty() {
        let scope = if about_text.trim().is_empty() { head } else { about_text };
        if let Some(entity) = recognizer
            .recognize(scope)
            .into_iter()
            .find(|e| e.kind == EntityKind::Place)
        {
            contact.location = entity.text;
        }
    }

    for text in [about_text, full_text] {
        if !contact.address.is_empty() && !contact.location.is_empty() {
            break;
        }
        if let Some(caps) =
            regex!(r"(?i)\b(?:address|location)\s*[:\-]\s*([^\r\n]+)").captures(text)
        {
            let value = caps.get(1).unwrap().as_str().trim();
            if value.is_empty() || is_placeholder(value) {
                continue;
            }
            if contact.address.is_empty() {
                contact.address = value.to_string();
            }
            if contact.location.is_empty() {
                let segments: Vec<&str> =
                    value.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
                contact.location = if segments.len() >= 2 {
                    segments[segments.len() - 2..].join(", ")
                } else {
                    value.to_string()
                };
            }
        }
    }
}

// --- date of birth ----------------------------------------------------------

/// Date shapes anchored to a dob/born label. Numeric candidates must parse
/// with chrono under a known format before they are kept; a label with no
/// parseable date fills nothing.
fn find_date_of_birth(text: &str) -> Option<String> {
    let caps = regex!(r"(?i)\b(?:d\.?o\.?b\.?|date\s+of\s+birth|born(?:\s+on)?)\b\s*[:\-]?\s*([^\r\n]{0,40})")
        .captures(text)?;
    let window = caps.get(1).unwrap().as_str();

    if let Some(m) = regex!(r"\b\d{1,2}[/.\-]\d{1,2}[/.\-]\d{2,4}\b").find(window) {
        if numeric_date_parses(m.as_str()) {
            return Some(m.as_str().to_string());
        }
    }
    if let Some(m) = regex!(
        r"(?i)\b\d{1,2}(?:st|nd|rd|th)?\s+(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?,?\s+\d{4}\b"
    )
    .find(window)
    {
        return Some(m.as_str().to_string());
    }
    if let Some(m) = regex!(
        r"(?i)\b(?:january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+\d{1,2}(?:st|nd|rd|th)?,?\s+\d{4}\b"
    )
    .find(window)
    {
        return Some(m.as_str().to_string());
    }
    None
}

fn numeric_date_parses(candidate: &str) -> bool {
    const FORMATS: &[&str] = &[
        "%d/%m/%Y", "%m/%d/%Y", "%d/%m/%y", "%d-%m-%Y", "%m-%d-%Y", "%Y-%m-%d",
        "%d.%m.%Y", "%d.%m.%y",
    ];
    FORMATS
        .iter()
        .any(|f| NaiveDate::parse_from_str(candidate, f).is_ok())
}
