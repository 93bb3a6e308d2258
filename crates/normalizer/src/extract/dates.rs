//! Shared date heuristics for the entry parsers: date-range spotting in
//! job headers and year extraction for education lines.

const MONTHS: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?";

fn month_year_range_pattern() -> &'static regex::Regex {
    // "Jan 2020 - Mar 2023", "March 2020 to Present", "2019 – 2021"
    static RE: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
        regex::Regex::new(&format!(
            r"(?i)\b(?:{m}\s+)?(?:19|20)\d{{2}}\s*(?:-|–|—|to|until)\s*(?:present|current|now|(?:{m}\s+)?(?:19|20)\d{{2}})\b",
            m = MONTHS
        ))
        .unwrap()
    });
    &RE
}

/// Pulls a date range off a header line. Tries a trailing parenthesized or
/// bracketed range first, then a free range anywhere in the line. Returns
/// the date text and the line with the matched span removed.
pub(crate) fn split_off_date_range(line: &str) -> (String, String) {
    for pattern in [
        regex!(r"\(([^()]*(?:19|20)\d{2}[^()]*)\)\s*$"),
        regex!(r"\[([^\[\]]*(?:19|20)\d{2}[^\[\]]*)\]\s*$"),
    ] {
        if let Some(caps) = pattern.captures(line) {
            let whole = caps.get(0).unwrap();
            let dates = caps.get(1).unwrap().as_str().trim().to_string();
            let remainder = cleanup_header(&remove_span(line, whole.start(), whole.end()));
            return (dates, remainder);
        }
    }
    if let Some(m) = month_year_range_pattern().find(line) {
        let dates = m.as_str().trim().to_string();
        let remainder = cleanup_header(&remove_span(line, m.start(), m.end()));
        return (dates, remainder);
    }
    (String::new(), line.trim().to_string())
}

/// True when `s` reads like a date: a 4-digit year or an open-ended marker.
pub(crate) fn is_date_like(s: &str) -> bool {
    regex!(r"(?i)\b(?:19|20)\d{2}\b|\bpresent\b|\bcurrent\b").is_match(s)
}

/// Year extraction for education lines: parenthesized/bracketed year, then
/// a standalone 4-digit year, then graduated/expected phrasing (which may
/// resolve to "Present"). Returns the year text and the line with an
/// enclosed year span removed.
pub(crate) fn split_off_year(line: &str) -> (String, String) {
    if let Some(caps) = regex!(r"[(\[]\s*((?:19|20)\d{2})\s*[)\]]").captures(line) {
        let whole = caps.get(0).unwrap();
        let year = caps.get(1).unwrap().as_str().to_string();
        return (year, cleanup_header(&remove_span(line, whole.start(), whole.end())));
    }
    if let Some(caps) = regex!(r"\b((?:19|20)\d{2})\b").captures(line) {
        let whole = caps.get(0).unwrap();
        let year = caps.get(1).unwrap().as_str().to_string();
        return (year, cleanup_header(&remove_span(line, whole.start(), whole.end())));
    }
    if let Some(caps) =
        regex!(r"(?i)\b(?:graduating|graduated|expected)\b[:\s]*((?:19|20)\d{2}|present)").captures(line)
    {
        let year = caps.get(1).unwrap().as_str().to_string();
        return (year, cleanup_header(line));
    }
    (String::new(), line.trim().to_string())
}

fn remove_span(line: &str, start: usize, end: usize) -> String {
    format!("{}{}", &line[..start], &line[end..])
}

/// Trims separator debris left behind after a span removal.
fn cleanup_header(line: &str) -> String {
    let collapsed =
        crate::text::collapse_ws(&line.replace("()", " ").replace("[]", " "));
    collapsed
        .trim_end_matches(&['-', '–', '—', '|', ','][..])
        .trim_start_matches(&['-', '–', '—', '|', ','][..])
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parenthesized_range_is_split_off() {
        let (dates, rest) = split_off_date_range("Software Engineer at Acme Corp (2020-2023)");
        assert_eq!(dates, "2020-2023");
        assert_eq!(rest, "Software Engineer at Acme Corp");
    }

    #[test]
    fn test_bracketed_range_is_split_off() {
        let (dates, rest) = split_off_date_range("Engineer at Beta [Jan 2018 - Mar 2020]");
        assert_eq!(dates, "Jan 2018 - Mar 2020");
        assert_eq!(rest, "Engineer at Beta");
    }

    #[test]
    fn test_free_month_year_range() {
        let (dates, rest) = split_off_date_range("Data Analyst at Gamma Jan 2019 – Present");
        assert_eq!(dates, "Jan 2019 – Present");
        assert_eq!(rest, "Data Analyst at Gamma");
    }

    #[test]
    fn test_plain_year_range_without_months() {
        let (dates, rest) = split_off_date_range("Consultant at Delta 2015 to 2018");
        assert_eq!(dates, "2015 to 2018");
        assert_eq!(rest, "Consultant at Delta");
    }

    #[test]
    fn test_line_without_dates_passes_through() {
        let (dates, rest) = split_off_date_range("Engineer at Acme");
        assert_eq!(dates, "");
        assert_eq!(rest, "Engineer at Acme");
    }

    #[test]
    fn test_is_date_like() {
        assert!(is_date_like("2020-2023"));
        assert!(is_date_like("Jan 2020"));
        assert!(is_date_like("Present"));
        assert!(!is_date_like("Remote"));
    }

    #[test]
    fn test_year_from_parentheses() {
        let (year, rest) = split_off_year("BSc Computer Science - Top University (2018)");
        assert_eq!(year, "2018");
        assert_eq!(rest, "BSc Computer Science - Top University");
    }

    #[test]
    fn test_standalone_year() {
        let (year, rest) = split_off_year("MSc Physics, Old College 2014");
        assert_eq!(year, "2014");
        assert_eq!(rest, "MSc Physics, Old College");
    }

    #[test]
    fn test_graduated_present_form() {
        let (year, _) = split_off_year("BEng Mechanical, expected Present");
        assert_eq!(year, "Present");
    }

    #[test]
    fn test_no_year_found() {
        let (year, rest) = split_off_year("Diploma in Design - Art School");
        assert_eq!(year, "");
        assert_eq!(rest, "Diploma in Design - Art School");
    }
}
