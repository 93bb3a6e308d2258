use serde::{Deserialize, Serialize};

/// Tunable caps and thresholds for the normalization pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerConfig {
    /// Maximum bullet points kept per experience entry.
    pub max_points_per_entry: usize,
    /// A whole line is only treated as a section heading at or below this
    /// word count.
    pub heading_max_words: usize,
    /// Summaries shorter than this many words draw a suggestion.
    pub min_summary_words: usize,
    /// Experience entries with fewer points than this draw a suggestion.
    pub min_points_per_entry: usize,
    /// How many leading lines of the document are scanned for the name.
    pub name_scan_lines: usize,
    /// Additional-information blocks longer than this draw a suggestion.
    pub max_additional_info_chars: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            max_points_per_entry: 8,
            heading_max_words: 6,
            min_summary_words: 30,
            min_points_per_entry: 2,
            name_scan_lines: 10,
            max_additional_info_chars: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_caps() {
        let config = NormalizerConfig::default();
        assert_eq!(config.max_points_per_entry, 8);
        assert_eq!(config.heading_max_words, 6);
    }
}
