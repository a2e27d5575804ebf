// ============================================================
// Layer 4 — Exam Metadata Extraction
// ============================================================
// Derives the exam's title, version and description from the
// flat document text, independently of question parsing.
//
//   Title:       the first of the first N lines that mentions a
//                product marker AND an exam marker, trimmed.
//                Otherwise a fixed default title.
//   Version:     version patterns are tried in order over the whole
//                text; the first pattern that matches anywhere wins
//                and its first capture group becomes "V<capture>".
//                Otherwise a fixed "unknown" sentinel. Only the
//                "V<digits>.<digits>" form is recognised out of the
//                box; spellings like "Version 3.2" or "v3.2" need
//                extra patterns in the heuristics file.
//   Description: a template with "{version}" filled in.
//
// All literals live in MetadataHeuristics so another question
// bank family can be handled by editing a JSON file.
//
// Reference: regex crate documentation
//            serde documentation (derive, default)

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::ExtractError;
use crate::domain::exam::ExamMetadata;

/// Placeholder replaced by the resolved version in the description
pub const VERSION_PLACEHOLDER: &str = "{version}";

// ─── Heuristics ───────────────────────────────────────────────────────────────
/// Tunable literals for the metadata scan. Serialisable so it can be
/// stored as JSON and edited by hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataHeuristics {
    /// How many leading lines are searched for a title
    pub title_scan_lines: usize,

    /// A title line must contain at least one of these
    pub product_markers: Vec<String>,

    /// ... and at least one of these
    pub exam_markers: Vec<String>,

    pub default_title: String,

    /// Version used when no pattern matches
    pub unknown_version: String,

    /// Description text; "{version}" is replaced by the version
    pub description_template: String,

    /// Regexes with one capture group holding "<digits>.<digits>"
    pub version_patterns: Vec<String>,
}

impl Default for MetadataHeuristics {
    fn default() -> Self {
        Self {
            title_scan_lines:     10,
            product_markers:      vec!["AWS".to_string()],
            exam_markers:         vec!["SAA".to_string(), "Solutions".to_string()],
            default_title:        "AWS SAA Exam".to_string(),
            unknown_version:      "Unknown".to_string(),
            description_template: "AWS SAA exam question bank - {version}".to_string(),
            version_patterns:     vec![r"V(\d+\.\d+)".to_string()],
        }
    }
}

// ─── MetadataExtractor ────────────────────────────────────────────────────────
/// Heuristics with their version patterns compiled.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    heuristics: MetadataHeuristics,
    versions:   Vec<Regex>,
}

impl MetadataExtractor {
    /// Compile the version patterns. Fails if any pattern is not a
    /// valid regex or has no capture group.
    pub fn new(heuristics: MetadataHeuristics) -> Result<Self, ExtractError> {
        let versions = heuristics
            .version_patterns
            .iter()
            .map(|pattern| {
                let re = Regex::new(pattern).map_err(|e| {
                    ExtractError::InvalidHeuristics(format!("version pattern '{pattern}': {e}"))
                })?;
                // captures_len() counts the implicit whole-match group
                if re.captures_len() < 2 {
                    return Err(ExtractError::InvalidHeuristics(format!(
                        "version pattern '{pattern}' has no capture group"
                    )));
                }
                Ok(re)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { heuristics, versions })
    }

    pub fn heuristics(&self) -> &MetadataHeuristics {
        &self.heuristics
    }

    /// Resolve title, version and description from the flat text.
    pub fn extract(&self, text: &str) -> ExamMetadata {
        let title       = self.find_title(text);
        let version     = self.find_version(text);
        let description = self
            .heuristics
            .description_template
            .replace(VERSION_PLACEHOLDER, &version);

        ExamMetadata { title, version, description }
    }

    fn find_title(&self, text: &str) -> String {
        let h = &self.heuristics;

        text.split('\n')
            .take(h.title_scan_lines)
            .find(|line| {
                h.product_markers.iter().any(|m| line.contains(m.as_str()))
                    && h.exam_markers.iter().any(|m| line.contains(m.as_str()))
            })
            .map(|line| line.trim().to_string())
            .unwrap_or_else(|| h.default_title.clone())
    }

    fn find_version(&self, text: &str) -> String {
        self.versions
            .iter()
            .find_map(|re| re.captures(text)?.get(1))
            .map(|m| format!("V{}", m.as_str()))
            .unwrap_or_else(|| self.heuristics.unknown_version.clone())
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        // The default patterns are fixed literals; an empty pattern
        // list is the only fallback that cannot fail to compile.
        Self::new(MetadataHeuristics::default()).unwrap_or_else(|_| Self {
            heuristics: MetadataHeuristics::default(),
            versions:   Vec::new(),
        })
    }
}
