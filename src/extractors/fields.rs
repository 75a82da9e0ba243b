// src/extractors/fields.rs

// --- Imports ---
use crate::models::ExtractedFields;
use crate::utils::text;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

// --- Constants ---
const AIDS_MAX_LINES: usize = 6; // Lines kept after the "Hilfsmittel" line
const SUMMARY_LINES: usize = 3;

// --- Regex Patterns for Text Matching (Lazy Static) ---
static PROFESSION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Ausbildungsberuf:\s*(.+)").expect("Failed to compile PROFESSION_RE")
});

static EXAM_PART_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Abschlussprüfung\s*(Teil\s*\d)").expect("Failed to compile EXAM_PART_RE")
});

static DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{2}\.\d{2}\.\d{4}").expect("Failed to compile DATE_RE")
});

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\d+\s*-?\s*(?:jährige|Jahre|Jahr))").expect("Failed to compile DURATION_RE")
});

// Tried in order, first hit wins. The first pattern also matches inside
// "Zugangsvoraussetzungen".
static REQUIREMENTS_RE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)Voraussetz[a-z]*[:\s]*([\s\S]{0,300})",
        r"(?i)Zugangsvoraussetzungen[:\s]*([\s\S]{0,300})",
    ]
    .iter()
    .filter_map(|pat| Regex::new(pat).ok())
    .collect()
});

static AIDS_KEYWORD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Hilfsmittel").expect("Failed to compile AIDS_KEYWORD_RE")
});

/// Runs the fixed battery of field rules over one page of text.
///
/// Every rule is independent: a rule that finds nothing leaves its field
/// `None` and never influences the others. Each rule uses its first match only.
pub struct FieldExtractor;

impl FieldExtractor {
    pub fn new() -> Self {
        Self {}
    }

    pub fn extract(&self, page_text: &str) -> ExtractedFields {
        let mut fields = ExtractedFields::default();

        if let Some((name, codes)) = self.profession(page_text) {
            fields.beruf = name;
            fields.codes = codes;
        }
        fields.abschlusssteil = self.exam_part(page_text);
        fields.dates = self.dates(page_text);
        fields.ausbildungsdauer = self.training_duration(page_text);
        fields.voraussetzungen = self.requirements(page_text);
        fields.hilfsmittel = self.permitted_aids(page_text);
        fields.summary = non_empty(text::join_first_lines(page_text, SUMMARY_LINES));

        tracing::trace!("Extracted fields: {:?}", fields);
        fields
    }

    /// `Ausbildungsberuf: Name (codes)` -> (name, codes). Without a
    /// parenthesized segment the whole value is the name.
    fn profession(&self, page_text: &str) -> Option<(Option<String>, Option<String>)> {
        let caps = PROFESSION_RE.captures(page_text)?;
        let value = caps.get(1)?.as_str().trim();

        if value.contains('(') && value.contains(')') {
            let (name, rest) = value.split_once('(')?;
            let codes = rest.trim().trim_end_matches(')').trim();
            Some((non_empty(name.trim().to_string()), non_empty(codes.to_string())))
        } else {
            Some((non_empty(value.to_string()), None))
        }
    }

    fn exam_part(&self, page_text: &str) -> Option<String> {
        EXAM_PART_RE
            .captures(page_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn dates(&self, page_text: &str) -> Option<Vec<String>> {
        let unique: BTreeSet<&str> = DATE_RE.find_iter(page_text).map(|m| m.as_str()).collect();
        if unique.is_empty() {
            return None;
        }
        Some(unique.into_iter().map(str::to_string).collect())
    }

    fn training_duration(&self, page_text: &str) -> Option<String> {
        DURATION_RE
            .captures(page_text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn requirements(&self, page_text: &str) -> Option<String> {
        let capture = REQUIREMENTS_RE
            .iter()
            .find_map(|re| re.captures(page_text))?
            .get(1)?
            .as_str();
        text::first_line(capture).map(str::to_string)
    }

    /// Up to six non-empty lines after the line holding "Hilfsmittel".
    fn permitted_aids(&self, page_text: &str) -> Option<String> {
        let start = AIDS_KEYWORD_RE.find(page_text)?.start();
        let block: Vec<&str> = text::non_empty_lines(&page_text[start..])
            .skip(1)
            .take(AIDS_MAX_LINES)
            .collect();
        non_empty(block.join(" "))
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
