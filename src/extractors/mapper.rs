// src/extractors/mapper.rs

// --- Imports ---
use crate::models::{Beruf, ExamArea, ExtractedFields, Record, Task, Termin, UNSTRUCTURED};
use once_cell::sync::Lazy;
use regex::Regex;

// --- Constants ---
/// Area phrases checked in this order. They are not mutually exclusive:
/// "Schriftliche Prüfung" also contains "Prüfung", and both produce an area.
const AREA_PHRASES: [&str; 4] = [
    "Schriftliche Prüfung",
    "Praktische Prüfung",
    "Abschlussprüfung",
    "Prüfung",
];
const FALLBACK_AREA: &str = "Prüfung";

// --- Regex Patterns (Lazy Static) ---
static CODE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[,;\s]+").expect("Failed to compile CODE_SPLIT_RE")
});

static EMBEDDED_CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{3,4})").expect("Failed to compile EMBEDDED_CODE_RE")
});

static ISO_SOURCE_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2})\.(\d{2})\.(\d{4})").expect("Failed to compile ISO_SOURCE_DATE_RE")
});

static TIME_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{1,2}:\d{2})\s*-\s*(\d{1,2}:\d{2})").expect("Failed to compile TIME_RANGE_RE")
});

static MINUTES_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{1,3})\s*Min").expect("Failed to compile MINUTES_RE")
});

/// Turns extracted fields plus the raw page text into one schema-shaped record.
///
/// Never fails: anything it cannot find degrades to an empty or zero value,
/// and a page without any known area phrase gets one generic "Prüfung" area.
pub struct SchemaMapper;

impl SchemaMapper {
    pub fn new() -> Self {
        Self {}
    }

    pub fn map(&self, fields: &ExtractedFields, page_text: &str) -> Record {
        let beschreibung = fields
            .summary
            .clone()
            .or_else(|| fields.beruf.clone())
            .unwrap_or_default();

        let beruf_nr = fields.codes.as_deref().map(parse_codes).unwrap_or_default();

        let mut areas = self.detect_areas(fields, page_text);
        if areas.is_empty() {
            tracing::debug!("No exam area phrase found, using fallback area");
            areas.push(fallback_area(fields));
        }

        Record {
            beruf: Beruf {
                beschreibung,
                beruf_nr,
                pruefungs_bereich: areas,
            },
        }
    }

    /// One area with one task for every phrase present anywhere in the text.
    /// Time range and duration come from the whole page, not from the area.
    fn detect_areas(&self, fields: &ExtractedFields, page_text: &str) -> Vec<ExamArea> {
        let haystack = page_text.to_lowercase();
        let found: Vec<&str> = AREA_PHRASES
            .iter()
            .copied()
            .filter(|phrase| haystack.contains(&phrase.to_lowercase()))
            .collect();
        if found.is_empty() {
            return Vec::new();
        }

        let (uhrzeitvon, uhrzeitbis) = time_range(page_text);
        let termin = Termin {
            datum: fields.first_date().map(to_iso_date).unwrap_or_default(),
            uhrzeitvon,
            uhrzeitbis,
            dauer: duration_minutes(page_text),
        };

        found
            .into_iter()
            .map(|phrase| area(phrase, termin.clone(), fields))
            .collect()
    }
}

impl Default for SchemaMapper {
    fn default() -> Self {
        Self::new()
    }
}

fn area(name: &str, termin: Termin, fields: &ExtractedFields) -> ExamArea {
    ExamArea {
        name: name.to_string(),
        aufgaben: vec![Task {
            name: name.to_string(),
            struktur: UNSTRUCTURED.to_string(),
            termin,
            hilfmittel: fields.hilfsmittel.clone(),
        }],
    }
}

fn fallback_area(fields: &ExtractedFields) -> ExamArea {
    let termin = Termin {
        datum: fields.first_date().map(to_iso_date).unwrap_or_default(),
        ..Termin::default()
    };
    area(FALLBACK_AREA, termin, fields)
}

/// Splits the raw code string on commas, semicolons and whitespace. Pure digit
/// tokens are taken as-is, otherwise the first 3-4 digit run inside the token
/// is used. Tokens yielding neither are dropped. Only ASCII digits count.
pub fn parse_codes(codes: &str) -> Vec<u64> {
    CODE_SPLIT_RE
        .split(codes)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .filter_map(|token| {
            let direct = token
                .chars()
                .all(|c| c.is_ascii_digit())
                .then(|| token.parse::<u64>().ok())
                .flatten();
            direct.or_else(|| {
                EMBEDDED_CODE_RE
                    .captures(token)
                    .and_then(|caps| caps[1].parse::<u64>().ok())
            })
        })
        .collect()
}

/// `DD.MM.YYYY` -> `YYYY-MM-DD` by reordering fields. No calendar check:
/// `31.02.2024` becomes `2024-02-31`. Input that does not start with a
/// date is returned unchanged.
pub fn to_iso_date(date: &str) -> String {
    match ISO_SOURCE_DATE_RE.captures(date) {
        Some(caps) => format!("{}-{}-{}", &caps[3], &caps[2], &caps[1]),
        None => date.to_string(),
    }
}

fn time_range(page_text: &str) -> (String, String) {
    TIME_RANGE_RE
        .captures(page_text)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .unwrap_or_default()
}

fn duration_minutes(page_text: &str) -> u32 {
    MINUTES_RE
        .captures(page_text)
        .and_then(|caps| caps[1].parse::<u32>().ok())
        .unwrap_or(0)
}
