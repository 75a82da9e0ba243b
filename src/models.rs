// src/models.rs
use serde::{Deserialize, Serialize};

/// Value of `Task::struktur`; the page heuristics never recover task structure.
pub const UNSTRUCTURED: &str = "unstructured";

/// One page of text as delivered by a `PageSource`.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub source_document: String, // Path of the document, as displayed
    pub page_index: u32,         // 1-based
    pub text: String,
}

/// Flat result of the field rules for one page. A `None` field means the
/// corresponding rule did not fire; extraction never stores empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beruf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub codes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abschlusssteil: Option<String>,
    /// Deduplicated `DD.MM.YYYY` strings in string order (not chronological).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ausbildungsdauer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voraussetzungen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hilfsmittel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl ExtractedFields {
    /// First date in stored (string-sorted) order.
    pub fn first_date(&self) -> Option<&str> {
        self.dates.as_ref().and_then(|d| d.first()).map(String::as_str)
    }
}

/// Schema-shaped output record, one per page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub beruf: Beruf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beruf {
    pub beschreibung: String,
    #[serde(rename = "berufNr")]
    pub beruf_nr: Vec<u64>,
    #[serde(rename = "prüfungsBereich")]
    pub pruefungs_bereich: Vec<ExamArea>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamArea {
    pub name: String,
    pub aufgaben: Vec<Task>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub struktur: String,
    pub termin: Termin,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hilfmittel: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Termin {
    pub datum: String,      // YYYY-MM-DD or ""
    pub uhrzeitvon: String, // H:MM / HH:MM or ""
    pub uhrzeitbis: String,
    pub dauer: u32, // minutes
}

/// Intermediate per-page dump written by `extract --pages-output`.
#[derive(Debug, Clone, Serialize)]
pub struct PageRecord {
    pub id: String,
    pub source_file: String,
    pub page: u32,
    pub title: String,
    pub text: String,
    pub parsed: ExtractedFields,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_schema_field_names() {
        let record = Record {
            beruf: Beruf {
                beschreibung: "Elektroniker".to_string(),
                beruf_nr: vec![123],
                pruefungs_bereich: vec![ExamArea {
                    name: "Prüfung".to_string(),
                    aufgaben: vec![Task {
                        name: "Prüfung".to_string(),
                        struktur: UNSTRUCTURED.to_string(),
                        termin: Termin::default(),
                        hilfmittel: None,
                    }],
                }],
            },
        };

        let json = serde_json::to_value(&record).unwrap();
        let beruf = &json["beruf"];
        assert_eq!(beruf["berufNr"], serde_json::json!([123]));
        let task = &beruf["prüfungsBereich"][0]["aufgaben"][0];
        assert_eq!(task["struktur"], "unstructured");
        assert_eq!(task["termin"]["dauer"], 0);
        assert!(task.get("hilfmittel").is_none(), "absent aids must not be serialized");
    }

    #[test]
    fn extracted_fields_omit_missing_keys() {
        let fields = ExtractedFields {
            summary: Some("Kopf".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json, serde_json::json!({ "summary": "Kopf" }));
        assert_eq!(fields.first_date(), None);
    }
}
