// src/validation/mod.rs
pub mod report;
pub mod schema;

pub use report::{validate_batch, ValidationReport, ValidatorConfig};
pub use schema::JsonSchema;

use crate::storage;
use crate::utils::error::AppError;
use std::path::Path;

/// Schema describing exactly the records written by `extract`.
pub const BUNDLED_SCHEMA: &str = include_str!("../../schema/berufe.schema.json");

/// Loads and compiles the schema at `path`, or the bundled one.
pub fn load_schema(path: Option<&Path>) -> Result<JsonSchema, AppError> {
    let definition = match path {
        Some(path) => {
            tracing::info!("Using schema {}", path.display());
            storage::load_json(path)?
        }
        None => {
            tracing::info!("Using bundled record schema");
            serde_json::from_str(BUNDLED_SCHEMA)
                .map_err(|e| AppError::Config(format!("Bundled schema is not valid JSON: {}", e)))?
        }
    };
    Ok(JsonSchema::compile(definition)?)
}

/// Validates the persisted batch at `input` against `schema`.
pub fn validate_file(
    schema: &JsonSchema,
    input: &Path,
    config: ValidatorConfig,
) -> Result<ValidationReport, AppError> {
    let batch = storage::load_json(input)?;
    validate_batch(schema, &batch, input, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::BatchAssembler;
    use crate::storage::StorageManager;
    use std::fs;

    const PAGES: &str = "Ausbildungsberuf: Elektroniker (123, 4567)
Abschlussprüfung Teil 1
Schriftliche Prüfung am 31.02.2024 von 8:00 - 9:30, 90 Min
Hilfsmittel:
Taschenrechner
\u{0c}Deckblatt ohne Struktur\u{0c}\u{0c}Praktische Prüfung 15.03.2024";

    #[test]
    fn test_bundled_schema_compiles() {
        assert!(load_schema(None).is_ok());
    }

    #[test]
    fn test_fresh_batch_round_trips_without_violations() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pdfs");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("plan.txt"), PAGES).unwrap();

        let output = BatchAssembler::new().run(&input).unwrap();
        assert_eq!(output.records.len(), 4);

        let out_path = dir.path().join("out").join("berufe.json");
        StorageManager::new(&out_path).save_batch(&output.records).unwrap();

        let schema = load_schema(None).unwrap();
        let report = validate_file(&schema, &out_path, ValidatorConfig::default()).unwrap();
        assert_eq!(report.total, 4);
        assert!(report.is_valid(), "unexpected violations:\n{}", report);
    }

    #[test]
    fn test_schema_from_file_and_invalid_input() {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("schema.json");
        fs::write(&schema_path, BUNDLED_SCHEMA).unwrap();
        let schema = load_schema(Some(&schema_path)).unwrap();

        let input = dir.path().join("berufe.json");
        fs::write(
            &input,
            r#"[{"beruf": {"beschreibung": "x", "berufNr": ["12"], "prüfungsBereich": []}}]"#,
        )
        .unwrap();
        let report = validate_file(&schema, &input, ValidatorConfig::default()).unwrap();
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].errors[0].path, "beruf.berufNr.0");

        fs::write(&input, r#"{"beruf": {}}"#).unwrap();
        let err = validate_file(&schema, &input, ValidatorConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_missing_schema_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema(Some(&dir.path().join("fehlt.json"))).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
