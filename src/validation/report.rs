// src/validation/report.rs
use super::schema::{json_type_name, StructuralValidator};
use crate::utils::error::AppError;
use serde_json::Value;
use std::fmt;
use std::path::Path;

pub const DEFAULT_MAX_ERRORS: usize = 10;
pub const DEFAULT_MAX_REPORTED: usize = 20;

#[derive(Debug, Clone, Copy)]
pub struct ValidatorConfig {
    pub max_errors: usize,   // Error details kept per record
    pub max_reported: usize, // Invalid records listed in the report
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_ERRORS,
            max_reported: DEFAULT_MAX_REPORTED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRecord {
    pub index: usize,       // 1-based position in the batch
    pub error_count: usize, // All violations, not only the kept ones
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub total: usize,
    pub valid: usize,
    pub invalid: Vec<InvalidRecord>,
    max_reported: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Validated {} objects: {} valid, {} invalid",
            self.total,
            self.valid,
            self.invalid.len()
        )?;
        if self.invalid.is_empty() {
            return Ok(());
        }

        writeln!(f, "\nErrors (first items):")?;
        for record in self.invalid.iter().take(self.max_reported) {
            writeln!(f, "- Item #{}: {} error(s)", record.index, record.error_count)?;
            for error in &record.errors {
                writeln!(f, "    {}: {}", error.path, error.message)?;
            }
        }
        Ok(())
    }
}

/// Checks every record of `batch`; one invalid record never stops the others.
/// A batch that is not a JSON array is rejected before any record is checked.
pub fn validate_batch(
    validator: &dyn StructuralValidator,
    batch: &Value,
    source: &Path,
    config: ValidatorConfig,
) -> Result<ValidationReport, AppError> {
    let records = batch.as_array().ok_or_else(|| AppError::InvalidBatchShape {
        path: source.to_path_buf(),
        found: json_type_name(batch).to_string(),
    })?;

    let mut report = ValidationReport {
        total: records.len(),
        valid: 0,
        invalid: Vec::new(),
        max_reported: config.max_reported,
    };

    for (idx, record) in records.iter().enumerate() {
        let violations = validator.violations(record);
        if violations.is_empty() {
            report.valid += 1;
            continue;
        }

        tracing::debug!("Record #{} has {} violations", idx + 1, violations.len());
        report.invalid.push(InvalidRecord {
            index: idx + 1,
            error_count: violations.len(),
            errors: violations
                .iter()
                .take(config.max_errors)
                .map(|v| ErrorDetail {
                    path: v.dotted_path(),
                    message: v.message.clone(),
                })
                .collect(),
        });
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::schema::JsonSchema;
    use serde_json::json;

    fn schema() -> JsonSchema {
        JsonSchema::compile(json!({
            "type": "object",
            "required": ["a", "b", "c"],
            "properties": { "a": { "type": "integer" } }
        }))
        .unwrap()
    }

    fn source() -> &'static Path {
        Path::new("berufe.json")
    }

    #[test]
    fn test_non_array_batch_is_fatal() {
        let err = validate_batch(&schema(), &json!({ "a": 1 }), source(), ValidatorConfig::default())
            .unwrap_err();
        match err {
            AppError::InvalidBatchShape { found, .. } => assert_eq!(found, "object"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_exhaustive_validation_and_report() {
        let batch = json!([
            { "a": 1, "b": 2, "c": 3 },
            { "a": "x" },
            "kein Objekt",
            { "a": 2, "b": 0, "c": 0 }
        ]);
        let report = validate_batch(&schema(), &batch, source(), ValidatorConfig::default()).unwrap();
        assert_eq!(report.total, 4);
        assert_eq!(report.valid, 2);
        assert!(!report.is_valid());
        assert_eq!(report.invalid[0].index, 2);
        assert_eq!(report.invalid[0].error_count, 3);
        assert_eq!(report.invalid[1].index, 3);

        let text = report.to_string();
        assert!(text.starts_with("Validated 4 objects: 2 valid, 2 invalid\n\nErrors (first items):\n"));
        assert!(text.contains("- Item #2: 3 error(s)\n"));
        assert!(text.contains("    <root>: \"b\" is a required property\n"));
        assert!(text.contains("    a: \"x\" is not of type \"integer\"\n"));
        assert!(text.contains("- Item #3: 1 error(s)\n    <root>: \"kein Objekt\" is not of type \"object\"\n"));
    }

    #[test]
    fn test_error_details_are_capped_but_counted() {
        let config = ValidatorConfig { max_errors: 1, max_reported: 1 };
        let batch = json!([{}, {}]);
        let report = validate_batch(&schema(), &batch, source(), config).unwrap();

        assert_eq!(report.invalid.len(), 2);
        assert_eq!(report.invalid[0].error_count, 3);
        assert_eq!(report.invalid[0].errors.len(), 1);

        let text = report.to_string();
        assert!(text.contains("- Item #1: 3 error(s)"));
        assert!(!text.contains("- Item #2"), "only max_reported records are listed");
    }

    #[test]
    fn test_all_valid_report_has_no_error_section() {
        let report = validate_batch(&schema(), &json!([]), source(), ValidatorConfig::default()).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.to_string(), "Validated 0 objects: 0 valid, 0 invalid\n");
    }

    #[test]
    fn test_validation_is_idempotent() {
        let batch = json!([{ "a": "x" }, { "a": 1, "b": 1, "c": 1 }]);
        let first = validate_batch(&schema(), &batch, source(), ValidatorConfig::default()).unwrap();
        let second = validate_batch(&schema(), &batch, source(), ValidatorConfig::default()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
    }
}
