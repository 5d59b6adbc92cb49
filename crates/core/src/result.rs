//! The record produced by every validation attempt

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::parser::ParsedOutcome;

/// Sortable UTC timestamp with microsecond precision
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Current UTC time in [`TIMESTAMP_FORMAT`]
pub fn timestamp_now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Outcome of validating one resource against a remote server.
///
/// `is_valid` is derived from `errors` at construction and the fields are
/// read-only afterwards, so `is_valid() == errors().is_empty()` for every
/// value of this type, including deserialized ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ResultRepr")]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
    warnings: Vec<String>,
    information: Vec<String>,
    resource_type: Option<String>,
    timestamp: String,
    operation_outcome: Option<JsonValue>,
}

/// Wire shape accepted on deserialization; `is_valid` is ignored and
/// recomputed.
#[derive(Deserialize)]
struct ResultRepr {
    #[serde(default)]
    errors: Vec<String>,
    #[serde(default)]
    warnings: Vec<String>,
    #[serde(default)]
    information: Vec<String>,
    resource_type: Option<String>,
    timestamp: Option<String>,
    operation_outcome: Option<JsonValue>,
}

impl From<ResultRepr> for ValidationResult {
    fn from(repr: ResultRepr) -> Self {
        Self::new_at(
            repr.errors,
            repr.warnings,
            repr.information,
            repr.resource_type,
            repr.operation_outcome,
            repr.timestamp.unwrap_or_else(timestamp_now),
        )
    }
}

impl ValidationResult {
    /// Create a result stamped with the current time
    pub fn new(
        errors: Vec<String>,
        warnings: Vec<String>,
        information: Vec<String>,
        resource_type: Option<String>,
        operation_outcome: Option<JsonValue>,
    ) -> Self {
        Self::new_at(
            errors,
            warnings,
            information,
            resource_type,
            operation_outcome,
            timestamp_now(),
        )
    }

    /// Create a result with an explicit timestamp
    pub fn new_at(
        errors: Vec<String>,
        warnings: Vec<String>,
        information: Vec<String>,
        resource_type: Option<String>,
        operation_outcome: Option<JsonValue>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
            information,
            resource_type,
            timestamp: timestamp.into(),
            operation_outcome,
        }
    }

    /// Aggregate parser output. The parser's own validity flag is not
    /// trusted; validity follows the error bucket.
    pub fn from_parsed(
        parsed: ParsedOutcome,
        resource_type: Option<String>,
        operation_outcome: Option<JsonValue>,
    ) -> Self {
        Self::new(
            parsed.errors,
            parsed.warnings,
            parsed.information,
            resource_type,
            operation_outcome,
        )
    }

    /// A failed attempt carrying exactly one error message
    pub fn failure(
        message: impl Into<String>,
        resource_type: Option<String>,
        operation_outcome: Option<JsonValue>,
    ) -> Self {
        Self::new(
            vec![message.into()],
            Vec::new(),
            Vec::new(),
            resource_type,
            operation_outcome,
        )
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn information(&self) -> &[String] {
        &self.information
    }

    /// Resource type detected from the submitted payload
    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// The server's response body, when one was parsed
    pub fn operation_outcome(&self) -> Option<&JsonValue> {
        self.operation_outcome.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use serde_json::json;

    #[test]
    fn validity_follows_errors() {
        let ok = ValidationResult::new(vec![], vec!["Warning: w".into()], vec![], None, None);
        assert!(ok.is_valid());

        let bad = ValidationResult::failure("Error: boom", Some("Patient".into()), None);
        assert!(!bad.is_valid());
        assert_eq!(bad.errors(), ["Error: boom"]);
        assert!(bad.warnings().is_empty());
        assert_eq!(bad.resource_type(), Some("Patient"));
    }

    #[test]
    fn from_parsed_ignores_parser_flag() {
        let parsed = ParsedOutcome {
            is_valid: true,
            errors: vec!["Error: inconsistent".into()],
            warnings: vec![],
            information: vec![],
        };
        let result = ValidationResult::from_parsed(parsed, None, None);
        assert!(!result.is_valid());
    }

    #[test]
    fn timestamp_is_sortable_utc() {
        let result = ValidationResult::new(vec![], vec![], vec![], None, None);
        assert!(NaiveDateTime::parse_from_str(result.timestamp(), TIMESTAMP_FORMAT).is_ok());

        let fixed = ValidationResult::new_at(vec![], vec![], vec![], None, None, "2024-01-01T00:00:00.000000");
        assert_eq!(fixed.timestamp(), "2024-01-01T00:00:00.000000");
    }

    #[test]
    fn serializes_all_fields() {
        let outcome = json!({"resourceType": "OperationOutcome", "issue": []});
        let result = ValidationResult::new_at(
            vec![],
            vec![],
            vec!["Validation completed successfully".into()],
            Some("Patient".into()),
            Some(outcome.clone()),
            "2024-01-01T00:00:00.000000",
        );
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["is_valid"], true);
        assert_eq!(json["errors"], json!([]));
        assert_eq!(json["information"][0], "Validation completed successfully");
        assert_eq!(json["resource_type"], "Patient");
        assert_eq!(json["timestamp"], "2024-01-01T00:00:00.000000");
        assert_eq!(json["operation_outcome"], outcome);
    }

    #[test]
    fn deserialization_recomputes_validity() {
        let result: ValidationResult = serde_json::from_value(json!({
            "is_valid": true,
            "errors": ["Error: still broken"],
            "warnings": [],
            "information": [],
            "resource_type": null,
            "timestamp": "2024-01-01T00:00:00.000000",
            "operation_outcome": null
        }))
        .unwrap();

        assert!(!result.is_valid());
        assert_eq!(result.timestamp(), "2024-01-01T00:00:00.000000");
    }
}
