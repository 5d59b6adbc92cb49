//! Interpretation of OperationOutcome documents returned by `$validate`

use serde_json::Value as JsonValue;

use crate::error::OutcomeError;
use crate::outcome::{IssueSeverity, OPERATION_OUTCOME};

pub const INVALID_FORMAT: &str = "Invalid OperationOutcome format";
pub const UNEXPECTED_RESOURCE: &str = "Expected OperationOutcome resource from validation endpoint";
pub const COMPLETED_SUCCESSFULLY: &str = "Validation completed successfully";

/// Issues of an outcome document sorted into severity buckets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub information: Vec<String>,
}

impl ParsedOutcome {
    fn rejected(message: &str) -> Self {
        Self {
            is_valid: false,
            errors: vec![message.to_string()],
            ..Default::default()
        }
    }
}

/// Parse an OperationOutcome into error, warning and information messages.
///
/// Documents that are not JSON objects, or not OperationOutcomes, are
/// reported as a single error. Issues are visited in document order;
/// entries that are not objects are skipped and severities outside
/// fatal/error/warning/information are dropped. A well-formed outcome with
/// no issues is a success and yields one information message.
///
/// Returns an error when `issue` is present but not a list, or when an
/// issue field has the wrong JSON type.
pub fn parse_operation_outcome(outcome: &JsonValue) -> Result<ParsedOutcome, OutcomeError> {
    let Some(document) = outcome.as_object() else {
        return Ok(ParsedOutcome::rejected(INVALID_FORMAT));
    };

    if document.get("resourceType").and_then(JsonValue::as_str) != Some(OPERATION_OUTCOME) {
        return Ok(ParsedOutcome::rejected(UNEXPECTED_RESOURCE));
    }

    let issues = match document.get("issue") {
        None => &[][..],
        Some(JsonValue::Array(issues)) => issues.as_slice(),
        Some(_) => return Err(OutcomeError::InvalidIssueList),
    };

    let mut parsed = ParsedOutcome {
        is_valid: true,
        ..Default::default()
    };

    for (index, issue) in issues.iter().enumerate() {
        let Some(issue) = issue.as_object() else {
            continue;
        };

        let severity = match issue.get("severity") {
            None => Some(IssueSeverity::Error),
            Some(value) => value.as_str().and_then(IssueSeverity::from_code),
        };
        let message = issue_message(index, issue)?;

        match severity {
            Some(severity) if severity.is_error() => {
                parsed.errors.push(format!("Error: {}", message));
                parsed.is_valid = false;
            }
            Some(IssueSeverity::Warning) => parsed.warnings.push(format!("Warning: {}", message)),
            Some(IssueSeverity::Information) => {
                parsed.information.push(format!("Info: {}", message))
            }
            // TODO: confirm whether target servers emit severities outside the R4 value set
            _ => {}
        }
    }

    if issues.is_empty() {
        parsed.information.push(COMPLETED_SUCCESSFULLY.to_string());
    }

    Ok(parsed)
}

/// Build the human-readable text of one issue
fn issue_message(
    index: usize,
    issue: &serde_json::Map<String, JsonValue>,
) -> Result<String, OutcomeError> {
    let mut parts = Vec::new();

    if let Some(details) = issue.get("details").and_then(JsonValue::as_object) {
        if let Some(text) = optional_text(index, "details.text", details.get("text"))? {
            parts.push(text.to_string());
        }
    }

    if let Some(diagnostics) = optional_text(index, "diagnostics", issue.get("diagnostics"))? {
        parts.push(diagnostics.to_string());
    }

    let locations = locations(index, issue.get("location"))?;
    if !locations.is_empty() {
        parts.push(format!("Location: {}", locations.join(", ")));
    }

    if parts.is_empty() {
        let code = match issue.get("code") {
            None => "unknown".to_string(),
            Some(JsonValue::String(code)) => code.clone(),
            Some(other) => other.to_string(),
        };
        parts.push(format!("Validation issue ({})", code));
    }

    Ok(parts.join(" - "))
}

/// A text field that may be absent, null or empty
fn optional_text<'a>(
    index: usize,
    field: &'static str,
    value: Option<&'a JsonValue>,
) -> Result<Option<&'a str>, OutcomeError> {
    match value {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(text)) if text.is_empty() => Ok(None),
        Some(JsonValue::String(text)) => Ok(Some(text)),
        Some(_) => Err(OutcomeError::ExpectedString { index, field }),
    }
}

fn locations(index: usize, value: Option<&JsonValue>) -> Result<Vec<&str>, OutcomeError> {
    match value {
        None | Some(JsonValue::Null) => Ok(Vec::new()),
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| item.as_str().ok_or(OutcomeError::InvalidLocation { index }))
            .collect(),
        Some(_) => Err(OutcomeError::InvalidLocation { index }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn outcome(issues: JsonValue) -> JsonValue {
        json!({"resourceType": "OperationOutcome", "issue": issues})
    }

    #[test]
    fn rejects_non_object() {
        let parsed = parse_operation_outcome(&json!(["not", "an", "object"])).unwrap();
        assert!(!parsed.is_valid);
        assert_eq!(parsed.errors, vec![INVALID_FORMAT]);
        assert!(parsed.information.is_empty());
    }

    #[test]
    fn rejects_other_resource_types() {
        let parsed = parse_operation_outcome(&json!({"resourceType": "Patient"})).unwrap();
        assert!(!parsed.is_valid);
        assert_eq!(parsed.errors, vec![UNEXPECTED_RESOURCE]);
    }

    #[test]
    fn empty_issue_list_is_success() {
        let parsed = parse_operation_outcome(&outcome(json!([]))).unwrap();
        assert!(parsed.is_valid);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.information, vec![COMPLETED_SUCCESSFULLY]);

        let missing = parse_operation_outcome(&json!({"resourceType": "OperationOutcome"})).unwrap();
        assert_eq!(missing.information, vec![COMPLETED_SUCCESSFULLY]);
    }

    #[test]
    fn issue_must_be_a_list_when_present() {
        for issue in [
            JsonValue::Null,
            json!("error"),
            json!({"severity": "error", "diagnostics": "hidden"}),
        ] {
            let err = parse_operation_outcome(&outcome(issue)).unwrap_err();
            assert_eq!(err, OutcomeError::InvalidIssueList);
        }
    }

    #[test]
    fn message_combines_details_diagnostics_and_location() {
        let parsed = parse_operation_outcome(&outcome(json!([{
            "severity": "error",
            "code": "required",
            "details": {"text": "Missing required element"},
            "diagnostics": "Patient.name: minimum required = 1",
            "location": ["Patient.name", "Line 1, Col 2"]
        }])))
        .unwrap();

        assert_eq!(
            parsed.errors,
            vec![
                "Error: Missing required element - Patient.name: minimum required = 1 - Location: Patient.name, Line 1, Col 2"
            ]
        );
    }

    #[test]
    fn falls_back_to_issue_code() {
        let parsed = parse_operation_outcome(&outcome(json!([
            {"severity": "warning", "code": "business-rule", "details": {"text": ""}, "diagnostics": ""},
            {"severity": "information"}
        ])))
        .unwrap();

        assert_eq!(parsed.warnings, vec!["Warning: Validation issue (business-rule)"]);
        assert_eq!(parsed.information, vec!["Info: Validation issue (unknown)"]);
    }

    #[test]
    fn missing_severity_counts_as_error() {
        let parsed = parse_operation_outcome(&outcome(json!([{"diagnostics": "no severity"}]))).unwrap();
        assert!(!parsed.is_valid);
        assert_eq!(parsed.errors, vec!["Error: no severity"]);
    }

    #[test]
    fn buckets_preserve_order_and_drop_unknown_severities() {
        let parsed = parse_operation_outcome(&outcome(json!([
            {"severity": "information", "diagnostics": "first"},
            {"severity": "fatal", "diagnostics": "second"},
            "not an issue",
            {"severity": "success", "diagnostics": "dropped"},
            {"severity": "warning", "diagnostics": "third"},
            {"severity": "error", "diagnostics": "fourth"}
        ])))
        .unwrap();

        assert!(!parsed.is_valid);
        assert_eq!(parsed.errors, vec!["Error: second", "Error: fourth"]);
        assert_eq!(parsed.warnings, vec!["Warning: third"]);
        assert_eq!(parsed.information, vec!["Info: first"]);
    }

    #[test]
    fn skipped_entries_do_not_signal_success() {
        let parsed = parse_operation_outcome(&outcome(json!([42, null]))).unwrap();
        assert!(parsed.is_valid);
        assert!(parsed.information.is_empty());
    }

    #[test]
    fn malformed_fields_are_reported() {
        let err = parse_operation_outcome(&outcome(json!([
            {"severity": "error", "location": ["Patient.name", 7]}
        ])))
        .unwrap_err();
        assert_eq!(err, OutcomeError::InvalidLocation { index: 0 });

        let err = parse_operation_outcome(&outcome(json!([
            {"severity": "warning"},
            {"severity": "error", "diagnostics": {"nested": true}}
        ])))
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "issue[1].diagnostics must be a string"
        );
    }

    fn severity() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("fatal"),
            Just("error"),
            Just("warning"),
            Just("information"),
            Just("success"),
        ]
    }

    proptest! {
        #[test]
        fn validity_matches_error_bucket(severities in prop::collection::vec(severity(), 0..12)) {
            let issues: Vec<JsonValue> = severities
                .iter()
                .map(|s| json!({"severity": s, "diagnostics": "issue"}))
                .collect();
            let parsed = parse_operation_outcome(&outcome(JsonValue::Array(issues))).unwrap();

            let expected_errors = severities.iter().filter(|s| matches!(**s, "fatal" | "error")).count();
            prop_assert_eq!(parsed.errors.len(), expected_errors);
            prop_assert_eq!(parsed.is_valid, parsed.errors.is_empty());
        }
    }
}
