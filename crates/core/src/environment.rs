use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use crate::result::ValidationResult;

/// A candidate resource together with its latest validation result,
/// as tracked by a resource generation loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationEnvironment {
    pub id: Uuid,
    pub resource: JsonValue,
    #[serde(default)]
    last_validation: Option<ValidationResult>,
}

impl ValidationEnvironment {
    pub fn new(resource: JsonValue) -> Self {
        Self {
            id: Uuid::new_v4(),
            resource,
            last_validation: None,
        }
    }

    /// Store a new result, returning the one it replaces
    pub fn record(&mut self, result: ValidationResult) -> Option<ValidationResult> {
        self.last_validation.replace(result)
    }

    pub fn last_validation(&self) -> Option<&ValidationResult> {
        self.last_validation.as_ref()
    }

    /// Whether the resource passed its most recent validation
    pub fn is_valid(&self) -> bool {
        self.last_validation
            .as_ref()
            .is_some_and(ValidationResult::is_valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tracks_latest_result() {
        let mut env = ValidationEnvironment::new(json!({"resourceType": "Patient"}));
        assert!(!env.is_valid());

        let failed = ValidationResult::failure("Error: missing name", Some("Patient".into()), None);
        assert!(env.record(failed).is_none());
        assert!(!env.is_valid());

        let passed = ValidationResult::new(vec![], vec![], vec![], Some("Patient".into()), None);
        let previous = env.record(passed).unwrap();
        assert_eq!(previous.errors(), ["Error: missing name"]);
        assert!(env.is_valid());
    }

    #[test]
    fn ids_are_unique() {
        let a = ValidationEnvironment::new(json!({}));
        let b = ValidationEnvironment::new(json!({}));
        assert_ne!(a.id, b.id);
    }
}
