use thiserror::Error;

/// Errors raised while reading an outcome document whose issues carry
/// fields of the wrong JSON type
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutcomeError {
    #[error("issue must be a list")]
    InvalidIssueList,

    #[error("issue[{index}].{field} must be a string")]
    ExpectedString { index: usize, field: &'static str },

    #[error("issue[{index}].location must be a list of strings")]
    InvalidLocation { index: usize },
}
