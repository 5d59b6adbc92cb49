//! fhir-validator-core: Shared types for remote FHIR validation
//!
//! This crate provides the `OperationOutcome` model, the `ValidationResult`
//! record returned by every validation attempt, and the parser that turns a
//! server's outcome document into severity buckets.

pub mod environment;
pub mod error;
pub mod outcome;
pub mod parser;
pub mod result;

pub use environment::ValidationEnvironment;
pub use error::OutcomeError;
pub use outcome::{IssueSeverity, IssueType, OperationOutcome, OperationOutcomeIssue};
pub use parser::{ParsedOutcome, parse_operation_outcome};
pub use result::ValidationResult;
