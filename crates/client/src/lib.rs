//! fhir-validator-client: validate FHIR resources against a remote server
//!
//! The pipeline builds a `$validate` request, posts it through a
//! [`Transport`], branches on the HTTP status and turns the returned
//! OperationOutcome into a [`ValidationResult`]. Every failure, whether
//! malformed input, an unreachable server or an unexpected response, ends
//! up as error messages inside the result rather than as an `Err`.

pub mod error;
pub mod request;
pub mod transport;
pub mod validator;

pub use error::{TransportError, ValidationError};
pub use fhir_validator_core::ValidationResult;
pub use request::{ResourceInput, ValidateOptions, ValidationRequest};
pub use transport::{ReqwestTransport, Transport, TransportResponse};
pub use validator::{DEFAULT_TIMEOUT, Validator, ValidatorConfig, validate_fhir_resource};
