//! Crate error type.

use crate::validation::ValidationError;

/// Errors raised at the crate's I/O boundaries.
///
/// Decoding solver atoms never fails; problems there surface as
/// [`crate::models::DecodeWarning`]s on the solution.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("solver failed: {0}")]
    Solver(String),
    #[error("invalid input: {} problem(s)", .0.len())]
    Validation(Vec<ValidationError>),
}
