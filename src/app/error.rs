//! Failures reported by the app's dependencies.

use thiserror::Error;

/// Errors returned by environment operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The held credential is no longer accepted.
    #[error("unauthorized")]
    Unauthorized,

    /// Any other failure; the description is shown to the user verbatim.
    #[error("{0}")]
    Operation(String),
}
