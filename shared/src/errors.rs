//! Error types for the Smart Vitals energy engine

use thiserror::Error;

/// Errors raised by the energy engine
///
/// The calculators themselves are infallible; only parsing of caller input
/// (periods, workout statuses) can fail.
#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("Validation error: {0}")]
    Validation(String),
}

impl VitalsError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        VitalsError::Validation(message.into())
    }
}
