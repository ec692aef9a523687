//! Error types for covid-risk.
//!
//! Resolving a risk profile never fails. Errors come either from the boundary
//! (malformed user input or configuration) or from the numerical integrator.
use crate::prelude::{Real, Time};
use thiserror::Error;

/// Result type alias for covid-risk operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// User input outside the accepted domain (e.g. age above 100 or a
    /// negative dose count).
    #[error("invalid input for '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// The ODE solver did not converge or produced non-finite values.
    #[error("computation failed at t={time:.4}: {reason}")]
    ComputationFailure { time: Time, reason: String },

    /// Multipliers, epidemic constants or solver options violate their
    /// invariants.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn computation(time: Time, reason: impl Into<String>) -> Self {
        Error::ComputationFailure {
            time,
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Error::InvalidConfig(reason.into())
    }

    /// Return true if error was raised by the numerical core rather than by
    /// input validation.
    pub fn is_computation_failure(&self) -> bool {
        matches!(self, Error::ComputationFailure { .. })
    }
}

/// Fail with InvalidConfig unless value is a finite positive number.
pub(crate) fn ensure_positive(name: &str, value: Real) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::config(format!("{} must be positive and finite, got {}", name, value)))
    }
}
