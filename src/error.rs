//! Error types for modelar.
//!
//! Implements JPL Power of 10 Rule 7: Check all return values.
//! All functions return `Result<T, ModelError>` instead of panicking.

use thiserror::Error;

/// Result type alias for modelar operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Unified error type for all modelar operations.
///
/// # Design
///
/// Following Toyota's Jidoka principle, errors are:
/// 1. Immediately detectable (type-safe)
/// 2. Self-documenting (descriptive variants)
/// 3. Actionable (contain the offending parameter and its domain)
///
/// Infeasible programs and unstable queues are NOT errors: they are modeled
/// outcomes, carried as result variants by the respective models.
#[derive(Debug, Error)]
pub enum ModelError {
    // ===== Input Violations =====
    /// A numeric parameter lies outside its documented domain.
    #[error("Invalid input: {parameter} must be {requirement} (got {value})")]
    InvalidInput {
        /// Name of the offending parameter.
        parameter: String,
        /// Domain the parameter must satisfy.
        requirement: String,
        /// Value actually supplied.
        value: f64,
    },

    /// Input sequence lengths disagree.
    #[error("Dimension mismatch: {context} (expected {expected}, got {actual})")]
    DimensionMismatch {
        /// What was being checked.
        context: String,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// Numerical instability detected (NaN or Inf) in an input.
    #[error("Jidoka: non-finite value detected at {location}")]
    NonFiniteInput {
        /// Location where the non-finite value was detected.
        location: String,
    },

    // ===== Configuration Errors =====
    /// Invalid scenario configuration.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Solver Errors =====
    /// Internal simplex failure (iteration guard or degenerate tableau).
    #[error("Solver error: {0}")]
    Solver(String),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ModelError {
    /// Create an invalid-input error for a named parameter.
    #[must_use]
    pub fn invalid_input(
        parameter: impl Into<String>,
        requirement: impl Into<String>,
        value: f64,
    ) -> Self {
        Self::InvalidInput {
            parameter: parameter.into(),
            requirement: requirement.into(),
            value,
        }
    }

    /// Create a dimension-mismatch error.
    #[must_use]
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Create a non-finite-input error for a named location.
    #[must_use]
    pub fn non_finite(location: impl Into<String>) -> Self {
        Self::NonFiniteInput {
            location: location.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a solver error.
    #[must_use]
    pub fn solver(message: impl Into<String>) -> Self {
        Self::Solver(message.into())
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Create an I/O error with a message (wraps in `std::io::Error`).
    #[must_use]
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(std::io::Error::other(message.into()))
    }

    /// Check if this error is an input violation (caller must fix the input).
    #[must_use]
    pub const fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::DimensionMismatch { .. } | Self::NonFiniteInput { .. }
        )
    }
}
