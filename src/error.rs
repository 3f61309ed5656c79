//! Error types for the bodymodel application.

use thiserror::Error;

/// Errors raised when a measurement field fails validation.
///
/// These are always detected before any formula runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} must be a finite number")]
    NotANumber { field: &'static str },

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be greater than 0, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("unknown gender: {0} (expected 'male' or 'female')")]
    UnknownGender(String),

    #[error("unknown goal: {0} (expected 'maintain', 'lose' or 'gain')")]
    UnknownGoal(String),

    #[error("hip circumference is required for female measurements")]
    MissingHip,
}

/// Errors raised when a formula's preconditions are violated by
/// inputs that individually passed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationError {
    #[error("waist ({waist} cm) must exceed neck ({neck} cm) to estimate body fat")]
    WaistNotAboveNeck { waist: f64, neck: f64 },

    #[error("waist + hip ({girth} cm) must exceed neck ({neck} cm) to estimate body fat")]
    GirthNotAboveNeck { girth: f64, neck: f64 },

    #[error("body-fat denominator is not positive for the given measurements")]
    DegenerateDenominator,
}

/// Any failure produced by the analysis pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("computation failed: {0}")]
    Computation(#[from] ComputationError),
}
