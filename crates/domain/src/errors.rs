use thiserror::Error;

/// Errors raised by the domain model and the evaluation engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// A metric field is negative or non-finite. The input must be
    /// discarded by the caller; there is no recovery.
    #[error("invalid metrics: {field} must be a finite non-negative number, got {value}")]
    InvalidMetrics { field: &'static str, value: f64 },

    /// The alert policy was invoked without identifying context.
    #[error("missing alert context: {field}")]
    MissingContext { field: &'static str },

    /// Scoring weights are unusable (negative, non-finite, or all zero).
    #[error("invalid scoring weights: {reason}")]
    InvalidWeights { reason: &'static str },
}
