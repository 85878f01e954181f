//! Error type for the statistical routines.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type StatsResult<T> = Result<T, StatsError>;

/// Everything that can make a statistical routine refuse its input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Too few observations for the requested procedure.
    #[error("{what} needs at least {needed} observations, got {got}")]
    InsufficientData {
        /// Procedure or group that ran short.
        what: String,
        /// Minimum number of observations.
        needed: usize,
        /// Number actually supplied.
        got: usize,
    },

    /// Too many observations for the approximation in use.
    #[error("{what} supports at most {max} observations, got {got}")]
    TooManyObservations {
        what: String,
        max: usize,
        got: usize,
    },

    /// All values are identical, so the statistic is undefined.
    #[error("{what}: all observations are identical")]
    ZeroRange { what: String },

    /// A NaN or infinite value was supplied.
    #[error("{what}: input contains non-finite values")]
    NonFinite { what: String },

    /// Response and factor columns disagree in length.
    #[error("length mismatch: response has {expected} rows, factor '{factor}' has {got}")]
    LengthMismatch {
        factor: String,
        expected: usize,
        got: usize,
    },

    /// A factor code points past the level list.
    #[error("factor '{factor}': code {code} out of range for {levels} levels")]
    InvalidCode {
        factor: String,
        code: usize,
        levels: usize,
    },

    /// A group or cell with no observations.
    #[error("group '{group}' has no observations")]
    EmptyGroup { group: String },

    /// The model formula cannot be fitted as written.
    #[error("invalid model formula: {0}")]
    InvalidFormula(String),

    /// A term adds no columns beyond the terms before it.
    #[error("term '{term}' is aliased with earlier terms and has zero degrees of freedom")]
    AliasedTerm { term: String },

    /// The model is saturated and leaves nothing to estimate error from.
    #[error("model leaves no residual degrees of freedom")]
    NoResidualDf,

    /// A probability or confidence level outside (0, 1).
    #[error("{what} must be in (0, 1), got {value}")]
    InvalidProbability { what: String, value: f64 },

    /// A distribution could not be constructed or evaluated.
    #[error("distribution error: {0}")]
    Distribution(String),

    /// Least squares solve failed.
    #[error("least squares solve failed: {0}")]
    LinearAlgebra(String),
}

impl StatsError {
    pub(crate) fn insufficient(what: impl Into<String>, needed: usize, got: usize) -> Self {
        StatsError::InsufficientData {
            what: what.into(),
            needed,
            got,
        }
    }
}

/// Reject slices containing NaN or infinity.
pub(crate) fn ensure_finite(what: &str, data: &[f64]) -> StatsResult<()> {
    if data.iter().all(|x| x.is_finite()) {
        Ok(())
    } else {
        Err(StatsError::NonFinite { what: what.into() })
    }
}

/// Reject probabilities outside the open unit interval.
pub(crate) fn ensure_probability(what: &str, value: f64) -> StatsResult<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidProbability {
            what: what.into(),
            value,
        })
    }
}
