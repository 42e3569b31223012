//! Error types for the likelihood engines
//!
//! Shape and configuration problems are detected once, at the boundary of a
//! call, and reported through [`LikelihoodError`]. Numerical degeneracy (a
//! zero-mass state distribution) is NOT an error: it propagates through the
//! recursion as a non-finite log-likelihood, which the calling optimizer
//! treats as an infeasible parameter point.

use std::fmt;

/// Result alias used throughout the crate
pub type LikelihoodResult<T> = Result<T, LikelihoodError>;

/// Errors that can occur when setting up a likelihood evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikelihoodError {
    /// Dimension mismatch between expected and actual
    DimensionMismatch {
        /// What was expected
        expected: usize,
        /// What was received
        actual: usize,
        /// Context (e.g., "mesh size", "transition matrix count")
        context: String,
    },

    /// Requested worker count is not usable (must be >= 1)
    InvalidCoreCount {
        /// The requested number of cores
        requested: usize,
    },

    /// No survey occasions were supplied (J must be >= 1)
    NoOccasions,

    /// Worker pool construction failed
    ThreadPool {
        /// Description of the failure
        description: String,
    },
}

impl fmt::Display for LikelihoodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LikelihoodError::DimensionMismatch {
                expected,
                actual,
                context,
            } => {
                write!(
                    f,
                    "Dimension mismatch for {}: expected {}, got {}",
                    context, expected, actual
                )
            }
            LikelihoodError::InvalidCoreCount { requested } => {
                write!(f, "Invalid core count: {} (must be >= 1)", requested)
            }
            LikelihoodError::NoOccasions => {
                write!(f, "No survey occasions supplied (need at least 1)")
            }
            LikelihoodError::ThreadPool { description } => {
                write!(f, "Worker pool construction failed: {}", description)
            }
        }
    }
}

impl std::error::Error for LikelihoodError {}

impl LikelihoodError {
    /// Shorthand for a dimension mismatch with context
    pub(crate) fn dims(expected: usize, actual: usize, context: &str) -> Self {
        LikelihoodError::DimensionMismatch {
            expected,
            actual,
            context: context.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = LikelihoodError::dims(3, 4, "life states");
        assert!(err.to_string().contains("life states"));
        assert!(err.to_string().contains("3"));
        assert!(err.to_string().contains("4"));
    }

    #[test]
    fn test_invalid_core_count_display() {
        let err = LikelihoodError::InvalidCoreCount { requested: 0 };
        assert!(err.to_string().contains("0"));
        assert!(err.to_string().contains(">= 1"));
    }

    #[test]
    fn test_no_occasions_display() {
        let err = LikelihoodError::NoOccasions;
        assert!(err.to_string().contains("occasion"));
    }
}
