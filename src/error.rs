use thiserror::Error;

// Unified error type for itrecon

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("dimension mismatch: expected length {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("zero pivot at row {0}")]
    ZeroPivot(usize),
    #[error("singular value decomposition did not converge")]
    NoConvergence,
    #[error("unknown solver kind: {0}")]
    UnknownSolver(String),
}

impl SolverError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SolverError::InvalidParameter { name, reason: reason.into() }
    }
}

/// Fail with `DimensionMismatch` unless `found == expected`.
pub(crate) fn check_len(expected: usize, found: usize) -> Result<(), SolverError> {
    if expected == found {
        Ok(())
    } else {
        Err(SolverError::DimensionMismatch { expected, found })
    }
}
