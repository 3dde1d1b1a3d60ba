//! Factory for the reconstruction solvers.
//!
//! `ReconContext` binds an operator to a configured [`Method`] so callers can
//! pick a solver at runtime, for example from a configuration string parsed
//! into a [`SolverKind`], and then solve for as many right-hand sides as they
//! like.
//!
//! # Usage
//!
//! 1. Parse or choose a `SolverKind`, or build a `Method` with explicit options.
//! 2. Construct a `ReconContext` with the operator and the method.
//! 3. Call `solve` for each right-hand side.

use crate::config::options::{CgnrOptions, KaczmarzOptions, Sl0Options};
use crate::core::promote::{CommonType, Promote};
use crate::core::scalar::Scalar;
use crate::core::traits::{LinearOperator, Operator};
use crate::error::SolverError;
use crate::solver::{cgnr, kaczmarz, sl0};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Enum representing the available reconstruction solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
    /// Regularized Kaczmarz, also known as ART
    Kaczmarz,
    /// Conjugate Gradient on the Normal Residual
    Cgnr,
    /// Smoothed-L0 sparse recovery
    Sl0,
}

impl SolverKind {
    /// The method with this kind's default options.
    pub fn default_method(self) -> Method {
        match self {
            SolverKind::Kaczmarz => Method::Kaczmarz(KaczmarzOptions::default()),
            SolverKind::Cgnr => Method::Cgnr(CgnrOptions::default()),
            SolverKind::Sl0 => Method::Sl0(Sl0Options::default()),
        }
    }
}

impl FromStr for SolverKind {
    type Err = SolverError;

    /// Case-insensitive; `"art"` is accepted for Kaczmarz.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kaczmarz" | "art" => Ok(SolverKind::Kaczmarz),
            "cgnr" => Ok(SolverKind::Cgnr),
            "sl0" => Ok(SolverKind::Sl0),
            _ => Err(SolverError::UnknownSolver(s.to_string())),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverKind::Kaczmarz => "kaczmarz",
            SolverKind::Cgnr => "cgnr",
            SolverKind::Sl0 => "sl0",
        };
        f.write_str(name)
    }
}

/// A solver together with its options.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    Kaczmarz(KaczmarzOptions),
    Cgnr(CgnrOptions),
    Sl0(Sl0Options),
}

impl Method {
    /// The solver this method runs.
    pub fn kind(&self) -> SolverKind {
        match self {
            Method::Kaczmarz(_) => SolverKind::Kaczmarz,
            Method::Cgnr(_) => SolverKind::Cgnr,
            Method::Sl0(_) => SolverKind::Sl0,
        }
    }
}

impl From<SolverKind> for Method {
    fn from(kind: SolverKind) -> Self {
        kind.default_method()
    }
}

/// An operator and the method used to invert it.
#[derive(Debug, Clone)]
pub struct ReconContext<A> {
    /// The system operator
    pub a: A,
    /// Solver and options
    pub method: Method,
}

impl<A: Operator> ReconContext<A> {
    /// Bind `a` to a method, or to a kind's default method.
    pub fn new(a: A, method: impl Into<Method>) -> Self {
        Self { a, method: method.into() }
    }

    pub fn kind(&self) -> SolverKind {
        self.method.kind()
    }

    /// Solve `A x ≈ b` with the configured method.
    ///
    /// # Errors
    /// Whatever the selected solver reports.
    pub fn solve<U>(&self, b: &[U]) -> Result<Vec<CommonType<<A as Operator>::Elem, U>>, SolverError>
    where
        A: LinearOperator<CommonType<<A as Operator>::Elem, U>>,
        <A as Operator>::Elem: Promote<U>,
        U: Scalar,
    {
        info!(kind = %self.kind(), rows = self.a.nrows(), cols = self.a.ncols(), "recon: solve");
        match &self.method {
            Method::Kaczmarz(opts) => kaczmarz(&self.a, b, opts),
            Method::Cgnr(opts) => cgnr(&self.a, b, opts),
            Method::Sl0(opts) => sl0(&self.a, b, opts),
        }
    }
}
