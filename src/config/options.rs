//! API options for the reconstruction solvers.
//!
//! This module provides one options struct per solver. Each has a `new`
//! constructor taking the parameters every call must choose, `with_*`
//! setters for the rest, and a `validate` method the solvers run before
//! touching any data. Regularization parameters are plain `f64`; the solvers
//! convert them into the real field of the working scalar type.

use crate::error::SolverError;
use bitflags::bitflags;

bitflags! {
    /// Projections applied to the Kaczmarz iterate after each full sweep.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
    pub struct Projection: u8 {
        /// Replace x with its real part.
        const REAL     = 0b01;
        /// Replace x with x · sign(x) elementwise (|x| for reals).
        const POSITIVE = 0b10;
    }
}

/// Order in which Kaczmarz visits the rows within one sweep.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RowOrder {
    /// 0, 1, …, M-1 every sweep.
    #[default]
    Cyclic,
    /// A fresh permutation at the start of every sweep, drawn from a
    /// generator seeded once per solve.
    Shuffled { seed: u64 },
}

/// Regularized Kaczmarz (ART) parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct KaczmarzOptions {
    /// Number of full sweeps over the rows.
    pub iterations: usize,
    /// Tikhonov weight; 0 gives classic Kaczmarz.
    pub lambda: f64,
    pub projection: Projection,
    pub order: RowOrder,
}

impl KaczmarzOptions {
    /// `iterations` cyclic sweeps with Tikhonov weight `lambda`, no projection.
    pub fn new(iterations: usize, lambda: f64) -> Self {
        Self { iterations, lambda, projection: Projection::empty(), order: RowOrder::Cyclic }
    }

    /// Replace the whole projection set.
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Shorthand for toggling [`Projection::REAL`].
    pub fn enforce_real(mut self, on: bool) -> Self {
        self.projection.set(Projection::REAL, on);
        self
    }

    /// Shorthand for toggling [`Projection::POSITIVE`].
    pub fn enforce_positive(mut self, on: bool) -> Self {
        self.projection.set(Projection::POSITIVE, on);
        self
    }

    /// Set the row visiting order.
    pub fn with_order(mut self, order: RowOrder) -> Self {
        self.order = order;
        self
    }

    /// Fails with `InvalidParameter` unless `lambda` is finite and `>= 0`.
    pub fn validate(&self) -> Result<(), SolverError> {
        non_negative("lambda", self.lambda)
    }
}

impl Default for KaczmarzOptions {
    fn default() -> Self {
        Self::new(10, 0.0)
    }
}

/// CGNR parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CgnrOptions {
    pub iterations: usize,
    /// Tikhonov damping of the normal equations.
    pub lambda: f64,
}

impl CgnrOptions {
    /// `iterations` CGNR steps with damping `lambda`.
    pub fn new(iterations: usize, lambda: f64) -> Self {
        Self { iterations, lambda }
    }

    /// Fails with `InvalidParameter` unless `lambda` is finite and `>= 0`.
    pub fn validate(&self) -> Result<(), SolverError> {
        non_negative("lambda", self.lambda)
    }
}

impl Default for CgnrOptions {
    fn default() -> Self {
        Self::new(10, 0.0)
    }
}

/// Smoothed-L0 parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Sl0Options {
    /// Outer (annealing) steps; at least 1.
    pub iterations: usize,
    /// Gradient/projection steps per outer step; at least 1.
    pub inner_iterations: usize,
    /// Final smoothing width, relative to the norm of the initial guess.
    pub lambda: f64,
    /// Per-step width decay, in (0, 1).
    pub decrease_factor: f64,
    /// Gradient step size.
    pub mu0: f64,
}

impl Sl0Options {
    /// `iterations` annealing steps with the standard SL0 defaults.
    pub fn new(iterations: usize) -> Self {
        Self { iterations, inner_iterations: 3, lambda: 1e-3, decrease_factor: 0.5, mu0: 2.0 }
    }

    /// Set the number of gradient/projection steps per annealing step.
    pub fn with_inner_iterations(mut self, inner_iterations: usize) -> Self {
        self.inner_iterations = inner_iterations;
        self
    }

    /// Set the final relative smoothing width.
    pub fn with_lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    /// Set the per-step width decay.
    pub fn with_decrease_factor(mut self, decrease_factor: f64) -> Self {
        self.decrease_factor = decrease_factor;
        self
    }

    /// Set the gradient step size.
    pub fn with_mu0(mut self, mu0: f64) -> Self {
        self.mu0 = mu0;
        self
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.iterations == 0 {
            return Err(SolverError::invalid("iterations", "must be at least 1"));
        }
        if self.inner_iterations == 0 {
            return Err(SolverError::invalid("inner_iterations", "must be at least 1"));
        }
        positive("lambda", self.lambda)?;
        positive("mu0", self.mu0)?;
        if !(self.decrease_factor > 0.0 && self.decrease_factor < 1.0) {
            return Err(SolverError::invalid(
                "decrease_factor",
                format!("must lie in (0, 1), got {}", self.decrease_factor),
            ));
        }
        Ok(())
    }
}

impl Default for Sl0Options {
    fn default() -> Self {
        Self::new(10)
    }
}

fn non_negative(name: &'static str, v: f64) -> Result<(), SolverError> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(SolverError::invalid(name, format!("must be finite and >= 0, got {v}")))
    }
}

fn positive(name: &'static str, v: f64) -> Result<(), SolverError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SolverError::invalid(name, format!("must be finite and > 0, got {v}")))
    }
}
