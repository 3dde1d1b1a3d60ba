//! Smoothed-L0 (SL0) sparse recovery.
//!
//! Approximates `min ‖x‖₀ s.t. A x = b` by maximizing the Gaussian surrogate
//! `Σ exp(−|x_i|² / λ²)` over the feasible set while annealing the width `λ`
//! downward. Large `λ` gives a smooth problem whose maximizer is close to the
//! minimum-norm solution; each outer step shrinks `λ` by `decrease_factor` so
//! that the last step runs at the caller's `lambda` (scaled by `‖x₀‖`).
//!
//! # Algorithm
//!
//! ```text
//! x = solve(A, b)
//! λ = lambda · ‖x‖ / decrease_factor^(iterations − 1)
//! repeat iterations times:
//!     repeat inner_iterations times:
//!         x −= mu0 · x · exp(−|x|² / λ²)
//!         x −= solve(A, A x − b)
//!     λ *= decrease_factor
//! ```
//!
//! The feasibility correction reuses a single factorization of `A` (see
//! [`DirectSolver`]): for the usual wide `A` that is the pseudoinverse, so
//! each inner step costs one product with `A` and one with `A⁺`, and
//! rank-deficient operators stay feasible.
//!
//! # References
//! - Mohimani, Babaie-Zadeh, Jutten (2009). A fast approach for overcomplete
//!   sparse decomposition based on smoothed ℓ⁰ norm. IEEE TSP 57(1).

use crate::config::options::Sl0Options;
use crate::core::promote::{CommonType, Promote};
use crate::core::scalar::{Scalar, real};
use crate::core::traits::{LinearOperator, Operator};
use crate::core::wrappers::norm;
use crate::error::SolverError;
use crate::solver::direct_lu::DirectSolver;
use crate::solver::promote_rhs;
use crate::utils::monitor::{IterationMonitor, NoMonitor};
use num_traits::Float;
use tracing::{debug, trace};

/// Recover a sparse `x` with `A x = b` by smoothed-L0 annealing.
///
/// # Errors
/// `DimensionMismatch` if `b.len() != A.nrows()`, `InvalidParameter` for
/// out-of-range options, and any error of the inner direct solve (for
/// example `ZeroPivot` when a square `A` is singular), unchanged.
pub fn sl0<A, U>(
    a: &A,
    b: &[U],
    opts: &Sl0Options,
) -> Result<Vec<CommonType<<A as Operator>::Elem, U>>, SolverError>
where
    A: Operator + LinearOperator<CommonType<<A as Operator>::Elem, U>> + ?Sized,
    <A as Operator>::Elem: Promote<U>,
    U: Scalar,
{
    sl0_with_monitor(a, b, opts, NoMonitor)
}

/// [`sl0`] with a monitor called after every outer (annealing) step.
pub fn sl0_with_monitor<A, U, M>(
    a: &A,
    b: &[U],
    opts: &Sl0Options,
    mut monitor: M,
) -> Result<Vec<CommonType<<A as Operator>::Elem, U>>, SolverError>
where
    A: Operator + LinearOperator<CommonType<<A as Operator>::Elem, U>> + ?Sized,
    <A as Operator>::Elem: Promote<U>,
    U: Scalar,
    M: IterationMonitor<CommonType<<A as Operator>::Elem, U>>,
{
    opts.validate()?;
    let b = promote_rhs(a, b)?;
    anneal(a, &b, opts, &mut monitor)
}

fn anneal<S, A, M>(a: &A, b: &[S], opts: &Sl0Options, monitor: &mut M) -> Result<Vec<S>, SolverError>
where
    S: Scalar,
    A: LinearOperator<S> + ?Sized,
    M: IterationMonitor<S>,
{
    debug!(
        rows = a.nrows(),
        cols = a.ncols(),
        iterations = opts.iterations,
        inner = opts.inner_iterations,
        lambda = opts.lambda,
        "sl0: start"
    );
    let direct = DirectSolver::new(a)?;
    let mut x = direct.solve(b)?;

    let start = opts.lambda / opts.decrease_factor.powf((opts.iterations - 1) as f64);
    let mut lambda = real::<S>(start) * norm(&x);
    let decrease = real::<S>(opts.decrease_factor);
    let mu0 = real::<S>(opts.mu0);
    let mut residual = vec![S::zero(); a.nrows()];

    for outer in 1..=opts.iterations {
        let width = lambda * lambda;
        for _ in 0..opts.inner_iterations {
            for xi in x.iter_mut() {
                let w = (-xi.abs_sqr() / width).exp();
                let step = xi.scale(mu0 * w);
                *xi -= step;
            }
            // residual = A x − b
            a.apply(&x, &mut residual);
            for (ri, bi) in residual.iter_mut().zip(b) {
                *ri -= *bi;
            }
            let correction = direct.solve(&residual)?;
            for (xi, ci) in x.iter_mut().zip(&correction) {
                *xi -= *ci;
            }
        }
        trace!(outer, lambda = ?lambda, "sl0: annealing step");
        lambda *= decrease;
        if monitor.observe(outer, &x).is_break() {
            debug!(outer, "sl0: stopped by monitor");
            break;
        }
    }
    debug!(final_width = ?lambda, "sl0: done");
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::from_rows;

    #[test]
    fn exact_sparse_vector_on_square_system_is_kept() {
        // Square and invertible: the feasible set is a single point.
        let a = from_rows::<f64>(&[vec![2.0, 1.0], vec![1.0, 3.0]]);
        let b: Vec<f64> = vec![2.0, 1.0];
        let x = sl0(&a, &b, &Sl0Options::new(4)).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-10);
        assert!(x[1].abs() < 1e-10);
    }

    #[test]
    fn wide_system_stays_feasible_and_sparse() {
        let a = from_rows::<f64>(&[vec![1.0, 0.5, -0.3, 0.8], vec![0.2, -1.0, 0.7, 0.4]]);
        let x_true = [0.0, 0.0, 2.0, 0.0];
        let mut b = vec![0.0f64; 2];
        LinearOperator::apply(&a, &x_true[..], &mut b);
        let x = sl0(&a, &b, &Sl0Options::new(12)).unwrap();
        let mut ax = vec![0.0f64; 2];
        LinearOperator::apply(&a, &x, &mut ax);
        for (ai, bi) in ax.iter().zip(&b) {
            assert!((ai - bi).abs() < 1e-10, "A x = {}, b = {}", ai, bi);
        }
        // At most as many non-zeros as equations.
        let support = x.iter().filter(|v| v.abs() > 1e-6).count();
        assert!(support <= 2, "x = {:?}", x);
    }

    #[test]
    fn rank_deficient_wide_system_is_solved() {
        let a = from_rows::<f64>(&[vec![1.0, 2.0, 3.0], vec![1.0, 2.0, 3.0]]);
        let b: Vec<f64> = vec![1.0, 1.0];
        let x = sl0(&a, &b, &Sl0Options::new(3)).unwrap();
        let mut ax = vec![0.0f64; 2];
        LinearOperator::apply(&a, &x, &mut ax);
        for (ai, bi) in ax.iter().zip(&b) {
            assert!((ai - bi).abs() < 1e-10, "A x = {}, b = {}", ai, bi);
        }
    }

    #[test]
    fn singular_square_operator_propagates() {
        let a = from_rows::<f64>(&[vec![1.0, 1.0], vec![1.0, 1.0]]);
        assert_eq!(
            sl0(&a, &[1.0f64, 1.0], &Sl0Options::new(3)).unwrap_err(),
            SolverError::ZeroPivot(1)
        );
    }

    #[test]
    fn zero_iterations_rejected() {
        let a = from_rows::<f64>(&[vec![1.0, 0.0]]);
        assert!(matches!(
            sl0(&a, &[1.0f64], &Sl0Options::new(0)),
            Err(SolverError::InvalidParameter { name: "iterations", .. })
        ));
    }
}
