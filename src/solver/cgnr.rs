//! CGNR solver with Tikhonov damping (Saad Ch 8.3)
//!
//! Conjugate Gradient on the Normal Residual applies CG to the damped normal
//! equations `(AᴴA + λI) x = Aᴴb` without ever forming `AᴴA`: each iteration
//! costs one product with `A` and one with `Aᴴ`. Suitable for overdetermined,
//! underdetermined and rank-deficient systems; `λ > 0` improves conditioning.
//!
//! # Overview
//!
//! ```text
//! x = 0; r = b; z = Aᴴ r; p = z
//! repeat iterations times:
//!     v = A p
//!     alpha = ‖z‖² / (‖v‖² + λ‖p‖²)
//!     x += alpha p;  r −= alpha v
//!     z = Aᴴ r − λ x
//!     beta = ‖z_new‖² / ‖z_old‖²
//!     p = z − beta p
//! ```
//!
//! All squared norms are sums of squared magnitudes. There is no stopping
//! test: the iteration count is the caller's choice. A degenerate
//! denominator (A = 0 with λ = 0) yields NaN/Inf in the result, which is
//! returned as is.
//!
//! # References
//! - Saad, Y. (2003). Iterative Methods for Sparse Linear Systems, Section 8.3.
//! - https://en.wikipedia.org/wiki/Conjugate_gradient_method#The_normal_equations

use crate::config::options::CgnrOptions;
use crate::core::promote::{CommonType, Promote};
use crate::core::scalar::{Scalar, real};
use crate::core::traits::{LinearOperator, Operator};
use crate::core::wrappers::{axpy, norm_sqr};
use crate::error::SolverError;
use crate::solver::promote_rhs;
use crate::utils::monitor::{IterationMonitor, NoMonitor};
use num_traits::Float;
use tracing::{debug, trace, warn};

/// Solve the damped least-squares problem `min ‖Ax − b‖² + λ‖x‖²` with CGNR.
///
/// # Errors
/// `DimensionMismatch` if `b.len() != A.nrows()`, `InvalidParameter` if
/// `lambda` is negative or not finite.
pub fn cgnr<A, U>(
    a: &A,
    b: &[U],
    opts: &CgnrOptions,
) -> Result<Vec<CommonType<<A as Operator>::Elem, U>>, SolverError>
where
    A: Operator + LinearOperator<CommonType<<A as Operator>::Elem, U>> + ?Sized,
    <A as Operator>::Elem: Promote<U>,
    U: Scalar,
{
    cgnr_with_monitor(a, b, opts, NoMonitor)
}

/// [`cgnr`] with a monitor called after every iteration.
pub fn cgnr_with_monitor<A, U, M>(
    a: &A,
    b: &[U],
    opts: &CgnrOptions,
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
    Ok(iterate(a, b, opts, &mut monitor))
}

fn iterate<S, A, M>(a: &A, b: Vec<S>, opts: &CgnrOptions, monitor: &mut M) -> Vec<S>
where
    S: Scalar,
    A: LinearOperator<S> + ?Sized,
    M: IterationMonitor<S>,
{
    let (m, n) = (a.nrows(), a.ncols());
    let lambda = real::<S>(opts.lambda);
    debug!(rows = m, cols = n, iterations = opts.iterations, lambda = opts.lambda, "cgnr: start");

    let mut x = vec![S::zero(); n];
    // r = b - A x with x = 0
    let mut r = b;
    let mut z = vec![S::zero(); n];
    a.apply_adjoint(&r, &mut z);
    let mut p = z.clone();
    let mut v = vec![S::zero(); m];
    let mut zz = norm_sqr(&z);
    let mut reported = false;

    for i in 1..=opts.iterations {
        // v = A p
        a.apply(&p, &mut v);
        let alpha = zz / (norm_sqr(&v) + lambda * norm_sqr(&p));
        if !alpha.is_finite() && !reported {
            warn!(iteration = i, "cgnr: non-finite step length, result will carry NaN/Inf");
            reported = true;
        }
        axpy(S::from_real(alpha), &p, &mut x);
        axpy(S::from_real(-alpha), &v, &mut r);
        // z = Aᴴ r − λ x
        a.apply_adjoint(&r, &mut z);
        axpy(S::from_real(-lambda), &x, &mut z);
        let zz_new = norm_sqr(&z);
        let beta = zz_new / zz;
        for (pj, zj) in p.iter_mut().zip(&z) {
            *pj = *zj - pj.scale(beta);
        }
        zz = zz_new;
        let normal_residual = zz.sqrt();
        trace!(iteration = i, ?normal_residual, "cgnr: step");
        if monitor.observe(i, &x).is_break() {
            debug!(iteration = i, "cgnr: stopped by monitor");
            break;
        }
    }
    debug!(normal_residual = ?zz.sqrt(), "cgnr: done");
    x
}
