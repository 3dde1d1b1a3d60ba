//! Regularized Kaczmarz (ART) solver.
//!
//! Row-action method: each step projects the iterate onto the hyperplane of a
//! single equation `A(k,:)·x = b[k]`. The regularized variant carries one dual
//! entry per row, `residual[k]`, so that the sweeps converge to the Tikhonov
//! solution `argmin ‖Ax − b‖² + λ‖x‖²` rather than oscillating between
//! inconsistent equations. With `λ = 0` it is classic Kaczmarz.
//!
//! # Algorithm
//!
//! ```text
//! energy = rowEnergy(A); x = 0; residual = 0
//! for each sweep:
//!     for k in order, energy[k] > 0:
//!         beta = (b[k] − (A x)[k] − √λ·residual[k]) / (energy[k]² + λ)
//!         x += beta · conj(A(k,:))
//!         residual[k] += beta · √λ
//!     apply projections (real part, then x·sign(x))
//! ```
//!
//! # References
//! - Kaczmarz, S. (1937). Angenäherte Auflösung von Systemen linearer Gleichungen.
//! - Herman, G. T. (2009). Fundamentals of Computerized Tomography, ch. 11.

use crate::config::options::{KaczmarzOptions, Projection, RowOrder};
use crate::core::promote::{CommonType, Promote};
use crate::core::scalar::{Scalar, real};
use crate::core::traits::{LinearOperator, Operator};
use crate::core::wrappers::{axpy, dotc};
use crate::error::SolverError;
use crate::solver::promote_rhs;
use crate::solver::row_energy::row_energy_in;
use crate::utils::monitor::{IterationMonitor, NoMonitor};
use num_traits::{Float, Zero};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, trace, warn};

/// Solve `Ax ≈ b` with regularized Kaczmarz sweeps.
///
/// Returns a vector of length `A.ncols()` in the common element type of `A`
/// and `b`.
///
/// # Errors
/// `DimensionMismatch` if `b.len() != A.nrows()`, `InvalidParameter` if
/// `lambda` is negative or not finite.
pub fn kaczmarz<A, U>(
    a: &A,
    b: &[U],
    opts: &KaczmarzOptions,
) -> Result<Vec<CommonType<<A as Operator>::Elem, U>>, SolverError>
where
    A: Operator + LinearOperator<CommonType<<A as Operator>::Elem, U>> + ?Sized,
    <A as Operator>::Elem: Promote<U>,
    U: Scalar,
{
    kaczmarz_with_monitor(a, b, opts, NoMonitor)
}

/// [`kaczmarz`] with a monitor called after every sweep.
pub fn kaczmarz_with_monitor<A, U, M>(
    a: &A,
    b: &[U],
    opts: &KaczmarzOptions,
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
    Ok(sweeps(a, &b, opts, &mut monitor))
}

fn sweeps<S, A, M>(a: &A, b: &[S], opts: &KaczmarzOptions, monitor: &mut M) -> Vec<S>
where
    S: Scalar,
    A: LinearOperator<S> + ?Sized,
    M: IterationMonitor<S>,
{
    let (m, n) = (a.nrows(), a.ncols());
    let lambda = real::<S>(opts.lambda);
    let sqrt_lambda = lambda.sqrt();
    debug!(rows = m, cols = n, iterations = opts.iterations, lambda = opts.lambda, "kaczmarz: start");

    let energy = row_energy_in::<S, A>(a);
    let skipped = energy.iter().filter(|e| !(**e > S::Real::zero())).count();
    if skipped > 0 {
        warn!(skipped, "kaczmarz: rows without energy are skipped");
    }

    let mut order: Vec<usize> = (0..m).collect();
    let mut rng = match opts.order {
        RowOrder::Cyclic => None,
        RowOrder::Shuffled { seed } => Some(StdRng::seed_from_u64(seed)),
    };

    let mut x = vec![S::zero(); n];
    let mut residual = vec![S::zero(); m];
    let mut row = vec![S::zero(); n];

    for sweep in 1..=opts.iterations {
        if let Some(rng) = rng.as_mut() {
            order.shuffle(rng);
        }
        for &k in &order {
            let e = energy[k];
            if !(e > S::Real::zero()) {
                continue;
            }
            a.row(k, &mut row);
            for r in row.iter_mut() {
                *r = r.conj();
            }
            // ⟨conj(A(k,:)), x⟩ = (A x)[k]
            let ax = dotc(&row, &x);
            let beta = (b[k] - ax - residual[k].scale(sqrt_lambda)) / S::from_real(e * e + lambda);
            axpy(beta, &row, &mut x);
            residual[k] += beta.scale(sqrt_lambda);
        }
        project(&mut x, opts.projection);
        trace!(sweep, "kaczmarz: sweep done");
        if monitor.observe(sweep, &x).is_break() {
            debug!(sweep, "kaczmarz: stopped by monitor");
            break;
        }
    }
    debug!("kaczmarz: done");
    x
}

/// Apply the post-sweep projections in place.
///
/// `REAL` keeps the real part. `POSITIVE` multiplies every entry by its own
/// sign, which for reals is `|x|`: negative entries are reflected, not
/// clamped to zero. For complex entries `x·sign(x) = x²/|x|`.
pub fn project<S: Scalar>(x: &mut [S], projection: Projection) {
    if projection.contains(Projection::REAL) {
        for xi in x.iter_mut() {
            *xi = S::from_real(xi.re());
        }
    }
    if projection.contains(Projection::POSITIVE) {
        for xi in x.iter_mut() {
            *xi = *xi * xi.sign();
        }
    }
}
