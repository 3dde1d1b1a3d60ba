//! Direct dense solves using Faer: LU for square operators, SVD
//! pseudoinverse for rectangular ones.
//!
//! SL0 needs `solve(A, b)` for a wide `A` over and over with a fixed `A`, so
//! the operator is materialized from its rows and factored once:
//!
//! - `M == N`: full-pivoting LU of `A`, `x = A⁻¹ b`. A zero pivot is reported
//!   as `ZeroPivot`.
//! - `M < N`: `x = A⁺ b`, the minimum-norm solution of `A x = b`.
//! - `M > N`: `x = A⁺ b`, the (minimum-norm) least-squares solution.
//!
//! The pseudoinverse drops singular values below `ε · max(M, N) · σ_max`, so
//! rank-deficient rectangular operators are handled. For a wide operator the
//! SVD is taken of `Aᴴ` and the result conjugate-transposed.
//!
//! # References
//! - Faer documentation: https://github.com/sarah-ek/faer-rs
//! - Golub & Van Loan, Matrix Computations, §3.4 and §5.5

use crate::core::promote::{CommonType, Promote};
use crate::core::scalar::Scalar;
use crate::core::traits::{LinearOperator, Operator};
use crate::error::{SolverError, check_len};
use crate::solver::promote_rhs;
use faer::linalg::solvers::{FullPivLu, SolveCore, Svd};
use faer::{Conj, Mat, MatMut};
use num_traits::{Float, Zero};
use tracing::debug;

/// How a [`DirectSolver`] maps the right-hand side to a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Square operator, exact solve.
    Square,
    /// Fewer rows than columns, minimum-norm solve.
    MinimumNorm,
    /// More rows than columns, least-squares solve.
    LeastSquares,
}

#[derive(Debug, Clone)]
enum Factor<S> {
    Lu(FullPivLu<S>),
    /// `A⁺`, `N×M`.
    Pinv(Mat<S>),
}

/// Factored dense copy of an operator, reusable across right-hand sides.
#[derive(Debug, Clone)]
pub struct DirectSolver<S> {
    m: usize,
    n: usize,
    mode: Mode,
    factor: Factor<S>,
}

impl<S: Scalar> DirectSolver<S> {
    /// Materialize `a` from its rows and factor it.
    ///
    /// # Errors
    /// `ZeroPivot(k)` if `A` is square and singular, `NoConvergence` if the
    /// SVD of a rectangular `A` fails to converge.
    pub fn new<A: LinearOperator<S> + ?Sized>(a: &A) -> Result<Self, SolverError> {
        let (m, n) = (a.nrows(), a.ncols());
        let mut rows = vec![S::zero(); m * n];
        for (k, row) in rows.chunks_mut(n.max(1)).take(m).enumerate() {
            a.row(k, row);
        }
        let dense = Mat::from_fn(m, n, |i, j| rows[i * n + j]);

        let (mode, factor) = if m == n {
            let lu = FullPivLu::new(dense.as_ref());
            let u = lu.U();
            for k in 0..n {
                let pivot = u[(k, k)].abs_sqr();
                if pivot == S::Real::zero() || pivot.is_nan() {
                    return Err(SolverError::ZeroPivot(k));
                }
            }
            (Mode::Square, Factor::Lu(lu))
        } else if m > n {
            let svd = Svd::new(dense.as_ref()).map_err(|_| SolverError::NoConvergence)?;
            (Mode::LeastSquares, Factor::Pinv(svd.pseudoinverse()))
        } else {
            // A⁺ = ((Aᴴ)⁺)ᴴ
            let svd = Svd::new(dense.adjoint()).map_err(|_| SolverError::NoConvergence)?;
            let pinv_adj = svd.pseudoinverse();
            (Mode::MinimumNorm, Factor::Pinv(Mat::from_fn(n, m, |j, i| pinv_adj[(i, j)].conj())))
        };
        debug!(rows = m, cols = n, ?mode, "direct: factored");
        Ok(Self { m, n, mode, factor })
    }

    /// Which solve the shape of `A` selected.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Solve for one right-hand side of length `M`; returns length `N`.
    pub fn solve(&self, rhs: &[S]) -> Result<Vec<S>, SolverError> {
        check_len(self.m, rhs.len())?;
        match &self.factor {
            Factor::Lu(lu) => {
                let mut x = rhs.to_vec();
                let x_mat = MatMut::from_column_major_slice_mut(&mut x, self.n, 1);
                lu.solve_in_place_with_conj(Conj::No, x_mat);
                Ok(x)
            }
            Factor::Pinv(pinv) => {
                let x = (0..self.n)
                    .map(|j| rhs.iter().enumerate().fold(S::zero(), |acc, (i, bi)| acc + pinv[(j, i)] * *bi))
                    .collect();
                Ok(x)
            }
        }
    }
}

/// One-shot `solve(A, b)`: exact, minimum-norm or least-squares depending on
/// the shape of `A`, in the common element type of `A` and `b`.
pub fn solve<A, U>(a: &A, b: &[U]) -> Result<Vec<CommonType<<A as Operator>::Elem, U>>, SolverError>
where
    A: Operator + LinearOperator<CommonType<<A as Operator>::Elem, U>> + ?Sized,
    <A as Operator>::Elem: Promote<U>,
    U: Scalar,
{
    let b = promote_rhs(a, b)?;
    DirectSolver::new(a)?.solve(&b)
}
