//! Core linear-operator traits for itrecon.

use crate::core::scalar::Scalar;

/// Shape and native element type of an operator `A: M×N`.
pub trait Operator {
    /// Element type the operator is stored in.
    type Elem: Scalar;
    /// Number of rows (equations), `M`.
    fn nrows(&self) -> usize;
    /// Number of columns (unknowns), `N`.
    fn ncols(&self) -> usize;
    /// `(M, N)`.
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
}

/// Capabilities the solvers need from `A`, acting on vectors of scalar `S`.
///
/// An operator may act on several scalar types; a real matrix can act on
/// complex vectors, for instance.
pub trait LinearOperator<S: Scalar>: Operator {
    /// Copy row `k` into `out` (length `ncols`).
    fn row(&self, k: usize, out: &mut [S]);
    /// Compute y = A · x.
    fn apply(&self, x: &[S], y: &mut [S]);
    /// Compute y = Aᴴ · x.
    fn apply_adjoint(&self, x: &[S], y: &mut [S]);
}

impl<O: Operator + ?Sized> Operator for &O {
    type Elem = O::Elem;
    fn nrows(&self) -> usize {
        (**self).nrows()
    }
    fn ncols(&self) -> usize {
        (**self).ncols()
    }
}

impl<S: Scalar, O: LinearOperator<S> + ?Sized> LinearOperator<S> for &O {
    fn row(&self, k: usize, out: &mut [S]) {
        (**self).row(k, out)
    }
    fn apply(&self, x: &[S], y: &mut [S]) {
        (**self).apply(x, y)
    }
    fn apply_adjoint(&self, x: &[S], y: &mut [S]) {
        (**self).apply_adjoint(x, y)
    }
}
