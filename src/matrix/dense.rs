//! Dense operator on top of Faer.
//!
//! `faer::Mat<T>` is the stock [`LinearOperator`]: it acts on vectors of any
//! scalar `S` that `T` lifts into, so a real matrix can be applied to complex
//! data without copying the matrix.

use crate::core::promote::Lift;
use crate::core::scalar::Scalar;
use crate::core::traits::{LinearOperator, Operator};
use faer::Mat;

impl<T: Scalar> Operator for Mat<T> {
    type Elem = T;
    fn nrows(&self) -> usize {
        Mat::nrows(self)
    }
    fn ncols(&self) -> usize {
        Mat::ncols(self)
    }
}

impl<T: Lift<S>, S: Scalar> LinearOperator<S> for Mat<T> {
    fn row(&self, k: usize, out: &mut [S]) {
        assert_eq!(Mat::ncols(self), out.len(), "Row buffer has incorrect length");
        for (j, o) in out.iter_mut().enumerate() {
            *o = self[(k, j)].lift();
        }
    }

    fn apply(&self, x: &[S], y: &mut [S]) {
        assert_eq!(Mat::nrows(self), y.len(), "Output vector y has incorrect length");
        assert_eq!(Mat::ncols(self), x.len(), "Input vector x has incorrect length");
        for (i, yi) in y.iter_mut().enumerate() {
            let mut acc = S::zero();
            for (j, xj) in x.iter().enumerate() {
                acc += self[(i, j)].lift() * *xj;
            }
            *yi = acc;
        }
    }

    fn apply_adjoint(&self, x: &[S], y: &mut [S]) {
        assert_eq!(Mat::ncols(self), y.len(), "Output vector y has incorrect length");
        assert_eq!(Mat::nrows(self), x.len(), "Input vector x has incorrect length");
        for (j, yj) in y.iter_mut().enumerate() {
            let mut acc = S::zero();
            for (i, xi) in x.iter().enumerate() {
                acc += self[(i, j)].lift().conj() * *xi;
            }
            *yj = acc;
        }
    }
}

/// Build a `faer::Mat` from row-major nested vectors.
///
/// # Panics
/// Panics if the rows have different lengths.
pub fn from_rows<T: Scalar>(rows: &[Vec<T>]) -> Mat<T> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);
    assert!(rows.iter().all(|r| r.len() == ncols), "Rows must have equal length");
    Mat::from_fn(nrows, ncols, |i, j| rows[i][j])
}
