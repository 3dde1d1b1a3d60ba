//! Per-row Euclidean norms of an operator.
//!
//! Row-action methods normalize each update by the energy of the row being
//! projected on. The vector is computed once per solve and read-only after.

use crate::core::scalar::Scalar;
use faer::traits::ComplexField;
use crate::core::traits::{LinearOperator, Operator};
use crate::core::wrappers::norm;

/// `energy[m] = ‖A(m,:)‖₂` in the operator's own element type.
pub fn row_energy<A>(a: &A) -> Vec<<<A as Operator>::Elem as ComplexField>::Real>
where
    A: Operator + LinearOperator<<A as Operator>::Elem> + ?Sized,
{
    row_energy_in::<<A as Operator>::Elem, A>(a)
}

/// Row energies with rows read as vectors of `S`.
pub(crate) fn row_energy_in<S: Scalar, A: LinearOperator<S> + ?Sized>(a: &A) -> Vec<S::Real> {
    let mut row = vec![S::zero(); a.ncols()];
    (0..a.nrows())
        .map(|k| {
            a.row(k, &mut row);
            norm(&row)
        })
        .collect()
}
