//! Iterative reconstruction solvers and the dense direct solve they lean on.
//!
//! Every public entry point takes an operator `A` with element type `T`, a
//! right-hand side with element type `U`, and returns a solution in
//! `CommonType<T, U>`. The promotion happens once, in [`promote_rhs`]; the
//! solver loops then run in a single scalar type.

use crate::core::promote::{CommonType, Promote};
use crate::core::scalar::Scalar;
use crate::core::traits::Operator;
use crate::error::{SolverError, check_len};

pub mod row_energy;
pub use row_energy::row_energy;

pub mod kaczmarz;
pub use kaczmarz::{kaczmarz, kaczmarz_with_monitor, project};

pub mod cgnr;
pub use cgnr::{cgnr, cgnr_with_monitor};

pub mod direct_lu;
pub use direct_lu::{DirectSolver, Mode, solve};

pub mod sl0;
pub use sl0::{sl0, sl0_with_monitor};

/// Check `b` against the operator's row count and lift it into the common
/// element type.
pub fn promote_rhs<A, U>(a: &A, b: &[U]) -> Result<Vec<CommonType<A::Elem, U>>, SolverError>
where
    A: Operator + ?Sized,
    A::Elem: Promote<U>,
    U: Scalar,
{
    check_len(a.nrows(), b.len())?;
    Ok(b.iter().map(|&u| <A::Elem as Promote<U>>::lift_rhs(u)).collect())
}
