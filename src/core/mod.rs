//! Scalar, promotion and operator abstractions shared by every solver.

pub mod promote;
pub mod scalar;
pub mod traits;
pub mod wrappers;

pub use promote::{CommonType, Lift, Promote};
pub use scalar::Scalar;
pub use traits::{LinearOperator, Operator};
