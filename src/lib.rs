//! itrecon: iterative reconstruction solvers over Faer
//!
//! This crate provides row-action and Krylov-type solvers for (possibly
//! rectangular, ill-posed) linear systems `A x ≈ b`, as they arise in
//! tomographic and other image reconstruction problems:
//!
//! - regularized Kaczmarz / ART with optional real and sign projections,
//! - CGNR on the Tikhonov-damped normal equations,
//! - SL0 (smoothed-L0) sparse recovery for underdetermined systems.
//!
//! Operators implement [`LinearOperator`]; `faer::Mat` does out of the box.
//! Every solver works on `f32`, `f64`, `Complex<f32>` and `Complex<f64>` and
//! returns its solution in the common type of the operator and the
//! right-hand side.

pub mod config;
pub mod context;
pub mod core;
pub mod error;
pub mod matrix;
pub mod solver;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use context::*;
pub use self::core::*;
pub use error::*;
pub use matrix::*;
pub use solver::*;
pub use utils::*;
