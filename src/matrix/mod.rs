//! Matrix module: dense operator implementations.

pub mod dense;
pub use dense::from_rows;
