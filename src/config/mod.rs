//! Solver configuration.

pub mod options;
pub use options::{CgnrOptions, KaczmarzOptions, Projection, RowOrder, Sl0Options};
