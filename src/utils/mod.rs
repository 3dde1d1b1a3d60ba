//! Utilities shared by the solvers.

pub mod monitor;
pub use monitor::{IterationCap, IterationMonitor, NoMonitor};
