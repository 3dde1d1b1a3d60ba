//! Per-iteration observation and cooperative cancellation.
//!
//! Every solver calls its monitor once after each outer iteration with the
//! 1-based iteration number and the current iterate. Returning
//! `ControlFlow::Break(())` stops the loop; the solver then returns the
//! iterate as it stands. Monitors only observe, they never alter `x`.

use crate::core::scalar::Scalar;
use std::ops::ControlFlow;

pub trait IterationMonitor<S: Scalar> {
    fn observe(&mut self, iteration: usize, x: &[S]) -> ControlFlow<()>;
}

impl<S: Scalar, F> IterationMonitor<S> for F
where
    F: FnMut(usize, &[S]) -> ControlFlow<()>,
{
    fn observe(&mut self, iteration: usize, x: &[S]) -> ControlFlow<()> {
        self(iteration, x)
    }
}

/// Monitor that never stops the solver.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoMonitor;

impl<S: Scalar> IterationMonitor<S> for NoMonitor {
    fn observe(&mut self, _iteration: usize, _x: &[S]) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Stops after a fixed number of outer iterations, whatever the solver's own
/// count says.
#[derive(Debug, Clone, Copy)]
pub struct IterationCap(pub usize);

impl<S: Scalar> IterationMonitor<S> for IterationCap {
    fn observe(&mut self, iteration: usize, _x: &[S]) -> ControlFlow<()> {
        if iteration >= self.0 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    }
}
