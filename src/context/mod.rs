//! Context module for itrecon.
//!
//! Contexts bind an operator to a runtime-selected solver and its options.
//!
//! Modules:
//! - [`recon_context`]: `ReconContext`, `Method` and the `SolverKind` parser.
//!
//! # Example
//! ```rust,ignore
//! use itrecon::context::{ReconContext, SolverKind};
//! let kind: SolverKind = "art".parse()?;
//! let ctx = ReconContext::new(&a, kind);
//! let x = ctx.solve(&b)?;
//! ```

pub mod recon_context;
pub use recon_context::{Method, ReconContext, SolverKind};
