//! Solver strategies.
//!
//! Every strategy implements [`SolverStrategy`]: given an
//! [`EnergyModel`](crate::energy::EnergyModel), a [`Budget`] and a seed, it
//! returns a selection, its energy and diagnostics, or a
//! [`SolverError`](crate::error::SolverError).
//!
//! - [`AnnealingSolver`]: the reference strategy; single-bit-flip simulated
//!   annealing, optionally with independent restarts.
//! - [`VariationalSolver`]: cross-entropy optimization of a product-Bernoulli
//!   distribution over selections.
//!
//! Other backends plug in by implementing the trait.

mod annealing;
mod strategy;
mod variational;

pub use annealing::{AnnealingSolver, ScheduleProblem};
pub use strategy::{Budget, SolverKind, SolverOutcome, SolverStrategy};
pub use variational::{VariationalConfig, VariationalSolver};
