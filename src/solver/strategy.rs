//! The solver strategy interface.

use crate::energy::EnergyModel;
use crate::error::SolverError;
use crate::model::Selection;
use crate::result::Diagnostics;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Built-in strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    #[default]
    SimulatedAnnealing,
    Variational,
}

/// Limits imposed on a single solve call.
#[derive(Debug, Clone, Default)]
pub struct Budget {
    /// Maximum number of energy evaluations (annealing: proposals).
    pub max_evaluations: Option<usize>,
    /// Wall-clock limit.
    pub time_limit: Option<Duration>,
    /// Cooperative cancellation flag.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    pub fn unlimited() -> Self {
        Self::default()
    }

    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = Some(n);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Deadline measured from `start`.
    #[inline]
    pub fn deadline(&self, start: Instant) -> Option<Instant> {
        self.time_limit.map(|d| start + d)
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|f| f.load(Ordering::Relaxed))
    }
}

/// What a strategy returns.
#[derive(Debug, Clone)]
pub struct SolverOutcome {
    pub method: String,
    pub selection: Selection,
    pub energy: f64,
    pub diagnostics: Diagnostics,
}

/// A search procedure over selection vectors.
///
/// Implementations must draw all randomness from `seed` so equal seeds give
/// equal outcomes, and must own their selection vectors exclusively.
pub trait SolverStrategy: Send + Sync {
    /// Short method name recorded in results.
    fn name(&self) -> &str;

    /// Searches for a low-energy selection.
    fn solve(
        &self,
        model: &EnergyModel,
        budget: &Budget,
        seed: u64,
    ) -> Result<SolverOutcome, SolverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let budget = Budget::unlimited().with_cancel(Arc::clone(&flag));
        assert!(!budget.is_cancelled());
        flag.store(true, Ordering::Relaxed);
        assert!(budget.is_cancelled());
    }

    #[test]
    fn test_solver_kind_serde() {
        let k: SolverKind = serde_json::from_str("\"variational\"").unwrap();
        assert_eq!(k, SolverKind::Variational);
        assert_eq!(SolverKind::default(), SolverKind::SimulatedAnnealing);
    }
}
