//! Simulated annealing over selection vectors.

use super::strategy::{Budget, SolverOutcome, SolverStrategy};
use crate::energy::{EnergyModel, TrackedSelection};
use crate::error::SolverError;
use crate::model::Selection;
use crate::random::{create_rng, derive_seed};
use crate::result::{AnnealingDiagnostics, Diagnostics};
use crate::sa::{SaConfig, SaProblem, SaResult, SaRunner};
use rand::Rng;
use rayon::prelude::*;
use tracing::debug;

/// The timetabling energy as an [`SaProblem`]: uniform random start,
/// single-bit-flip moves, incremental deltas.
pub struct ScheduleProblem<'a> {
    model: &'a EnergyModel,
}

impl<'a> ScheduleProblem<'a> {
    pub fn new(model: &'a EnergyModel) -> Self {
        Self { model }
    }
}

impl SaProblem for ScheduleProblem<'_> {
    type State = TrackedSelection;
    type Move = usize;

    fn initial_state<R: Rng>(&self, rng: &mut R) -> TrackedSelection {
        TrackedSelection::new(self.model, Selection::random(self.model.len(), rng))
    }

    fn energy(&self, state: &TrackedSelection) -> f64 {
        self.model.energy(state.selection())
    }

    fn propose<R: Rng>(&self, _state: &TrackedSelection, rng: &mut R) -> Option<usize> {
        let n = self.model.len();
        (n > 0).then(|| rng.random_range(0..n))
    }

    fn apply(&self, state: &mut TrackedSelection, i: usize) {
        state.flip(self.model, i);
    }

    fn delta(&self, state: &TrackedSelection, i: usize) -> f64 {
        state.flip_delta(self.model, i)
    }
}

/// Reference solver: one or more independent annealing runs, best kept.
///
/// Run `k` is seeded with `seed + k`. With several restarts and `parallel`
/// set, runs execute on the rayon pool; the outcome does not depend on it.
/// Ties go to the lowest run index.
#[derive(Debug, Clone)]
pub struct AnnealingSolver {
    config: SaConfig,
    restarts: usize,
    parallel: bool,
}

impl AnnealingSolver {
    pub const NAME: &'static str = "simulated_annealing";

    pub fn new(config: SaConfig) -> Self {
        Self {
            config,
            restarts: 1,
            parallel: false,
        }
    }

    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts.max(1);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }

    fn run_once(
        &self,
        model: &EnergyModel,
        config: &SaConfig,
        budget: &Budget,
        seed: u64,
    ) -> Result<SaResult<TrackedSelection>, SolverError> {
        let problem = ScheduleProblem::new(model);
        let mut rng = create_rng(seed);
        SaRunner::run_with_rng(&problem, config, &mut rng, budget.cancel.as_deref())
            .map_err(SolverError::Failed)
    }
}

impl SolverStrategy for AnnealingSolver {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn solve(
        &self,
        model: &EnergyModel,
        budget: &Budget,
        seed: u64,
    ) -> Result<SolverOutcome, SolverError> {
        let mut config = self.config.clone();
        if let Some(max) = budget.max_evaluations {
            config.steps = config.steps.min(max);
        }
        if config.steps == 0 {
            return Err(SolverError::BudgetExhausted { evaluations: 0 });
        }

        let runs: Vec<Result<SaResult<TrackedSelection>, SolverError>> =
            if self.parallel && self.restarts > 1 {
                (0..self.restarts)
                    .into_par_iter()
                    .map(|k| self.run_once(model, &config, budget, derive_seed(seed, k)))
                    .collect()
            } else {
                (0..self.restarts)
                    .map(|k| self.run_once(model, &config, budget, derive_seed(seed, k)))
                    .collect()
            };

        let mut best: Option<(usize, SaResult<TrackedSelection>)> = None;
        for (k, run) in runs.into_iter().enumerate() {
            let run = run?;
            debug!(restart = k, energy = run.best_energy, "annealing run finished");
            if best
                .as_ref()
                .is_none_or(|(_, b)| run.best_energy < b.best_energy)
            {
                best = Some((k, run));
            }
        }
        let (best_restart, result) =
            best.ok_or(SolverError::BudgetExhausted { evaluations: 0 })?;

        Ok(SolverOutcome {
            method: Self::NAME.to_string(),
            energy: result.best_energy,
            selection: result.best.into_selection(),
            diagnostics: Diagnostics::Annealing(AnnealingDiagnostics {
                energy_trace: result.energy_trace,
                best_trace: result.best_trace,
                final_temperature: result.final_temperature,
                iterations: result.iterations,
                accepted_moves: result.accepted_moves,
                improving_moves: result.improving_moves,
                restarts: self.restarts,
                best_restart,
                cancelled: result.cancelled,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{generate, SearchSpace};
    use crate::constraint::{encode, EncodeOptions};
    use crate::model::CourseSpec;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn single_slot() -> SearchSpace {
        SearchSpace {
            num_rooms: 1,
            num_time_slots: 1,
            num_days: 1,
            ..SearchSpace::default()
        }
    }

    fn model_for(courses: &[CourseSpec], space: SearchSpace) -> EnergyModel {
        let cands = generate(courses, &space, false).unwrap();
        EnergyModel::new(&cands, &encode(&cands, &EncodeOptions::default()), 0.0)
    }

    fn small_model() -> EnergyModel {
        let courses = vec![
            CourseSpec::new("A").with_professor("p1").with_student_count(50),
            CourseSpec::new("B").with_professor("p1").with_student_count(35),
            CourseSpec::new("C").with_professor("p2").with_student_count(70),
        ];
        let space = SearchSpace {
            num_rooms: 2,
            num_time_slots: 6,
            num_days: 2,
            ..SearchSpace::default()
        };
        model_for(&courses, space)
    }

    fn annealing_diag(o: &SolverOutcome) -> &AnnealingDiagnostics {
        match &o.diagnostics {
            Diagnostics::Annealing(d) => d,
            other => panic!("unexpected diagnostics {other:?}"),
        }
    }

    #[test]
    fn test_shared_professor_picks_higher_utility() {
        let courses = vec![
            CourseSpec::new("A")
                .with_professor("p1")
                .with_priority(0.9)
                .with_student_count(40),
            CourseSpec::new("B")
                .with_professor("p1")
                .with_priority(0.5)
                .with_student_count(20),
        ];
        let model = model_for(&courses, single_slot());
        let solver = AnnealingSolver::new(SaConfig::default());
        let out = solver.solve(&model, &Budget::unlimited(), 42).unwrap();

        assert_eq!(out.selection, Selection::from_indices(2, &[0]));
        assert!((out.energy - model.energy(&out.selection)).abs() < 1e-12);
    }

    #[test]
    fn test_same_seed_identical_outcome() {
        let model = small_model();
        let solver = AnnealingSolver::new(SaConfig::default().with_steps(2000));
        let a = solver.solve(&model, &Budget::unlimited(), 7).unwrap();
        let b = solver.solve(&model, &Budget::unlimited(), 7).unwrap();
        assert_eq!(a.selection, b.selection);
        assert_eq!(a.energy, b.energy);
        assert_eq!(annealing_diag(&a).energy_trace, annealing_diag(&b).energy_trace);
    }

    #[test]
    fn test_trace_shapes() {
        let model = small_model();
        let solver = AnnealingSolver::new(SaConfig::default());
        let out = solver.solve(&model, &Budget::unlimited(), 1).unwrap();
        let d = annealing_diag(&out);
        assert_eq!(d.energy_trace.len(), 1000);
        assert!((d.final_temperature - 0.01).abs() < 1e-12);
        for w in d.best_trace.windows(2) {
            assert!(w[1] <= w[0]);
        }
    }

    #[test]
    fn test_budget_caps_steps() {
        let model = small_model();
        let solver = AnnealingSolver::new(SaConfig::default());
        let out = solver
            .solve(&model, &Budget::unlimited().with_max_evaluations(100), 1)
            .unwrap();
        assert_eq!(annealing_diag(&out).iterations, 100);

        let err = solver
            .solve(&model, &Budget::unlimited().with_max_evaluations(0), 1)
            .unwrap_err();
        assert_eq!(err, SolverError::BudgetExhausted { evaluations: 0 });
    }

    #[test]
    fn test_restarts_never_worse_than_first_run() {
        let model = small_model();
        let config = SaConfig::default().with_steps(500);
        let single = AnnealingSolver::new(config.clone())
            .solve(&model, &Budget::unlimited(), 3)
            .unwrap();
        let multi = AnnealingSolver::new(config)
            .with_restarts(4)
            .with_parallel(true)
            .solve(&model, &Budget::unlimited(), 3)
            .unwrap();
        assert!(multi.energy <= single.energy);
        assert_eq!(annealing_diag(&multi).restarts, 4);
    }

    #[test]
    fn test_parallel_restarts_deterministic() {
        let model = small_model();
        let solver = AnnealingSolver::new(SaConfig::default().with_steps(500))
            .with_restarts(3)
            .with_parallel(true);
        let a = solver.solve(&model, &Budget::unlimited(), 9).unwrap();
        let b = solver.solve(&model, &Budget::unlimited(), 9).unwrap();
        assert_eq!(a.selection, b.selection);
        assert_eq!(annealing_diag(&a).best_restart, annealing_diag(&b).best_restart);
    }

    #[test]
    fn test_cancelled_run_still_returns_start_state() {
        let model = small_model();
        let budget = Budget::unlimited().with_cancel(Arc::new(AtomicBool::new(true)));
        let out = AnnealingSolver::new(SaConfig::default())
            .solve(&model, &budget, 5)
            .unwrap();
        let d = annealing_diag(&out);
        assert!(d.cancelled);
        assert_eq!(d.iterations, 0);
        assert_eq!(out.selection.len(), model.len());
    }
}
