//! End-to-end pipeline.
//!
//! ```text
//! courses -> generate -> encode -> EnergyModel -> strategy (fallback: annealing)
//!         -> extract + validate -> ResultRecord
//! ```

use crate::candidate::generate;
use crate::config::OptimizerConfig;
use crate::constraint::{encode, try_encode, ConflictGraph, ConstraintCounts, EncodeOptions};
use crate::energy::EnergyModel;
use crate::error::{ScheduleError, ValidationError, ValidationErrorKind};
use crate::model::{Candidate, CourseSpec};
use crate::random::resolve_seed;
use crate::result::ResultRecord;
use crate::solution::{extract, validate};
use crate::solver::{
    AnnealingSolver, Budget, SolverKind, SolverOutcome, SolverStrategy, VariationalSolver,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Candidates and the energy model built from one course list.
///
/// The constraint list is dropped once the model is built; only its
/// per-family counts are kept. Read-only for the rest of the run.
#[derive(Debug, Clone)]
pub struct PreparedProblem {
    pub candidates: Vec<Candidate>,
    pub model: EnergyModel,
    counts: ConstraintCounts,
    encode_options: EncodeOptions,
}

impl PreparedProblem {
    pub fn constraint_counts(&self) -> ConstraintCounts {
        self.counts
    }

    /// Pairwise conflict graph for inspection. Re-encodes the candidates.
    pub fn conflict_graph(&self) -> ConflictGraph {
        let constraints = encode(&self.candidates, &self.encode_options);
        ConflictGraph::from_constraints(self.candidates.len(), &constraints)
    }
}

/// Runs the whole pipeline for a configuration.
///
/// # Examples
///
/// ```
/// use u_timetable::{CourseSpec, Optimizer, OptimizerConfig};
///
/// let courses = vec![
///     CourseSpec::new("A").with_professor("p1").with_priority(0.9),
///     CourseSpec::new("B").with_professor("p2"),
/// ];
/// let config = OptimizerConfig::default()
///     .with_rooms(2)
///     .with_days(1)
///     .with_time_slots(4)
///     .with_seed(1);
/// let record = Optimizer::new(config).optimize(&courses).unwrap();
/// assert_eq!(record.method, "simulated_annealing");
/// ```
pub struct Optimizer {
    config: OptimizerConfig,
    strategy: Option<Box<dyn SolverStrategy>>,
    cancel: Option<Arc<AtomicBool>>,
    time_limit: Option<Duration>,
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        Self {
            config,
            strategy: None,
            cancel: None,
            time_limit: None,
        }
    }

    /// Uses `strategy` instead of the configured built-in one. Annealing
    /// remains the fallback if it fails.
    pub fn with_strategy(mut self, strategy: Box<dyn SolverStrategy>) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Wall-clock limit for the primary strategy.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Validates the configuration and builds candidates, constraints and
    /// the energy model.
    pub fn prepare(&self, courses: &[CourseSpec]) -> Result<PreparedProblem, ValidationError> {
        self.config
            .validate()
            .map_err(|e| ValidationError::new(ValidationErrorKind::InvalidConfig, e))?;

        let start = Instant::now();
        let candidates = generate(courses, &self.config.space(), self.config.parallel)?;
        let encode_options = self.config.encode_options();
        let constraints = try_encode(&candidates, &encode_options)?;
        let counts = ConstraintCounts::from_constraints(&constraints);
        let model = EnergyModel::new(
            &candidates,
            &constraints,
            self.config.time_preference_weight,
        );
        debug!(
            candidates = candidates.len(),
            constraints = constraints.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "problem prepared"
        );

        Ok(PreparedProblem {
            candidates,
            model,
            counts,
            encode_options,
        })
    }

    fn annealing(&self) -> AnnealingSolver {
        AnnealingSolver::new(self.config.sa_config())
            .with_restarts(self.config.restarts)
            .with_parallel(self.config.parallel)
    }

    fn primary(&self) -> Option<Box<dyn SolverStrategy>> {
        match self.config.solver_strategy {
            SolverKind::SimulatedAnnealing => None,
            SolverKind::Variational => Some(Box::new(VariationalSolver::new(
                self.config
                    .variational
                    .clone()
                    .with_parallel(self.config.parallel),
            ))),
        }
    }

    /// Runs the configured strategy, falling back to annealing if a
    /// non-annealing strategy fails. Returns the outcome and the fallback
    /// reason, if any.
    pub fn solve(
        &self,
        problem: &PreparedProblem,
        seed: u64,
    ) -> Result<(SolverOutcome, Option<String>), ScheduleError> {
        let budget = Budget {
            max_evaluations: None,
            time_limit: self.time_limit,
            cancel: self.cancel.clone(),
        };

        let built;
        let primary: Option<&dyn SolverStrategy> = match &self.strategy {
            Some(s) => Some(&**s),
            None => {
                built = self.primary();
                built.as_deref()
            }
        };

        let mut fallback_reason = None;
        if let Some(strategy) = primary {
            info!(method = strategy.name(), "solving");
            match strategy.solve(&problem.model, &budget, seed) {
                Ok(outcome) => return Ok((outcome, None)),
                Err(e) => {
                    warn!(method = strategy.name(), error = %e, "solver failed, falling back to annealing");
                    fallback_reason = Some(format!("{}: {e}", strategy.name()));
                }
            }
        }

        let annealing = self.annealing();
        info!(
            method = annealing.name(),
            steps = annealing.config().steps,
            restarts = self.config.restarts,
            "solving"
        );
        // The fallback runs on the step budget alone.
        let fallback_budget = Budget {
            time_limit: None,
            ..budget
        };
        let outcome = annealing.solve(&problem.model, &fallback_budget, seed)?;
        Ok((outcome, fallback_reason))
    }

    /// Full pipeline: prepare, solve, extract, validate.
    pub fn optimize(&self, courses: &[CourseSpec]) -> Result<ResultRecord, ScheduleError> {
        let problem = self.prepare(courses)?;
        let seed = resolve_seed(self.config.seed);
        info!(
            courses = courses.len(),
            candidates = problem.candidates.len(),
            seed,
            "optimizing schedule"
        );

        let (outcome, fallback_reason) = self.solve(&problem, seed)?;
        let schedule = extract(&outcome.selection, &problem.candidates);
        let validation = validate(&outcome.selection, &problem.candidates);

        let record = ResultRecord {
            method: outcome.method,
            energy: outcome.energy,
            schedule,
            diagnostics: outcome.diagnostics,
            validation,
            fallback_reason,
            seed,
        };

        if record.is_infeasible() {
            warn!(
                method = %record.method,
                energy = record.energy,
                instructor_conflicts = record.validation.instructor_conflicts,
                room_conflicts = record.validation.room_conflicts,
                "schedule has residual hard conflicts"
            );
        } else {
            info!(
                method = %record.method,
                energy = record.energy,
                entries = record.schedule.len(),
                coverage = record.validation.coverage,
                "schedule ready"
            );
        }

        Ok(record)
    }
}
