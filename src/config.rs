//! Pipeline configuration.

use crate::candidate::SearchSpace;
use crate::constraint::EncodeOptions;
use crate::sa::{CoolingSchedule, SaConfig};
use crate::solver::{SolverKind, VariationalConfig};
use serde::{Deserialize, Serialize};

/// Configuration for an [`Optimizer`](crate::Optimizer) run.
///
/// Deserializes from partial JSON; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use u_timetable::OptimizerConfig;
///
/// let config = OptimizerConfig::default()
///     .with_rooms(4)
///     .with_annealing_steps(5000)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.space().per_course(), 4 * 24 * 7);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub num_rooms: u16,
    /// Hours per day, at most 24.
    pub num_time_slots: u8,
    /// Days per week, at most 7.
    pub num_days: u8,
    pub annealing_steps: usize,
    /// `(initial, final)` annealing temperature.
    pub temperature_range: (f64, f64),
    pub cooling: CoolingSchedule,
    pub solver_strategy: SolverKind,
    pub student_conflict_threshold: f64,
    /// Scale of the time preference bias in the energy. Zero leaves it out.
    pub time_preference_weight: f64,
    /// Cap on the number of candidates.
    pub max_candidates: usize,
    /// Cap on the estimated number of constraints.
    pub max_constraints: usize,
    /// Independent annealing runs; the best one is kept.
    pub restarts: usize,
    /// Use the rayon pool for generation, encoding, sampling and restarts.
    pub parallel: bool,
    /// Random seed. `None` draws a fresh one per run.
    pub seed: Option<u64>,
    pub variational: VariationalConfig,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            num_rooms: 10,
            num_time_slots: 24,
            num_days: 7,
            annealing_steps: 1000,
            temperature_range: (1e2, 1e-2),
            cooling: CoolingSchedule::LogSpaced,
            solver_strategy: SolverKind::SimulatedAnnealing,
            student_conflict_threshold: 0.1,
            time_preference_weight: 0.0,
            max_candidates: 200_000,
            max_constraints: 4_000_000,
            restarts: 1,
            parallel: true,
            seed: None,
            variational: VariationalConfig::default(),
        }
    }
}

impl OptimizerConfig {
    pub fn with_rooms(mut self, n: u16) -> Self {
        self.num_rooms = n;
        self
    }

    pub fn with_time_slots(mut self, n: u8) -> Self {
        self.num_time_slots = n;
        self
    }

    pub fn with_days(mut self, n: u8) -> Self {
        self.num_days = n;
        self
    }

    pub fn with_annealing_steps(mut self, n: usize) -> Self {
        self.annealing_steps = n;
        self
    }

    pub fn with_temperature_range(mut self, initial: f64, last: f64) -> Self {
        self.temperature_range = (initial, last);
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_solver(mut self, kind: SolverKind) -> Self {
        self.solver_strategy = kind;
        self
    }

    pub fn with_student_conflict_threshold(mut self, t: f64) -> Self {
        self.student_conflict_threshold = t;
        self
    }

    pub fn with_time_preference_weight(mut self, w: f64) -> Self {
        self.time_preference_weight = w;
        self
    }

    pub fn with_max_candidates(mut self, n: usize) -> Self {
        self.max_candidates = n;
        self
    }

    pub fn with_max_constraints(mut self, n: usize) -> Self {
        self.max_constraints = n;
        self
    }

    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_variational(mut self, config: VariationalConfig) -> Self {
        self.variational = config;
        self
    }

    pub fn space(&self) -> SearchSpace {
        SearchSpace {
            num_rooms: self.num_rooms,
            num_time_slots: self.num_time_slots,
            num_days: self.num_days,
            max_candidates: self.max_candidates,
        }
    }

    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            student_conflict_threshold: self.student_conflict_threshold,
            parallel: self.parallel,
            max_constraints: self.max_constraints,
        }
    }

    pub fn sa_config(&self) -> SaConfig {
        let (t0, t1) = self.temperature_range;
        SaConfig {
            initial_temperature: t0,
            min_temperature: t1,
            cooling: self.cooling,
            steps: self.annealing_steps,
            seed: self.seed,
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_rooms == 0 {
            return Err("num_rooms must be at least 1".into());
        }
        if !(1..=24).contains(&self.num_time_slots) {
            return Err(format!(
                "num_time_slots must be in 1..=24, got {}",
                self.num_time_slots
            ));
        }
        if !(1..=7).contains(&self.num_days) {
            return Err(format!("num_days must be in 1..=7, got {}", self.num_days));
        }
        if self.restarts == 0 {
            return Err("restarts must be at least 1".into());
        }
        if !self.student_conflict_threshold.is_finite() {
            return Err("student_conflict_threshold must be finite".into());
        }
        if !self.time_preference_weight.is_finite() {
            return Err("time_preference_weight must be finite".into());
        }
        self.sa_config().validate()?;
        if self.solver_strategy == SolverKind::Variational {
            self.variational.validate()?;
        }
        Ok(())
    }
}
