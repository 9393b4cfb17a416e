//! Sampling-based variational solver.
//!
//! Optimizes a product-of-Bernoulli distribution `q(x) = prod_i p_i^x_i (1 - p_i)^(1 - x_i)`
//! with the cross-entropy method:
//!
//! 1. Draw `samples_per_iteration` selections from `q`
//! 2. Keep the lowest-energy `elite_ratio` fraction
//! 3. Move each `p_i` toward its frequency among the elite:
//!    `p_i <- smoothing * freq_i + (1 - smoothing) * p_i`, clamped to
//!    `[min_probability, 1 - min_probability]`
//! 4. Stop when no `p_i` moves more than `convergence_tolerance`, or the
//!    budget runs out
//!
//! The best sample is finally polished by single-flip descent.
//!
//! # Reference
//!
//! Rubinstein, R. Y. (1999). "The Cross-Entropy Method for Combinatorial and
//! Continuous Optimization", *Methodology and Computing in Applied Probability* 1, 127-190.

use super::strategy::{Budget, SolverOutcome, SolverStrategy};
use crate::energy::{EnergyModel, TrackedSelection};
use crate::error::SolverError;
use crate::model::Selection;
use crate::random::create_rng;
use crate::result::{ConvergenceMetadata, Diagnostics, VariationalDiagnostics};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

/// Configuration for [`VariationalSolver`].
///
/// # Examples
///
/// ```
/// use u_timetable::solver::VariationalConfig;
///
/// let config = VariationalConfig::default()
///     .with_samples_per_iteration(128)
///     .with_max_iterations(50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationalConfig {
    pub samples_per_iteration: usize,
    /// Fraction of samples that update the distribution, in `(0, 1]`.
    pub elite_ratio: f64,
    /// Weight of the elite frequencies in each update, in `(0, 1]`.
    pub smoothing: f64,
    pub max_iterations: usize,
    /// Starting probability of every bit.
    pub initial_probability: f64,
    /// Floor keeping every bit reachable.
    pub min_probability: f64,
    pub convergence_tolerance: f64,
    /// Wall-clock limit in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Run single-flip descent on the best sample.
    pub polish: bool,
    /// Evaluate samples on the rayon pool. The optimizer overrides this
    /// with its own `parallel` setting.
    pub parallel: bool,
}

impl Default for VariationalConfig {
    fn default() -> Self {
        Self {
            samples_per_iteration: 64,
            elite_ratio: 0.1,
            smoothing: 0.7,
            max_iterations: 100,
            initial_probability: 0.05,
            min_probability: 1e-3,
            convergence_tolerance: 1e-3,
            time_limit_ms: None,
            polish: true,
            parallel: false,
        }
    }
}

impl VariationalConfig {
    pub fn with_samples_per_iteration(mut self, n: usize) -> Self {
        self.samples_per_iteration = n;
        self
    }

    pub fn with_elite_ratio(mut self, r: f64) -> Self {
        self.elite_ratio = r;
        self
    }

    pub fn with_smoothing(mut self, s: f64) -> Self {
        self.smoothing = s;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    pub fn with_polish(mut self, polish: bool) -> Self {
        self.polish = polish;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.samples_per_iteration == 0 {
            return Err("samples_per_iteration must be at least 1".into());
        }
        if !(self.elite_ratio > 0.0 && self.elite_ratio <= 1.0) {
            return Err(format!("elite_ratio must be in (0, 1], got {}", self.elite_ratio));
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(format!("smoothing must be in (0, 1], got {}", self.smoothing));
        }
        if !(self.min_probability > 0.0 && self.min_probability < 0.5) {
            return Err(format!(
                "min_probability must be in (0, 0.5), got {}",
                self.min_probability
            ));
        }
        if !(self.initial_probability >= self.min_probability
            && self.initial_probability <= 1.0 - self.min_probability)
        {
            return Err(format!(
                "initial_probability must be in [min_probability, 1 - min_probability], got {}",
                self.initial_probability
            ));
        }
        Ok(())
    }

    fn elite_count(&self) -> usize {
        ((self.samples_per_iteration as f64 * self.elite_ratio).ceil() as usize)
            .clamp(1, self.samples_per_iteration)
    }
}

/// Cross-entropy solver over product-Bernoulli distributions.
#[derive(Debug, Clone, Default)]
pub struct VariationalSolver {
    config: VariationalConfig,
}

impl VariationalSolver {
    pub const NAME: &'static str = "variational";

    pub fn new(config: VariationalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VariationalConfig {
        &self.config
    }
}

fn sample<R: Rng>(probs: &[f64], rng: &mut R) -> Selection {
    Selection::from_bits(probs.iter().map(|&p| rng.random_bool(p)).collect())
}

/// Mean binary entropy in bits.
fn mean_entropy(probs: &[f64]) -> f64 {
    if probs.is_empty() {
        return 0.0;
    }
    let h: f64 = probs
        .iter()
        .map(|&p| {
            let q = 1.0 - p;
            -(p * p.log2() + q * q.log2())
        })
        .sum();
    h / probs.len() as f64
}

/// Flips improving bits until none is left. Returns the final energy.
fn polish(model: &EnergyModel, selection: Selection) -> (Selection, f64) {
    let mut state = TrackedSelection::new(model, selection);
    loop {
        let mut improved = false;
        for i in 0..model.len() {
            if state.flip_delta(model, i) < -1e-12 {
                state.flip(model, i);
                improved = true;
            }
        }
        if !improved {
            break;
        }
    }
    let selection = state.into_selection();
    let energy = model.energy(&selection);
    (selection, energy)
}

impl SolverStrategy for VariationalSolver {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn solve(
        &self,
        model: &EnergyModel,
        budget: &Budget,
        seed: u64,
    ) -> Result<SolverOutcome, SolverError> {
        let cfg = &self.config;
        cfg.validate().map_err(SolverError::Failed)?;

        let start = Instant::now();
        let own_deadline = cfg.time_limit_ms.map(|ms| start + Duration::from_millis(ms));
        let deadline = match (budget.deadline(start), own_deadline) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        let max_evaluations = budget.max_evaluations.unwrap_or(usize::MAX);

        let mut rng = create_rng(seed);
        let n = model.len();
        let mut probs = vec![cfg.initial_probability; n];
        let elite = cfg.elite_count();

        let mut best: Option<(Selection, f64)> = None;
        let mut best_iteration = 0usize;
        let mut evaluations = 0usize;
        let mut iterations = 0usize;
        let mut converged = false;
        let mut cancelled = false;

        for it in 0..cfg.max_iterations {
            if budget.is_cancelled() {
                cancelled = true;
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                break;
            }
            if evaluations.saturating_add(cfg.samples_per_iteration) > max_evaluations {
                break;
            }

            // Sampling stays sequential so the stream depends only on the seed.
            let samples: Vec<Selection> = (0..cfg.samples_per_iteration)
                .map(|_| sample(&probs, &mut rng))
                .collect();
            let energies: Vec<f64> = if cfg.parallel {
                samples.par_iter().map(|s| model.energy(s)).collect()
            } else {
                samples.iter().map(|s| model.energy(s)).collect()
            };
            evaluations += samples.len();
            iterations += 1;

            let mut order: Vec<usize> = (0..samples.len()).collect();
            order.sort_by(|&a, &b| energies[a].total_cmp(&energies[b]));

            let top = order[0];
            if best.as_ref().is_none_or(|(_, e)| energies[top] < *e) {
                best = Some((samples[top].clone(), energies[top]));
                best_iteration = it;
            }

            let mut freq = vec![0.0f64; n];
            for &k in &order[..elite] {
                for i in samples[k].ones() {
                    freq[i] += 1.0;
                }
            }

            let mut max_shift = 0.0f64;
            for (p, f) in probs.iter_mut().zip(&freq) {
                let target = f / elite as f64;
                let next = (cfg.smoothing * target + (1.0 - cfg.smoothing) * *p)
                    .clamp(cfg.min_probability, 1.0 - cfg.min_probability);
                max_shift = max_shift.max((next - *p).abs());
                *p = next;
            }

            if max_shift < cfg.convergence_tolerance {
                converged = true;
                break;
            }
        }

        let Some((selection, sampled_energy)) = best else {
            return Err(if cancelled {
                SolverError::Cancelled
            } else {
                SolverError::BudgetExhausted { evaluations }
            });
        };

        let (selection, energy) = if cfg.polish {
            polish(model, selection)
        } else {
            (selection, sampled_energy)
        };

        debug!(
            iterations,
            evaluations, sampled_energy, energy, converged, "variational run finished"
        );

        Ok(SolverOutcome {
            method: Self::NAME.to_string(),
            selection,
            energy,
            diagnostics: Diagnostics::Variational(VariationalDiagnostics {
                iteration_count: iterations,
                convergence_metadata: ConvergenceMetadata {
                    evaluations,
                    best_iteration,
                    final_mean_entropy: mean_entropy(&probs),
                    converged,
                    sampled_energy,
                    polished_energy: energy,
                },
            }),
        })
    }
}
