//! SA execution loop.

use super::config::SaConfig;
use super::types::SaProblem;
use crate::random::{create_rng, resolve_seed};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best state found.
    pub best: S,

    /// Energy of the best state, recomputed from scratch.
    pub best_energy: f64,

    /// Number of proposals evaluated.
    pub iterations: usize,

    /// Temperature of the last step executed.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of improving moves.
    pub improving_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Current energy after each step.
    pub energy_trace: Vec<f64>,

    /// Best energy seen up to each step. Non-increasing.
    pub best_trace: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA with an RNG seeded from `config.seed` (fresh if `None`).
    pub fn run<P: SaProblem>(
        problem: &P,
        config: &SaConfig,
    ) -> Result<SaResult<P::State>, String> {
        let mut rng = create_rng(resolve_seed(config.seed));
        Self::run_with_rng(problem, config, &mut rng, None)
    }

    /// Runs SA drawing all randomness from `rng`, with an optional
    /// cancellation flag checked before every step.
    ///
    /// `config.seed` is ignored here; the caller owns the generator.
    pub fn run_with_rng<P: SaProblem, R: Rng>(
        problem: &P,
        config: &SaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<SaResult<P::State>, String> {
        config.validate()?;

        let mut current = problem.initial_state(rng);
        let mut current_energy = problem.energy(&current);
        let mut best = current.clone();
        let mut best_energy = current_energy;

        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut iterations = 0usize;
        let mut cancelled = false;
        let mut temperature = config.initial_temperature;

        let mut energy_trace = Vec::with_capacity(config.steps);
        let mut best_trace = Vec::with_capacity(config.steps);

        for step in 0..config.steps {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                cancelled = true;
                break;
            }

            temperature = config.cooling.temperature(
                step,
                config.steps,
                config.initial_temperature,
                config.min_temperature,
            );

            let Some(mv) = problem.propose(&current, rng) else {
                break;
            };
            let delta = problem.delta(&current, mv);

            // Metropolis acceptance criterion
            let accept = if delta < 0.0 {
                improving_moves += 1;
                true
            } else {
                rng.random_range(0.0..1.0) < (-delta / temperature).exp()
            };

            if accept {
                problem.apply(&mut current, mv);
                current_energy += delta;
                accepted_moves += 1;

                if current_energy < best_energy {
                    best = current.clone();
                    best_energy = current_energy;
                }
            }

            iterations += 1;
            energy_trace.push(current_energy);
            best_trace.push(best_energy);
        }

        // Incremental updates accumulate rounding error.
        let best_energy = problem.energy(&best);

        Ok(SaResult {
            best,
            best_energy,
            iterations,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cancelled,
            energy_trace,
            best_trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sa::CoolingSchedule;

    // ---- Integer walk: f(x) = x^2, minimum at 0 ----

    struct QuadraticProblem;

    impl SaProblem for QuadraticProblem {
        type State = i64;
        type Move = i64;

        fn initial_state<R: Rng>(&self, rng: &mut R) -> i64 {
            rng.random_range(-50..50)
        }

        fn energy(&self, x: &i64) -> f64 {
            (x * x) as f64
        }

        fn propose<R: Rng>(&self, _x: &i64, rng: &mut R) -> Option<i64> {
            Some(if rng.random_bool(0.5) { 1 } else { -1 })
        }

        fn apply(&self, x: &mut i64, step: i64) {
            *x += step;
        }
    }

    #[test]
    fn test_sa_quadratic_log_spaced() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(0.01)
            .with_steps(20_000)
            .with_seed(42);

        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        assert!(
            result.best_energy <= 1.0,
            "expected near-zero energy, got {}",
            result.best_energy
        );
        assert!(result.improving_moves > 0);
        assert!(result.accepted_moves > result.improving_moves);
        assert_eq!(result.iterations, 20_000);
        assert_eq!(result.energy_trace.len(), 20_000);
    }

    #[test]
    fn test_sa_quadratic_linear() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(0.01)
            .with_cooling(CoolingSchedule::Linear)
            .with_steps(20_000)
            .with_seed(42);

        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        assert!(result.best_energy <= 1.0, "got {}", result.best_energy);
        assert!((result.final_temperature - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_sa_invalid_config_is_error() {
        let config = SaConfig::default().with_steps(0);
        assert!(SaRunner::run(&QuadraticProblem, &config).is_err());
    }

    #[test]
    fn test_sa_cancellation() {
        let config = SaConfig::default().with_steps(1000).with_seed(42);

        // Set before running so cancellation is deterministic.
        let cancel = AtomicBool::new(true);
        let mut rng = create_rng(1);

        let result =
            SaRunner::run_with_rng(&QuadraticProblem, &config, &mut rng, Some(&cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_sa_best_trace_non_increasing() {
        let config = SaConfig::default().with_steps(5000).with_seed(42);
        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        for window in result.best_trace.windows(2) {
            assert!(
                window[1] <= window[0],
                "best energy trace should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_sa_same_seed_same_run() {
        let config = SaConfig::default().with_steps(3000).with_seed(11);
        let a = SaRunner::run(&QuadraticProblem, &config).unwrap();
        let b = SaRunner::run(&QuadraticProblem, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.energy_trace, b.energy_trace);
    }

    #[test]
    fn test_sa_metropolis_accepts_uphill() {
        // At very high temperature, almost all moves should be accepted
        let config = SaConfig::default()
            .with_initial_temperature(1e8)
            .with_min_temperature(1e7)
            .with_steps(5000)
            .with_seed(42);

        let result = SaRunner::run(&QuadraticProblem, &config).unwrap();

        let acceptance_ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(
            acceptance_ratio > 0.95,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
    }
}
