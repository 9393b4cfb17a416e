//! SA configuration and cooling schedules.

use serde::{Deserialize, Serialize};

/// Temperature schedule over a fixed number of steps.
///
/// Both variants start at the initial temperature on step 0 and reach the
/// minimum temperature on the last step. One proposal is made per step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoolingSchedule {
    /// Geometric decay, evenly spaced in log space:
    /// `T_k = T_0 * (T_min / T_0)^(k / (n - 1))`.
    #[default]
    LogSpaced,

    /// Linear decay: `T_k = T_0 - k * (T_0 - T_min) / (n - 1)`.
    Linear,
}

impl CoolingSchedule {
    /// Temperature at step `k` of an `n`-step run.
    pub fn temperature(&self, k: usize, n: usize, t0: f64, t_min: f64) -> f64 {
        if n <= 1 {
            return t0;
        }
        let frac = k.min(n - 1) as f64 / (n - 1) as f64;
        match self {
            CoolingSchedule::LogSpaced => t0 * (t_min / t0).powf(frac),
            CoolingSchedule::Linear => t0 - frac * (t0 - t_min),
        }
    }

    /// The whole `n`-step sequence.
    pub fn temperatures(&self, n: usize, t0: f64, t_min: f64) -> Vec<f64> {
        (0..n).map(|k| self.temperature(k, n, t0, t_min)).collect()
    }
}

/// Configuration for the Simulated Annealing algorithm.
///
/// # Examples
///
/// ```
/// use u_timetable::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.01)
///     .with_cooling(CoolingSchedule::LogSpaced)
///     .with_steps(5000)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Temperature on the final step.
    pub min_temperature: f64,

    /// Cooling schedule.
    pub cooling: CoolingSchedule,

    /// Number of proposals; the schedule is exhausted after this many.
    pub steps: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1e2,
            min_temperature: 1e-2,
            cooling: CoolingSchedule::default(),
            steps: 1000,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_steps(mut self, n: usize) -> Self {
        self.steps = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.initial_temperature > 0.0) || !self.initial_temperature.is_finite() {
            return Err("initial_temperature must be positive".into());
        }
        if !(self.min_temperature > 0.0) {
            return Err("min_temperature must be positive".into());
        }
        if self.min_temperature > self.initial_temperature {
            return Err("min_temperature must not exceed initial_temperature".into());
        }
        if self.steps == 0 {
            return Err("steps must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 100.0).abs() < 1e-10);
        assert!((config.min_temperature - 0.01).abs() < 1e-15);
        assert_eq!(config.steps, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_bad_temperature() {
        let config = SaConfig::default().with_initial_temperature(-1.0);
        assert!(config.validate().is_err());
        let config = SaConfig::default().with_min_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_min_gt_initial() {
        let config = SaConfig::default()
            .with_initial_temperature(10.0)
            .with_min_temperature(20.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_steps() {
        assert!(SaConfig::default().with_steps(0).validate().is_err());
    }

    #[test]
    fn test_log_spaced_endpoints_and_monotone() {
        let temps = CoolingSchedule::LogSpaced.temperatures(1000, 100.0, 0.01);
        assert_eq!(temps.len(), 1000);
        assert!((temps[0] - 100.0).abs() < 1e-9);
        assert!((temps[999] - 0.01).abs() < 1e-12);
        // Midpoint of logspace(2, -2) is 10^0.
        let mid = CoolingSchedule::LogSpaced.temperature(500, 1001, 100.0, 0.01);
        assert!((mid - 1.0).abs() < 1e-9);
        for w in temps.windows(2) {
            assert!(w[1] < w[0]);
        }
    }

    #[test]
    fn test_linear_endpoints() {
        let temps = CoolingSchedule::Linear.temperatures(11, 10.0, 0.0001);
        assert!((temps[0] - 10.0).abs() < 1e-12);
        assert!((temps[10] - 0.0001).abs() < 1e-12);
    }

    #[test]
    fn test_single_step_uses_initial() {
        assert_eq!(CoolingSchedule::LogSpaced.temperature(0, 1, 5.0, 1.0), 5.0);
    }
}
