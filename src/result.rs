//! Result record handed to downstream consumers.
//!
//! Visualization and export tools read this record; nothing in it refers
//! back to solver internals.

use crate::model::ScheduleEntry;
use crate::solution::ValidationReport;
use serde::{Deserialize, Serialize};

/// Trace and counters of an annealing run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnealingDiagnostics {
    /// Current energy after each step of the winning run.
    pub energy_trace: Vec<f64>,
    /// Best energy up to each step of the winning run.
    pub best_trace: Vec<f64>,
    pub final_temperature: f64,
    pub iterations: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    /// Number of independent runs.
    pub restarts: usize,
    /// Index of the run that produced the result.
    pub best_restart: usize,
    pub cancelled: bool,
}

/// How a variational run ended.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConvergenceMetadata {
    /// Energy evaluations spent.
    pub evaluations: usize,
    /// Iteration that produced the best sample.
    pub best_iteration: usize,
    /// Mean binary entropy of the final distribution, in bits.
    pub final_mean_entropy: f64,
    /// Whether the distribution stopped moving before the budget ran out.
    pub converged: bool,
    /// Energy before and after the final single-flip descent.
    pub sampled_energy: f64,
    pub polished_energy: f64,
}

/// Counters of a variational run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VariationalDiagnostics {
    pub iteration_count: usize,
    pub convergence_metadata: ConvergenceMetadata,
}

/// Solver-specific diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostics {
    Annealing(AnnealingDiagnostics),
    Variational(VariationalDiagnostics),
}

/// Outcome of one optimization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Name of the solver that produced the schedule.
    pub method: String,
    pub energy: f64,
    pub schedule: Vec<ScheduleEntry>,
    pub diagnostics: Diagnostics,
    pub validation: ValidationReport,
    /// Why the configured solver was replaced by annealing, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    /// Seed the run used.
    pub seed: u64,
}

impl ResultRecord {
    /// Whether any hard conflict survived the search.
    #[inline]
    pub fn is_infeasible(&self) -> bool {
        !self.validation.feasible
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ResultRecord {
        ResultRecord {
            method: "simulated_annealing".into(),
            energy: -1.2345678901234567,
            schedule: vec![
                ScheduleEntry {
                    course_id: "CS401".into(),
                    day: 0,
                    time_slot: 10,
                    room_id: "room_2".into(),
                    professor_id: "prof_smith".into(),
                    utility_weight: 0.6420044732999687,
                },
                ScheduleEntry {
                    course_id: "MATH301".into(),
                    day: 3,
                    time_slot: 9,
                    room_id: "room_4".into(),
                    professor_id: "prof_johnson".into(),
                    utility_weight: 0.1 + 0.2,
                },
            ],
            diagnostics: Diagnostics::Annealing(AnnealingDiagnostics {
                energy_trace: vec![3.0, 1.5, -0.25],
                best_trace: vec![3.0, 1.5, -0.25],
                final_temperature: 0.01,
                iterations: 3,
                accepted_moves: 2,
                improving_moves: 2,
                restarts: 1,
                best_restart: 0,
                cancelled: false,
            }),
            validation: ValidationReport::default(),
            fallback_reason: None,
            seed: 42,
        }
    }

    #[test]
    fn test_json_round_trip_preserves_schedule() {
        let r = record();
        let json = r.to_json().unwrap();
        let back = ResultRecord::from_json(&json).unwrap();
        assert_eq!(back.schedule, r.schedule);
        assert_eq!(back, r);
    }

    #[test]
    fn test_infeasible_follows_validation() {
        let mut r = record();
        assert!(!r.is_infeasible());
        r.validation.room_conflicts = 1;
        r.validation.feasible = false;
        assert!(r.is_infeasible());
    }

    #[test]
    fn test_diagnostics_tagged() {
        let json = serde_json::to_value(record()).unwrap();
        assert_eq!(json["diagnostics"]["type"], "annealing");
        assert!(json.get("fallback_reason").is_none());
    }

    #[test]
    fn test_variational_round_trip() {
        let mut r = record();
        r.method = "variational".into();
        r.fallback_reason = Some("budget".into());
        r.diagnostics = Diagnostics::Variational(VariationalDiagnostics {
            iteration_count: 12,
            convergence_metadata: ConvergenceMetadata {
                evaluations: 768,
                best_iteration: 9,
                final_mean_entropy: 0.031,
                converged: true,
                sampled_energy: -0.5,
                polished_energy: -0.75,
            },
        });
        let back = ResultRecord::from_json(&r.to_json().unwrap()).unwrap();
        assert_eq!(back, r);
    }
}
