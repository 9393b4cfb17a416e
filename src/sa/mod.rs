//! Generic simulated annealing engine.
//!
//! Walks a single state through random moves. Improving moves are always
//! taken; worsening moves pass the Metropolis test `exp(-delta / T)` under a
//! temperature that cools from `initial_temperature` to `min_temperature`.
//!
//! The engine is generic over [`SaProblem`]; the timetabling problem plugs
//! in through [`crate::solver::AnnealingSolver`].
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"

mod config;
mod runner;
mod types;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{SaResult, SaRunner};
pub use types::SaProblem;
