//! Course timetabling as energy minimization over binary selections.
//!
//! Every feasible `(course, time slot, day, room)` placement becomes a
//! candidate; a schedule is a subset of candidates. Conflicts between
//! candidates are encoded as weighted penalty groups, and a solver strategy
//! searches for the subset with the lowest energy:
//!
//! - **Candidates** ([`candidate`]): enumerate placements and score their
//!   utility.
//! - **Constraints** ([`constraint`]): instructor, room and student conflicts
//!   plus a per-hour time preference.
//! - **Energy** ([`energy`]): objective with incremental single-flip deltas.
//! - **Solvers** ([`solver`]): simulated annealing (reference) and a
//!   sampling-based variational solver, behind one [`solver::SolverStrategy`]
//!   trait. The generic annealing engine lives in [`sa`].
//! - **Solution** ([`solution`]): extract the schedule and check it.
//!
//! [`Optimizer`] wires these stages together and produces a
//! [`ResultRecord`].
//!
//! # Examples
//!
//! ```
//! use u_timetable::{CourseSpec, Optimizer, OptimizerConfig};
//!
//! let courses = vec![
//!     CourseSpec::new("A").with_professor("p1").with_priority(0.9).with_student_count(40),
//!     CourseSpec::new("B").with_professor("p1").with_priority(0.5).with_student_count(20),
//! ];
//! let config = OptimizerConfig::default()
//!     .with_rooms(1)
//!     .with_time_slots(1)
//!     .with_days(1)
//!     .with_seed(42);
//!
//! let record = Optimizer::new(config).optimize(&courses).unwrap();
//! assert_eq!(record.schedule.len(), 1);
//! assert_eq!(record.schedule[0].course_id, "A");
//! ```

pub mod candidate;
pub mod config;
pub mod constraint;
pub mod energy;
pub mod error;
pub mod model;
pub mod optimizer;
pub mod random;
pub mod result;
pub mod sa;
pub mod solution;
pub mod solver;

pub use config::OptimizerConfig;
pub use error::{ScheduleError, SolverError, ValidationError, ValidationErrorKind};
pub use model::{CourseSpec, ScheduleEntry};
pub use optimizer::{Optimizer, PreparedProblem};
pub use result::ResultRecord;
