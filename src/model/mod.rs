//! Core data model: course descriptors, candidates, selections, schedule entries.

mod candidate;
mod course;
mod selection;

pub use candidate::{Candidate, ScheduleEntry};
pub use course::{CourseSpec, DEFAULT_PRIORITY, DEFAULT_PROFESSOR, DEFAULT_STUDENT_COUNT};
pub use selection::Selection;
