//! Constraint records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Constraint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// One professor in two places at once. Hard.
    InstructorConflict,
    /// Two courses in one room at once. Hard.
    RoomConflict,
    /// Two courses at once that likely share students. Soft.
    StudentConflict,
    /// Bias toward daytime hours. Soft, unary.
    TimePreference,
}

impl ConstraintKind {
    /// Whether the search should keep at most one member selected.
    #[inline]
    pub fn is_hard(&self) -> bool {
        matches!(
            self,
            ConstraintKind::InstructorConflict | ConstraintKind::RoomConflict
        )
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintKind::InstructorConflict => "instructor_conflict",
            ConstraintKind::RoomConflict => "room_conflict",
            ConstraintKind::StudentConflict => "student_conflict",
            ConstraintKind::TimePreference => "time_preference",
        };
        f.write_str(s)
    }
}

/// A rule over one or more candidates.
///
/// Hard conflicts reference a whole group and are penalized per member
/// selected beyond the first. Student conflicts reference exactly two
/// candidates. Time preferences reference one and carry a signed bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub kind: ConstraintKind,
    pub candidate_indices: Vec<usize>,
    pub penalty_weight: f64,
}

impl Constraint {
    pub fn new(kind: ConstraintKind, candidate_indices: Vec<usize>, penalty_weight: f64) -> Self {
        Self {
            kind,
            candidate_indices,
            penalty_weight,
        }
    }

    #[inline]
    pub fn is_unary(&self) -> bool {
        self.candidate_indices.len() == 1
    }
}

/// Number of constraints per family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintCounts {
    pub instructor_conflict: usize,
    pub room_conflict: usize,
    pub student_conflict: usize,
    pub time_preference: usize,
}

impl ConstraintCounts {
    pub fn from_constraints(constraints: &[Constraint]) -> Self {
        let mut counts = Self::default();
        for c in constraints {
            match c.kind {
                ConstraintKind::InstructorConflict => counts.instructor_conflict += 1,
                ConstraintKind::RoomConflict => counts.room_conflict += 1,
                ConstraintKind::StudentConflict => counts.student_conflict += 1,
                ConstraintKind::TimePreference => counts.time_preference += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.instructor_conflict + self.room_conflict + self.student_conflict + self.time_preference
    }
}
