//! Candidate placements and the schedule entries extracted from them.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One concrete (course, day, time slot, room) placement option.
///
/// Identity is the tuple `(course_id, day, time_slot, room)`. Candidates are
/// built once per run by the generator and never mutated afterwards; string
/// fields are shared across all candidates of the same course.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub course_id: Arc<str>,
    /// Day of week, `0` = Monday.
    pub day: u8,
    /// Hour of day, `0..24`.
    pub time_slot: u8,
    /// Room index; the room's capacity is `20 + 10 * room`.
    pub room: u16,
    pub professor_id: Arc<str>,
    pub student_count: u32,
    /// Desirability in `[0, 1]`.
    pub utility_weight: f64,
}

impl Candidate {
    /// Room label, e.g. `room_3`.
    pub fn room_id(&self) -> String {
        format!("room_{}", self.room)
    }

    /// `(day, time_slot)` key shared by all candidates competing for the same hour.
    #[inline]
    pub fn time_key(&self) -> (u8, u8) {
        (self.day, self.time_slot)
    }

    pub fn to_entry(&self) -> ScheduleEntry {
        ScheduleEntry {
            course_id: self.course_id.to_string(),
            day: self.day,
            time_slot: self.time_slot,
            room_id: self.room_id(),
            professor_id: self.professor_id.to_string(),
            utility_weight: self.utility_weight,
        }
    }
}

/// A placed course in a produced schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub course_id: String,
    pub day: u8,
    pub time_slot: u8,
    pub room_id: String,
    pub professor_id: String,
    pub utility_weight: f64,
}
