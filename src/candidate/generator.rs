//! Candidate enumeration.

use super::utility::utility;
use crate::error::{ValidationError, ValidationErrorKind};
use crate::model::{Candidate, CourseSpec};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Dimensions of the placement grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSpace {
    pub num_rooms: u16,
    pub num_time_slots: u8,
    pub num_days: u8,
    /// Upper bound on `courses * slots * days * rooms`.
    pub max_candidates: usize,
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self {
            num_rooms: 10,
            num_time_slots: 24,
            num_days: 7,
            max_candidates: 200_000,
        }
    }
}

impl SearchSpace {
    /// Placements per course.
    #[inline]
    pub fn per_course(&self) -> usize {
        self.num_rooms as usize * self.num_time_slots as usize * self.num_days as usize
    }
}

/// Enumerates all placements for `courses`.
///
/// Candidates are ordered course-major, then time slot, then day, then
/// room, so candidate `i` belongs to course `i / space.per_course()`.
/// With `parallel` set, courses are scored concurrently; the order is the
/// same either way.
///
/// # Errors
///
/// - [`ValidationErrorKind::EmptyCourses`] if `courses` is empty
/// - [`ValidationErrorKind::MissingId`] if a course id is blank
/// - [`ValidationErrorKind::InvalidPriority`] if a priority is outside `[0, 1]`
/// - [`ValidationErrorKind::SearchSpaceTooLarge`] if the product exceeds
///   `space.max_candidates`
pub fn generate(
    courses: &[CourseSpec],
    space: &SearchSpace,
    parallel: bool,
) -> Result<Vec<Candidate>, ValidationError> {
    validate_courses(courses)?;

    let total = courses
        .len()
        .checked_mul(space.per_course())
        .filter(|&n| n <= space.max_candidates)
        .ok_or_else(|| {
            ValidationError::new(
                ValidationErrorKind::SearchSpaceTooLarge,
                format!(
                    "{} courses x {} placements exceeds the cap of {} candidates",
                    courses.len(),
                    space.per_course(),
                    space.max_candidates
                ),
            )
        })?;

    let candidates: Vec<Candidate> = if parallel {
        courses
            .par_iter()
            .map(|c| course_candidates(c, space))
            .collect::<Vec<_>>()
            .concat()
    } else {
        courses
            .iter()
            .flat_map(|c| course_candidates(c, space))
            .collect()
    };

    debug_assert_eq!(candidates.len(), total);
    debug!(
        courses = courses.len(),
        candidates = candidates.len(),
        "generated candidates"
    );
    Ok(candidates)
}

fn validate_courses(courses: &[CourseSpec]) -> Result<(), ValidationError> {
    if courses.is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::EmptyCourses,
            "at least one course is required",
        ));
    }
    for (i, c) in courses.iter().enumerate() {
        if c.id.trim().is_empty() {
            return Err(ValidationError::new(
                ValidationErrorKind::MissingId,
                format!("course at position {i} has no id"),
            ));
        }
        let p = c.priority();
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ValidationError::new(
                ValidationErrorKind::InvalidPriority,
                format!("course {} has priority {p}, expected a value in [0, 1]", c.id),
            ));
        }
    }
    Ok(())
}

fn course_candidates(course: &CourseSpec, space: &SearchSpace) -> Vec<Candidate> {
    let course_id: Arc<str> = Arc::from(course.id.as_str());
    let professor_id: Arc<str> = Arc::from(course.professor_id());
    let students = course.student_count();
    let priority = course.priority();

    let mut out = Vec::with_capacity(space.per_course());
    for time_slot in 0..space.num_time_slots {
        for day in 0..space.num_days {
            for room in 0..space.num_rooms {
                out.push(Candidate {
                    course_id: Arc::clone(&course_id),
                    day,
                    time_slot,
                    room,
                    professor_id: Arc::clone(&professor_id),
                    student_count: students,
                    utility_weight: utility(priority, time_slot, day, room, students),
                });
            }
        }
    }
    out
}
