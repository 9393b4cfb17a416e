//! Candidate set to constraint collection.

use super::types::{Constraint, ConstraintCounts, ConstraintKind};
use crate::error::{ValidationError, ValidationErrorKind};
use crate::model::Candidate;
use rayon::prelude::*;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::debug;

pub const INSTRUCTOR_PENALTY: f64 = 10.0;
pub const ROOM_PENALTY: f64 = 8.0;
/// Student conflict weight per unit of estimated overlap.
pub const STUDENT_PENALTY_SCALE: f64 = 5.0;

/// Encoder settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    /// Student conflicts with overlap at or below this are dropped.
    pub student_conflict_threshold: f64,
    /// Encode student conflicts of different hours concurrently.
    pub parallel: bool,
    /// Upper bound on the estimated number of constraints accepted by
    /// [`try_encode`].
    pub max_constraints: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            student_conflict_threshold: 0.1,
            parallel: false,
            max_constraints: 4_000_000,
        }
    }
}

/// Preference bias of an hour: +2.0 for 8-12, +1.0 for 13-17, -1.0 otherwise.
#[inline]
pub fn time_preference(time_slot: u8) -> f64 {
    match time_slot {
        8..=12 => 2.0,
        13..=17 => 1.0,
        _ => -1.0,
    }
}

/// Upper bound on the number of constraints [`encode`] emits, computed
/// without building them.
///
/// Student pairs are counted exactly: per hour, the pairs of eligible
/// candidates minus those within one course. Instructor and room groups
/// are bounded by half the candidates each, preferences by the candidates.
pub fn estimate_constraints(candidates: &[Candidate], options: &EncodeOptions) -> usize {
    let threshold = options.student_conflict_threshold;
    let mut hours: HashMap<(u8, u8), (usize, HashMap<&str, usize>)> = HashMap::new();
    for c in candidates {
        if c.student_count as f64 / 100.0 > threshold {
            let (total, per_course) = hours.entry(c.time_key()).or_default();
            *total += 1;
            *per_course.entry(&*c.course_id).or_default() += 1;
        }
    }

    let pairs = |m: usize| m.saturating_mul(m.saturating_sub(1)) / 2;
    let student = hours
        .values()
        .map(|(total, per_course)| {
            pairs(*total) - per_course.values().map(|&e| pairs(e)).sum::<usize>()
        })
        .fold(0usize, usize::saturating_add);

    candidates.len().saturating_mul(2).saturating_add(student)
}

/// Like [`encode`], but rejects candidate sets whose estimated constraint
/// count exceeds `options.max_constraints`.
///
/// # Errors
///
/// [`ValidationErrorKind::SearchSpaceTooLarge`] when the estimate is over
/// the cap.
pub fn try_encode(
    candidates: &[Candidate],
    options: &EncodeOptions,
) -> Result<Vec<Constraint>, ValidationError> {
    let estimate = estimate_constraints(candidates, options);
    if estimate > options.max_constraints {
        return Err(ValidationError::new(
            ValidationErrorKind::SearchSpaceTooLarge,
            format!(
                "{} candidates would yield about {estimate} constraints, over the cap of {}",
                candidates.len(),
                options.max_constraints
            ),
        ));
    }
    Ok(encode(candidates, options))
}

/// Builds all four constraint families, in the order instructor, room,
/// student, preference. An empty candidate set yields no constraints.
pub fn encode(candidates: &[Candidate], options: &EncodeOptions) -> Vec<Constraint> {
    let mut constraints = Vec::new();

    for members in group_by(candidates, |c| (c.professor_id.clone(), c.day, c.time_slot)) {
        if members.len() > 1 {
            constraints.push(Constraint::new(
                ConstraintKind::InstructorConflict,
                members,
                INSTRUCTOR_PENALTY,
            ));
        }
    }

    for members in group_by(candidates, |c| (c.room, c.day, c.time_slot)) {
        if members.len() > 1 {
            constraints.push(Constraint::new(
                ConstraintKind::RoomConflict,
                members,
                ROOM_PENALTY,
            ));
        }
    }

    let hours = group_by(candidates, Candidate::time_key);
    let threshold = options.student_conflict_threshold;
    if options.parallel {
        let per_hour: Vec<Vec<Constraint>> = hours
            .par_iter()
            .map(|members| student_conflicts(candidates, members, threshold))
            .collect();
        constraints.extend(per_hour.into_iter().flatten());
    } else {
        for members in &hours {
            constraints.extend(student_conflicts(candidates, members, threshold));
        }
    }

    constraints.extend(candidates.iter().enumerate().map(|(i, c)| {
        Constraint::new(
            ConstraintKind::TimePreference,
            vec![i],
            time_preference(c.time_slot),
        )
    }));

    let counts = ConstraintCounts::from_constraints(&constraints);
    debug!(
        instructor = counts.instructor_conflict,
        room = counts.room_conflict,
        student = counts.student_conflict,
        preference = counts.time_preference,
        "encoded constraints"
    );
    constraints
}

/// Groups candidate indices by key, groups ordered by first appearance and
/// members in ascending index order.
fn group_by<K, F>(candidates: &[Candidate], key: F) -> Vec<Vec<usize>>
where
    K: Eq + Hash,
    F: Fn(&Candidate) -> K,
{
    let mut slot_of: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for (i, c) in candidates.iter().enumerate() {
        let g = *slot_of.entry(key(c)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[g].push(i);
    }
    groups
}

fn student_conflicts(candidates: &[Candidate], members: &[usize], threshold: f64) -> Vec<Constraint> {
    let mut out = Vec::new();
    for (a, &i) in members.iter().enumerate() {
        for &j in &members[a + 1..] {
            let (ci, cj) = (&candidates[i], &candidates[j]);
            if ci.course_id == cj.course_id {
                continue;
            }
            let overlap = ci.student_count.min(cj.student_count) as f64 / 100.0;
            if overlap > threshold {
                out.push(Constraint::new(
                    ConstraintKind::StudentConflict,
                    vec![i, j],
                    overlap * STUDENT_PENALTY_SCALE,
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{generate, SearchSpace};
    use crate::model::CourseSpec;

    fn single_slot() -> SearchSpace {
        SearchSpace {
            num_rooms: 1,
            num_time_slots: 1,
            num_days: 1,
            ..SearchSpace::default()
        }
    }

    fn same_professor_pair() -> Vec<Candidate> {
        let courses = vec![
            CourseSpec::new("A")
                .with_professor("p1")
                .with_priority(0.9)
                .with_student_count(40),
            CourseSpec::new("B")
                .with_professor("p1")
                .with_priority(0.5)
                .with_student_count(20),
        ];
        generate(&courses, &single_slot(), false).unwrap()
    }

    #[test]
    fn test_empty_candidates() {
        assert!(encode(&[], &EncodeOptions::default()).is_empty());
    }

    #[test]
    fn test_shared_professor_single_slot() {
        let cands = same_professor_pair();
        let cs = encode(&cands, &EncodeOptions::default());

        let instructor: Vec<_> = cs
            .iter()
            .filter(|c| c.kind == ConstraintKind::InstructorConflict)
            .collect();
        assert_eq!(instructor.len(), 1);
        assert_eq!(instructor[0].candidate_indices, vec![0, 1]);
        assert_eq!(instructor[0].penalty_weight, 10.0);

        let room: Vec<_> = cs
            .iter()
            .filter(|c| c.kind == ConstraintKind::RoomConflict)
            .collect();
        assert_eq!(room.len(), 1);
        assert_eq!(room[0].penalty_weight, 8.0);

        // min(40, 20) / 100 = 0.2 > 0.1
        let student: Vec<_> = cs
            .iter()
            .filter(|c| c.kind == ConstraintKind::StudentConflict)
            .collect();
        assert_eq!(student.len(), 1);
        assert!((student[0].penalty_weight - 1.0).abs() < 1e-12);

        let counts = ConstraintCounts::from_constraints(&cs);
        assert_eq!(counts.time_preference, 2);
        assert_eq!(counts.total(), 5);
    }

    #[test]
    fn test_student_threshold_filters() {
        let courses = vec![
            CourseSpec::new("A").with_professor("p1").with_student_count(10),
            CourseSpec::new("B").with_professor("p2").with_student_count(90),
        ];
        let cands = generate(&courses, &single_slot(), false).unwrap();
        let cs = encode(&cands, &EncodeOptions::default());
        // min = 10 -> overlap 0.1, not above the threshold
        assert_eq!(ConstraintCounts::from_constraints(&cs).student_conflict, 0);

        let loose = EncodeOptions {
            student_conflict_threshold: 0.05,
            ..EncodeOptions::default()
        };
        let cs = encode(&cands, &loose);
        assert_eq!(ConstraintCounts::from_constraints(&cs).student_conflict, 1);
    }

    #[test]
    fn test_distinct_professors_disjoint_rooms() {
        let courses = vec![
            CourseSpec::new("A").with_professor("p1"),
            CourseSpec::new("B").with_professor("p2"),
        ];
        let space = SearchSpace {
            num_rooms: 2,
            ..single_slot()
        };
        let cands = generate(&courses, &space, false).unwrap();
        let counts = ConstraintCounts::from_constraints(&encode(&cands, &EncodeOptions::default()));
        // Each professor's course in two rooms at once.
        assert_eq!(counts.instructor_conflict, 2);
        // Each room wanted by both courses.
        assert_eq!(counts.room_conflict, 2);
        // Cross-course pairs: 2 x 2.
        assert_eq!(counts.student_conflict, 4);
    }

    #[test]
    fn test_same_course_never_student_conflict() {
        let courses = vec![CourseSpec::new("A").with_student_count(80)];
        let space = SearchSpace {
            num_rooms: 4,
            ..single_slot()
        };
        let cands = generate(&courses, &space, false).unwrap();
        let counts = ConstraintCounts::from_constraints(&encode(&cands, &EncodeOptions::default()));
        assert_eq!(counts.student_conflict, 0);
    }

    #[test]
    fn test_preference_bands() {
        assert_eq!(time_preference(8), 2.0);
        assert_eq!(time_preference(12), 2.0);
        assert_eq!(time_preference(13), 1.0);
        assert_eq!(time_preference(17), 1.0);
        assert_eq!(time_preference(18), -1.0);
        assert_eq!(time_preference(3), -1.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let courses = vec![
            CourseSpec::new("A").with_professor("p1").with_student_count(50),
            CourseSpec::new("B").with_professor("p1").with_student_count(35),
            CourseSpec::new("C").with_professor("p2").with_student_count(70),
        ];
        let space = SearchSpace {
            num_rooms: 3,
            num_time_slots: 4,
            num_days: 2,
            ..SearchSpace::default()
        };
        let cands = generate(&courses, &space, false).unwrap();
        let seq = encode(&cands, &EncodeOptions::default());
        let par = encode(
            &cands,
            &EncodeOptions {
                parallel: true,
                ..EncodeOptions::default()
            },
        );
        assert_eq!(seq, par);
    }

    #[test]
    fn test_estimate_bounds_actual_count() {
        let courses = vec![
            CourseSpec::new("A").with_professor("p1").with_student_count(50),
            CourseSpec::new("B").with_professor("p1").with_student_count(5),
            CourseSpec::new("C").with_professor("p2").with_student_count(70),
            CourseSpec::new("D").with_professor("p3").with_student_count(40),
        ];
        let space = SearchSpace {
            num_rooms: 3,
            num_time_slots: 4,
            num_days: 2,
            ..SearchSpace::default()
        };
        let cands = generate(&courses, &space, false).unwrap();
        let options = EncodeOptions::default();
        let counts = ConstraintCounts::from_constraints(&encode(&cands, &options));
        let estimate = estimate_constraints(&cands, &options);

        // B falls under the threshold; A, C, D pair up across courses:
        // 3 course pairs x 3 x 3 rooms per hour x 8 hours.
        assert_eq!(counts.student_conflict, 3 * 9 * 8);
        assert!(estimate >= counts.total());
        assert_eq!(estimate, 2 * cands.len() + counts.student_conflict);
    }

    #[test]
    fn test_try_encode_rejects_over_cap() {
        let courses: Vec<CourseSpec> = (0..6)
            .map(|i| CourseSpec::new(format!("C{i}")).with_student_count(60))
            .collect();
        let space = SearchSpace {
            num_rooms: 4,
            num_time_slots: 2,
            num_days: 1,
            ..SearchSpace::default()
        };
        let cands = generate(&courses, &space, false).unwrap();
        // 24 candidates per hour, 15 course pairs x 16 room pairs = 240 per hour.
        let options = EncodeOptions {
            max_constraints: 400,
            ..EncodeOptions::default()
        };
        assert_eq!(estimate_constraints(&cands, &options), 2 * 48 + 480);

        let err = try_encode(&cands, &options).unwrap_err();
        assert_eq!(err.kind(), ValidationErrorKind::SearchSpaceTooLarge);

        let roomy = EncodeOptions {
            max_constraints: 1_000,
            ..options
        };
        assert_eq!(try_encode(&cands, &roomy).unwrap(), encode(&cands, &roomy));
    }
}
