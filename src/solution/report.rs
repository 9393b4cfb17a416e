//! Residual conflict audit.

use crate::model::{Candidate, Selection};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Audit of a produced schedule.
///
/// Hard conflicts are counted the way the energy penalizes them: each
/// group of simultaneous entries sharing a professor (or room) contributes
/// its size minus one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Number of scheduled entries.
    pub selected: usize,
    pub instructor_conflicts: usize,
    pub room_conflicts: usize,
    /// Pairs of distinct courses held at the same hour.
    pub student_overlaps: usize,
    /// Placements of a course beyond its first.
    pub duplicate_placements: usize,
    pub courses_covered: usize,
    pub courses_total: usize,
    /// `courses_covered / courses_total`, zero when there are no courses.
    pub coverage: f64,
    /// No hard conflicts remain.
    pub feasible: bool,
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self {
            selected: 0,
            instructor_conflicts: 0,
            room_conflicts: 0,
            student_overlaps: 0,
            duplicate_placements: 0,
            courses_covered: 0,
            courses_total: 0,
            coverage: 0.0,
            feasible: true,
        }
    }
}

impl ValidationReport {
    #[inline]
    pub fn hard_conflicts(&self) -> usize {
        self.instructor_conflicts + self.room_conflicts
    }
}

fn excess<K: std::hash::Hash + Eq>(keys: impl Iterator<Item = K>) -> usize {
    let mut counts: HashMap<K, usize> = HashMap::new();
    for k in keys {
        *counts.entry(k).or_default() += 1;
    }
    counts.values().map(|&c| c.saturating_sub(1)).sum()
}

/// Audits the candidates selected by `selection`.
pub fn validate(selection: &Selection, candidates: &[Candidate]) -> ValidationReport {
    let chosen: Vec<&Candidate> = selection
        .ones()
        .filter_map(|i| candidates.get(i))
        .collect();

    let instructor_conflicts = excess(
        chosen
            .iter()
            .map(|c| (&*c.professor_id, c.day, c.time_slot)),
    );
    let room_conflicts = excess(chosen.iter().map(|c| (c.room, c.day, c.time_slot)));
    let duplicate_placements = excess(chosen.iter().map(|c| &*c.course_id));

    let mut by_hour: HashMap<(u8, u8), Vec<&str>> = HashMap::new();
    for c in &chosen {
        by_hour.entry(c.time_key()).or_default().push(&c.course_id);
    }
    let student_overlaps = by_hour
        .values()
        .map(|ids| {
            let mut n = 0;
            for (k, a) in ids.iter().enumerate() {
                n += ids[k + 1..].iter().filter(|b| *b != a).count();
            }
            n
        })
        .sum();

    let courses_total = candidates
        .iter()
        .map(|c| &*c.course_id)
        .collect::<HashSet<_>>()
        .len();
    let courses_covered = chosen
        .iter()
        .map(|c| &*c.course_id)
        .collect::<HashSet<_>>()
        .len();
    let coverage = if courses_total == 0 {
        0.0
    } else {
        courses_covered as f64 / courses_total as f64
    };

    ValidationReport {
        selected: chosen.len(),
        instructor_conflicts,
        room_conflicts,
        student_overlaps,
        duplicate_placements,
        courses_covered,
        courses_total,
        coverage,
        feasible: instructor_conflicts + room_conflicts == 0,
    }
}
