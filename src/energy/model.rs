//! Precomputed energy function over selection vectors.

use crate::constraint::{Constraint, ConstraintKind};
use crate::model::{Candidate, Selection};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub(super) struct Group {
    pub(super) kind: ConstraintKind,
    pub(super) weight: f64,
    pub(super) members: Vec<usize>,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Pair {
    pub(super) a: usize,
    pub(super) b: usize,
    pub(super) weight: f64,
}

/// Energy split by term. `total` is their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyBreakdown {
    /// Negated utility of selected candidates.
    pub utility: f64,
    /// Negated, scaled preference bias of selected candidates.
    pub preference: f64,
    pub instructor: f64,
    pub room: f64,
    pub student: f64,
    pub total: f64,
}

/// Stateless energy function derived from candidates and constraints.
///
/// Built once per run; evaluation never mutates it, so one model can be
/// shared by concurrent solver runs.
#[derive(Debug, Clone)]
pub struct EnergyModel {
    utility: Vec<f64>,
    preference: Vec<f64>,
    pub(super) groups: Vec<Group>,
    pairs: Vec<Pair>,
    pub(super) groups_of: Vec<Vec<usize>>,
    pairs_of: Vec<Vec<usize>>,
}

impl EnergyModel {
    /// Builds the model. `preference_weight` scales the unary time
    /// preference bias; zero disables it.
    ///
    /// Student conflicts that do not reference exactly two candidates are
    /// ignored.
    pub fn new(candidates: &[Candidate], constraints: &[Constraint], preference_weight: f64) -> Self {
        let n = candidates.len();
        let mut model = Self {
            utility: candidates.iter().map(|c| c.utility_weight).collect(),
            preference: vec![0.0; n],
            groups: Vec::new(),
            pairs: Vec::new(),
            groups_of: vec![Vec::new(); n],
            pairs_of: vec![Vec::new(); n],
        };

        for c in constraints {
            if c.kind.is_hard() {
                let g = model.groups.len();
                for &i in &c.candidate_indices {
                    model.groups_of[i].push(g);
                }
                model.groups.push(Group {
                    kind: c.kind,
                    weight: c.penalty_weight,
                    members: c.candidate_indices.clone(),
                });
            } else if c.kind == ConstraintKind::StudentConflict {
                if let [a, b] = c.candidate_indices[..] {
                    let p = model.pairs.len();
                    model.pairs_of[a].push(p);
                    model.pairs_of[b].push(p);
                    model.pairs.push(Pair {
                        a,
                        b,
                        weight: c.penalty_weight,
                    });
                }
            } else if c.is_unary() && preference_weight != 0.0 {
                let i = c.candidate_indices[0];
                model.preference[i] += preference_weight * c.penalty_weight;
            }
        }
        model
    }

    /// Number of binary variables.
    #[inline]
    pub fn len(&self) -> usize {
        self.utility.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.utility.is_empty()
    }

    /// Energy contributed by selecting `i` alone.
    #[inline]
    pub fn unary(&self, i: usize) -> f64 {
        -(self.utility[i] + self.preference[i])
    }

    /// Energy of a selection.
    pub fn energy(&self, selection: &Selection) -> f64 {
        self.breakdown(selection).total
    }

    /// Energy of a selection, split by term.
    pub fn breakdown(&self, selection: &Selection) -> EnergyBreakdown {
        let mut b = EnergyBreakdown::default();
        for i in selection.ones() {
            b.utility -= self.utility[i];
            b.preference -= self.preference[i];
        }
        for g in &self.groups {
            let active = g.members.iter().filter(|&&i| selection.get(i)).count();
            if active > 1 {
                let p = g.weight * (active - 1) as f64;
                match g.kind {
                    ConstraintKind::InstructorConflict => b.instructor += p,
                    _ => b.room += p,
                }
            }
        }
        for p in &self.pairs {
            if selection.get(p.a) && selection.get(p.b) {
                b.student += p.weight;
            }
        }
        b.total = b.utility + b.preference + b.instructor + b.room + b.student;
        b
    }

    /// Energy change from flipping bit `i` of `selection`.
    ///
    /// Costs the size of the groups containing `i` plus its student pairs.
    /// [`TrackedSelection`](super::TrackedSelection) avoids the group scans.
    pub fn flip_delta(&self, selection: &Selection, i: usize) -> f64 {
        self.flip_delta_with(selection, i, |g| {
            self.groups[g]
                .members
                .iter()
                .filter(|&&m| selection.get(m))
                .count() as u32
        })
    }

    /// Flip delta given the active count of each group.
    pub(super) fn flip_delta_with<F>(&self, selection: &Selection, i: usize, active: F) -> f64
    where
        F: Fn(usize) -> u32,
    {
        let on = selection.get(i);
        let mut delta = 0.0;

        for &g in &self.groups_of[i] {
            let a = active(g);
            // Turning on adds a penalty once someone is already active;
            // turning off removes one while anyone else remains.
            let others = if on { a.saturating_sub(1) } else { a };
            if others >= 1 {
                delta += self.groups[g].weight;
            }
        }
        for &p in &self.pairs_of[i] {
            let pair = self.pairs[p];
            let other = if pair.a == i { pair.b } else { pair.a };
            if selection.get(other) {
                delta += pair.weight;
            }
        }
        delta += self.unary(i);

        if on {
            -delta
        } else {
            delta
        }
    }
}
