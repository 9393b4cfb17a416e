//! Selection with cached group activity for constant-time group checks.

use super::model::EnergyModel;
use crate::model::Selection;

/// A [`Selection`] together with the number of active members of each hard
/// conflict group of one [`EnergyModel`].
///
/// Flip deltas then cost only the number of constraints touching the bit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedSelection {
    selection: Selection,
    active: Vec<u32>,
}

impl TrackedSelection {
    pub fn new(model: &EnergyModel, selection: Selection) -> Self {
        let active = model
            .groups
            .iter()
            .map(|g| g.members.iter().filter(|&&i| selection.get(i)).count() as u32)
            .collect();
        Self { selection, active }
    }

    #[inline]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn into_selection(self) -> Selection {
        self.selection
    }

    /// Energy change from flipping bit `i`.
    pub fn flip_delta(&self, model: &EnergyModel, i: usize) -> f64 {
        model.flip_delta_with(&self.selection, i, |g| self.active[g])
    }

    /// Flips bit `i` and updates group counts.
    pub fn flip(&mut self, model: &EnergyModel, i: usize) {
        let on = self.selection.get(i);
        for &g in &model.groups_of[i] {
            if on {
                self.active[g] -= 1;
            } else {
                self.active[g] += 1;
            }
        }
        self.selection.flip(i);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{generate, SearchSpace};
    use crate::constraint::{encode, EncodeOptions};
    use crate::model::CourseSpec;
    use crate::random::create_rng;
    use rand::Rng;

    #[test]
    fn test_tracked_delta_agrees_over_walk() {
        let courses = vec![
            CourseSpec::new("A").with_professor("p1").with_student_count(50),
            CourseSpec::new("B").with_professor("p1").with_student_count(35),
        ];
        let space = SearchSpace {
            num_rooms: 2,
            num_time_slots: 3,
            num_days: 2,
            ..SearchSpace::default()
        };
        let cands = generate(&courses, &space, false).unwrap();
        let model = EnergyModel::new(&cands, &encode(&cands, &EncodeOptions::default()), 1.0);

        let mut rng = create_rng(5);
        let mut state = TrackedSelection::new(&model, Selection::random(model.len(), &mut rng));
        let mut energy = model.energy(state.selection());

        for _ in 0..500 {
            let i = rng.random_range(0..model.len());
            let d = state.flip_delta(&model, i);
            assert!((d - model.flip_delta(state.selection(), i)).abs() < 1e-12);
            state.flip(&model, i);
            energy += d;
            assert!((energy - model.energy(state.selection())).abs() < 1e-9);
        }
        assert_eq!(state, TrackedSelection::new(&model, state.selection().clone()));
    }
}
