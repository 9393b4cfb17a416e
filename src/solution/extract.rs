//! Selection to schedule rows.

use crate::model::{Candidate, ScheduleEntry, Selection};

/// One entry per selected candidate, in candidate order.
///
/// Bits beyond the end of `candidates` are ignored.
pub fn extract(selection: &Selection, candidates: &[Candidate]) -> Vec<ScheduleEntry> {
    selection
        .ones()
        .filter_map(|i| candidates.get(i))
        .map(Candidate::to_entry)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{generate, SearchSpace};
    use crate::model::CourseSpec;

    #[test]
    fn test_extract_selected_only() {
        let courses = vec![CourseSpec::new("A").with_professor("p1"), CourseSpec::new("B")];
        let space = SearchSpace {
            num_rooms: 2,
            num_time_slots: 1,
            num_days: 1,
            ..SearchSpace::default()
        };
        let cands = generate(&courses, &space, false).unwrap();
        let schedule = extract(&Selection::from_indices(4, &[1, 2]), &cands);

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].course_id, "A");
        assert_eq!(schedule[0].room_id, "room_1");
        assert_eq!(schedule[0].professor_id, "p1");
        assert_eq!(schedule[1].course_id, "B");
        assert_eq!(schedule[1].room_id, "room_0");
        assert_eq!(schedule[1].utility_weight, cands[2].utility_weight);
    }

    #[test]
    fn test_empty_selection() {
        assert!(extract(&Selection::empty(0), &[]).is_empty());
    }
}
