//! Free time between scheduled entries.

use crate::model::ScheduleEntry;
use serde::{Deserialize, Serialize};

/// Free hours `[start, end)` between two occupied hours of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gap {
    pub start: u8,
    pub end: u8,
}

/// Free stretches between scheduled hours on `day`, earliest first.
///
/// Time before the first and after the last entry is not a gap.
pub fn free_gaps(schedule: &[ScheduleEntry], day: u8) -> Vec<Gap> {
    let mut hours: Vec<u8> = schedule
        .iter()
        .filter(|e| e.day == day)
        .map(|e| e.time_slot)
        .collect();
    hours.sort_unstable();
    hours.dedup();

    hours
        .windows(2)
        .filter(|w| w[1] - w[0] > 1)
        .map(|w| Gap {
            start: w[0] + 1,
            end: w[1],
        })
        .collect()
}
