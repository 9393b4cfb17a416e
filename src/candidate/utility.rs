//! Per-candidate utility scoring.
//!
//! ```text
//! utility = 0.4 * priority
//!         + 0.3 * exp(-(slot - 10)^2 / 20)
//!         + 0.2 * (1.0 on weekdays, 0.3 on weekends)
//!         + 0.1 * max(0, 1 - |students - capacity| / 100)
//! ```
//!
//! clamped to `[0, 1]`.

pub const PRIORITY_WEIGHT: f64 = 0.4;
pub const TIME_WEIGHT: f64 = 0.3;
pub const DAY_WEIGHT: f64 = 0.2;
pub const CAPACITY_WEIGHT: f64 = 0.1;

/// Hour at which the time-of-day bell curve peaks.
const PEAK_HOUR: f64 = 10.0;

/// Seat count of room `room`: 20, 30, 40, ...
#[inline]
pub fn room_capacity(room: u16) -> u32 {
    20 + 10 * room as u32
}

/// Bell curve over the hour of day, 1.0 at 10:00.
#[inline]
pub fn time_factor(time_slot: u8) -> f64 {
    let d = time_slot as f64 - PEAK_HOUR;
    (-(d * d) / 20.0).exp()
}

/// 1.0 for Monday through Friday, 0.3 for the weekend.
#[inline]
pub fn day_factor(day: u8) -> f64 {
    if day < 5 {
        1.0
    } else {
        0.3
    }
}

/// How well `students` fits a room of `capacity` seats, in `[0, 1]`.
#[inline]
pub fn capacity_factor(students: u32, capacity: u32) -> f64 {
    let gap = (students as f64 - capacity as f64).abs();
    (1.0 - gap / 100.0).max(0.0)
}

/// Weighted utility of placing a course at `(time_slot, day, room)`.
pub fn utility(priority: f64, time_slot: u8, day: u8, room: u16, students: u32) -> f64 {
    let score = priority * PRIORITY_WEIGHT
        + time_factor(time_slot) * TIME_WEIGHT
        + day_factor(day) * DAY_WEIGHT
        + capacity_factor(students, room_capacity(room)) * CAPACITY_WEIGHT;
    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_time_factor_peak() {
        assert!((time_factor(10) - 1.0).abs() < 1e-12);
        assert!(time_factor(0) < time_factor(8));
        assert!((time_factor(12) - time_factor(8)).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_factor_clipped() {
        assert!((capacity_factor(40, 40) - 1.0).abs() < 1e-12);
        assert!((capacity_factor(40, 20) - 0.8).abs() < 1e-12);
        assert_eq!(capacity_factor(300, 20), 0.0);
    }

    #[test]
    fn test_utility_reference_value() {
        // priority 0.9, 10:00 Monday, 40 students in a 40-seat room.
        let u = utility(0.9, 10, 0, 2, 40);
        assert!((u - (0.36 + 0.3 + 0.2 + 0.1)).abs() < 1e-12);
    }

    #[test]
    fn test_weekend_penalized() {
        assert!(utility(0.5, 10, 6, 1, 30) < utility(0.5, 10, 2, 1, 30));
    }

    proptest! {
        #[test]
        fn prop_utility_in_unit_interval(
            priority in 0.0f64..=1.0,
            slot in 0u8..24,
            day in 0u8..7,
            room in 0u16..200,
            students in 0u32..10_000,
        ) {
            let u = utility(priority, slot, day, room, students);
            prop_assert!((0.0..=1.0).contains(&u));
        }
    }
}
