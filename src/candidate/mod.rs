//! Candidate Generator.
//!
//! Enumerates every `(course, time slot, day, room)` placement and scores
//! it with a deterministic utility in `[0, 1]`. No randomness is involved;
//! equal inputs always produce equal candidate sets.

mod generator;
mod utility;

pub use generator::{generate, SearchSpace};
pub use utility::{
    capacity_factor, day_factor, room_capacity, time_factor, utility, CAPACITY_WEIGHT,
    DAY_WEIGHT, PRIORITY_WEIGHT, TIME_WEIGHT,
};
