//! Constraint Encoder.
//!
//! Derives conflict and preference terms from a candidate set:
//!
//! | family | arity | weight |
//! |---|---|---|
//! | instructor conflict | group by `(professor, day, slot)` | 10.0 |
//! | room conflict | group by `(room, day, slot)` | 8.0 |
//! | student conflict | pair of distinct courses sharing `(day, slot)` | `5.0 * min(n_a, n_b) / 100` |
//! | time preference | unary | +2.0 / +1.0 / -1.0 by hour |
//!
//! Student conflicts are emitted only when the estimated overlap exceeds
//! the threshold. Encoding is still quadratic in the candidates of each
//! hour; [`try_encode`] counts the pairs up front and rejects sets over
//! `max_constraints`.

mod encoder;
mod graph;
mod types;

pub use encoder::{
    encode, estimate_constraints, time_preference, try_encode, EncodeOptions,
    INSTRUCTOR_PENALTY, ROOM_PENALTY, STUDENT_PENALTY_SCALE,
};
pub use graph::{ConflictEdge, ConflictGraph};
pub use types::{Constraint, ConstraintCounts, ConstraintKind};
