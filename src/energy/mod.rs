//! Energy Model.
//!
//! ```text
//! E(x) = - sum_{i selected} (utility_i + w_pref * preference_i)
//!        + sum_{hard group g} penalty_g * max(0, active_g - 1)
//!        + sum_{student pair p} penalty_p * [both endpoints selected]
//! ```
//!
//! Lower is better. `w_pref` defaults to zero, which leaves the unary term
//! as the negated utility alone.

mod model;
mod tracked;

pub use model::{EnergyBreakdown, EnergyModel};
pub use tracked::TrackedSelection;
