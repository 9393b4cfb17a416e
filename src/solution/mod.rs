//! Solution Extractor and Validator.
//!
//! Turns a selection vector back into schedule entries and audits it for
//! residual conflicts. Neither step can fail.

mod extract;
mod gaps;
mod report;

pub use extract::extract;
pub use gaps::{free_gaps, Gap};
pub use report::{validate, ValidationReport};
