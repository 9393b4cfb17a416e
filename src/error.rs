//! Error taxonomy for the timetabling pipeline.
//!
//! - [`ValidationError`]: malformed input or configuration, raised before
//!   any search begins. Fatal.
//! - [`SolverError`]: a solver strategy could not produce a result within
//!   its budget. Recoverable; the pipeline falls back to annealing.
//! - [`ScheduleError`]: what the pipeline returns to callers.
//!
//! A schedule with residual hard conflicts is not an error. It is reported
//! through [`ValidationReport`](crate::solution::ValidationReport).

use std::fmt;

/// Categories of input validation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorKind {
    /// The course list is empty.
    EmptyCourses,
    /// A course has an empty identifier.
    MissingId,
    /// A course priority lies outside `[0, 1]` or is not finite.
    InvalidPriority,
    /// A configuration value is out of range.
    InvalidConfig,
    /// The candidate space exceeds the configured cap.
    SearchSpaceTooLarge,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationErrorKind::EmptyCourses => "empty course list",
            ValidationErrorKind::MissingId => "missing course id",
            ValidationErrorKind::InvalidPriority => "invalid priority",
            ValidationErrorKind::InvalidConfig => "invalid configuration",
            ValidationErrorKind::SearchSpaceTooLarge => "search space too large",
        };
        f.write_str(s)
    }
}

/// Input rejected before optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    kind: ValidationErrorKind,
    message: String,
}

impl ValidationError {
    #[inline]
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[inline]
    pub fn kind(&self) -> ValidationErrorKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Failure of a solver strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// The backend cannot run in this environment.
    Unavailable(String),
    /// The evaluation or time budget ran out before a result was produced.
    BudgetExhausted { evaluations: usize },
    /// The run was cancelled externally.
    Cancelled,
    /// Any other backend failure.
    Failed(String),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::Unavailable(name) => write!(f, "solver backend unavailable: {name}"),
            SolverError::BudgetExhausted { evaluations } => write!(
                f,
                "solver budget exhausted after {evaluations} evaluations without a result"
            ),
            SolverError::Cancelled => f.write_str("solver run cancelled"),
            SolverError::Failed(msg) => write!(f, "solver failed: {msg}"),
        }
    }
}

impl std::error::Error for SolverError {}

/// Error returned by the optimization pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    Validation(ValidationError),
    Solver(SolverError),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Validation(e) => write!(f, "validation error: {e}"),
            ScheduleError::Solver(e) => write!(f, "solver error: {e}"),
        }
    }
}

impl std::error::Error for ScheduleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScheduleError::Validation(e) => Some(e),
            ScheduleError::Solver(e) => Some(e),
        }
    }
}

impl From<ValidationError> for ScheduleError {
    fn from(e: ValidationError) -> Self {
        ScheduleError::Validation(e)
    }
}

impl From<SolverError> for ScheduleError {
    fn from(e: SolverError) -> Self {
        ScheduleError::Solver(e)
    }
}
