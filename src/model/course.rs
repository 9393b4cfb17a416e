//! Course input descriptors.

use serde::{Deserialize, Serialize};

/// Professor id used when a course does not declare one.
pub const DEFAULT_PROFESSOR: &str = "prof_unknown";

/// Enrollment assumed when a course does not declare one.
pub const DEFAULT_STUDENT_COUNT: u32 = 30;

/// Priority assumed when a course does not declare one.
pub const DEFAULT_PRIORITY: f64 = 0.5;

/// A course to be placed in the timetable.
///
/// Only `id` is required. Missing optional fields fall back to
/// [`DEFAULT_PROFESSOR`], [`DEFAULT_STUDENT_COUNT`] and [`DEFAULT_PRIORITY`].
/// Unknown JSON fields are ignored.
///
/// # Examples
///
/// ```
/// use u_timetable::model::CourseSpec;
///
/// let c = CourseSpec::new("CS401").with_professor("prof_smith").with_priority(0.9);
/// assert_eq!(c.professor_id(), "prof_smith");
/// assert_eq!(c.student_count(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseSpec {
    /// Course identifier. An empty id is rejected by the generator.
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professor_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_count: Option<u32>,

    /// Importance in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<f64>,
}

impl CourseSpec {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_professor(mut self, professor_id: impl Into<String>) -> Self {
        self.professor_id = Some(professor_id.into());
        self
    }

    pub fn with_student_count(mut self, count: u32) -> Self {
        self.student_count = Some(count);
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = Some(priority);
        self
    }

    #[inline]
    pub fn professor_id(&self) -> &str {
        self.professor_id.as_deref().unwrap_or(DEFAULT_PROFESSOR)
    }

    #[inline]
    pub fn student_count(&self) -> u32 {
        self.student_count.unwrap_or(DEFAULT_STUDENT_COUNT)
    }

    #[inline]
    pub fn priority(&self) -> f64 {
        self.priority.unwrap_or(DEFAULT_PRIORITY)
    }
}
