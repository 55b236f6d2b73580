//! Semester and enrollment models

use crate::core::gpa::Grade;
use serde::{Deserialize, Serialize};

/// A course placed into a semester with a grade
///
/// Created by an add operation with the grade defaulting to `A`, mutated only
/// through grade reassignment, and destroyed by a remove operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrolledCourse {
    /// Course code (e.g., "CM1111")
    pub code: String,

    /// Course title
    pub title: String,

    /// Credit weight (strictly positive, can be fractional)
    pub credit: f64,

    /// Assigned letter grade
    #[serde(default)]
    pub grade: Grade,
}

impl EnrolledCourse {
    /// Create a new enrollment with the default grade (`A`)
    ///
    /// # Arguments
    /// * `code` - Course code
    /// * `title` - Course title
    /// * `credit` - Credit weight
    #[must_use]
    pub const fn new(code: String, title: String, credit: f64) -> Self {
        Self {
            code,
            title,
            credit,
            grade: Grade::A,
        }
    }
}

/// A named, ordered list of enrollments
///
/// Course order is insertion order and is meaningful: undoing a removal must
/// reinsert the course at its original index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Semester {
    /// Semester name (e.g., "Semester 1")
    pub name: String,

    /// Enrolled courses in insertion order
    pub courses: Vec<EnrolledCourse>,
}

impl Semester {
    /// Create a new, empty semester
    #[must_use]
    pub const fn new(name: String) -> Self {
        Self {
            name,
            courses: Vec::new(),
        }
    }

    /// Number of enrolled courses
    #[must_use]
    pub fn course_count(&self) -> usize {
        self.courses.len()
    }
}
