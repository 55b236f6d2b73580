//! Semester editor engine
//!
//! Owns the semester list and the undo stack, and mediates every structural
//! mutation. Only destructive operations (course removal, semester reset,
//! full reset) are undoable; adding courses or semesters and changing grades
//! intentionally never push undo entries.

use crate::core::gpa::{self, Grade};
use crate::core::models::{EnrolledCourse, Semester};

/// One reversible mutation, captured at the moment it happened
///
/// Entries are replayed in reverse chronological order by [`GpaEngine::undo`];
/// each variant carries exactly the state needed to reverse itself.
#[derive(Debug, Clone, PartialEq)]
pub enum UndoAction {
    /// A single course was removed from a semester
    CourseRemove {
        /// The removed course, exactly as it was
        course: EnrolledCourse,
        /// Which semester it was removed from
        semester_index: usize,
        /// Its position within that semester at removal time
        course_index: usize,
    },
    /// A semester's course list was cleared
    SemesterReset {
        /// Which semester was cleared
        semester_index: usize,
        /// The semester's name at reset time
        semester_name: String,
        /// The full course list prior to clearing
        courses: Vec<EnrolledCourse>,
    },
    /// The whole semester list was replaced by a fresh one
    FullReset {
        /// The full semester list prior to the reset
        semesters: Vec<Semester>,
    },
}

/// In-memory GPA engine: semester list + undo stack + GPA computation
#[derive(Debug)]
pub struct GpaEngine {
    semesters: Vec<Semester>,
    undo_stack: Vec<UndoAction>,
}

impl Default for GpaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GpaEngine {
    /// Create an engine with a single empty "Semester 1"
    #[must_use]
    pub fn new() -> Self {
        Self {
            semesters: vec![Semester::new("Semester 1".to_string())],
            undo_stack: Vec::new(),
        }
    }

    /// Create an engine over a previously saved semester list
    ///
    /// Falls back to [`GpaEngine::new`] semantics when the list is empty so
    /// the editor always has at least one semester to target.
    #[must_use]
    pub fn from_semesters(semesters: Vec<Semester>) -> Self {
        if semesters.is_empty() {
            Self::new()
        } else {
            Self {
                semesters,
                undo_stack: Vec::new(),
            }
        }
    }

    /// The current semester list, in order
    #[must_use]
    pub fn semesters(&self) -> &[Semester] {
        &self.semesters
    }

    /// Number of entries currently on the undo stack
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Append a new semester named after the new list length
    /// (e.g., "Semester 3" when two semesters already exist). Not undoable.
    pub fn add_semester(&mut self) {
        let name = format!("Semester {}", self.semesters.len() + 1);
        self.semesters.push(Semester::new(name));
    }

    /// Append a course to a semester. Not undoable.
    ///
    /// # Panics
    /// Panics if `semester_index` is out of range; index validity is the
    /// caller's responsibility.
    pub fn add_course(&mut self, course: EnrolledCourse, semester_index: usize) {
        self.semesters[semester_index].courses.push(course);
    }

    /// Reassign a course's grade in place. Not undoable.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn set_grade(&mut self, semester_index: usize, course_index: usize, grade: Grade) {
        self.semesters[semester_index].courses[course_index].grade = grade;
    }

    /// Remove the course at the given position, recording an undo entry with
    /// the exact removed value and its position.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn remove_course(&mut self, semester_index: usize, course_index: usize) {
        let course = self.semesters[semester_index].courses.remove(course_index);
        self.undo_stack.push(UndoAction::CourseRemove {
            course,
            semester_index,
            course_index,
        });
    }

    /// Clear a semester's course list, capturing it for undo.
    ///
    /// Resetting an already-empty semester is a no-op: no state changes and
    /// no vacuous undo entry is pushed.
    ///
    /// # Panics
    /// Panics if `semester_index` is out of range.
    pub fn reset_semester(&mut self, semester_index: usize) {
        let semester = &mut self.semesters[semester_index];
        if semester.courses.is_empty() {
            return;
        }

        self.undo_stack.push(UndoAction::SemesterReset {
            semester_index,
            semester_name: semester.name.clone(),
            courses: std::mem::take(&mut semester.courses),
        });
    }

    /// Replace the whole semester list with a fresh "Semester 1", capturing
    /// the prior list for undo.
    pub fn reset_all(&mut self) {
        let prior = std::mem::replace(
            &mut self.semesters,
            vec![Semester::new("Semester 1".to_string())],
        );
        self.undo_stack
            .push(UndoAction::FullReset { semesters: prior });
    }

    /// Pop and reverse the most recent destructive operation.
    ///
    /// Removed courses are reinserted at their original index, not appended;
    /// replaying entries strictly last-in-first-out is what keeps captured
    /// indices valid across a run of removals. Returns `false` when the
    /// stack is empty (a no-op).
    pub fn undo(&mut self) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };

        match action {
            UndoAction::CourseRemove {
                course,
                semester_index,
                course_index,
            } => {
                self.semesters[semester_index]
                    .courses
                    .insert(course_index, course);
            }
            UndoAction::SemesterReset {
                semester_index,
                semester_name,
                courses,
            } => {
                let semester = &mut self.semesters[semester_index];
                semester.name = semester_name;
                semester.courses = courses;
            }
            UndoAction::FullReset { semesters } => {
                self.semesters = semesters;
            }
        }
        true
    }

    /// GPA of a single semester, rounded to two decimal places
    ///
    /// # Panics
    /// Panics if `semester_index` is out of range.
    #[must_use]
    pub fn semester_gpa(&self, semester_index: usize) -> f64 {
        gpa::compute_gpa(&self.semesters[semester_index].courses)
    }

    /// GPA over every course in every semester, in semester order
    #[must_use]
    pub fn overall_gpa(&self) -> f64 {
        let all: Vec<EnrolledCourse> = self
            .semesters
            .iter()
            .flat_map(|s| s.courses.iter().cloned())
            .collect();
        gpa::compute_gpa(&all)
    }
}
