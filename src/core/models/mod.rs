//! Data models for the catalog and the semester editor

mod course;
mod semester;

pub use course::CatalogCourse;
pub use semester::{EnrolledCourse, Semester};
