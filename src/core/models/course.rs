//! Catalog course model

use serde::{Deserialize, Serialize};

/// A reusable course definition stored in the catalog
///
/// Distinct from [`EnrolledCourse`](super::EnrolledCourse): a catalog record
/// carries degree/university/country metadata and no grade, and is keyed by
/// its `code` within the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogCourse {
    /// Course code in canonical form: two uppercase letters + four digits (e.g., "CM1111")
    pub code: String,

    /// Full course name (e.g., "Fundamentals of Mathematics")
    pub name: String,

    /// Credit weight (can be fractional)
    pub credits: f64,

    /// Degree programme the course belongs to
    pub degree: String,

    /// Institution offering the course
    pub university: String,

    /// Country of the institution
    pub country: String,
}

impl CatalogCourse {
    /// Create a new catalog course
    ///
    /// # Arguments
    /// * `code` - Course code (e.g., "CM1111")
    /// * `name` - Full course name
    /// * `credits` - Credit weight (can be fractional)
    /// * `degree` - Degree programme
    /// * `university` - Institution name
    /// * `country` - Country of the institution
    #[must_use]
    pub const fn new(
        code: String,
        name: String,
        credits: f64,
        degree: String,
        university: String,
        country: String,
    ) -> Self {
        Self {
            code,
            name,
            credits,
            degree,
            university,
            country,
        }
    }

    /// Whether the record is complete enough to persist
    ///
    /// A catalog record is only ever saved whole: every text field must be
    /// non-empty after trimming and the credit weight strictly positive.
    /// Partial records are rejected outright, never partially saved.
    #[must_use]
    pub fn is_valid_for_storage(&self) -> bool {
        !self.code.trim().is_empty()
            && !self.name.trim().is_empty()
            && self.credits > 0.0
            && !self.degree.trim().is_empty()
            && !self.university.trim().is_empty()
            && !self.country.trim().is_empty()
    }

    /// Case-insensitive substring match against any searchable field
    ///
    /// # Arguments
    /// * `lower_query` - The search term, already lowercased by the caller
    #[must_use]
    pub fn matches(&self, lower_query: &str) -> bool {
        self.code.to_lowercase().contains(lower_query)
            || self.name.to_lowercase().contains(lower_query)
            || self.degree.to_lowercase().contains(lower_query)
            || self.university.to_lowercase().contains(lower_query)
            || self.country.to_lowercase().contains(lower_query)
    }
}
