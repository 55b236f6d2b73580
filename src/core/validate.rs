//! Validation of raw, user-entered course fields
//!
//! The UI hands over plain strings; nothing reaches the engine's add path
//! without passing through here first. Rejections carry a human-readable
//! reason and leave all state untouched.

use crate::core::models::EnrolledCourse;
use std::error::Error;
use std::fmt;

/// Why a candidate course was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more required fields were empty
    MissingFields,
    /// Course code does not match the canonical two-letters-four-digits form
    MalformedCode(String),
    /// Credit field did not parse as a strictly positive number
    InvalidCredit(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required"),
            Self::MalformedCode(code) => {
                write!(f, "Code must be like XX0000 (e.g., CM1111), got '{code}'")
            }
            Self::InvalidCredit(credit) => {
                write!(f, "Credit must be a positive number, got '{credit}'")
            }
        }
    }
}

impl Error for ValidationError {}

/// Whether a course code is in canonical form: two uppercase ASCII letters
/// followed by four ASCII digits (e.g., "CM1111")
#[must_use]
pub fn is_valid_course_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    bytes.len() == 6
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..].iter().all(u8::is_ascii_digit)
}

/// Validate raw user input and build an enrollment candidate from it.
///
/// Checks, in order: all fields present, code in canonical form, credit a
/// strictly positive number. On success returns an [`EnrolledCourse`] with
/// the default grade; on failure returns the first applicable
/// [`ValidationError`] and guarantees no state was touched.
///
/// # Arguments
/// * `code` - Raw course code string
/// * `title` - Raw course title string
/// * `credit` - Raw credit string, parsed as a number
///
/// # Errors
/// Returns a [`ValidationError`] describing the first failed check.
pub fn validate_course_entry(
    code: &str,
    title: &str,
    credit: &str,
) -> Result<EnrolledCourse, ValidationError> {
    let code = code.trim();
    let title = title.trim();
    let credit = credit.trim();

    if code.is_empty() || title.is_empty() || credit.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if !is_valid_course_code(code) {
        return Err(ValidationError::MalformedCode(code.to_string()));
    }

    let credit_value: f64 = credit
        .parse()
        .map_err(|_| ValidationError::InvalidCredit(credit.to_string()))?;
    if !credit_value.is_finite() || credit_value <= 0.0 {
        return Err(ValidationError::InvalidCredit(credit.to_string()));
    }

    Ok(EnrolledCourse::new(
        code.to_string(),
        title.to_string(),
        credit_value,
    ))
}
