//! Grade scale and grade-point average computation

use crate::core::models::EnrolledCourse;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Letter grade on a fixed 0.0-4.0 scale
///
/// The scale is immutable at runtime: each variant maps to exactly one
/// grade-point weight via [`Grade::points`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    /// A+ (4.0)
    #[serde(rename = "A+")]
    APlus,
    /// A (4.0), the default grade assigned at enrollment
    #[default]
    #[serde(rename = "A")]
    A,
    /// A- (3.7)
    #[serde(rename = "A-")]
    AMinus,
    /// B+ (3.3)
    #[serde(rename = "B+")]
    BPlus,
    /// B (3.0)
    #[serde(rename = "B")]
    B,
    /// B- (2.7)
    #[serde(rename = "B-")]
    BMinus,
    /// C+ (2.3)
    #[serde(rename = "C+")]
    CPlus,
    /// C (2.0)
    #[serde(rename = "C")]
    C,
    /// C- (1.7)
    #[serde(rename = "C-")]
    CMinus,
    /// D+ (1.3)
    #[serde(rename = "D+")]
    DPlus,
    /// D (1.0)
    #[serde(rename = "D")]
    D,
    /// F (0.0)
    #[serde(rename = "F")]
    F,
}

impl Grade {
    /// All grades in scale order, best to worst
    pub const ALL: [Self; 12] = [
        Self::APlus,
        Self::A,
        Self::AMinus,
        Self::BPlus,
        Self::B,
        Self::BMinus,
        Self::CPlus,
        Self::C,
        Self::CMinus,
        Self::DPlus,
        Self::D,
        Self::F,
    ];

    /// Grade-point weight on the 0.0-4.0 scale
    #[must_use]
    pub const fn points(self) -> f64 {
        match self {
            Self::APlus | Self::A => 4.0,
            Self::AMinus => 3.7,
            Self::BPlus => 3.3,
            Self::B => 3.0,
            Self::BMinus => 2.7,
            Self::CPlus => 2.3,
            Self::C => 2.0,
            Self::CMinus => 1.7,
            Self::DPlus => 1.3,
            Self::D => 1.0,
            Self::F => 0.0,
        }
    }

    /// Letter form of the grade (e.g., "A-")
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A+" => Ok(Self::APlus),
            "A" => Ok(Self::A),
            "A-" => Ok(Self::AMinus),
            "B+" => Ok(Self::BPlus),
            "B" => Ok(Self::B),
            "B-" => Ok(Self::BMinus),
            "C+" => Ok(Self::CPlus),
            "C" => Ok(Self::C),
            "C-" => Ok(Self::CMinus),
            "D+" => Ok(Self::DPlus),
            "D" => Ok(Self::D),
            "F" => Ok(Self::F),
            other => Err(format!("Unknown grade: '{other}'")),
        }
    }
}

/// Compute the credit-weighted grade-point average of a course list.
///
/// Returns 0 for an empty list. Otherwise the result is
/// `sum(points(grade) * credit) / sum(credit)`, rounded to exactly two
/// decimal places. The computation is sum-based and therefore invariant
/// under reordering of the input.
///
/// Called independently per semester and over the flattened list of all
/// semesters; results are never cached against each other.
#[must_use]
pub fn compute_gpa(courses: &[EnrolledCourse]) -> f64 {
    if courses.is_empty() {
        return 0.0;
    }

    let mut total_points = 0.0;
    let mut total_credits = 0.0;
    for course in courses {
        total_points += course.grade.points() * course.credit;
        total_credits += course.credit;
    }

    if total_credits > 0.0 {
        round_to_2dp(total_points / total_credits)
    } else {
        0.0
    }
}

/// Round a value to two decimal places
fn round_to_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a GPA for display with a fixed two decimal places (e.g., "3.38")
#[must_use]
pub fn format_gpa(gpa: f64) -> String {
    format!("{gpa:.2}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, credit: f64, grade: Grade) -> EnrolledCourse {
        let mut c = EnrolledCourse::new(code.to_string(), code.to_string(), credit);
        c.grade = grade;
        c
    }

    #[test]
    fn test_grade_points() {
        assert!((Grade::APlus.points() - 4.0).abs() < f64::EPSILON);
        assert!((Grade::A.points() - 4.0).abs() < f64::EPSILON);
        assert!((Grade::AMinus.points() - 3.7).abs() < f64::EPSILON);
        assert!((Grade::B.points() - 3.0).abs() < f64::EPSILON);
        assert!((Grade::F.points() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_grade_round_trip() {
        for grade in Grade::ALL {
            assert_eq!(grade.as_str().parse::<Grade>(), Ok(grade));
        }
    }

    #[test]
    fn test_grade_parse_is_case_insensitive() {
        assert_eq!("a+".parse::<Grade>(), Ok(Grade::APlus));
        assert_eq!(" b- ".parse::<Grade>(), Ok(Grade::BMinus));
        assert!("X".parse::<Grade>().is_err());
        assert!("A++".parse::<Grade>().is_err());
    }

    #[test]
    fn test_empty_list_yields_zero() {
        assert!((compute_gpa(&[]) - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weighted_average_rounds_to_two_decimals() {
        // (2.5 * 4.0 + 4.0 * 3.0) / (2.5 + 4.0) = 22 / 6.5 = 3.3846... -> 3.38
        let courses = vec![
            course("CM1111", 2.5, Grade::A),
            course("IN1101", 4.0, Grade::B),
        ];

        let gpa = compute_gpa(&courses);
        assert!((gpa - 3.38).abs() < 1e-9);
        assert_eq!(format_gpa(gpa), "3.38");
    }

    #[test]
    fn test_gpa_invariant_under_reordering() {
        let mut courses = vec![
            course("AA1000", 3.0, Grade::AMinus),
            course("BB2000", 1.5, Grade::CPlus),
            course("CC3000", 4.0, Grade::F),
        ];
        let forward = compute_gpa(&courses);
        courses.reverse();
        let backward = compute_gpa(&courses);

        assert!((forward - backward).abs() < f64::EPSILON);
    }

    #[test]
    fn test_all_f_grades_yield_zero() {
        let courses = vec![course("AA1000", 3.0, Grade::F), course("BB2000", 2.0, Grade::F)];
        assert!((compute_gpa(&courses) - 0.0).abs() < f64::EPSILON);
    }
}
