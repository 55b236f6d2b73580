//! Report command handler
//!
//! Loads a saved semester plan (JSON array of semesters) and prints each
//! semester's courses with its GPA, followed by the overall GPA.

use gpa_calculator::core::engine::GpaEngine;
use gpa_calculator::core::gpa::format_gpa;
use gpa_calculator::core::models::Semester;
use gpa_calculator::error;
use std::fs;
use std::path::Path;

/// Run the report command.
///
/// # Arguments
/// * `input_file` - Path to a semester plan JSON file
pub fn run(input_file: &Path) {
    match load_plan(input_file) {
        Ok(semesters) => print_report(&GpaEngine::from_semesters(semesters)),
        Err(err) => {
            error!("Report failed for {}: {err}", input_file.display());
            eprintln!("{err}");
        }
    }
}

/// Load a semester plan from a JSON file
fn load_plan(input_file: &Path) -> Result<Vec<Semester>, String> {
    let raw = fs::read_to_string(input_file)
        .map_err(|e| format!("✗ Failed to read {}: {e}", input_file.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| format!("✗ {} is not a valid plan file: {e}", input_file.display()))
}

/// Print the per-semester breakdown and the overall GPA
fn print_report(engine: &GpaEngine) {
    for (index, semester) in engine.semesters().iter().enumerate() {
        println!("\n=== {} ===", semester.name);

        if semester.courses.is_empty() {
            println!("  (no courses)");
        } else {
            for course in &semester.courses {
                println!(
                    "  {:<8} {:<40} {:>5} cr  {}",
                    course.code, course.title, course.credit, course.grade
                );
            }
        }

        println!("  GPA: {}", format_gpa(engine.semester_gpa(index)));
    }

    println!("\nOverall GPA: {}", format_gpa(engine.overall_gpa()));
}
