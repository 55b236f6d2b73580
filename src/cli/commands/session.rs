//! Interactive session command handler
//!
//! A line-oriented editor over the GPA engine: add courses (typed or picked
//! from the catalog), change grades, remove courses, reset semesters, and
//! undo destructive operations. Semester and course numbers are 1-based on
//! the prompt and translated before they reach the engine, which treats
//! out-of-range indices as programmer errors.

use gpa_calculator::core::catalog::CatalogStore;
use gpa_calculator::core::engine::GpaEngine;
use gpa_calculator::core::gpa::{format_gpa, Grade};
use gpa_calculator::core::models::Semester;
use gpa_calculator::core::validate::validate_course_entry;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

const HELP: &str = "\
Commands:
  show                             Print all semesters, grades, and GPAs
  add <sem> <code> <credit> <title...>   Add a course (grade defaults to A)
  pick <sem> <code>                Add a course from the catalog by code
  grade <sem> <course> <grade>     Reassign a grade (A+, A, A-, ... F)
  remove <sem> <course>            Remove a course (undoable)
  newsem                           Append a new semester
  clear <sem>                      Remove all courses from a semester (undoable)
  reset                            Start over with a single empty semester (undoable)
  undo                             Reverse the most recent destructive operation
  catalog [query]                  Search the saved course catalog
  save <file>                      Write the current plan to a JSON file
  help                             Show this help
  quit                             Leave the session";

/// Run the interactive session.
///
/// # Arguments
/// * `input_file` - Optional plan JSON file loaded into the editor at startup
/// * `store` - The course catalog backing the `pick` command
pub fn run(input_file: Option<&Path>, store: &CatalogStore) {
    let mut engine = match input_file {
        Some(path) => match load_plan(path) {
            Ok(semesters) => GpaEngine::from_semesters(semesters),
            Err(err) => {
                eprintln!("{err}");
                return;
            }
        },
        None => GpaEngine::new(),
    };

    println!("GpaCalculator session. Type 'help' for commands.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF
            Ok(_) => {}
            Err(e) => {
                eprintln!("✗ Failed to read input: {e}");
                break;
            }
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line, "quit" | "exit" | "q") {
            break;
        }

        dispatch(line, &mut engine, store);
    }
}

fn dispatch(line: &str, engine: &mut GpaEngine, store: &CatalogStore) {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let rest: Vec<&str> = parts.collect();

    match command {
        "help" => println!("{HELP}"),
        "show" => show(engine),
        "add" => add(engine, &rest),
        "pick" => pick(engine, store, &rest),
        "grade" => grade(engine, &rest),
        "remove" => remove(engine, &rest),
        "newsem" => {
            engine.add_semester();
            let name = &engine.semesters()[engine.semesters().len() - 1].name;
            println!("✓ Added {name}");
        }
        "clear" => clear(engine, &rest),
        "reset" => {
            engine.reset_all();
            println!("✓ All semesters cleared (undo to restore)");
        }
        "undo" => {
            if engine.undo() {
                println!("✓ Undone");
            } else {
                println!("Nothing to undo");
            }
        }
        "catalog" => catalog(store, &rest),
        "save" => save(engine, &rest),
        other => println!("Unknown command '{other}'. Type 'help' for commands."),
    }
}

fn show(engine: &GpaEngine) {
    for (index, semester) in engine.semesters().iter().enumerate() {
        println!("{} (#{})", semester.name, index + 1);
        if semester.courses.is_empty() {
            println!("  (no courses)");
        } else {
            for (ci, course) in semester.courses.iter().enumerate() {
                println!(
                    "  {:>2}. {:<8} {:<32} {:>5} cr  {}",
                    ci + 1,
                    course.code,
                    course.title,
                    course.credit,
                    course.grade
                );
            }
        }
        println!("  GPA: {}", format_gpa(engine.semester_gpa(index)));
    }
    println!("Overall GPA: {}", format_gpa(engine.overall_gpa()));
    if engine.undo_depth() > 0 {
        println!("({} undoable operation(s) on the stack)", engine.undo_depth());
    }
}

/// Parse a 1-based semester number against the current semester count
fn semester_index(engine: &GpaEngine, raw: &str) -> Option<usize> {
    let number: usize = raw.parse().ok()?;
    if number >= 1 && number <= engine.semesters().len() {
        Some(number - 1)
    } else {
        None
    }
}

/// Parse a 1-based course number against a semester's course count
fn course_index(semester: &Semester, raw: &str) -> Option<usize> {
    let number: usize = raw.parse().ok()?;
    if number >= 1 && number <= semester.course_count() {
        Some(number - 1)
    } else {
        None
    }
}

fn add(engine: &mut GpaEngine, rest: &[&str]) {
    let [sem, code, credit, title @ ..] = rest else {
        println!("Usage: add <sem> <code> <credit> <title...>");
        return;
    };
    if title.is_empty() {
        println!("Usage: add <sem> <code> <credit> <title...>");
        return;
    }

    let Some(semester_index) = semester_index(engine, sem) else {
        println!("✗ No such semester: {sem}");
        return;
    };

    // Codes are typed uppercase in course forms; mirror that here
    let code = code.to_uppercase();
    match validate_course_entry(&code, &title.join(" "), credit) {
        Ok(course) => {
            println!("✓ Added {} to {}", course.code, engine.semesters()[semester_index].name);
            engine.add_course(course, semester_index);
        }
        Err(reason) => println!("✗ {reason}"),
    }
}

fn pick(engine: &mut GpaEngine, store: &CatalogStore, rest: &[&str]) {
    let [sem, code] = rest else {
        println!("Usage: pick <sem> <code>");
        return;
    };

    let Some(semester_index) = semester_index(engine, sem) else {
        println!("✗ No such semester: {sem}");
        return;
    };

    let code = code.to_uppercase();
    let Some(record) = store.get_all().into_iter().find(|c| c.code == code) else {
        println!("✗ No catalog course with code {code}");
        return;
    };

    // Re-validate through the same gate as typed input; catalog records use
    // `name`/`credits` where enrollments use `title`/`credit`
    match validate_course_entry(&record.code, &record.name, &record.credits.to_string()) {
        Ok(course) => {
            println!("✓ Added {} to {}", course.code, engine.semesters()[semester_index].name);
            engine.add_course(course, semester_index);
        }
        Err(reason) => println!("✗ Catalog record is not enrollable: {reason}"),
    }
}

fn grade(engine: &mut GpaEngine, rest: &[&str]) {
    let [sem, course, grade] = rest else {
        println!("Usage: grade <sem> <course> <grade>");
        return;
    };

    let Some(si) = semester_index(engine, sem) else {
        println!("✗ No such semester: {sem}");
        return;
    };
    let Some(ci) = course_index(&engine.semesters()[si], course) else {
        println!("✗ No such course: {course}");
        return;
    };

    match grade.parse::<Grade>() {
        Ok(grade) => {
            engine.set_grade(si, ci, grade);
            println!("✓ Grade set to {grade}");
        }
        Err(reason) => println!("✗ {reason}"),
    }
}

fn remove(engine: &mut GpaEngine, rest: &[&str]) {
    let [sem, course] = rest else {
        println!("Usage: remove <sem> <course>");
        return;
    };

    let Some(si) = semester_index(engine, sem) else {
        println!("✗ No such semester: {sem}");
        return;
    };
    let Some(ci) = course_index(&engine.semesters()[si], course) else {
        println!("✗ No such course: {course}");
        return;
    };

    let code = engine.semesters()[si].courses[ci].code.clone();
    engine.remove_course(si, ci);
    println!("✓ Removed {code} (undo to restore)");
}

fn clear(engine: &mut GpaEngine, rest: &[&str]) {
    let [sem] = rest else {
        println!("Usage: clear <sem>");
        return;
    };

    let Some(si) = semester_index(engine, sem) else {
        println!("✗ No such semester: {sem}");
        return;
    };

    if engine.semesters()[si].courses.is_empty() {
        println!("{} is already empty", engine.semesters()[si].name);
    } else {
        engine.reset_semester(si);
        println!("✓ Cleared {} (undo to restore)", engine.semesters()[si].name);
    }
}

fn catalog(store: &CatalogStore, rest: &[&str]) {
    let query = rest.join(" ");
    let hits = store.search(&query);
    if hits.is_empty() {
        println!("No catalog courses match '{query}'");
        return;
    }
    for course in hits {
        println!(
            "  {:<8} {:<40} {:>5} cr  {} / {}",
            course.code, course.name, course.credits, course.university, course.country
        );
    }
}

fn save(engine: &GpaEngine, rest: &[&str]) {
    let [path] = rest else {
        println!("Usage: save <file>");
        return;
    };

    match serde_json::to_string_pretty(engine.semesters()) {
        Ok(raw) => match fs::write(path, raw) {
            Ok(()) => println!("✓ Plan saved to {path}"),
            Err(e) => println!("✗ Failed to write {path}: {e}"),
        },
        Err(e) => println!("✗ Failed to serialize plan: {e}"),
    }
}

fn load_plan(path: &Path) -> Result<Vec<Semester>, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("✗ Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&raw)
        .map_err(|e| format!("✗ {} is not a valid plan file: {e}", path.display()))
}
