//! Catalog command handler
//!
//! CRUD, search, and export/import over the durable course catalog.

use crate::args::CatalogSubcommand;
use gpa_calculator::config::Config;
use gpa_calculator::core::catalog::{CatalogImport, CatalogStore};
use gpa_calculator::core::models::CatalogCourse;
use gpa_calculator::error;
use std::fs;
use std::path::{Path, PathBuf};

/// Dispatch catalog subcommands
pub fn run(subcommand: CatalogSubcommand, store: &CatalogStore, config: &Config) {
    match subcommand {
        CatalogSubcommand::List => handle_list(store),
        CatalogSubcommand::Search { query } => handle_search(store, &query),
        CatalogSubcommand::Add {
            code,
            name,
            credits,
            degree,
            university,
            country,
        } => handle_add(store, &code, &name, credits, &degree, &university, &country),
        CatalogSubcommand::Delete { code } => handle_delete(store, &code),
        CatalogSubcommand::Export { output } => handle_export(store, output.as_deref(), config),
        CatalogSubcommand::Import { input } => handle_import(store, &input),
    }
}

fn print_courses(courses: &[CatalogCourse]) {
    if courses.is_empty() {
        println!("No courses found.");
        return;
    }

    println!(
        "{:<8} {:<40} {:>7}  {:<28} {:<26} {}",
        "Code", "Name", "Credits", "Degree", "University", "Country"
    );
    for course in courses {
        println!(
            "{:<8} {:<40} {:>7}  {:<28} {:<26} {}",
            course.code, course.name, course.credits, course.degree, course.university, course.country
        );
    }
    println!("\n{} course(s)", courses.len());
}

fn handle_list(store: &CatalogStore) {
    print_courses(&store.get_all());
}

fn handle_search(store: &CatalogStore, query: &str) {
    print_courses(&store.search(query));
}

fn handle_add(
    store: &CatalogStore,
    code: &str,
    name: &str,
    credits: f64,
    degree: &str,
    university: &str,
    country: &str,
) {
    // Codes are stored uppercase, the way they are typed into course forms
    let record = CatalogCourse::new(
        code.trim().to_uppercase(),
        name.to_string(),
        credits,
        degree.to_string(),
        university.to_string(),
        country.to_string(),
    );

    if store.upsert(&record) {
        println!("✓ Saved {} to the catalog", record.code);
    } else {
        eprintln!("✗ Course not saved: every field must be non-empty and credits positive");
        std::process::exit(1);
    }
}

fn handle_delete(store: &CatalogStore, code: &str) {
    if store.delete(code) {
        println!("✓ Deleted {code} from the catalog");
    } else {
        eprintln!("✗ Failed to delete {code}");
        std::process::exit(1);
    }
}

fn handle_export(store: &CatalogStore, output: Option<&Path>, config: &Config) {
    let export = store.export();

    let path: PathBuf = output.map_or_else(
        || {
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            PathBuf::from(&config.paths.exports_dir).join(format!("catalog-{stamp}.json"))
        },
        Path::to_path_buf,
    );

    if let Err(e) = write_export(&export, &path) {
        error!("Catalog export failed: {e}");
        eprintln!("✗ Failed to export catalog: {e}");
        std::process::exit(1);
    }
    println!(
        "✓ Exported {} course(s) and {} template(s) to {}",
        export.courses.len(),
        export.templates.len(),
        path.display()
    );
}

fn write_export(
    export: &gpa_calculator::core::catalog::CatalogExport,
    path: &Path,
) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
    }
    let raw = serde_json::to_string_pretty(export).map_err(|e| e.to_string())?;
    fs::write(path, raw).map_err(|e| format!("cannot write {}: {e}", path.display()))
}

fn handle_import(store: &CatalogStore, input: &Path) {
    let raw = match fs::read_to_string(input) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("✗ Failed to read {}: {e}", input.display());
            std::process::exit(1);
        }
    };

    let data: CatalogImport = match serde_json::from_str(&raw) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("✗ {} is not a valid catalog export: {e}", input.display());
            std::process::exit(1);
        }
    };

    if store.import(&data) {
        println!(
            "✓ Imported catalog from {} ({} course(s) now stored)",
            input.display(),
            store.len()
        );
    } else {
        eprintln!("✗ Import failed while writing to storage");
        std::process::exit(1);
    }
}
