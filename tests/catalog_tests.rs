//! Integration tests for the durable course catalog
//!
//! These run against the file backend in a temporary directory, exercising
//! the same persistence path the CLI uses.

use gpa_calculator::core::catalog::{default_catalog, CatalogImport, CatalogStore};
use gpa_calculator::core::models::CatalogCourse;
use gpa_calculator::core::storage::{FileStorage, Storage};
use std::path::Path;
use tempfile::TempDir;

fn file_store(dir: &Path) -> CatalogStore {
    CatalogStore::new(Box::new(FileStorage::new(dir.to_path_buf())))
}

fn course(code: &str, name: &str, credits: f64) -> CatalogCourse {
    CatalogCourse::new(
        code.to_string(),
        name.to_string(),
        credits,
        "Information Technology".to_string(),
        "University of Moratuwa".to_string(),
        "Sri Lanka".to_string(),
    )
}

/// Storage that always fails, for exercising the fail-soft contract
struct BrokenStorage;

impl Storage for BrokenStorage {
    fn read(&self, _key: &str) -> Result<Option<String>, String> {
        Err("disk on fire".to_string())
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), String> {
        Err("disk on fire".to_string())
    }

    fn remove(&self, _key: &str) -> Result<(), String> {
        Err("disk on fire".to_string())
    }
}

#[test]
fn test_catalog_persists_across_store_instances() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    {
        let store = file_store(temp.path());
        assert!(store.upsert(&course("CM1111", "Maths", 2.5)));
        assert!(store.upsert(&course("IN1101", "Programming", 4.0)));
    }

    // A fresh store over the same directory sees the same records in order
    let store = file_store(temp.path());
    let all = store.get_all();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].code, "CM1111");
    assert_eq!(all[1].code, "IN1101");
}

#[test]
fn test_seed_then_get_all_returns_defaults_in_order() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = file_store(temp.path());

    store.seed_if_empty(&default_catalog());

    let all = store.get_all();
    let codes: Vec<&str> = all.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["CM1111", "IN1101", "IN1311", "IN1321"]);
}

#[test]
fn test_seed_does_not_overwrite_existing_catalog() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = file_store(temp.path());

    assert!(store.upsert(&course("ZZ9999", "Custom Course", 1.0)));
    store.seed_if_empty(&default_catalog());

    let all = store.get_all();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].code, "ZZ9999");
}

#[test]
fn test_upsert_is_keyed_replace_on_disk() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = file_store(temp.path());

    assert!(store.upsert(&course("CM1111", "Maths", 2.5)));
    assert!(store.upsert(&course("CM1111", "Mathematics I", 2.5)));

    let all = store.get_all();
    assert_eq!(all.len(), 1, "one record per distinct code");
    assert_eq!(all[0].name, "Mathematics I");
}

#[test]
fn test_export_import_round_trip_through_file() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = file_store(temp.path());
    store.upsert(&course("CM1111", "Maths", 2.5));
    store.save_template(serde_json::json!({"name": "Year 1", "codes": ["CM1111"]}));

    let export = store.export();
    let blob = serde_json::to_string(&export).expect("export should serialize");

    // Import into a brand-new catalog directory
    let other_temp = TempDir::new().expect("Failed to create temp dir");
    let other = file_store(other_temp.path());
    let data: CatalogImport = serde_json::from_str(&blob).expect("export should deserialize");
    assert!(other.import(&data));

    assert_eq!(other.get_all(), store.get_all());
    assert_eq!(other.templates(), store.templates());
}

#[test]
fn test_import_without_templates_key_keeps_templates() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = file_store(temp.path());
    store.save_template(serde_json::json!({"name": "Year 1"}));

    let data: CatalogImport =
        serde_json::from_str(r#"{"courses": []}"#).expect("blob should deserialize");
    assert!(store.import(&data));

    assert!(store.get_all().is_empty());
    assert_eq!(store.templates().len(), 1);
}

#[test]
fn test_broken_storage_never_panics_and_degrades() {
    let store = CatalogStore::new(Box::new(BrokenStorage));

    assert!(store.get_all().is_empty());
    assert!(store.templates().is_empty());
    assert!(store.search("anything").is_empty());
    assert!(!store.upsert(&course("CM1111", "Maths", 2.5)));
    assert!(!store.delete("CM1111"));
    assert!(!store.save_template(serde_json::json!({})));
    assert!(!store.clear_all());

    // Seeding against unreadable storage is skipped, not an error
    store.seed_if_empty(&default_catalog());

    let export = store.export();
    assert!(export.courses.is_empty());
    assert!(export.templates.is_empty());
}

#[test]
fn test_stored_json_matches_documented_layout() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = file_store(temp.path());
    store.upsert(&course("CM1111", "Maths", 2.5));

    let raw = std::fs::read_to_string(temp.path().join("courses.json"))
        .expect("courses.json should exist");
    let parsed: serde_json::Value = serde_json::from_str(&raw).expect("should be JSON");

    let record = &parsed[0];
    assert_eq!(record["code"], "CM1111");
    assert_eq!(record["name"], "Maths");
    assert_eq!(record["credits"], 2.5);
    assert_eq!(record["degree"], "Information Technology");
    assert_eq!(record["university"], "University of Moratuwa");
    assert_eq!(record["country"], "Sri Lanka");
}
