//! Durable course catalog
//!
//! The catalog is a convenience cache, not the source of truth for
//! enrollments: every storage failure degrades to a no-op plus an empty or
//! `false` result, and a diagnostic log line. Nothing in here panics or
//! propagates an error to the caller.

use crate::core::models::CatalogCourse;
use crate::core::storage::Storage;
use crate::{debug, error, info};
use serde::{Deserialize, Serialize};

/// Storage key holding the JSON array of catalog courses
const COURSES_KEY: &str = "courses";

/// Storage key holding the JSON array of saved templates
const TEMPLATES_KEY: &str = "templates";

/// Snapshot of the full catalog produced by [`CatalogStore::export`]
#[derive(Debug, Clone, Serialize)]
pub struct CatalogExport {
    /// All stored catalog courses
    pub courses: Vec<CatalogCourse>,
    /// All stored template blobs
    pub templates: Vec<serde_json::Value>,
    /// RFC 3339 timestamp taken at export time
    pub exported_at: String,
}

/// Payload accepted by [`CatalogStore::import`]
///
/// Each list is replaced wholesale when present; a missing key leaves the
/// corresponding stored list untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogImport {
    /// Replacement course list, if any
    #[serde(default)]
    pub courses: Option<Vec<CatalogCourse>>,
    /// Replacement template list, if any
    #[serde(default)]
    pub templates: Option<Vec<serde_json::Value>>,
}

/// Durable CRUD + search over catalog courses, keyed by course code
///
/// Constructed once at startup with an injected [`Storage`] backend and
/// passed by reference to whoever needs it.
pub struct CatalogStore {
    storage: Box<dyn Storage>,
}

impl CatalogStore {
    /// Create a store over the given storage backend
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        Self { storage }
    }

    /// All stored courses in storage order
    ///
    /// Returns an empty list on any read or deserialization failure; the
    /// failure is logged, never propagated.
    #[must_use]
    pub fn get_all(&self) -> Vec<CatalogCourse> {
        match self.storage.read(COURSES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(courses) => courses,
                Err(e) => {
                    error!("Error loading courses: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!("Error loading courses: {e}");
                Vec::new()
            }
        }
    }

    /// Number of stored courses
    #[must_use]
    pub fn len(&self) -> usize {
        self.get_all().len()
    }

    /// Whether the catalog currently holds no courses
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.get_all().is_empty()
    }

    /// Insert or replace a course, keyed by its `code`.
    ///
    /// This is the only write path for individual courses: the record is
    /// validated whole and either replaces the existing record with the same
    /// code or is appended. Returns `false` without writing anything if the
    /// record is incomplete or if persisting fails.
    pub fn upsert(&self, record: &CatalogCourse) -> bool {
        if !record.is_valid_for_storage() {
            info!(
                "Course {} not saved: missing required metadata (degree, university, country)",
                record.code
            );
            return false;
        }

        let mut courses = self.get_all();
        if let Some(existing) = courses.iter_mut().find(|c| c.code == record.code) {
            *existing = record.clone();
            debug!("Updated existing course in storage: {}", record.code);
        } else {
            courses.push(record.clone());
            debug!("Added new course to storage: {}", record.code);
        }

        self.persist_courses(&courses)
    }

    /// Remove any course matching `code`.
    ///
    /// Deleting an absent code is a no-op that still succeeds; `false` is
    /// returned only when the storage write fails.
    pub fn delete(&self, code: &str) -> bool {
        let mut courses = self.get_all();
        courses.retain(|c| c.code != code);
        let ok = self.persist_courses(&courses);
        if ok {
            debug!("Deleted course from storage: {code}");
        }
        ok
    }

    /// Courses whose code, name, degree, university, or country contains the
    /// query, case-insensitively. An empty query returns everything.
    /// Storage order is preserved.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<CatalogCourse> {
        let courses = self.get_all();
        if query.is_empty() {
            return courses;
        }

        let lower_query = query.to_lowercase();
        courses
            .into_iter()
            .filter(|c| c.matches(&lower_query))
            .collect()
    }

    /// Write the seed catalog on first-ever use.
    ///
    /// Seeds only when the courses key has never been written. A
    /// present-but-empty list means the user cleared their catalog and must
    /// not be reseeded.
    pub fn seed_if_empty(&self, defaults: &[CatalogCourse]) {
        match self.storage.read(COURSES_KEY) {
            Ok(None) => {
                if self.persist_courses(defaults) {
                    info!("Seeded catalog with {} example courses", defaults.len());
                }
            }
            Ok(Some(_)) => {}
            Err(e) => {
                error!("Skipping catalog seed, storage unreadable: {e}");
            }
        }
    }

    /// All stored template blobs, empty on any failure
    #[must_use]
    pub fn templates(&self) -> Vec<serde_json::Value> {
        match self.storage.read(TEMPLATES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(templates) => templates,
                Err(e) => {
                    error!("Error loading templates: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!("Error loading templates: {e}");
                Vec::new()
            }
        }
    }

    /// Append a template blob; returns `false` if persisting fails
    pub fn save_template(&self, template: serde_json::Value) -> bool {
        let mut templates = self.templates();
        templates.push(template);
        self.persist_templates(&templates)
    }

    /// Snapshot both lists together with an export timestamp
    #[must_use]
    pub fn export(&self) -> CatalogExport {
        CatalogExport {
            courses: self.get_all(),
            templates: self.templates(),
            exported_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Replace stored lists from an import payload.
    ///
    /// Courses and templates are replaced independently; a list missing from
    /// the payload is left untouched. Returns `false` if any attempted write
    /// fails.
    pub fn import(&self, data: &CatalogImport) -> bool {
        let mut ok = true;
        if let Some(courses) = &data.courses {
            ok &= self.persist_courses(courses);
        }
        if let Some(templates) = &data.templates {
            ok &= self.persist_templates(templates);
        }
        ok
    }

    /// Remove the stored course list entirely
    pub fn clear_courses(&self) -> bool {
        match self.storage.remove(COURSES_KEY) {
            Ok(()) => {
                info!("Cleared courses storage");
                true
            }
            Err(e) => {
                error!("Error clearing courses: {e}");
                false
            }
        }
    }

    /// Remove both stored lists entirely
    pub fn clear_all(&self) -> bool {
        let courses_ok = self.clear_courses();
        let templates_ok = match self.storage.remove(TEMPLATES_KEY) {
            Ok(()) => true,
            Err(e) => {
                error!("Error clearing templates: {e}");
                false
            }
        };
        courses_ok && templates_ok
    }

    fn persist_courses(&self, courses: &[CatalogCourse]) -> bool {
        match serde_json::to_string_pretty(courses) {
            Ok(raw) => match self.storage.write(COURSES_KEY, &raw) {
                Ok(()) => true,
                Err(e) => {
                    error!("Error saving courses: {e}");
                    false
                }
            },
            Err(e) => {
                error!("Error serializing courses: {e}");
                false
            }
        }
    }

    fn persist_templates(&self, templates: &[serde_json::Value]) -> bool {
        match serde_json::to_string_pretty(templates) {
            Ok(raw) => match self.storage.write(TEMPLATES_KEY, &raw) {
                Ok(()) => true,
                Err(e) => {
                    error!("Error saving templates: {e}");
                    false
                }
            },
            Err(e) => {
                error!("Error serializing templates: {e}");
                false
            }
        }
    }
}

/// Built-in seed catalog used on first run
#[must_use]
pub fn default_catalog() -> Vec<CatalogCourse> {
    let make = |code: &str, name: &str, credits: f64| {
        CatalogCourse::new(
            code.to_string(),
            name.to_string(),
            credits,
            "Information Technology".to_string(),
            "University of Moratuwa".to_string(),
            "Sri Lanka".to_string(),
        )
    };

    vec![
        make("CM1111", "Fundamentals of Mathematics", 2.5),
        make("IN1101", "Programming Fundamentals", 4.0),
        make("IN1311", "Digital System Design", 3.0),
        make("IN1321", "Computer Organization", 2.5),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStorage;

    fn store() -> CatalogStore {
        CatalogStore::new(Box::new(MemoryStorage::new()))
    }

    fn sample(code: &str, name: &str) -> CatalogCourse {
        CatalogCourse::new(
            code.to_string(),
            name.to_string(),
            3.0,
            "Information Technology".to_string(),
            "University of Moratuwa".to_string(),
            "Sri Lanka".to_string(),
        )
    }

    #[test]
    fn test_get_all_on_fresh_store_is_empty() {
        assert!(store().get_all().is_empty());
        assert!(store().is_empty());
    }

    #[test]
    fn test_upsert_appends_then_replaces_by_code() {
        let store = store();

        assert!(store.upsert(&sample("CM1111", "Maths")));
        assert!(store.upsert(&sample("IN1101", "Programming")));
        assert_eq!(store.len(), 2);

        // Same code again: keyed replace, not append
        assert!(store.upsert(&sample("CM1111", "Mathematics I")));
        let all = store.get_all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].code, "CM1111");
        assert_eq!(all[0].name, "Mathematics I");
    }

    #[test]
    fn test_upsert_rejects_partial_record_without_writing() {
        let store = store();
        let mut incomplete = sample("CM1111", "Maths");
        incomplete.country = String::new();

        assert!(!store.upsert(&incomplete));
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_delete_absent_code_still_succeeds() {
        let store = store();
        assert!(store.upsert(&sample("CM1111", "Maths")));

        assert!(store.delete("ZZ9999"));
        assert_eq!(store.len(), 1);

        assert!(store.delete("CM1111"));
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_search_empty_query_matches_get_all() {
        let store = store();
        store.upsert(&sample("CM1111", "Maths"));
        store.upsert(&sample("IN1101", "Programming"));

        assert_eq!(store.search(""), store.get_all());
    }

    #[test]
    fn test_search_filters_across_fields_preserving_order() {
        let store = store();
        store.upsert(&sample("CM1111", "Maths"));
        store.upsert(&sample("IN1101", "Programming"));
        store.upsert(&sample("IN1311", "Digital Design"));

        let hits = store.search("in1");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].code, "IN1101");
        assert_eq!(hits[1].code, "IN1311");

        // Every record shares the university metadata
        assert_eq!(store.search("MORATUWA").len(), 3);
        assert!(store.search("physics").is_empty());
    }

    #[test]
    fn test_seed_runs_once_per_storage_lifetime() {
        let store = store();
        store.seed_if_empty(&default_catalog());

        let all = store.get_all();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].code, "CM1111");
        assert_eq!(all[3].code, "IN1321");

        // User clears their catalog; a later seed attempt must not refill it
        for course in &all {
            store.delete(&course.code);
        }
        store.seed_if_empty(&default_catalog());
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_templates_append_and_read_back() {
        let store = store();
        assert!(store.templates().is_empty());

        assert!(store.save_template(serde_json::json!({"name": "Year 1"})));
        assert!(store.save_template(serde_json::json!({"name": "Year 2"})));

        let templates = store.templates();
        assert_eq!(templates.len(), 2);
        assert_eq!(templates[0]["name"], "Year 1");
    }

    #[test]
    fn test_export_carries_both_lists_and_timestamp() {
        let store = store();
        store.upsert(&sample("CM1111", "Maths"));
        store.save_template(serde_json::json!({"name": "Year 1"}));

        let export = store.export();
        assert_eq!(export.courses.len(), 1);
        assert_eq!(export.templates.len(), 1);
        assert!(!export.exported_at.is_empty());
    }

    #[test]
    fn test_import_replaces_only_present_lists() {
        let store = store();
        store.upsert(&sample("CM1111", "Maths"));
        store.save_template(serde_json::json!({"name": "Year 1"}));

        // Courses only: templates stay untouched
        let data = CatalogImport {
            courses: Some(vec![sample("IN1101", "Programming")]),
            templates: None,
        };
        assert!(store.import(&data));

        let all = store.get_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].code, "IN1101");
        assert_eq!(store.templates().len(), 1);
    }

    #[test]
    fn test_clear_all_removes_both_keys() {
        let store = store();
        store.upsert(&sample("CM1111", "Maths"));
        store.save_template(serde_json::json!({"name": "Year 1"}));

        assert!(store.clear_all());
        assert!(store.get_all().is_empty());
        assert!(store.templates().is_empty());
    }

    #[test]
    fn test_corrupt_storage_degrades_to_empty() {
        let storage = MemoryStorage::new();
        storage
            .write("courses", "this is not json")
            .expect("write should succeed");
        let store = CatalogStore::new(Box::new(storage));

        assert!(store.get_all().is_empty());
        // A subsequent upsert rewrites the key from a clean slate
        assert!(store.upsert(&sample("CM1111", "Maths")));
        assert_eq!(store.len(), 1);
    }
}
