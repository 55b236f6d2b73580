//! Core module: catalog persistence, GPA engine, and supporting logic

pub mod catalog;
pub mod config;
pub mod engine;
pub mod gpa;
pub mod models;
pub mod storage;
pub mod validate;

/// Returns the current version of the `GpaCalculator` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
