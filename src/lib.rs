//! Shared library for `GpaCalculator`
//! Contains the catalog store, GPA engine, and supporting modules used by the CLI

pub mod core;
pub mod logger;

pub use self::core::config;
