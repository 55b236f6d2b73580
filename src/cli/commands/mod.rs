//! CLI command handlers

pub mod catalog;
pub mod config;
pub mod report;
pub mod session;
