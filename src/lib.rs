//! Posts API test suite
//!
//! Table-driven checks for a JSONPlaceholder-style posts resource: status
//! codes, JSON Schema conformance, and request/response payloads attached
//! to an Allure-compatible report.

pub mod api;
pub mod cli;
pub mod commands;
pub mod common;
pub mod mock;
pub mod report;
pub mod schema;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use testing::{Runner, Suite};
