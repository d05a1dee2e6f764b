//! Posts API test runner
//!
//! Suites are tables of scenario rows. Each row is sent through
//! `PostsClient`, its request and response are attached to a per-case
//! report, and the response is checked against status, schema and field
//! expectations.

mod assertions;
mod config;
mod runner;

pub use assertions::*;
pub use config::*;
pub use runner::{CaseResult, RunOptions, Runner, SuiteResult};
