//! Test report: console echo of payloads plus persistent Allure results
//!
//! Request and response payloads are attached to the `CaseReport` of the
//! case that produced them. `ReportWriter` turns finished cases into files.

mod attachment;
mod case;
mod writer;

use serde::Serialize;

pub use attachment::{console_line, Attachment, Channel, JSON_MEDIA_TYPE, UTF8_ENCODING};
pub use case::{CaseReport, FinishedCase};
pub use writer::ReportWriter;

/// Final status of a case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Passed,
    /// An assertion did not hold
    Failed,
    /// The case could not complete (transport, schema loading, IO)
    Broken,
}

/// Name/value label such as `story` or `severity`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

/// Scenario row input as shown in the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}
