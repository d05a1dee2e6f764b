//! Allure-compatible results directory
//!
//! Each finished case becomes `<uuid>-result.json` plus one
//! `<uuid>-attachment.json` file per recorded payload, which is the layout
//! `allure generate` reads.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::case::FinishedCase;
use super::{Label, Parameter, Status};
use crate::common::{Error, Result};

/// Writes finished cases into a results directory
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AllureResult<'a> {
    uuid: String,
    history_id: String,
    name: &'a str,
    full_name: &'a str,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    status_details: Option<StatusDetails<'a>>,
    stage: &'static str,
    start: u64,
    stop: u64,
    labels: &'a [Label],
    parameters: &'a [Parameter],
    attachments: Vec<AllureAttachment<'a>>,
}

#[derive(Serialize)]
struct StatusDetails<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct AllureAttachment<'a> {
    name: &'a str,
    source: String,
    #[serde(rename = "type")]
    media_type: &'a str,
}

impl ReportWriter {
    /// Writer for `dir`; the directory is created when the first case is written
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a finished case, returning the path of its result file
    pub fn write_case(&self, case: &FinishedCase) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir).map_err(|e| Error::file_write(&self.dir, e))?;

        let report = &case.report;
        let mut attachments = Vec::with_capacity(report.attachments.len());
        for attachment in &report.attachments {
            let source = format!("{}-attachment.json", Uuid::new_v4());
            let path = self.dir.join(&source);
            std::fs::write(&path, attachment.content.as_bytes()).map_err(|e| Error::file_write(&path, e))?;
            attachments.push(AllureAttachment {
                name: &attachment.title,
                source,
                media_type: attachment.media_type,
            });
        }

        let uuid = Uuid::new_v4().to_string();
        let result = AllureResult {
            history_id: history_id(&report.full_name, &report.parameters),
            name: &report.name,
            full_name: &report.full_name,
            status: case.status,
            status_details: case
                .message
                .as_deref()
                .map(|message| StatusDetails { message }),
            stage: "finished",
            start: report.start,
            stop: case.stop,
            labels: &report.labels,
            parameters: &report.parameters,
            attachments,
            uuid,
        };

        let path = self.dir.join(format!("{}-result.json", result.uuid));
        std::fs::write(&path, serde_json::to_vec_pretty(&result)?).map_err(|e| Error::file_write(&path, e))?;
        debug!(path = %path.display(), status = ?case.status, "wrote case result");

        Ok(path)
    }
}

/// Stable across runs so Allure can track a row's history
fn history_id(full_name: &str, parameters: &[Parameter]) -> String {
    let values: Vec<&str> = parameters.iter().map(|p| p.value.as_str()).collect();
    format!("{}[{}]", full_name, values.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{CaseReport, Channel};
    use serde_json::Value;

    fn finished(outcome: crate::Result<()>) -> FinishedCase {
        let mut report = CaseReport::new("GET /posts/9999", "posts.fetch_missing", false)
            .label("story", "Get post by invalid ID")
            .label("severity", "critical")
            .parameter("id", 9999);
        report.record(Channel::Request, "GET /posts/9999", "Request sent for invalid ID");
        report.record(Channel::Response, "GET /posts/9999", "{}");
        report.finish(&outcome)
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_writes_result_and_attachments() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path().join("allure-results"));

        let path = writer.write_case(&finished(Ok(()))).unwrap();
        let result = read_json(&path);

        assert_eq!(result["status"], "passed");
        assert_eq!(result["stage"], "finished");
        assert_eq!(result["fullName"], "posts.fetch_missing");
        assert_eq!(result["historyId"], "posts.fetch_missing[9999]");
        assert!(result.get("statusDetails").is_none());
        assert_eq!(result["labels"][0]["name"], "story");
        assert_eq!(result["parameters"][0]["value"], "9999");

        let attachments = result["attachments"].as_array().unwrap();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0]["type"], "application/json");
        let source = attachments[1]["source"].as_str().unwrap();
        let content = std::fs::read_to_string(writer.dir().join(source)).unwrap();
        assert_eq!(content, "{}");

        // One result plus two attachments.
        assert_eq!(std::fs::read_dir(writer.dir()).unwrap().count(), 3);
    }

    #[test]
    fn test_failure_details() {
        let dir = tempfile::tempdir().unwrap();
        let writer = ReportWriter::new(dir.path());

        let path = writer
            .write_case(&finished(Err(Error::assertion("Expected status 404, got 200"))))
            .unwrap();
        let result = read_json(&path);

        assert_eq!(result["status"], "failed");
        assert!(result["statusDetails"]["message"]
            .as_str()
            .unwrap()
            .contains("Expected status 404, got 200"));
    }

    #[test]
    fn test_unwritable_results_dir() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let writer = ReportWriter::new(blocker.join("allure-results"));
        let err = writer.write_case(&finished(Ok(()))).unwrap_err();

        assert!(matches!(err, Error::FileWrite { .. }));
        assert!(err.to_string().contains("allure-results"));
    }
}
