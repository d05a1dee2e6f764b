//! Per-case report handle
//!
//! Every scenario row gets its own `CaseReport`, passed explicitly to the
//! code that runs it. Nothing is shared between rows.

use std::time::{SystemTime, UNIX_EPOCH};

use super::attachment::{console_line, Attachment, Channel};
use super::{Label, Parameter, Status};
use crate::common::Error;

/// Report context for one running case
#[derive(Debug)]
pub struct CaseReport {
    pub name: String,
    pub full_name: String,
    pub labels: Vec<Label>,
    pub parameters: Vec<Parameter>,
    pub attachments: Vec<Attachment>,
    pub start: u64,
    echo: bool,
}

impl CaseReport {
    /// Start a case report; `echo` controls whether recorded payloads are
    /// also printed to stdout
    pub fn new(name: impl Into<String>, full_name: impl Into<String>, echo: bool) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            labels: Vec::new(),
            parameters: Vec::new(),
            attachments: Vec::new(),
            start: now_millis(),
            echo,
        }
    }

    pub fn label(mut self, name: &str, value: impl Into<String>) -> Self {
        self.labels.push(Label {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn parameter(mut self, name: &str, value: impl ToString) -> Self {
        self.parameters.push(Parameter {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    /// Print a payload to the console and attach it under `title`
    pub fn record(&mut self, channel: Channel, title: &str, payload: &str) {
        if self.echo {
            println!("{}", console_line(channel, title, payload));
        }
        self.attachments.push(Attachment::json(title, payload));
    }

    /// Close the case with the outcome of running it
    pub fn finish(self, outcome: &crate::Result<()>) -> FinishedCase {
        let (status, message) = match outcome {
            Ok(()) => (Status::Passed, None),
            Err(e) => (status_for(e), Some(e.to_string())),
        };

        FinishedCase {
            stop: now_millis().max(self.start),
            report: self,
            status,
            message,
        }
    }
}

/// A case report with its final status
#[derive(Debug)]
pub struct FinishedCase {
    pub report: CaseReport,
    pub status: Status,
    pub message: Option<String>,
    pub stop: u64,
}

impl FinishedCase {
    pub fn passed(&self) -> bool {
        self.status == Status::Passed
    }
}

fn status_for(error: &Error) -> Status {
    if error.is_assertion() {
        Status::Failed
    } else {
        Status::Broken
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_insertion_order() {
        let mut report = CaseReport::new("GET /posts/1", "posts.fetch_valid", false);
        report.record(Channel::Request, "GET /posts/1", "Request sent");
        report.record(Channel::Response, "GET /posts/1", "{}");

        let contents: Vec<_> = report.attachments.iter().map(|a| a.content.as_str()).collect();
        assert_eq!(contents, vec!["Request sent", "{}"]);
    }

    #[test]
    fn test_finish_statuses() {
        let report = CaseReport::new("a", "a", false);
        let done = report.finish(&Ok(()));
        assert!(done.passed());
        assert!(done.message.is_none());
        assert!(done.stop >= done.report.start);

        let report = CaseReport::new("b", "b", false);
        let done = report.finish(&Err(Error::assertion("Expected status 200, got 500")));
        assert_eq!(done.status, Status::Failed);
        assert!(done.message.unwrap().contains("got 500"));

        let report = CaseReport::new("c", "c", false);
        let done = report.finish(&Err(Error::SchemaNotFound {
            name: "x.json".into(),
            known: String::new(),
        }));
        assert_eq!(done.status, Status::Broken);
    }

    #[test]
    fn test_labels_and_parameters() {
        let report = CaseReport::new("PATCH /posts/1", "posts.update_partial", false)
            .label("story", "Partial update post (PATCH)")
            .parameter("id", 1)
            .parameter("title", "patched title 1");

        assert_eq!(report.labels[0].value, "Partial update post (PATCH)");
        assert_eq!(report.parameters[0].value, "1");
        assert_eq!(report.parameters[1].name, "title");
    }
}
