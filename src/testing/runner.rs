//! Test runner implementation
//!
//! Executes every row of a suite as an independent case: build the
//! request, record it, send it, record the response, then assert.

use colored::Colorize;
use serde_json::json;
use tracing::{info, warn};

use crate::api::{ApiResponse, PostsClient, RequestInput};
use crate::common::Result;
use crate::report::{CaseReport, Channel, ReportWriter, Status};
use crate::schema::{SchemaRegistry, POST_SCHEMA, POST_UPDATE_SCHEMA};

use super::assertions::{
    expect_assigned_id, expect_empty_object, expect_field, expect_schema, expect_status,
    StatusExpectation,
};
use super::config::{ScenarioRow, Suite, TestCase};

/// Result of running a single row
#[derive(Debug)]
pub struct CaseResult {
    pub name: String,
    pub status: Status,
    pub http_status: Option<u16>,
    pub duration_ms: Option<u128>,
    pub error: Option<String>,
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.status == Status::Passed
    }
}

/// Result of a suite run
#[derive(Debug)]
pub struct SuiteResult {
    pub name: String,
    pub cases: Vec<CaseResult>,
}

impl SuiteResult {
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Output options for a run
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Print recorded payloads to stdout
    pub echo: bool,
    /// Print status and timing for every case
    pub verbose: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            echo: true,
            verbose: false,
        }
    }
}

/// Runs suites against one server
pub struct Runner<'a> {
    client: &'a PostsClient,
    schemas: &'a SchemaRegistry,
    writer: Option<&'a ReportWriter>,
    options: RunOptions,
}

impl<'a> Runner<'a> {
    pub fn new(
        client: &'a PostsClient,
        schemas: &'a SchemaRegistry,
        writer: Option<&'a ReportWriter>,
        options: RunOptions,
    ) -> Self {
        Self {
            client,
            schemas,
            writer,
            options,
        }
    }

    /// Run every row of every case in order
    ///
    /// A failing case never stops the run; only report IO errors do.
    pub async fn run_suite(&self, suite: &Suite) -> Result<SuiteResult> {
        info!(suite = %suite.name, target = %self.client.base_url(), "starting suite");

        println!(
            "\n{} {}",
            "Running Suite:".blue().bold(),
            suite.name.white().bold()
        );
        if let Some(desc) = &suite.description {
            println!("  {}", desc.dimmed());
        }
        if self.options.verbose {
            println!("  Target: {}", self.client.base_url().dimmed());
        }

        let mut cases = Vec::new();
        for case in &suite.cases {
            println!("\n{}", format!("{}:", case.story()).cyan());
            for row in case.operation.rows() {
                cases.push(self.run_row(suite, case, &row).await?);
            }
        }

        let result = SuiteResult {
            name: suite.name.clone(),
            cases,
        };
        print_summary(&result);
        info!(
            suite = %result.name,
            passed = result.passed(),
            failed = result.failed(),
            "suite finished"
        );

        Ok(result)
    }

    /// Run one row as an independent case with its own report handle
    pub async fn run_row(&self, suite: &Suite, case: &TestCase, row: &ScenarioRow) -> Result<CaseResult> {
        let request = row.request()?;
        let title = request.title();

        let mut report = CaseReport::new(
            title.clone(),
            format!("{}::{}", suite.name, case.operation.name()),
            self.options.echo,
        )
        .label("epic", suite.epic.as_str())
        .label("feature", suite.feature.as_str())
        .label("story", case.story())
        .label("severity", case.severity().to_string())
        .label("suite", suite.name.as_str());
        for (name, value) in row.parameters() {
            report = report.parameter(name, value);
        }

        let (outcome, exchange) = match self.exchange(row, &request, &mut report).await {
            Ok(response) => (
                check_row(self.schemas, row, &response),
                Some((response.status, response.duration_ms)),
            ),
            Err(e) => (Err(e), None),
        };

        let finished = report.finish(&outcome);
        if let Some(writer) = self.writer {
            writer.write_case(&finished)?;
        }

        let result = CaseResult {
            name: title,
            status: finished.status,
            http_status: exchange.map(|(status, _)| status),
            duration_ms: exchange.map(|(_, ms)| ms),
            error: finished.message,
        };
        self.print_case(&result);

        Ok(result)
    }

    async fn exchange(
        &self,
        row: &ScenarioRow,
        request: &RequestInput,
        report: &mut CaseReport,
    ) -> Result<ApiResponse> {
        let title = request.title();
        report.record(
            Channel::Request,
            &title,
            request.body.as_deref().unwrap_or(row.request_note()),
        );

        let response = self.client.send(request).await?;
        report.record(Channel::Response, &title, &response.pretty_body());

        Ok(response)
    }

    fn print_case(&self, result: &CaseResult) {
        let timing = match (self.options.verbose, result.http_status, result.duration_ms) {
            (true, Some(status), Some(ms)) => format!(" ({status}, {ms} ms)").dimmed().to_string(),
            _ => String::new(),
        };

        match result.status {
            Status::Passed => println!("  {} {}{}", "✓".green(), result.name, timing),
            Status::Failed | Status::Broken => {
                let error = result.error.as_deref().unwrap_or("unknown error");
                println!("  {} {}{}: {}", "✗".red(), result.name, timing, error);
                if result.status == Status::Broken {
                    warn!(case = %result.name, error, "case broken");
                }
            }
        }
    }
}

/// Assertions for one row, by operation
fn check_row(schemas: &SchemaRegistry, row: &ScenarioRow, response: &ApiResponse) -> Result<()> {
    match row {
        ScenarioRow::FetchValid(id) => {
            expect_status(response, StatusExpectation::Exact(200))?;
            expect_schema(schemas, POST_SCHEMA, response)?;
            expect_field(response, "id", &json!(id))
        }
        ScenarioRow::FetchMissing(_) => {
            expect_status(response, StatusExpectation::Exact(404))?;
            expect_empty_object(response)
        }
        ScenarioRow::Create(post) => {
            expect_status(response, StatusExpectation::Exact(201))?;
            expect_schema(schemas, POST_SCHEMA, response)?;
            expect_assigned_id(response)?;
            expect_field(response, "title", &json!(post.title))?;
            expect_field(response, "body", &json!(post.body))?;
            expect_field(response, "userId", &json!(post.user_id))
        }
        ScenarioRow::Update(update) => {
            expect_status(response, StatusExpectation::Exact(200))?;
            expect_schema(schemas, POST_UPDATE_SCHEMA, response)?;
            expect_field(response, "title", &json!(update.title))?;
            expect_field(response, "body", &json!(update.body))
        }
        ScenarioRow::Patch { patch, .. } => {
            expect_status(response, StatusExpectation::Exact(200))?;
            expect_schema(schemas, POST_UPDATE_SCHEMA, response)?;
            expect_field(response, "title", &json!(patch.title))
        }
        ScenarioRow::Delete(_) => expect_status(response, StatusExpectation::AnyOf(&[200, 204])),
    }
}

fn print_summary(result: &SuiteResult) {
    if result.all_passed() {
        println!(
            "\n{} {}\n",
            "✓".green().bold(),
            format!("All {} cases passed", result.total()).green().bold()
        );
    } else {
        println!(
            "\n{} {}\n",
            "✗".red().bold(),
            format!("{} of {} cases failed", result.failed(), result.total())
                .red()
                .bold()
        );
    }
}
