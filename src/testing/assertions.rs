//! Response assertions
//!
//! Each check returns `Error::TestAssertion` with a message that names
//! both the expectation and what the server actually sent.

use std::fmt::{self, Display};

use serde_json::Value;

use crate::api::ApiResponse;
use crate::common::{Error, Result};
use crate::schema::SchemaRegistry;

/// Accepted status codes for an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusExpectation {
    Exact(u16),
    AnyOf(&'static [u16]),
}

impl StatusExpectation {
    pub fn matches(self, status: u16) -> bool {
        match self {
            StatusExpectation::Exact(expected) => status == expected,
            StatusExpectation::AnyOf(accepted) => accepted.contains(&status),
        }
    }
}

impl Display for StatusExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusExpectation::Exact(expected) => write!(f, "{expected}"),
            StatusExpectation::AnyOf(accepted) => {
                let codes: Vec<String> = accepted.iter().map(u16::to_string).collect();
                write!(f, "one of {}", codes.join(", "))
            }
        }
    }
}

pub fn expect_status(response: &ApiResponse, expected: StatusExpectation) -> Result<()> {
    if expected.matches(response.status) {
        return Ok(());
    }

    Err(Error::assertion(format!(
        "Expected status {}, got {}",
        expected, response.status
    )))
}

/// Contract for "not found" bodies: the server answers with `{}`
///
/// A body that is not a JSON object at all means the contract itself no
/// longer holds, which is reported differently from a populated object.
pub fn expect_empty_object(response: &ApiResponse) -> Result<()> {
    match &response.json {
        Some(Value::Object(map)) if map.is_empty() => Ok(()),
        Some(Value::Object(map)) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            Err(Error::assertion(format!(
                "Response JSON is not empty: {} key(s) {:?}",
                map.len(),
                keys
            )))
        }
        Some(other) => Err(Error::assertion(format!(
            "Empty-object contract broken: expected a JSON object, got {}",
            json_type(other)
        ))),
        None => Err(Error::assertion(format!(
            "Empty-object contract broken: body is not JSON: '{}'",
            truncate(&response.text, 200)
        ))),
    }
}

pub fn expect_schema(schemas: &SchemaRegistry, name: &str, response: &ApiResponse) -> Result<()> {
    let body = response.json.as_ref().ok_or_else(|| {
        Error::assertion(format!(
            "Expected a JSON body matching '{}', got '{}'",
            name,
            truncate(&response.text, 200)
        ))
    })?;

    schemas.check(name, body)
}

/// Assert a top-level field echoes the value that was sent
pub fn expect_field(response: &ApiResponse, name: &str, expected: &Value) -> Result<()> {
    match response.field(name) {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(Error::assertion(format!(
            "Field '{}': expected {}, got {}",
            name, expected, actual
        ))),
        None => Err(Error::assertion(format!(
            "Field '{}' missing from response",
            name
        ))),
    }
}

/// Assert the server assigned a positive integer id, returning it
pub fn expect_assigned_id(response: &ApiResponse) -> Result<u64> {
    match response.field("id").and_then(Value::as_u64) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(Error::assertion(format!(
            "Expected a newly assigned id, got {}",
            response.field("id").map(Value::to_string).unwrap_or_else(|| "none".to_string())
        ))),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
