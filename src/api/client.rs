//! HTTP client for the posts resource
//!
//! Wraps reqwest with the configured timeouts and JSON headers and turns
//! each exchange into an `ApiResponse`.

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use std::time::Instant;
use tracing::debug;

use crate::common::config::Timeouts;
use crate::common::{Error, Result};

use super::request::RequestInput;
use super::response::ApiResponse;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// HTTP client bound to the base URL of the server under test
#[derive(Debug, Clone)]
pub struct PostsClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostsClient {
    /// Create a client for `base_url` with the configured timeouts
    pub fn new(base_url: &str, timeouts: &Timeouts) -> Result<Self> {
        let parsed = reqwest::Url::parse(base_url).map_err(|e| Error::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(timeouts.request())
            .connect_timeout(timeouts.connect())
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a resource path; any path prefix of the base URL is kept
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and collect the full response
    ///
    /// Non-2xx statuses are not errors here; only transport failures are.
    pub async fn send(&self, request: &RequestInput) -> Result<ApiResponse> {
        let url = self.url_for(&request.path);
        let mut req_builder = self
            .http
            .request(request.method.into(), &url)
            .header(ACCEPT, HeaderValue::from_static("application/json"));

        if request.method.has_body() {
            req_builder = req_builder
                .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
                .body(request.body.clone().unwrap_or_default());
        }

        debug!(method = %request.method, url = %url, "sending request");

        let started = Instant::now();
        let response = req_builder.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let elapsed = started.elapsed().as_millis();

        debug!(status, elapsed_ms = elapsed as u64, bytes = text.len(), "received response");

        Ok(ApiResponse::new(status, elapsed, text))
    }
}
