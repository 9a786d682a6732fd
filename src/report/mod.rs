//! Report publisher.
//!
//! Posts an aggregated payload to the reporting endpoint. Only HTTP 200
//! counts as accepted; the endpoint has no other success contract.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderValue, USER_AGENT};
use serde::Serialize;
use thiserror::Error;

use crate::constants;

/// Errors from publishing a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("POST {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("report endpoint rejected the payload with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Sends report payloads to `<endpoint>/<path>`.
#[derive(Debug, Clone)]
pub struct ReportPublisher {
    http: reqwest::Client,
    endpoint: String,
}

impl ReportPublisher {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ReportError::Client)?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL for a report path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.endpoint, path.trim_start_matches('/'))
    }

    /// Serialize `payload` and POST it to `path` under the endpoint.
    ///
    /// Returns the response body on HTTP 200.
    pub async fn publish<T: Serialize>(&self, path: &str, payload: &T) -> Result<String, ReportError> {
        let url = self.url_for(path);
        let body = serde_json::to_vec(payload)?;

        tracing::info!(%url, bytes = body.len(), "publishing report");
        let response = self
            .http
            .post(&url)
            .header(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT))
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await
            .map_err(|source| ReportError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ReportError::Http { url, source })?;

        if status != StatusCode::OK {
            return Err(ReportError::Rejected {
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::info!(status = status.as_u16(), "report accepted");
        Ok(text)
    }
}
