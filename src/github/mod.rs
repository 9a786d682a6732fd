//! GitHub REST client.
//!
//! Thin typed wrapper over `reqwest`: every response is decoded into the
//! records in [`crate::models::github`] at this boundary. Requests are issued
//! one at a time and never retried.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::constants;
use crate::models::RepoRef;
use crate::models::github::{ApiCommit, ApiPullRequest, ApiReviewComment};

/// Longest response body quoted in an error message.
const ERROR_BODY_PREVIEW_LEN: usize = 500;

/// Errors from GitHub API calls.
#[derive(Error, Debug)]
pub enum GithubError {
    #[error("invalid GitHub token: {0}")]
    InvalidToken(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{what}: request failed: {source}")]
    Http {
        what: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{what}: GitHub returned HTTP {status}: {body}")]
    Status {
        what: String,
        status: u16,
        body: String,
    },

    #[error("{what}: unexpected response shape: {source}")]
    Decode {
        what: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Authenticated GitHub REST client bound to one API host.
#[derive(Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    api_base: String,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl GithubClient {
    /// Build a client that sends `token` as a bearer credential to `api_base`.
    pub fn new(api_base: &str, token: &str, timeout: Duration) -> Result<Self, GithubError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(constants::USER_AGENT));
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "x-github-api-version",
            HeaderValue::from_static(constants::GITHUB_API_VERSION),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .map_err(|e| GithubError::InvalidToken(e.to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(GithubError::Client)?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        })
    }

    fn repo_url(&self, repo: &RepoRef, rest: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base,
            repo.owner,
            repo.name,
            rest.trim_start_matches('/')
        )
    }

    /// Send a request and return the body text of a successful response.
    async fn send_text(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<String, GithubError> {
        let response = request.send().await.map_err(|source| GithubError::Http {
            what: what.to_string(),
            source,
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| GithubError::Http {
            what: what.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(GithubError::Status {
                what: what.to_string(),
                status: status.as_u16(),
                body: truncate(&body, ERROR_BODY_PREVIEW_LEN),
            });
        }

        Ok(body)
    }

    /// GET `url` and decode the JSON body into `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T, GithubError> {
        tracing::debug!(%url, "GET {what}");
        let body = self.send_text(self.http.get(url), what).await?;
        serde_json::from_str(&body).map_err(|source| GithubError::Decode {
            what: what.to_string(),
            source,
        })
    }

    /// GET every page of a list endpoint.
    ///
    /// Stops at the first page shorter than the page size.
    async fn get_all_pages<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &str,
    ) -> Result<Vec<T>, GithubError> {
        let mut items = Vec::new();
        let mut page = 1usize;
        loop {
            let page_url = format!(
                "{url}?per_page={}&page={page}",
                constants::GITHUB_PAGE_SIZE
            );
            let batch: Vec<T> = self.get_json(&page_url, what).await?;
            let len = batch.len();
            items.extend(batch);
            if len < constants::GITHUB_PAGE_SIZE {
                break;
            }
            page += 1;
        }
        Ok(items)
    }

    /// Fetch pull request metadata (head/base SHAs, requested reviewers).
    pub async fn pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<ApiPullRequest, GithubError> {
        let url = self.repo_url(repo, &format!("pulls/{number}"));
        self.get_json(&url, "fetch pull request").await
    }

    /// Fetch the commits of a pull request, oldest first.
    pub async fn pull_commits(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<ApiCommit>, GithubError> {
        let url = self.repo_url(repo, &format!("pulls/{number}/commits"));
        self.get_all_pages(&url, "list pull request commits").await
    }

    /// Fetch the line-level review comments of a pull request.
    pub async fn review_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<ApiReviewComment>, GithubError> {
        let url = self.repo_url(repo, &format!("pulls/{number}/comments"));
        self.get_all_pages(&url, "list review comments").await
    }

    /// Fetch a single commit as raw JSON.
    ///
    /// Returned untyped so callers can decide how to treat a response that
    /// lacks the fields they need.
    pub async fn commit_detail(
        &self,
        repo: &RepoRef,
        sha: &str,
    ) -> Result<serde_json::Value, GithubError> {
        let url = self.repo_url(repo, &format!("commits/{sha}"));
        self.get_json(&url, "fetch commit detail").await
    }

    /// Fetch the pull request as a unified diff.
    pub async fn pull_diff(&self, repo: &RepoRef, number: u64) -> Result<String, GithubError> {
        let url = self.repo_url(repo, &format!("pulls/{number}"));
        tracing::debug!(%url, "GET pull request diff");
        let request = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github.v3.diff");
        self.send_text(request, "fetch pull request diff").await
    }

    /// Post a review with `event: COMMENT` on a pull request.
    pub async fn create_review(
        &self,
        repo: &RepoRef,
        number: u64,
        commit_id: &str,
        body: &str,
    ) -> Result<(), GithubError> {
        let url = self.repo_url(repo, &format!("pulls/{number}/reviews"));
        let payload = serde_json::json!({
            "body": body,
            "commit_id": commit_id,
            "event": "COMMENT",
        });
        tracing::debug!(%url, "POST pull request review");
        self.send_text(self.http.post(&url).json(&payload), "create review")
            .await
            .map(|_| ())
    }
}

/// Truncate `text` to at most `max` characters, marking the cut.
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &text[..idx]),
        None => text.to_string(),
    }
}
