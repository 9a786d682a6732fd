//! Integration tests for the contributor report pipeline.
//!
//! GitHub and the reporting service are both played by `httpmock` servers;
//! no real network access is needed.

use std::time::Duration;

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

use prscribe::constants;
use prscribe::github::GithubClient;
use prscribe::models::RepoRef;
use prscribe::pipeline::{PipelineError, build_contributor_report};
use prscribe::report::{ReportError, ReportPublisher};

fn repo() -> RepoRef {
    "octo/widgets".parse().unwrap()
}

fn github(server: &MockServer) -> GithubClient {
    GithubClient::new(&server.base_url(), "ghp_test", Duration::from_secs(5)).unwrap()
}

fn commit(sha: &str, login: &str) -> serde_json::Value {
    json!({
        "sha": sha,
        "author": {"login": login},
        "commit": {"author": {"name": login, "email": format!("{login}@example.com")}, "message": "change"}
    })
}

fn comment(commit_id: &str, reviewer: &str, body: &str) -> serde_json::Value {
    json!({
        "user": {"login": reviewer},
        "body": body,
        "original_commit_id": commit_id
    })
}

#[tokio::test]
async fn aggregates_commits_and_comments_per_author() {
    let server = MockServer::start();
    let commits_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/repos/octo/widgets/pulls/12/commits")
            .header("authorization", "Bearer ghp_test");
        then.status(200).json_body(json!([
            commit("a1", "alice"),
            commit("b2", "alice"),
            commit("c3", "bob"),
        ]));
    });
    let comments_mock = server.mock(|when, then| {
        when.method(GET).path("/repos/octo/widgets/pulls/12/comments");
        then.status(200).json_body(json!([comment("a1", "carol", "typo")]));
    });

    let report = build_contributor_report(&github(&server), &repo(), 12)
        .await
        .unwrap();

    commits_mock.assert_calls(1);
    comments_mock.assert_calls(1);
    assert_eq!(
        serde_json::to_value(&report).unwrap(),
        json!({
            "repository": "octo/widgets",
            "contributors": [
                {
                    "github_id": "alice",
                    "commit_count": 2,
                    "review_comments": [{"reviewer_id": "carol", "comment": "typo"}]
                },
                {
                    "github_id": "bob",
                    "commit_count": 1,
                    "review_comments": []
                }
            ]
        })
    );
}

#[tokio::test]
async fn drops_self_reviews_and_unknown_commits() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/octo/widgets/pulls/3/commits");
        then.status(200)
            .json_body(json!([commit("a1", "alice"), commit("b2", "bob")]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/repos/octo/widgets/pulls/3/comments");
        then.status(200).json_body(json!([
            comment("a1", "bob", "bob reviewing alice is a self-review"),
            comment("zz", "dana", "comment on a force-pushed commit"),
            comment("b2", "dana", "looks good"),
        ]));
    });

    let report = build_contributor_report(&github(&server), &repo(), 3)
        .await
        .unwrap();

    let total: u32 = report.contributors.iter().map(|c| c.commit_count).sum();
    assert_eq!(total, 2);
    assert!(report.contributors[0].review_comments.is_empty());
    assert_eq!(report.contributors[1].review_comments.len(), 1);
    assert_eq!(report.contributors[1].review_comments[0].reviewer_id, "dana");
}

#[tokio::test]
async fn upstream_error_fails_the_run() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/octo/widgets/pulls/9/commits");
        then.status(403)
            .json_body(json!({"message": "API rate limit exceeded"}));
    });

    let err = build_contributor_report(&github(&server), &repo(), 9)
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Github(_)));
    assert!(err.to_string().contains("403"), "got: {err}");
}

#[tokio::test]
async fn report_is_posted_to_contributors_path() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/repos/octo/widgets/pulls/1/commits");
        then.status(200).json_body(json!([commit("a1", "alice")]));
    });
    server.mock(|when, then| {
        when.method(GET).path("/repos/octo/widgets/pulls/1/comments");
        then.status(200).json_body(json!([]));
    });
    let endpoint = MockServer::start();
    let post = endpoint.mock(|when, then| {
        when.method(POST).path("/api/v1/pr").json_body(json!({
            "repository": "octo/widgets",
            "contributors": [{"github_id": "alice", "commit_count": 1, "review_comments": []}]
        }));
        then.status(200);
    });

    let report = build_contributor_report(&github(&server), &repo(), 1)
        .await
        .unwrap();
    let publisher = ReportPublisher::new(&endpoint.base_url(), Duration::from_secs(5)).unwrap();
    publisher
        .publish(constants::CONTRIBUTORS_REPORT_PATH, &report)
        .await
        .unwrap();

    post.assert_calls(1);
}

#[tokio::test]
async fn rejected_report_surfaces_status() {
    let endpoint = MockServer::start();
    endpoint.mock(|when, then| {
        when.method(POST).path("/api/v1/pr");
        then.status(422).body("bad payload");
    });

    let publisher = ReportPublisher::new(&endpoint.base_url(), Duration::from_secs(5)).unwrap();
    let err = publisher
        .publish(
            constants::CONTRIBUTORS_REPORT_PATH,
            &json!({"repository": "octo/widgets", "contributors": []}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ReportError::Rejected { status: 422, .. }));
}
