//! Typed records for the GitHub REST responses we consume.
//!
//! Only the fields the pipelines read are modelled; serde ignores the rest.
//! A response missing a required field fails to decode, which surfaces as
//! [`crate::github::GithubError::Decode`] instead of a lookup panic.

use serde::{Deserialize, Serialize};

/// A GitHub account reference (`user`, `author`, `requested_reviewers[]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiUser {
    pub login: String,
}

/// Git-level author/committer signature embedded in a commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSignature {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// The `commit` object nested inside a commit response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiGitCommit {
    #[serde(default)]
    pub author: Option<ApiSignature>,
    #[serde(default)]
    pub message: String,
}

/// One entry of `GET /repos/{repo}/pulls/{n}/commits`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCommit {
    pub sha: String,
    /// Linked GitHub account; `null` when the commit e-mail matches no user.
    #[serde(default)]
    pub author: Option<ApiUser>,
    #[serde(default)]
    pub commit: ApiGitCommit,
}

impl ApiCommit {
    /// Login the commit is attributed to.
    ///
    /// Falls back to the git author name when GitHub could not link the
    /// commit to an account.
    pub fn author_login(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|u| u.login.as_str())
            .or_else(|| self.commit.author.as_ref().map(|s| s.name.as_str()))
            .filter(|login| !login.is_empty())
    }
}

/// Line-change counters from `GET /repos/{repo}/commits/{sha}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCommitStats {
    pub additions: u64,
    pub deletions: u64,
    pub total: u64,
}

/// Response of `GET /repos/{repo}/commits/{sha}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCommitDetail {
    pub sha: String,
    #[serde(default)]
    pub author: Option<ApiUser>,
    #[serde(default)]
    pub commit: ApiGitCommit,
    #[serde(default)]
    pub stats: Option<ApiCommitStats>,
}

impl ApiCommitDetail {
    /// Same attribution rule as [`ApiCommit::author_login`].
    pub fn author_login(&self) -> Option<&str> {
        self.author
            .as_ref()
            .map(|u| u.login.as_str())
            .or_else(|| self.commit.author.as_ref().map(|s| s.name.as_str()))
            .filter(|login| !login.is_empty())
    }
}

/// One entry of `GET /repos/{repo}/pulls/{n}/comments` (line-level review comments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiReviewComment {
    /// `null` for comments left by deleted accounts.
    #[serde(default)]
    pub user: Option<ApiUser>,
    pub body: String,
    pub original_commit_id: String,
}

/// `head` / `base` branch pointers of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiBranchRef {
    pub sha: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
}

/// Response of `GET /repos/{repo}/pulls/{n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiPullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub user: Option<ApiUser>,
    pub head: ApiBranchRef,
    pub base: ApiBranchRef,
    #[serde(default)]
    pub requested_reviewers: Vec<ApiUser>,
}

impl ApiPullRequest {
    /// Logins of currently requested reviewers, in API order.
    pub fn requested_reviewer_logins(&self) -> Vec<String> {
        self.requested_reviewers
            .iter()
            .map(|u| u.login.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_decodes_with_linked_author() {
        let json = r#"{
            "sha": "a1",
            "author": {"login": "alice", "id": 1},
            "commit": {"author": {"name": "Alice A", "email": "a@x.io"}, "message": "init"},
            "url": "ignored"
        }"#;
        let commit: ApiCommit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.sha, "a1");
        assert_eq!(commit.author_login(), Some("alice"));
    }

    #[test]
    fn commit_without_linked_account_uses_git_name() {
        let json = r#"{"sha": "b2", "author": null, "commit": {"author": {"name": "bob"}}}"#;
        let commit: ApiCommit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.author_login(), Some("bob"));
    }

    #[test]
    fn commit_without_any_author_has_no_login() {
        let json = r#"{"sha": "c3", "author": null, "commit": {}}"#;
        let commit: ApiCommit = serde_json::from_str(json).unwrap();
        assert_eq!(commit.author_login(), None);
    }

    #[test]
    fn rate_limit_body_is_not_a_commit_list() {
        let json = r#"{"message": "API rate limit exceeded", "documentation_url": "x"}"#;
        assert!(serde_json::from_str::<Vec<ApiCommit>>(json).is_err());
    }

    #[test]
    fn review_comment_requires_original_commit_id() {
        let json = r#"{"user": {"login": "carol"}, "body": "typo"}"#;
        assert!(serde_json::from_str::<ApiReviewComment>(json).is_err());
    }

    #[test]
    fn pull_request_reviewers_keep_order() {
        let json = r#"{
            "number": 7,
            "title": "Add feature",
            "head": {"sha": "h", "ref": "feature"},
            "base": {"sha": "b", "ref": "main"},
            "requested_reviewers": [{"login": "zed"}, {"login": "amy"}]
        }"#;
        let pr: ApiPullRequest = serde_json::from_str(json).unwrap();
        assert_eq!(pr.head.ref_name, "feature");
        assert_eq!(pr.requested_reviewer_logins(), vec!["zed", "amy"]);
    }

    #[test]
    fn commit_detail_stats_are_optional() {
        let json = r#"{"sha": "a1", "author": {"login": "alice"}}"#;
        let detail: ApiCommitDetail = serde_json::from_str(json).unwrap();
        assert!(detail.stats.is_none());
        assert_eq!(detail.author_login(), Some("alice"));
    }
}
