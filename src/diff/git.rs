//! libgit2-backed diff between two commits of a local clone.
//!
//! Produces the same unified patch text `git diff <base> <head>` prints,
//! without spawning a `git` process.

use std::path::Path;

use git2::{Diff, DiffFormat, DiffOptions, ErrorCode, Repository, Tree};

use super::DiffError;

/// Diff the trees of `base` and `head` in the repository containing `repo_path`.
///
/// Both revisions must already be present locally; shallow CI checkouts
/// usually need the full history fetched first.
pub fn diff_commits(repo_path: &Path, base: &str, head: &str) -> Result<String, DiffError> {
    let repo = Repository::discover(repo_path).map_err(|source| DiffError::OpenRepo {
        path: repo_path.to_path_buf(),
        source,
    })?;

    let base_tree = commit_tree(&repo, base)?;
    let head_tree = commit_tree(&repo, head)?;

    let mut opts = DiffOptions::new();
    opts.context_lines(3);
    let diff = repo.diff_tree_to_tree(Some(&base_tree), Some(&head_tree), Some(&mut opts))?;

    render_patch(&diff)
}

/// Resolve `rev` to the tree of the commit it names.
fn commit_tree<'r>(repo: &'r Repository, rev: &str) -> Result<Tree<'r>, DiffError> {
    let object = repo.revparse_single(rev).map_err(|e| match e.code() {
        ErrorCode::NotFound | ErrorCode::InvalidSpec => DiffError::MissingCommit(rev.to_string()),
        _ => DiffError::Git(e),
    })?;
    Ok(object.peel_to_tree()?)
}

/// Print a diff as unified patch text.
fn render_patch(diff: &Diff<'_>) -> Result<String, DiffError> {
    let mut out = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        // File and hunk headers carry their own text; content lines need
        // their origin marker restored.
        if let origin @ ('+' | '-' | ' ') = line.origin() {
            out.push(origin);
        }
        out.push_str(&String::from_utf8_lossy(line.content()));
        true
    })?;
    Ok(out)
}
