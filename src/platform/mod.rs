//! Platform services for GitHub
//!
//! Provides the remote operations an update run needs, behind a trait so the
//! run logic can be exercised without a network.

mod github;

pub use github::GitHubService;

use crate::error::Result;
use crate::types::{Comment, Commit, PullRequest, Repository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Platform service trait for pull request operations
///
/// An implementation is scoped to the base repository whose pull requests
/// are being updated. Commits are looked up by explicit repository because a
/// PR's head may live in a fork.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// List every open PR targeting `base`, across all pages, in server order
    async fn list_open_pull_requests(&self, base: &str) -> Result<Vec<PullRequest>>;

    /// Fetch a single PR, including its mergeable status
    async fn get_pull_request(&self, pr_number: u64) -> Result<PullRequest>;

    /// Fetch a commit by SHA from `repository`
    async fn get_commit(&self, repository: &Repository, sha: &str) -> Result<Commit>;

    /// List comments on a PR's issue thread updated at or after `since`
    ///
    /// The filter follows the REST API: it applies to the last update, so an
    /// old comment edited later is included.
    async fn list_issue_comments(
        &self,
        pr_number: u64,
        since: DateTime<Utc>,
    ) -> Result<Vec<Comment>>;

    /// Create a comment on a PR's issue thread
    async fn create_issue_comment(&self, pr_number: u64, body: &str) -> Result<Comment>;

    /// Bring the PR's head branch up to date with its base branch
    ///
    /// Rejected by the server when the branches conflict, the token lacks
    /// permission, or the branch is already current.
    async fn update_branch(&self, pr_number: u64) -> Result<()>;

    /// Get the base repository this service is scoped to
    fn repository(&self) -> &Repository;
}
