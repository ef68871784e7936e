//! Core types for auto-update

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub repository (`owner/name`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Repository {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl Repository {
    /// Create a repository reference from its parts
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a full name such as `octo-org/widgets`
    pub fn parse(full_name: &str) -> Result<Self> {
        match full_name.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => {
                Ok(Self::new(*owner, *name))
            }
            _ => Err(Error::InvalidRepository(full_name.to_string())),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// An open pull request, as seen at the start of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Web URL for the PR
    pub html_url: String,
    /// Base branch name
    pub base_ref: String,
    /// Commit the base branch pointed at when the PR was fetched
    pub base_sha: String,
    /// Head branch name
    pub head_ref: String,
    /// Tip commit of the head branch
    pub head_sha: String,
    /// Repository owning the head branch (None if the fork was deleted)
    pub head_repository: Option<Repository>,
    /// Label names
    pub labels: Vec<String>,
    /// Whether PR is a draft
    pub is_draft: bool,
    /// Whether auto-merge is enabled
    pub auto_merge_enabled: bool,
    /// Whether the PR can be merged without conflicts
    /// - `Some(true)` = mergeable
    /// - `Some(false)` = has conflicts
    /// - `None` = unknown (not returned by listings, or still computing)
    pub mergeable: Option<bool>,
}

impl PullRequest {
    /// Whether the PR carries a label with exactly this name
    pub fn has_label(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label == name)
    }
}

/// Committer identity recorded on a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Committer {
    /// Committer name
    pub name: String,
    /// Committer email
    pub email: String,
    /// When the commit was committed
    pub date: DateTime<Utc>,
}

/// A commit looked up by SHA
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    /// Commit SHA
    pub sha: String,
    /// Committer, absent for some merge or signed commits
    pub committer: Option<Committer>,
}

/// A comment on a pull request's issue thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Comment ID
    pub id: u64,
    /// Comment body text
    pub body: String,
    /// Web URL for the comment
    pub html_url: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
    /// When the comment was last edited, hidden or unhidden
    pub updated_at: DateTime<Utc>,
}
