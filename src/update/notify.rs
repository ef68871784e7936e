//! Conflict notification - tell the author when a PR cannot be updated
//!
//! At most one notice is posted per head commit: comments created on or after
//! the head commit's committer date are checked for the notice before posting.
//! Repeated runs (one per push) therefore stay quiet until the author pushes
//! a new commit.

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::PullRequest;
use crate::update::run::RunContext;
use tracing::{debug, info};

/// Body of the notice posted on PRs that could not be updated
pub const CONFLICT_COMMENT: &str = "Cannot auto-update because of conflicts.";

/// What the notifier did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// A new notice was posted
    Commented {
        /// Web URL of the new comment
        url: String,
    },
    /// A notice already exists since the latest commit
    AlreadyCommented {
        /// Web URL of the existing comment
        url: String,
    },
}

/// Post the conflict notice on a PR unless it is already there (EFFECTFUL)
///
/// Fails without posting when the head repository is gone or the head
/// commit has no committer to use as a watermark.
pub async fn notify_unupdatable(
    platform: &dyn PlatformService,
    ctx: &RunContext,
    pr: &PullRequest,
) -> Result<NotifyOutcome> {
    let head_repository = pr
        .head_repository
        .as_ref()
        .ok_or(Error::MissingHeadRepository(pr.number))?;

    let commit = platform.get_commit(head_repository, &pr.head_sha).await?;
    let committer = commit.committer.ok_or_else(|| Error::MissingCommitter {
        repository: head_repository.to_string(),
        sha: pr.head_sha.clone(),
    })?;

    debug!(
        repository = %ctx.repository,
        pr_number = pr.number,
        since = %committer.date,
        "looking for an existing notice"
    );
    let comments = platform
        .list_issue_comments(pr.number, committer.date)
        .await?;

    // `since` filters on the last update; an old notice edited later is stale
    if let Some(existing) = comments
        .iter()
        .find(|c| c.created_at >= committer.date && c.body == CONFLICT_COMMENT)
    {
        info!(
            pr_number = pr.number,
            "Already commented since the last commit: {}", existing.html_url
        );
        return Ok(NotifyOutcome::AlreadyCommented {
            url: existing.html_url.clone(),
        });
    }

    let comment = platform
        .create_issue_comment(pr.number, CONFLICT_COMMENT)
        .await?;
    info!(pr_number = pr.number, "Commented: {}", comment.html_url);

    Ok(NotifyOutcome::Commented {
        url: comment.html_url,
    })
}
