//! Branch update - the single effectful update attempt for one PR

use crate::error::Error;
use crate::platform::PlatformService;
use crate::types::PullRequest;
use crate::update::run::RunContext;
use tracing::{debug, info};

/// The remote refused to update a PR's branch
///
/// Usually a merge conflict, missing permission, or a branch the remote
/// already considers current. Never fatal to the run.
#[derive(Debug, thiserror::Error)]
#[error("Could not update pull request #{pr_number}: {source}")]
pub struct UpdateFailed {
    /// PR number
    pub pr_number: u64,
    /// Underlying platform error
    #[source]
    pub source: Error,
}

/// Ask the platform to update the PR's head branch from its base (EFFECTFUL)
///
/// Exactly one attempt is made; transient failures are reported, not retried.
pub async fn update_branch(
    platform: &dyn PlatformService,
    ctx: &RunContext,
    pr: &PullRequest,
) -> Result<(), UpdateFailed> {
    debug!(
        repository = %ctx.repository,
        pr_number = pr.number,
        head = %pr.head_ref,
        base = %pr.base_ref,
        "requesting branch update"
    );

    platform
        .update_branch(pr.number)
        .await
        .map_err(|source| UpdateFailed {
            pr_number: pr.number,
            source,
        })?;

    info!(pr_number = pr.number, "Updated!");
    Ok(())
}
