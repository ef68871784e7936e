//! Update run - drives one push event end to end
//!
//! Validate event → list candidates → for each PR, in listing order:
//! eligibility → branch update → (on failure) conflict notice.
//!
//! Only an invalid event or a failed candidate listing aborts the run.
//! Everything that goes wrong for an individual PR is logged as a warning and
//! recorded in the report.

use crate::actions;
use crate::error::Result;
use crate::event::{ActionEvent, PushEvent};
use crate::platform::PlatformService;
use crate::types::{PullRequest, Repository};
use crate::update::branch::update_branch;
use crate::update::eligibility::{EligibilityPolicy, SkipReason};
use crate::update::notify::{NotifyOutcome, notify_unupdatable};
use tracing::{Instrument, info, info_span, warn};

/// Explicit context shared by every step of a run
#[derive(Debug, Clone)]
pub struct RunContext {
    /// Base repository whose PRs are updated
    pub repository: Repository,
    /// The validated push that triggered the run
    pub event: PushEvent,
}

impl RunContext {
    /// Create a run context
    pub const fn new(repository: Repository, event: PushEvent) -> Self {
        Self { repository, event }
    }
}

/// What happened to one pull request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrOutcome {
    /// The PR did not pass the eligibility policy
    Skipped(SkipReason),
    /// The branch was updated from its base
    Updated,
    /// The update was rejected
    UpdateFailed {
        /// Why the update failed
        error: String,
        /// Result of the conflict notice (`Err` holds the notifier's failure)
        notification: std::result::Result<NotifyOutcome, String>,
    },
}

/// Per-PR entry of a run report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrReport {
    /// PR number
    pub number: u64,
    /// What happened
    pub outcome: PrOutcome,
}

/// Result of a completed run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Base branch the candidates were listed for (None for non-branch refs)
    pub base: Option<String>,
    /// One entry per candidate, in listing order
    pub outcomes: Vec<PrReport>,
}

impl RunReport {
    /// Numbers of all candidate PRs, in listing order
    pub fn candidates(&self) -> Vec<u64> {
        self.outcomes.iter().map(|r| r.number).collect()
    }

    /// Count PRs that were updated
    pub fn updated_count(&self) -> usize {
        self.count(|o| matches!(o, PrOutcome::Updated))
    }

    /// Count PRs that were skipped
    pub fn skipped_count(&self) -> usize {
        self.count(|o| matches!(o, PrOutcome::Skipped(_)))
    }

    /// Count PRs whose update failed
    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, PrOutcome::UpdateFailed { .. }))
    }

    /// Outcome for a specific PR
    pub fn outcome(&self, number: u64) -> Option<&PrOutcome> {
        self.outcomes
            .iter()
            .find(|r| r.number == number)
            .map(|r| &r.outcome)
    }

    fn count(&self, predicate: impl Fn(&PrOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Run the update for one triggering event (EFFECTFUL)
///
/// Returns `Err` only for fatal conditions: a non-push event, a malformed
/// payload, or a failure to list candidate PRs.
pub async fn run_update(
    platform: &dyn PlatformService,
    event: &ActionEvent,
    policy: &EligibilityPolicy,
) -> Result<RunReport> {
    let push = event.push_event()?;
    let ctx = RunContext::new(platform.repository().clone(), push);

    let Some(base) = ctx.event.branch().map(ToString::to_string) else {
        info!(
            git_ref = %ctx.event.git_ref,
            "Pushed ref \"{}\" is not a branch, nothing to update", ctx.event.git_ref
        );
        return Ok(RunReport::default());
    };

    info!(%base, "Fetching pull requests based on \"{base}\"");
    let pulls = platform.list_open_pull_requests(&base).await?;

    let numbers: Vec<u64> = pulls.iter().map(|pr| pr.number).collect();
    info!(%base, "Fetched pull requests: {numbers:?}");

    let mut report = RunReport {
        base: Some(base),
        outcomes: Vec::with_capacity(pulls.len()),
    };

    // Sequential: log groups must not interleave
    for pr in pulls {
        let number = pr.number;
        let span = info_span!("pull_request", number);
        let outcome = actions::group(
            &format!("Pull request #{number}"),
            process_pull_request(platform, &ctx, policy, pr).instrument(span),
        )
        .await;
        report.outcomes.push(PrReport { number, outcome });
    }

    info!(
        updated = report.updated_count(),
        skipped = report.skipped_count(),
        failed = report.failed_count(),
        "Processed {} pull request(s): {} updated, {} skipped, {} could not be updated",
        report.outcomes.len(),
        report.updated_count(),
        report.skipped_count(),
        report.failed_count()
    );

    Ok(report)
}

/// Eligibility → update → notice for a single PR; never fails the run
async fn process_pull_request(
    platform: &dyn PlatformService,
    ctx: &RunContext,
    policy: &EligibilityPolicy,
    pr: PullRequest,
) -> PrOutcome {
    if let Err(reason) = policy.screen(&pr, &ctx.event) {
        return PrOutcome::Skipped(reason);
    }

    // Only PRs that pass every other rule cost a mergeable lookup
    let pr = match refresh_mergeable_status(platform, policy, &pr).await {
        Some(fresh) => {
            if let Err(reason) = policy.screen(&fresh, &ctx.event) {
                return PrOutcome::Skipped(reason);
            }
            fresh
        }
        None => pr,
    };

    info!(pr_number = pr.number, "Attempting to update pull request #{}", pr.number);
    let failed = match update_branch(platform, ctx, &pr).await {
        Ok(()) => return PrOutcome::Updated,
        Err(failed) => failed,
    };
    warn!(pr_number = pr.number, "{failed}");

    let notification = match notify_unupdatable(platform, ctx, &pr).await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            warn!(
                pr_number = pr.number,
                "Could not notify pull request #{} about the failed update: {e}", pr.number
            );
            Err(e.to_string())
        }
    };

    PrOutcome::UpdateFailed {
        error: failed.source.to_string(),
        notification,
    }
}

/// Fetch a fresh view when the policy needs mergeability the listing lacks
///
/// `None` keeps the listed view: no lookup was needed, or it failed. Unknown
/// status never blocks.
async fn refresh_mergeable_status(
    platform: &dyn PlatformService,
    policy: &EligibilityPolicy,
    pr: &PullRequest,
) -> Option<PullRequest> {
    if !policy.needs_mergeable_status() || pr.mergeable.is_some() {
        return None;
    }

    match platform.get_pull_request(pr.number).await {
        Ok(fresh) => Some(fresh),
        Err(e) => {
            warn!(
                pr_number = pr.number,
                "Could not fetch mergeable status of pull request #{}: {e}", pr.number
            );
            None
        }
    }
}
