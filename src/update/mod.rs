//! Update engine for pull requests based on a pushed branch
//!
//! Split along the same lines as the run itself:
//! 1. Eligibility - decide which PRs to touch (pure, testable)
//! 2. Branch - attempt the remote update (effectful, one attempt)
//! 3. Notify - leave a single conflict notice on failure (effectful, best effort)
//! 4. Run - orchestrate the above for every candidate PR

mod branch;
mod eligibility;
mod notify;
mod run;

pub use branch::{UpdateFailed, update_branch};
pub use eligibility::{EligibilityPolicy, Rule, SkipReason, UpdateConfig};
pub use notify::{CONFLICT_COMMENT, NotifyOutcome, notify_unupdatable};
pub use run::{PrOutcome, PrReport, RunContext, RunReport, run_update};
