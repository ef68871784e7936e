//! Eligibility policy - pure functions deciding which PRs to update
//!
//! A policy is an ordered list of independent rules combined by logical AND.
//! Evaluation stops at the first rule that rejects the PR, so the reported
//! skip reason is always the earliest one in the list.

use crate::event::PushEvent;
use crate::types::PullRequest;
use tracing::info;

/// Why a pull request was not updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The configured label is not on the PR
    MissingLabel(String),
    /// The PR is a draft
    Draft,
    /// Auto-merge is required but not enabled on the PR
    AutoMergeDisabled,
    /// GitHub already reports the PR as conflicting
    KnownConflicts,
    /// The PR's base already points at the pushed commit
    AlreadyUpToDate,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingLabel(label) => write!(f, "does not have the \"{label}\" label"),
            Self::Draft => write!(f, "is still a draft"),
            Self::AutoMergeDisabled => write!(f, "does not have auto-merge enabled"),
            Self::KnownConflicts => write!(f, "has known merge conflicts"),
            Self::AlreadyUpToDate => write!(f, "is already up to date"),
        }
    }
}

/// A single eligibility predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// The PR must carry a label with exactly this name
    RequiredLabel(String),
    /// The PR must not be a draft
    NotDraft,
    /// The PR must have auto-merge enabled
    AutoMergeEnabled,
    /// The PR must not be known to conflict; unknown status passes
    NoKnownConflicts,
    /// The PR's base must not already be the pushed commit
    BehindPush,
}

impl Rule {
    /// Check the rule against a PR (PURE)
    pub fn check(&self, pr: &PullRequest, event: &PushEvent) -> Result<(), SkipReason> {
        match self {
            Self::RequiredLabel(label) if !pr.has_label(label) => {
                Err(SkipReason::MissingLabel(label.clone()))
            }
            Self::NotDraft if pr.is_draft => Err(SkipReason::Draft),
            Self::AutoMergeEnabled if !pr.auto_merge_enabled => {
                Err(SkipReason::AutoMergeDisabled)
            }
            Self::NoKnownConflicts if pr.mergeable == Some(false) => {
                Err(SkipReason::KnownConflicts)
            }
            Self::BehindPush if pr.base_sha == event.after => Err(SkipReason::AlreadyUpToDate),
            _ => Ok(()),
        }
    }
}

/// Library-side configuration of an update run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfig {
    /// Only update PRs carrying this label
    pub label: Option<String>,
    /// Skip draft PRs
    pub skip_drafts: bool,
    /// Only update PRs with auto-merge enabled
    pub require_auto_merge: bool,
    /// Skip PRs GitHub already reports as conflicting
    pub skip_known_conflicts: bool,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            label: None,
            skip_drafts: true,
            require_auto_merge: false,
            skip_known_conflicts: false,
        }
    }
}

/// Ordered list of rules a PR must pass to be updated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityPolicy {
    rules: Vec<Rule>,
}

impl EligibilityPolicy {
    /// Create a policy from an explicit rule list, evaluated in order
    pub const fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Build the standard policy for a configuration
    ///
    /// Order: label, draft, auto-merge, known conflicts, already up to date.
    /// The up-to-date rule is always present.
    pub fn from_config(config: &UpdateConfig) -> Self {
        let mut rules = Vec::new();
        if let Some(label) = config.label.as_ref().filter(|l| !l.is_empty()) {
            rules.push(Rule::RequiredLabel(label.clone()));
        }
        if config.skip_drafts {
            rules.push(Rule::NotDraft);
        }
        if config.require_auto_merge {
            rules.push(Rule::AutoMergeEnabled);
        }
        if config.skip_known_conflicts {
            rules.push(Rule::NoKnownConflicts);
        }
        rules.push(Rule::BehindPush);
        Self::new(rules)
    }

    /// The rules, in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Whether any rule needs GitHub's computed mergeable status
    pub fn needs_mergeable_status(&self) -> bool {
        self.rules.contains(&Rule::NoKnownConflicts)
    }

    /// Evaluate all rules, returning the first rejection (PURE)
    pub fn evaluate(&self, pr: &PullRequest, event: &PushEvent) -> Result<(), SkipReason> {
        self.rules.iter().try_for_each(|rule| rule.check(pr, event))
    }

    /// Evaluate and log the skip reason at info level
    pub fn screen(&self, pr: &PullRequest, event: &PushEvent) -> Result<(), SkipReason> {
        self.evaluate(pr, event).inspect_err(|reason| {
            info!(pr_number = pr.number, "Pull request #{} {reason}", pr.number);
        })
    }

    /// Whether the PR should be updated; logs why when it should not
    pub fn is_eligible(&self, pr: &PullRequest, event: &PushEvent) -> bool {
        self.screen(pr, event).is_ok()
    }
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self::from_config(&UpdateConfig::default())
    }
}
