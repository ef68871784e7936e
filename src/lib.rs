//! auto-update - keep pull requests up to date with their base branch
//!
//! After a push to a branch, every open pull request based on that branch is
//! checked against an eligibility policy and, if eligible, updated from its
//! base through the GitHub API. When GitHub refuses the update (usually due to
//! conflicts) a single notice is left on the pull request.

pub mod actions;
pub mod auth;
pub mod error;
pub mod event;
pub mod platform;
pub mod types;
pub mod update;
