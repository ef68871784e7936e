//! Shared command context
//!
//! Resolves every input of a run up front, so a missing token or unreadable
//! event fails before any API call is made.

use crate::cli::Cli;
use auto_update::auth::get_github_auth;
use auto_update::error::Result;
use auto_update::event::{ActionEvent, ensure_push};
use auto_update::platform::{GitHubService, PlatformService};
use auto_update::types::Repository;
use auto_update::update::EligibilityPolicy;
use tracing::debug;

/// Everything an update run needs
pub struct CommandContext {
    /// Platform service scoped to the base repository
    pub platform: Box<dyn PlatformService>,
    /// The triggering event
    pub event: ActionEvent,
    /// Eligibility policy built from the inputs
    pub policy: EligibilityPolicy,
}

impl CommandContext {
    /// Create a new command context
    ///
    /// - Check the event name
    /// - Resolve the token
    /// - Parse the repository
    /// - Load the event payload
    /// - Create the GitHub service
    pub fn new(cli: &Cli) -> Result<Self> {
        ensure_push(&cli.event_name)?;

        let auth = get_github_auth(cli.github_token.as_deref())?;
        debug!(source = ?auth.source, "resolved GitHub token");

        let repository = Repository::parse(&cli.repository)?;
        let event = ActionEvent::load(&cli.event_name, &cli.event_path)?;

        let platform = GitHubService::new(&auth.token, repository, cli.api_url.as_deref())?;
        let policy = EligibilityPolicy::from_config(&cli.update_config());
        debug!(rules = ?policy.rules(), "built eligibility policy");

        Ok(Self {
            platform: Box::new(platform),
            event,
            policy,
        })
    }
}
