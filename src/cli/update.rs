//! Update command - reconcile open PRs with the pushed branch

use crate::cli::Cli;
use crate::cli::context::CommandContext;
use auto_update::error::Result;
use auto_update::update::run_update;

/// Run the update command
///
/// Individual PR failures are reported in the log only; the command fails
/// solely on fatal errors.
pub async fn run_update_command(cli: &Cli) -> Result<()> {
    let ctx = CommandContext::new(cli)?;
    run_update(ctx.platform.as_ref(), &ctx.event, &ctx.policy).await?;
    Ok(())
}
