//! GitHub token resolution

use super::AuthSource;
use crate::error::{Error, Result};
use tracing::debug;

/// Environment variables checked when no token input is given, in order
const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GH_TOKEN"];

/// Resolved GitHub credentials
#[derive(Clone)]
pub struct GitHubAuthConfig {
    /// Authentication token
    pub token: String,
    /// Where the token came from
    pub source: AuthSource,
}

impl std::fmt::Debug for GitHubAuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubAuthConfig")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Resolve the token for API calls
///
/// A non-blank `input` wins; otherwise `GITHUB_TOKEN` then `GH_TOKEN` are
/// consulted. Blank values count as missing.
pub fn get_github_auth(input: Option<&str>) -> Result<GitHubAuthConfig> {
    if let Some(token) = non_blank(input) {
        debug!("using token from input");
        return Ok(GitHubAuthConfig {
            token,
            source: AuthSource::Input,
        });
    }

    for var in TOKEN_ENV_VARS {
        if let Some(token) = non_blank(std::env::var(var).ok().as_deref()) {
            debug!(var, "using token from environment");
            return Ok(GitHubAuthConfig {
                token,
                source: AuthSource::EnvVar,
            });
        }
    }

    Err(Error::MissingInput("github_token".to_string()))
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}
