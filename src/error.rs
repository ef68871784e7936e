//! Error types for auto-update

use thiserror::Error;

/// Errors produced while reconciling pull requests
#[derive(Error, Debug)]
pub enum Error {
    /// The run was triggered by something other than a push
    #[error("Expected to be triggered by a \"push\" event but received a \"{0}\" event")]
    UnexpectedEvent(String),

    /// A required input was missing or blank
    #[error("Input required and not supplied: {0}")]
    MissingInput(String),

    /// The event payload could not be read or decoded
    #[error("Invalid event payload: {0}")]
    EventPayload(String),

    /// A repository name was not of the form `owner/repo`
    #[error("Invalid repository \"{0}\", expected \"owner/repo\"")]
    InvalidRepository(String),

    /// GitHub API error
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    /// Generic platform error
    #[error("Platform error: {0}")]
    Platform(String),

    /// The head repository of a pull request no longer exists
    #[error("Head repository of pull request #{0} is unavailable")]
    MissingHeadRepository(u64),

    /// The head commit carries no committer, so there is no watermark
    #[error("Commit {sha} in {repository} has no committer")]
    MissingCommitter {
        /// Repository the commit was looked up in
        repository: String,
        /// Commit SHA
        sha: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<octocrab::Error> for Error {
    fn from(err: octocrab::Error) -> Self {
        match err {
            // Prefer the message GitHub put in the response body
            octocrab::Error::GitHub { source, .. } => Self::GitHubApi(source.message.clone()),
            other => Self::GitHubApi(other.to_string()),
        }
    }
}

/// Result type alias for auto-update
pub type Result<T> = std::result::Result<T, Error>;
