//! Triggering event handling
//!
//! GitHub Actions hands the step an event name and a path to the JSON
//! webhook payload. Only `push` events can drive an update run.

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Name of the only event type accepted
pub const PUSH_EVENT: &str = "push";

const BRANCH_REF_PREFIX: &str = "refs/heads/";

/// Reject any event name other than `push`
///
/// Cheap enough to run before the payload file is even read.
pub fn ensure_push(name: &str) -> Result<()> {
    if name == PUSH_EVENT {
        Ok(())
    } else {
        Err(Error::UnexpectedEvent(name.to_string()))
    }
}

/// The raw event that triggered the run
#[derive(Debug, Clone)]
pub struct ActionEvent {
    /// Event name (e.g. `push`, `pull_request`)
    pub name: String,
    /// Webhook payload
    pub payload: serde_json::Value,
}

impl ActionEvent {
    /// Create an event from an already decoded payload
    pub fn new(name: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Read the payload from the file GitHub Actions points at
    pub fn load(name: &str, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::EventPayload(format!("failed to read {}: {e}", path.display()))
        })?;
        let payload = serde_json::from_str(&content).map_err(|e| {
            Error::EventPayload(format!("failed to parse {}: {e}", path.display()))
        })?;
        Ok(Self::new(name, payload))
    }

    /// Validate that this is a push event and decode it
    pub fn push_event(&self) -> Result<PushEvent> {
        ensure_push(&self.name)?;
        PushEvent::deserialize(&self.payload)
            .map_err(|e| Error::EventPayload(format!("malformed push payload: {e}")))
    }
}

/// The fields of a push payload the update run needs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushEvent {
    /// Full ref that was pushed (e.g. `refs/heads/main`)
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Commit the ref points at after the push
    pub after: String,
}

impl PushEvent {
    /// Create a push event
    pub fn new(git_ref: impl Into<String>, after: impl Into<String>) -> Self {
        Self {
            git_ref: git_ref.into(),
            after: after.into(),
        }
    }

    /// Branch name of the pushed ref, or `None` for tags and other refs
    pub fn branch(&self) -> Option<&str> {
        self.git_ref
            .strip_prefix(BRANCH_REF_PREFIX)
            .filter(|branch| !branch.is_empty())
    }
}
