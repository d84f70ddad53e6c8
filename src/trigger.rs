//! Trigger event resolution
//!
//! A publisher run is driven by a push event. Under GitHub Actions the event
//! comes from the workflow environment; for manual runs it is derived from
//! the local repository's branch tip.

use crate::boundary::BoundaryWarning;
use crate::domain::TriggerEvent;
use crate::error::{ReleaseRotateError, Result};
use crate::git_ops::GitRepo;

/// Outcome of trigger resolution
#[derive(Debug)]
pub enum ResolvedTrigger {
    /// A push to publish for
    Publish(TriggerEvent),
    /// Sanctioned no-op; carries the warning shown to the operator
    Skip(BoundaryWarning),
}

/// True when running inside a GitHub Actions workflow
pub fn in_actions_env() -> bool {
    std::env::var("GITHUB_ACTIONS")
        .map(|v| v == "true")
        .unwrap_or(false)
}

/// Resolve the trigger from the GitHub Actions environment
///
/// A workflow that fires for anything other than a push (workflow_dispatch,
/// schedule, ...) resolves to a skip rather than an error. The commit
/// timestamp is read from the checkout since the event env carries none.
pub fn from_actions_env(repo: &GitRepo) -> Result<ResolvedTrigger> {
    if let Ok(event_name) = std::env::var("GITHUB_EVENT_NAME") {
        if event_name != "push" {
            return Ok(ResolvedTrigger::Skip(BoundaryWarning::NotPushEvent {
                event_name,
            }));
        }
    }

    let sha = std::env::var("GITHUB_SHA")
        .map_err(|_| ReleaseRotateError::event("GITHUB_SHA is not set"))?;
    let branch = std::env::var("GITHUB_REF_NAME")
        .map_err(|_| ReleaseRotateError::event("GITHUB_REF_NAME is not set"))?;
    let timestamp = repo.commit_timestamp(&sha)?;

    Ok(ResolvedTrigger::Publish(TriggerEvent::new(
        branch, sha, timestamp,
    )))
}

/// Derive the trigger from the local repository's branch tip
pub fn from_repository(repo: &GitRepo, branch: &str) -> Result<TriggerEvent> {
    let (sha, timestamp) = repo.branch_tip(branch)?;
    Ok(TriggerEvent::new(branch, sha, timestamp))
}

/// Resolve from the Actions environment when present, the local repository otherwise
pub fn resolve(repo: &GitRepo, branch: &str) -> Result<ResolvedTrigger> {
    if in_actions_env() {
        from_actions_env(repo)
    } else {
        from_repository(repo, branch).map(ResolvedTrigger::Publish)
    }
}
