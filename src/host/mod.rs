//! Release-hosting service abstraction layer
//!
//! This module provides a trait-based abstraction over the hosting service's
//! release API, allowing for multiple implementations including the real
//! GitHub backend and a mock implementation for testing.
//!
//! # Overview
//!
//! The primary abstraction is the [ReleaseHost] trait, which defines the two
//! operations the publisher consumes (delete, create) plus a lookup used for
//! reporting. The concrete implementations include:
//!
//! - [github::GithubHost]: The real implementation over the GitHub REST API
//! - [mock::MockHost]: A mock implementation for testing
//!
//! Most code should depend on the [ReleaseHost] trait rather than concrete
//! implementations to enable easy testing and flexibility.

pub mod github;
pub mod mock;

pub use github::GithubHost;
pub use mock::MockHost;

use thiserror::Error;

use crate::domain::{ReleaseRecord, ReleaseRequest};

/// Failure taxonomy for release host operations
///
/// Every host implementation maps its underlying failures into exactly one of
/// these classes, which is what the publisher's abort/retry policy keys on:
///
/// - [HostError::NotFound] is benign for deletion and surfaced as
///   [DeleteOutcome::Absent] rather than an error.
/// - [HostError::Transient] aborts the run unless bounded retry is configured.
/// - [HostError::Fatal] always aborts and is surfaced to the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    #[error("resource not found")]
    NotFound,

    #[error("transient service failure: {0}")]
    Transient(String),

    #[error("permanent service failure: {0}")]
    Fatal(String),
}

/// Result alias for host operations
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Outcome of a delete request
///
/// Deleting a tag that does not exist is a success, not an error; the two
/// variants let callers report which case occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// An existing release/tag pair was removed
    Deleted,
    /// Nothing existed under the tag name
    Absent,
}

/// Release hosting service operations consumed by the publisher
///
/// ## Thread Safety
///
/// All implementors must be `Send + Sync` to allow safe sharing across threads.
///
/// ## Error Handling
///
/// All methods return [HostResult], classifying failures per [HostError].
/// Implementations map transport-level errors (status codes, connection
/// failures) into the taxonomy; they never panic on service responses.
pub trait ReleaseHost: Send + Sync {
    /// Look up the release currently associated with a tag
    ///
    /// Returns `Ok(None)` when no release exists for the tag. Used for the
    /// replacement plan shown to the operator; the delete path does its own
    /// lookup so the two never race each other within a run.
    fn find_release(&self, tag_name: &str) -> HostResult<Option<ReleaseRecord>>;

    /// Delete the release and tag with the given name
    ///
    /// Removes the release object first, then the underlying tag ref. A tag
    /// with no release (or no tag at all) yields [DeleteOutcome::Absent];
    /// deletion is idempotent by contract.
    ///
    /// # Arguments
    /// * `tag_name` - Name of the floating tag (e.g., "unstable")
    fn delete_tag_and_release(&self, tag_name: &str) -> HostResult<DeleteOutcome>;

    /// Create a release, and with it the tag, at the request's target commit
    ///
    /// The hosting service creates the tag ref as a side effect when the
    /// named tag does not exist yet; after a successful call the tag resolves
    /// to `request.target_commitish`.
    ///
    /// # Returns
    /// * `Ok(ReleaseRecord)` - The created release, including its host id
    /// * `Err` - Tag collision, auth failure, or service error
    fn create_release(&self, request: &ReleaseRequest) -> HostResult<ReleaseRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        assert_eq!(HostError::NotFound.to_string(), "resource not found");
        assert!(HostError::Transient("timeout".to_string())
            .to_string()
            .contains("transient"));
        assert!(HostError::Fatal("403".to_string())
            .to_string()
            .contains("permanent"));
    }

    #[test]
    fn test_delete_outcome_equality() {
        assert_eq!(DeleteOutcome::Absent, DeleteOutcome::Absent);
        assert_ne!(DeleteOutcome::Deleted, DeleteOutcome::Absent);
    }
}
