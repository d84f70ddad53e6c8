//! Floating release replacement
//!
//! The core operation: delete whatever release/tag pair currently holds the
//! floating name, then create a fresh release at the triggering commit. The
//! two steps are strictly ordered; the create step never starts until the
//! delete outcome (removed or confirmed absent) is known.

use std::thread;
use std::time::Duration;

use thiserror::Error;

use crate::config::BehaviorConfig;
use crate::domain::{BodyTemplate, FloatingTag, ReleaseRecord, ReleaseRequest, TriggerEvent};
use crate::host::{DeleteOutcome, HostError, HostResult, ReleaseHost};

/// Phase of the replacement sequence
///
/// A run walks `Start -> Deleting -> DeletedOrAbsent -> Creating -> Done`;
/// a failure is terminal in whichever phase it occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishPhase {
    Start,
    Deleting,
    DeletedOrAbsent,
    Creating,
    Done,
}

impl std::fmt::Display for PublishPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            PublishPhase::Start => "starting",
            PublishPhase::Deleting => "deleting the previous release",
            PublishPhase::DeletedOrAbsent => "delete confirmed",
            PublishPhase::Creating => "creating the replacement release",
            PublishPhase::Done => "done",
        };
        write!(f, "{}", label)
    }
}

/// A replacement failure, tagged with the phase it happened in
///
/// The distinction matters to the operator: a `Deleting` failure leaves the
/// previous release in place, while a `Creating` failure may leave the
/// floating tag absent until the next successful run repairs it.
#[derive(Error, Debug)]
#[error("failed while {phase}: {source}")]
pub struct PublishError {
    pub phase: PublishPhase,
    #[source]
    pub source: HostError,
}

/// Result of a completed replacement
#[derive(Debug)]
pub struct PublishReport {
    /// Whether the previous release existed
    pub deleted: DeleteOutcome,
    /// The release that now holds the floating tag
    pub release: ReleaseRecord,
    /// Phase transitions, ending in [PublishPhase::Done]
    pub phases: Vec<PublishPhase>,
}

/// Bounded retry for transient host failures
///
/// Applied per step. Fatal and not-found outcomes are never retried, and a
/// retry never crosses a step boundary, so delete-confirmed always precedes
/// the first create attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    /// No retries; every failure aborts immediately
    pub fn none() -> Self {
        RetryPolicy {
            attempts: 0,
            backoff: Duration::from_millis(0),
        }
    }

    /// Build the policy from the behavior section of the configuration
    pub fn from_behavior(behavior: &BehaviorConfig) -> Self {
        RetryPolicy {
            attempts: behavior.retry_attempts,
            backoff: Duration::from_millis(behavior.retry_backoff_ms),
        }
    }

    fn run<T>(&self, mut op: impl FnMut() -> HostResult<T>) -> HostResult<T> {
        let mut attempt = 0;
        loop {
            match op() {
                Err(HostError::Transient(_)) if attempt < self.attempts => {
                    attempt += 1;
                    thread::sleep(self.backoff);
                }
                other => return other,
            }
        }
    }
}

/// Replaces a floating release against a [ReleaseHost]
pub struct ReleasePublisher<'a, H: ReleaseHost> {
    host: &'a H,
    retry: RetryPolicy,
}

impl<'a, H: ReleaseHost> ReleasePublisher<'a, H> {
    /// Create a publisher with no retries
    pub fn new(host: &'a H) -> Self {
        ReleasePublisher {
            host,
            retry: RetryPolicy::none(),
        }
    }

    /// Create a publisher with a retry policy for transient failures
    pub fn with_retry(host: &'a H, retry: RetryPolicy) -> Self {
        ReleasePublisher { host, retry }
    }

    /// Atomically replace the floating release with one for the triggering commit
    ///
    /// On success the floating tag resolves to `event.sha` and exactly one
    /// release object exists for it. A delete failure aborts before any
    /// create attempt; a create failure may leave the tag absent, which the
    /// next successful run repairs.
    pub fn replace_release(
        &self,
        tag: &FloatingTag,
        event: &TriggerEvent,
        template: &BodyTemplate,
    ) -> std::result::Result<PublishReport, PublishError> {
        let mut phases = vec![PublishPhase::Start, PublishPhase::Deleting];

        let deleted = self
            .retry
            .run(|| self.host.delete_tag_and_release(tag.name()))
            .map_err(|source| PublishError {
                phase: PublishPhase::Deleting,
                source,
            })?;
        phases.push(PublishPhase::DeletedOrAbsent);

        let request = ReleaseRequest::for_floating(tag, event, template);
        phases.push(PublishPhase::Creating);

        let release = self
            .retry
            .run(|| self.host.create_release(&request))
            .map_err(|source| PublishError {
                phase: PublishPhase::Creating,
                source,
            })?;
        phases.push(PublishPhase::Done);

        Ok(PublishReport {
            deleted,
            release,
            phases,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;

    fn tag() -> FloatingTag {
        FloatingTag::new("unstable").unwrap()
    }

    fn event(sha: &str) -> TriggerEvent {
        TriggerEvent::new("main", sha, "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_replace_on_empty_host_succeeds() {
        let host = MockHost::new();
        let publisher = ReleasePublisher::new(&host);

        let report = publisher
            .replace_release(&tag(), &event("abc123"), &BodyTemplate::default())
            .unwrap();

        assert_eq!(report.deleted, DeleteOutcome::Absent);
        assert_eq!(report.release.tag_name, "unstable");
        assert_eq!(host.tag_target("unstable"), Some("abc123".to_string()));
        assert_eq!(host.release_count(), 1);
    }

    #[test]
    fn test_release_body_matches_wire_format() {
        let host = MockHost::new();
        let publisher = ReleasePublisher::new(&host);

        let report = publisher
            .replace_release(&tag(), &event("abc123"), &BodyTemplate::default())
            .unwrap();

        assert_eq!(
            report.release.body,
            "Latest unstable release\n- Git sha abc123\n- Updated at 2024-01-01T00:00:00Z"
        );
        assert!(!report.release.draft);
        assert!(!report.release.prerelease);
    }

    #[test]
    fn test_replace_removes_previous_release() {
        let host = MockHost::new();
        host.seed_release("unstable", "old000");
        let publisher = ReleasePublisher::new(&host);

        let report = publisher
            .replace_release(&tag(), &event("new111"), &BodyTemplate::default())
            .unwrap();

        assert_eq!(report.deleted, DeleteOutcome::Deleted);
        assert_eq!(host.release_count(), 1);
        assert_eq!(host.tag_target("unstable"), Some("new111".to_string()));
    }

    #[test]
    fn test_sequential_replacements_keep_only_latest() {
        let host = MockHost::new();
        let publisher = ReleasePublisher::new(&host);
        let template = BodyTemplate::default();

        publisher
            .replace_release(&tag(), &event("aaa111"), &template)
            .unwrap();
        publisher
            .replace_release(&tag(), &event("bbb222"), &template)
            .unwrap();

        assert_eq!(host.release_count(), 1);
        assert_eq!(host.tag_target("unstable"), Some("bbb222".to_string()));
    }

    #[test]
    fn test_phase_transitions_on_success() {
        let host = MockHost::new();
        let publisher = ReleasePublisher::new(&host);

        let report = publisher
            .replace_release(&tag(), &event("abc123"), &BodyTemplate::default())
            .unwrap();

        assert_eq!(
            report.phases,
            vec![
                PublishPhase::Start,
                PublishPhase::Deleting,
                PublishPhase::DeletedOrAbsent,
                PublishPhase::Creating,
                PublishPhase::Done,
            ]
        );
    }

    #[test]
    fn test_delete_failure_aborts_before_create() {
        let host = MockHost::new();
        host.seed_release("unstable", "old000");
        host.fail_delete(HostError::Fatal("permission denied".to_string()));
        let publisher = ReleasePublisher::new(&host);

        let err = publisher
            .replace_release(&tag(), &event("new111"), &BodyTemplate::default())
            .unwrap_err();

        assert_eq!(err.phase, PublishPhase::Deleting);
        assert!(!host.calls().iter().any(|c| c.starts_with("create:")));
        // Previous release untouched
        assert_eq!(host.tag_target("unstable"), Some("old000".to_string()));
    }

    #[test]
    fn test_create_failure_reports_creating_phase() {
        let host = MockHost::new();
        host.seed_release("unstable", "old000");
        host.fail_create(HostError::Transient("bad gateway".to_string()));
        let publisher = ReleasePublisher::new(&host);

        let err = publisher
            .replace_release(&tag(), &event("new111"), &BodyTemplate::default())
            .unwrap_err();

        assert_eq!(err.phase, PublishPhase::Creating);
        // Degraded but accepted: old release is gone, tag absent until next run
        assert_eq!(host.release_count(), 0);
    }

    #[test]
    fn test_transient_delete_failure_without_retry_aborts() {
        let host = MockHost::new();
        host.fail_delete(HostError::Transient("timeout".to_string()));
        let publisher = ReleasePublisher::new(&host);

        let err = publisher
            .replace_release(&tag(), &event("abc123"), &BodyTemplate::default())
            .unwrap_err();

        assert_eq!(err.phase, PublishPhase::Deleting);
        assert!(matches!(err.source, HostError::Transient(_)));
    }

    #[test]
    fn test_retry_recovers_from_transient_failure() {
        let host = MockHost::new();
        host.fail_delete(HostError::Transient("timeout".to_string()));
        let retry = RetryPolicy {
            attempts: 2,
            backoff: Duration::from_millis(0),
        };
        let publisher = ReleasePublisher::with_retry(&host, retry);

        let report = publisher
            .replace_release(&tag(), &event("abc123"), &BodyTemplate::default())
            .unwrap();

        assert_eq!(report.release.tag_name, "unstable");
        // Two delete attempts, then one create; ordering preserved
        assert_eq!(
            host.calls(),
            vec!["delete:unstable", "delete:unstable", "create:unstable"]
        );
    }

    #[test]
    fn test_retry_never_applies_to_fatal_failures() {
        let host = MockHost::new();
        host.fail_delete(HostError::Fatal("permission denied".to_string()));
        let retry = RetryPolicy {
            attempts: 3,
            backoff: Duration::from_millis(0),
        };
        let publisher = ReleasePublisher::with_retry(&host, retry);

        let err = publisher
            .replace_release(&tag(), &event("abc123"), &BodyTemplate::default())
            .unwrap_err();

        assert!(matches!(err.source, HostError::Fatal(_)));
        assert_eq!(host.calls(), vec!["delete:unstable"]);
    }

    #[test]
    fn test_retry_exhaustion_surfaces_last_error() {
        let host = MockHost::new();
        host.fail_delete(HostError::Transient("one".to_string()));
        host.fail_delete(HostError::Transient("two".to_string()));
        let retry = RetryPolicy {
            attempts: 1,
            backoff: Duration::from_millis(0),
        };
        let publisher = ReleasePublisher::with_retry(&host, retry);

        let err = publisher
            .replace_release(&tag(), &event("abc123"), &BodyTemplate::default())
            .unwrap_err();

        assert_eq!(err.source, HostError::Transient("two".to_string()));
    }

    #[test]
    fn test_publish_error_display_names_phase() {
        let err = PublishError {
            phase: PublishPhase::Deleting,
            source: HostError::Fatal("permission denied".to_string()),
        };
        let msg = err.to_string();
        assert!(msg.contains("deleting the previous release"));
    }
}
