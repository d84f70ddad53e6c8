use std::fmt;

/// Warnings that occur at the edges of a publisher run.
/// These are non-fatal issues that should be reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The triggering event is not a branch push; the run becomes a no-op
    NotPushEvent { event_name: String },
    /// The floating tag had nothing to delete; only the create step ran
    TagAlreadyAbsent { tag: String },
    /// The local checkout is not on a branch, so the trigger cannot be derived
    DetachedHead { sha: String },
    /// No usable remote to derive the repository slug from
    MissingRemote { remote: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NotPushEvent { event_name } => {
                write!(
                    f,
                    "Trigger event '{}' is not a push; nothing to publish",
                    event_name
                )
            }
            BoundaryWarning::TagAlreadyAbsent { tag } => {
                write!(f, "No existing release found for tag '{}'", tag)
            }
            BoundaryWarning::DetachedHead { sha } => {
                let short_sha = if sha.len() > 7 { &sha[..7] } else { sha.as_str() };
                write!(f, "HEAD is detached at {}; checkout a branch", short_sha)
            }
            BoundaryWarning::MissingRemote { remote } => {
                write!(f, "Remote '{}' not found; pass --repo explicitly", remote)
            }
        }
    }
}
