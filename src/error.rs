use crate::host::HostError;
use thiserror::Error;

/// Unified error type for release-rotate operations
#[derive(Error, Debug)]
pub enum ReleaseRotateError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Release host error: {0}")]
    Host(#[from] HostError),

    #[error("Release replacement {0}")]
    Publish(#[from] crate::publisher::PublishError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Trigger event error: {0}")]
    Event(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Hook failed: {0}")]
    Hook(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-rotate
pub type Result<T> = std::result::Result<T, ReleaseRotateError>;

impl ReleaseRotateError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseRotateError::Config(msg.into())
    }

    /// Create a trigger event error with context
    pub fn event(msg: impl Into<String>) -> Self {
        ReleaseRotateError::Event(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseRotateError::Tag(msg.into())
    }

    /// Create a hook error with context
    pub fn hook(msg: impl Into<String>) -> Self {
        ReleaseRotateError::Hook(msg.into())
    }

    /// Whether this error is a transient host failure that is safe to retry
    pub fn is_transient(&self) -> bool {
        match self {
            ReleaseRotateError::Host(HostError::Transient(_)) => true,
            ReleaseRotateError::Publish(e) => matches!(e.source, HostError::Transient(_)),
            _ => false,
        }
    }
}
