use std::path::Path;

use chrono::{SecondsFormat, TimeZone, Utc};
use git2::{BranchType, Oid, Repository};

use crate::error::{ReleaseRotateError, Result};

/// Wrapper around git2 Repository for trigger-event derivation.
///
/// The publisher itself never touches the local repository; this wrapper only
/// reads enough state to build the trigger event (branch tip SHA, committer
/// timestamp) and to derive the hosted repository slug from the remote URL.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Creates a GitRepo for the current working directory.
    ///
    /// Discovers the git repository in the current directory or parent directories.
    pub fn discover() -> Result<Self> {
        Self::open(".")
    }

    /// Opens a repository at or above the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(GitRepo { repo })
    }

    /// Returns the branch HEAD currently points at, or None when detached.
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = self.repo.head()?;
        if head.is_branch() {
            Ok(head.shorthand().map(String::from))
        } else {
            Ok(None)
        }
    }

    /// Returns the SHA of the current HEAD commit.
    pub fn head_sha(&self) -> Result<String> {
        let head = self.repo.head()?;
        let oid = head
            .target()
            .ok_or_else(|| ReleaseRotateError::event("HEAD has no target"))?;
        Ok(oid.to_string())
    }

    /// Returns the tip commit of a local branch as (sha, committer timestamp).
    ///
    /// The timestamp is RFC 3339 in UTC with second precision, the form
    /// embedded into the release body.
    pub fn branch_tip(&self, branch_name: &str) -> Result<(String, String)> {
        let branch = self
            .repo
            .find_branch(branch_name, BranchType::Local)
            .map_err(|e| {
                ReleaseRotateError::event(format!("Cannot find branch '{}': {}", branch_name, e))
            })?;

        let oid = branch.get().target().ok_or_else(|| {
            ReleaseRotateError::event(format!("Branch '{}' has no target", branch_name))
        })?;

        Ok((oid.to_string(), self.commit_timestamp_oid(oid)?))
    }

    /// Returns the committer timestamp of a commit given its SHA.
    pub fn commit_timestamp(&self, sha: &str) -> Result<String> {
        let oid = Oid::from_str(sha)
            .map_err(|e| ReleaseRotateError::event(format!("Invalid commit SHA '{}': {}", sha, e)))?;
        self.commit_timestamp_oid(oid)
    }

    fn commit_timestamp_oid(&self, oid: Oid) -> Result<String> {
        let commit = self.repo.find_commit(oid).map_err(|e| {
            ReleaseRotateError::event(format!("Cannot find commit {}: {}", oid, e))
        })?;

        let seconds = commit.time().seconds();
        let timestamp = Utc
            .timestamp_opt(seconds, 0)
            .single()
            .ok_or_else(|| {
                ReleaseRotateError::event(format!("Commit {} has an invalid timestamp", oid))
            })?
            .to_rfc3339_opts(SecondsFormat::Secs, true);

        Ok(timestamp)
    }

    /// Returns the URL of a configured remote.
    pub fn remote_url(&self, remote_name: &str) -> Result<String> {
        let remote = self.repo.find_remote(remote_name).map_err(|e| {
            ReleaseRotateError::event(format!("Remote '{}' not found: {}", remote_name, e))
        })?;

        remote.url().map(String::from).ok_or_else(|| {
            ReleaseRotateError::event(format!("Remote '{}' has no URL", remote_name))
        })
    }
}
