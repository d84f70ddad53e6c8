use std::collections::HashMap;
use std::sync::Mutex;

use super::{DeleteOutcome, HostError, HostResult, ReleaseHost};
use crate::domain::{ReleaseRecord, ReleaseRequest};

/// Mock release host for testing without network access
///
/// Holds the tag -> release state in memory, records every call for ordering
/// assertions, and supports scripted per-call failures so abort and retry
/// behavior can be exercised deterministically.
pub struct MockHost {
    state: Mutex<MockState>,
}

struct MockState {
    /// Release object per tag name
    releases: HashMap<String, ReleaseRecord>,
    /// Commit SHA each tag currently resolves to
    tags: HashMap<String, String>,
    next_id: u64,
    calls: Vec<String>,
    delete_failures: Vec<HostError>,
    create_failures: Vec<HostError>,
}

impl MockHost {
    /// Create a new empty mock host
    pub fn new() -> Self {
        MockHost {
            state: Mutex::new(MockState {
                releases: HashMap::new(),
                tags: HashMap::new(),
                next_id: 1,
                calls: Vec::new(),
                delete_failures: Vec::new(),
                create_failures: Vec::new(),
            }),
        }
    }

    /// Seed an existing release/tag pair
    pub fn seed_release(&self, tag: impl Into<String>, sha: impl Into<String>) {
        let tag = tag.into();
        let mut state = self.state.lock().unwrap();
        let id = state.next_id;
        state.next_id += 1;
        state.releases.insert(
            tag.clone(),
            ReleaseRecord {
                id,
                tag_name: tag.clone(),
                name: tag.clone(),
                body: String::new(),
                draft: false,
                prerelease: false,
            },
        );
        state.tags.insert(tag, sha.into());
    }

    /// Queue a failure for an upcoming delete call (consumed in order)
    pub fn fail_delete(&self, err: HostError) {
        self.state.lock().unwrap().delete_failures.push(err);
    }

    /// Queue a failure for an upcoming create call (consumed in order)
    pub fn fail_create(&self, err: HostError) {
        self.state.lock().unwrap().create_failures.push(err);
    }

    /// All calls made so far, in order ("find:tag", "delete:tag", "create:tag")
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// The release currently stored for a tag, if any
    pub fn release_for(&self, tag: &str) -> Option<ReleaseRecord> {
        self.state.lock().unwrap().releases.get(tag).cloned()
    }

    /// The commit SHA a tag currently resolves to, if the tag exists
    pub fn tag_target(&self, tag: &str) -> Option<String> {
        self.state.lock().unwrap().tags.get(tag).cloned()
    }

    /// Total number of release objects stored
    pub fn release_count(&self) -> usize {
        self.state.lock().unwrap().releases.len()
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseHost for MockHost {
    fn find_release(&self, tag_name: &str) -> HostResult<Option<ReleaseRecord>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("find:{}", tag_name));
        Ok(state.releases.get(tag_name).cloned())
    }

    fn delete_tag_and_release(&self, tag_name: &str) -> HostResult<DeleteOutcome> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("delete:{}", tag_name));

        if !state.delete_failures.is_empty() {
            return Err(state.delete_failures.remove(0));
        }

        let had_release = state.releases.remove(tag_name).is_some();
        let had_tag = state.tags.remove(tag_name).is_some();

        if had_release || had_tag {
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Absent)
        }
    }

    fn create_release(&self, request: &ReleaseRequest) -> HostResult<ReleaseRecord> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("create:{}", request.tag_name));

        if !state.create_failures.is_empty() {
            return Err(state.create_failures.remove(0));
        }

        if state.releases.contains_key(&request.tag_name) {
            return Err(HostError::Fatal(format!(
                "Release for tag '{}' already exists",
                request.tag_name
            )));
        }

        let id = state.next_id;
        state.next_id += 1;

        let record = ReleaseRecord {
            id,
            tag_name: request.tag_name.clone(),
            name: request.name.clone(),
            body: request.body.clone(),
            draft: request.draft,
            prerelease: request.prerelease,
        };

        state.releases.insert(request.tag_name.clone(), record.clone());
        state
            .tags
            .insert(request.tag_name.clone(), request.target_commitish.clone());

        Ok(record)
    }
}
