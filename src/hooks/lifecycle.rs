use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Points in the replacement sequence where hooks can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HookType {
    PreReplace,
    PostPublish,
}

impl HookType {
    /// Get the hook name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PreReplace => "pre-replace",
            HookType::PostPublish => "post-publish",
        }
    }
}

/// Context information passed to a hook
#[derive(Debug, Clone)]
pub struct HookContext {
    /// Type of hook being executed
    pub hook_type: HookType,
    /// Floating tag being replaced
    pub tag: String,
    /// Branch whose push triggered the run
    pub branch: String,
    /// Triggering commit SHA
    pub sha: String,
    /// Triggering commit timestamp
    pub timestamp: String,
    /// Host id of the created release, once known
    pub release_id: Option<u64>,
}

impl HookContext {
    /// Convert context to environment variables for the hook script
    ///
    /// Maps context fields to RELEASEROTATE_* environment variables
    pub fn to_env_vars(&self) -> HashMap<String, String> {
        let mut env = HashMap::new();

        env.insert("RELEASEROTATE_TAG".to_string(), self.tag.clone());
        env.insert("RELEASEROTATE_BRANCH".to_string(), self.branch.clone());
        env.insert("RELEASEROTATE_SHA".to_string(), self.sha.clone());
        env.insert(
            "RELEASEROTATE_TIMESTAMP".to_string(),
            self.timestamp.clone(),
        );

        if let Some(id) = self.release_id {
            env.insert("RELEASEROTATE_RELEASE_ID".to_string(), id.to_string());
        }

        env
    }
}
