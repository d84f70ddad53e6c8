use serde::{Deserialize, Serialize};

use crate::domain::{BodyTemplate, FloatingTag, TriggerEvent};

/// Payload for creating a release on the hosting service
///
/// Field names follow the GitHub release API so the request body can be
/// serialized directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseRequest {
    pub tag_name: String,
    pub target_commitish: String,
    pub name: String,
    pub body: String,
    pub draft: bool,
    pub prerelease: bool,
}

impl ReleaseRequest {
    /// Build the replacement release for a floating tag
    ///
    /// The release is named after the tag itself, published immediately
    /// (draft=false, prerelease=false), with the body rendered from the
    /// configured template.
    pub fn for_floating(tag: &FloatingTag, event: &TriggerEvent, template: &BodyTemplate) -> Self {
        ReleaseRequest {
            tag_name: tag.name().to_string(),
            target_commitish: event.sha.clone(),
            name: tag.name().to_string(),
            body: template.render(&event.sha, &event.timestamp),
            draft: false,
            prerelease: false,
        }
    }
}

/// Release metadata as reported back by the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseRecord {
    pub id: u64,
    pub tag_name: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
}
