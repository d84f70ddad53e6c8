/// Default release body, matching the wire format emitted on every rotation
pub const DEFAULT_BODY_TEMPLATE: &str =
    "Latest unstable release\n- Git sha {sha}\n- Updated at {timestamp}";

/// Release body template (e.g., "Latest unstable release\n- Git sha {sha}\n- Updated at {timestamp}")
///
/// Supports two placeholders: `{sha}` for the triggering commit SHA and
/// `{timestamp}` for the triggering commit timestamp.
#[derive(Debug, Clone)]
pub struct BodyTemplate {
    pattern: String,
}

impl BodyTemplate {
    /// Create a new body template from a pattern string
    pub fn new(pattern: impl Into<String>) -> Self {
        BodyTemplate {
            pattern: pattern.into(),
        }
    }

    /// Render the template for a given commit
    /// Example: pattern="sha {sha} at {timestamp}", sha="abc" -> "sha abc at ..."
    pub fn render(&self, sha: &str, timestamp: &str) -> String {
        self.pattern
            .replace("{sha}", sha)
            .replace("{timestamp}", timestamp)
    }
}

impl Default for BodyTemplate {
    fn default() -> Self {
        BodyTemplate::new(DEFAULT_BODY_TEMPLATE)
    }
}
