use crate::error::{ReleaseRotateError, Result};

/// A floating release tag
///
/// Unlike an immutable version tag, a floating tag is repeatedly deleted and
/// recreated so that it always points at the newest qualifying commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FloatingTag {
    name: String,
}

impl FloatingTag {
    /// Create a new floating tag, validating the name against the git ref charset
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();

        if name.is_empty() {
            return Err(ReleaseRotateError::tag("Tag name cannot be empty"));
        }

        // Subset of the git check-ref-format rules that matters for tag names
        let valid = regex::Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._/-]*$")
            .map_err(|_| ReleaseRotateError::tag("Invalid tag validation pattern"))?;

        if !valid.is_match(&name) || name.contains("..") || name.ends_with('.') {
            return Err(ReleaseRotateError::tag(format!(
                "Invalid tag name '{}'",
                name
            )));
        }

        Ok(FloatingTag { name })
    }

    /// The bare tag name (e.g., "unstable")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fully qualified ref path (e.g., "refs/tags/unstable")
    pub fn ref_path(&self) -> String {
        format!("refs/tags/{}", self.name)
    }
}

impl std::fmt::Display for FloatingTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_new() {
        let tag = FloatingTag::new("unstable").unwrap();
        assert_eq!(tag.name(), "unstable");
    }

    #[test]
    fn test_tag_ref_path() {
        let tag = FloatingTag::new("unstable").unwrap();
        assert_eq!(tag.ref_path(), "refs/tags/unstable");
    }

    #[test]
    fn test_tag_with_separator_chars() {
        assert!(FloatingTag::new("nightly-build").is_ok());
        assert!(FloatingTag::new("release/edge").is_ok());
        assert!(FloatingTag::new("v1.x").is_ok());
    }

    #[test]
    fn test_tag_rejects_empty() {
        assert!(FloatingTag::new("").is_err());
    }

    #[test]
    fn test_tag_rejects_invalid_names() {
        assert!(FloatingTag::new("has space").is_err());
        assert!(FloatingTag::new("-leading-dash").is_err());
        assert!(FloatingTag::new("double..dot").is_err());
        assert!(FloatingTag::new("trailing.").is_err());
        assert!(FloatingTag::new("control\tchar").is_err());
    }

    #[test]
    fn test_tag_display() {
        let tag = FloatingTag::new("unstable").unwrap();
        assert_eq!(format!("{}", tag), "unstable");
    }
}
