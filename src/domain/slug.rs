use crate::error::{ReleaseRotateError, Result};

/// Owner/repository pair addressing the hosted repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse an "owner/repo" string
    pub fn parse(s: &str) -> Result<Self> {
        let mut parts = s.splitn(2, '/');
        match (parts.next(), parts.next()) {
            (Some(owner), Some(repo)) if !owner.is_empty() && !repo.is_empty() => Ok(RepoSlug {
                owner: owner.to_string(),
                repo: repo.trim_end_matches(".git").to_string(),
            }),
            _ => Err(ReleaseRotateError::config(format!(
                "Repository must be given as 'owner/repo', got '{}'",
                s
            ))),
        }
    }

    /// Derive the slug from a git remote URL
    ///
    /// Handles the two forms git remotes come in:
    /// - ssh: `git@github.com:owner/repo.git`
    /// - https: `https://github.com/owner/repo.git`
    pub fn from_remote_url(url: &str) -> Result<Self> {
        let re = regex::Regex::new(r"^(?:git@[^:]+:|[a-z+]+://[^/]+/)([^/]+)/(.+?)(?:\.git)?/?$")
            .map_err(|_| ReleaseRotateError::config("Invalid remote pattern"))?;

        let captures = re.captures(url).ok_or_else(|| {
            ReleaseRotateError::config(format!("Cannot parse remote URL '{}'", url))
        })?;

        Ok(RepoSlug {
            owner: captures[1].to_string(),
            repo: captures[2].to_string(),
        })
    }

    /// "owner/repo" form used in API paths and display
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_slug() {
        let slug = RepoSlug::parse("mlrun/demos").unwrap();
        assert_eq!(slug.owner, "mlrun");
        assert_eq!(slug.repo, "demos");
    }

    #[test]
    fn test_parse_rejects_bare_name() {
        assert!(RepoSlug::parse("demos").is_err());
        assert!(RepoSlug::parse("/demos").is_err());
        assert!(RepoSlug::parse("owner/").is_err());
    }

    #[test]
    fn test_from_ssh_remote() {
        let slug = RepoSlug::from_remote_url("git@github.com:mlrun/demos.git").unwrap();
        assert_eq!(slug.full_name(), "mlrun/demos");
    }

    #[test]
    fn test_from_https_remote() {
        let slug = RepoSlug::from_remote_url("https://github.com/mlrun/demos.git").unwrap();
        assert_eq!(slug.full_name(), "mlrun/demos");
    }

    #[test]
    fn test_from_https_remote_without_suffix() {
        let slug = RepoSlug::from_remote_url("https://github.com/mlrun/demos").unwrap();
        assert_eq!(slug.full_name(), "mlrun/demos");
    }

    #[test]
    fn test_from_remote_rejects_garbage() {
        assert!(RepoSlug::from_remote_url("not a url").is_err());
    }

    #[test]
    fn test_display() {
        let slug = RepoSlug::parse("mlrun/demos").unwrap();
        assert_eq!(format!("{}", slug), "mlrun/demos");
    }
}
