use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

use super::{DeleteOutcome, HostError, HostResult, ReleaseHost};
use crate::domain::{ReleaseRecord, ReleaseRequest, RepoSlug};

/// Public GitHub API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("release-rotate/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github.v3+json";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Release host backed by the GitHub REST v3 release API
///
/// Four endpoints are consumed:
/// - `GET    /repos/{owner}/{repo}/releases/tags/{tag}` - lookup
/// - `DELETE /repos/{owner}/{repo}/releases/{id}`       - remove release object
/// - `DELETE /repos/{owner}/{repo}/git/refs/tags/{tag}` - remove tag ref
/// - `POST   /repos/{owner}/{repo}/releases`            - create release (and tag)
pub struct GithubHost {
    client: Client,
    api_base: String,
    slug: RepoSlug,
    token: String,
}

impl GithubHost {
    /// Create a host client against the public GitHub API
    pub fn new(slug: RepoSlug, token: impl Into<String>) -> HostResult<Self> {
        Self::with_api_base(DEFAULT_API_BASE, slug, token)
    }

    /// Create a host client against a custom API base (GitHub Enterprise, test server)
    pub fn with_api_base(
        api_base: impl Into<String>,
        slug: RepoSlug,
        token: impl Into<String>,
    ) -> HostResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| HostError::Fatal(format!("Cannot build HTTP client: {}", e)))?;

        Ok(GithubHost {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            slug,
            token: token.into(),
        })
    }

    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.api_base, self.slug.owner, self.slug.repo, path
        )
    }

    // Anonymous reads stay possible for public repositories (dry runs
    // without a token); an empty token simply omits the auth header.
    fn authed(&self, builder: reqwest::blocking::RequestBuilder) -> reqwest::blocking::RequestBuilder {
        let builder = builder
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT);
        if self.token.is_empty() {
            builder
        } else {
            builder.bearer_auth(&self.token)
        }
    }

    fn get(&self, url: &str) -> HostResult<Response> {
        self.authed(self.client.get(url))
            .send()
            .map_err(transport_error)
    }

    fn delete(&self, url: &str) -> HostResult<Response> {
        self.authed(self.client.delete(url))
            .send()
            .map_err(transport_error)
    }

    fn post(&self, url: &str, request: &ReleaseRequest) -> HostResult<Response> {
        self.authed(self.client.post(url))
            .json(request)
            .send()
            .map_err(transport_error)
    }

    /// Remove the tag ref itself, after the release object is gone
    ///
    /// GitHub reports a missing ref as 422 ("Reference does not exist") from
    /// this endpoint; both that and 404 mean the tag was already absent.
    fn delete_tag_ref(&self, tag_name: &str) -> HostResult<DeleteOutcome> {
        let url = self.repo_url(&format!("/git/refs/tags/{}", tag_name));
        let response = self.delete(&url)?;

        match response.status() {
            StatusCode::NO_CONTENT => Ok(DeleteOutcome::Deleted),
            StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY => Ok(DeleteOutcome::Absent),
            status => Err(classify_status(status, &read_body(response))),
        }
    }
}

impl ReleaseHost for GithubHost {
    fn find_release(&self, tag_name: &str) -> HostResult<Option<ReleaseRecord>> {
        let url = self.repo_url(&format!("/releases/tags/{}", tag_name));
        let response = self.get(&url)?;

        match response.status() {
            StatusCode::OK => {
                let record = response
                    .json::<ReleaseRecord>()
                    .map_err(|e| HostError::Fatal(format!("Cannot parse release info: {}", e)))?;
                Ok(Some(record))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(classify_status(status, &read_body(response))),
        }
    }

    fn delete_tag_and_release(&self, tag_name: &str) -> HostResult<DeleteOutcome> {
        let release_deleted = match self.find_release(tag_name)? {
            Some(release) => {
                let url = self.repo_url(&format!("/releases/{}", release.id));
                let response = self.delete(&url)?;

                match response.status() {
                    StatusCode::NO_CONTENT => true,
                    // Lost a race with another deleter; the release is gone either way
                    StatusCode::NOT_FOUND => false,
                    status => return Err(classify_status(status, &read_body(response))),
                }
            }
            None => false,
        };

        match self.delete_tag_ref(tag_name)? {
            DeleteOutcome::Deleted => Ok(DeleteOutcome::Deleted),
            DeleteOutcome::Absent if release_deleted => Ok(DeleteOutcome::Deleted),
            DeleteOutcome::Absent => Ok(DeleteOutcome::Absent),
        }
    }

    fn create_release(&self, request: &ReleaseRequest) -> HostResult<ReleaseRecord> {
        let url = self.repo_url("/releases");
        let response = self.post(&url, request)?;

        match response.status() {
            StatusCode::CREATED => response
                .json::<ReleaseRecord>()
                .map_err(|e| HostError::Fatal(format!("Cannot parse created release: {}", e))),
            StatusCode::UNPROCESSABLE_ENTITY => Err(HostError::Fatal(format!(
                "Release for tag '{}' was rejected (already exists or invalid): {}",
                request.tag_name,
                read_body(response)
            ))),
            status => Err(classify_status(status, &read_body(response))),
        }
    }
}

fn transport_error(e: reqwest::Error) -> HostError {
    HostError::Transient(format!("Request failed: {}", e))
}

fn classify_status(status: StatusCode, body: &str) -> HostError {
    match status {
        StatusCode::NOT_FOUND => HostError::NotFound,
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            HostError::Fatal(format!("{}: {}", status, body))
        }
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            HostError::Transient(format!("{}: {}", status, body))
        }
        s if s.is_server_error() => HostError::Transient(format!("{}: {}", s, body)),
        s => HostError::Fatal(format!("unexpected status {}: {}", s, body)),
    }
}

fn read_body(response: Response) -> String {
    extract_message(response.text().unwrap_or_default())
}

/// Pull the human-readable message out of a GitHub error body.
///
/// Error responses come as `{"message": "...", ...}`; anything that doesn't
/// parse is passed through verbatim.
fn extract_message(raw: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string)
            .unwrap_or(raw),
        Err(_) => raw,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slug() -> RepoSlug {
        RepoSlug::parse("mlrun/demos").unwrap()
    }

    #[test]
    fn test_repo_url_building() {
        let host = GithubHost::new(slug(), "token").unwrap();
        assert_eq!(
            host.repo_url("/releases/tags/unstable"),
            "https://api.github.com/repos/mlrun/demos/releases/tags/unstable"
        );
    }

    #[test]
    fn test_custom_api_base_trailing_slash() {
        let host = GithubHost::with_api_base("https://ghe.example.com/api/v3/", slug(), "token")
            .unwrap();
        assert_eq!(
            host.repo_url("/releases"),
            "https://ghe.example.com/api/v3/repos/mlrun/demos/releases"
        );
    }

    #[test]
    fn test_classify_auth_failures_as_fatal() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "bad credentials"),
            HostError::Fatal(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "forbidden"),
            HostError::Fatal(_)
        ));
    }

    #[test]
    fn test_classify_server_errors_as_transient() {
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, ""),
            HostError::Transient(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, ""),
            HostError::Transient(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, ""),
            HostError::Transient(_)
        ));
    }

    #[test]
    fn test_classify_not_found() {
        assert_eq!(classify_status(StatusCode::NOT_FOUND, ""), HostError::NotFound);
    }

    #[test]
    fn test_classify_unexpected_as_fatal() {
        assert!(matches!(
            classify_status(StatusCode::IM_A_TEAPOT, ""),
            HostError::Fatal(_)
        ));
    }

    #[test]
    fn test_extract_message_from_error_body() {
        let body = r#"{"message": "Bad credentials", "documentation_url": "..."}"#.to_string();
        assert_eq!(extract_message(body), "Bad credentials");
    }

    #[test]
    fn test_extract_message_passes_through_non_json() {
        assert_eq!(
            extract_message("plain text error".to_string()),
            "plain text error"
        );
    }
}
