//! HTTP client for the GitHub REST API.
//!
//! Wraps `reqwest` with GitHub-specific error handling (rate limits surface
//! as [`GithubError::RateLimited`]), optional token auth, and typed response
//! deserialization.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::GithubError;
use crate::retry::retry_with_backoff;
use crate::types::{
    CommitInfo, CommitItem, PullItem, PullRequestInfo, RepoInfoResponse, RepoState, TreeResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.github.com/";

const COMMITS_PER_PAGE: u32 = 20;
const PULLS_PER_PAGE: u32 = 30;

/// Client for the GitHub REST API.
///
/// Use [`GithubClient::new`] for production or [`GithubClient::with_base_url`]
/// to point at a mock server in tests. Requests are unauthenticated unless a
/// token is supplied (anonymous access works but with a much lower rate limit).
pub struct GithubClient {
    client: Client,
    base_url: Url,
    token: Option<String>,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl GithubClient {
    /// Creates a new client pointed at the production GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, GithubError> {
        Self::with_base_url(
            token,
            timeout_secs,
            user_agent,
            max_retries,
            backoff_base_ms,
            DEFAULT_BASE_URL,
        )
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`GithubError::UnexpectedStatus`] if
    /// `base_url` is not a valid URL base.
    pub fn with_base_url(
        token: Option<&str>,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, GithubError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: a trailing slash makes Url::join treat the last segment
        // as a directory rather than replacing it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GithubError::UnexpectedStatus {
            status: 0,
            url: format!("invalid base URL '{base_url}': {e}"),
        })?;

        Ok(Self {
            client,
            base_url,
            token: token.map(str::to_owned),
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetches the combined repository state for the detector: newest commit
    /// SHA, default-branch blob paths, recent commits, and open PRs.
    ///
    /// # Errors
    ///
    /// - [`GithubError::RateLimited`] on HTTP 403/429 with exhausted quota.
    /// - [`GithubError::NotFound`] if the repository does not exist.
    /// - [`GithubError::UnexpectedStatus`] on any other non-2xx status.
    /// - [`GithubError::Http`] on network failure after retries.
    /// - [`GithubError::Deserialize`] if a response does not match the
    ///   expected shape.
    pub async fn get_repo_state(&self, org: &str, repo: &str) -> Result<RepoState, GithubError> {
        let info: RepoInfoResponse = self
            .get_json(
                &format!("repos/{org}/{repo}"),
                &[],
                &format!("repo metadata for {org}/{repo}"),
            )
            .await?;

        let tree: TreeResponse = self
            .get_json(
                &format!("repos/{org}/{repo}/git/trees/{}", info.default_branch),
                &[("recursive", "1")],
                &format!("tree for {org}/{repo}@{}", info.default_branch),
            )
            .await?;
        if tree.truncated {
            tracing::warn!(
                org,
                repo,
                "GitHub truncated the recursive tree listing; file diff may miss paths"
            );
        }
        let file_paths: Vec<String> = tree
            .tree
            .into_iter()
            .filter(|e| e.kind == "blob")
            .map(|e| e.path)
            .collect();

        let commits: Vec<CommitItem> = self
            .get_json(
                &format!("repos/{org}/{repo}/commits"),
                &[("per_page", &COMMITS_PER_PAGE.to_string())],
                &format!("commits for {org}/{repo}"),
            )
            .await?;

        let pulls: Vec<PullItem> = self
            .get_json(
                &format!("repos/{org}/{repo}/pulls"),
                &[
                    ("state", "open"),
                    ("per_page", &PULLS_PER_PAGE.to_string()),
                ],
                &format!("open PRs for {org}/{repo}"),
            )
            .await?;

        let commit_sha = commits.first().map(|c| c.sha.clone());
        let recent_commits = commits
            .into_iter()
            .map(|c| CommitInfo {
                sha: c.sha,
                author: c
                    .commit
                    .author
                    .map_or_else(|| "Unknown".to_string(), |a| a.name),
                message: c.commit.message,
                url: c.html_url,
            })
            .collect();
        let open_prs = pulls
            .into_iter()
            .map(|p| PullRequestInfo {
                number: p.number,
                title: p.title,
                author: p
                    .user
                    .map_or_else(|| "Unknown".to_string(), |u| u.login),
                url: p.html_url,
                reviewers: p.requested_reviewers.into_iter().map(|r| r.login).collect(),
            })
            .collect();

        Ok(RepoState {
            commit_sha,
            file_paths,
            recent_commits,
            open_prs,
        })
    }

    /// Builds an absolute URL for an API path with query parameters.
    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self
            .base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone());
        for (key, value) in params {
            url.query_pairs_mut().append_pair(key, value);
        }
        url
    }

    /// GET a JSON endpoint with retry, mapping GitHub's status conventions to
    /// typed errors before deserializing into `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        context: &str,
    ) -> Result<T, GithubError> {
        let url = self.build_url(path, params);
        let max_retries = self.max_retries;
        let backoff_base_ms = self.backoff_base_ms;

        let body = retry_with_backoff(max_retries, backoff_base_ms, || {
            let url = url.clone();
            async move {
                let mut request = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/vnd.github.v3+json");
                if let Some(token) = &self.token {
                    request = request
                        .header(reqwest::header::AUTHORIZATION, format!("token {token}"));
                }

                let response = request.send().await?;
                let status = response.status();

                // GitHub signals an exhausted quota as 403 with
                // X-RateLimit-Remaining: 0, and secondary limits as 429.
                if status == StatusCode::TOO_MANY_REQUESTS || is_rate_limit_403(status, &response)
                {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(GithubError::RateLimited { retry_after_secs });
                }

                if status == StatusCode::NOT_FOUND {
                    return Err(GithubError::NotFound {
                        url: url.to_string(),
                    });
                }

                if !status.is_success() {
                    return Err(GithubError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await?;

        serde_json::from_str::<T>(&body).map_err(|e| GithubError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

fn is_rate_limit_403(status: StatusCode, response: &reqwest::Response) -> bool {
    status == StatusCode::FORBIDDEN
        && response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v == "0")
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
