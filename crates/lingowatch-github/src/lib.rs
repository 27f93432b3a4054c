//! Thin typed client for the GitHub REST API, covering the endpoints the
//! repository detector needs: repo metadata, recursive tree listing, recent
//! commits, and open pull requests.

mod client;
mod error;
mod retry;
mod types;

pub use client::GithubClient;
pub use error::GithubError;
pub use types::{CommitInfo, PullRequestInfo, RepoState};
