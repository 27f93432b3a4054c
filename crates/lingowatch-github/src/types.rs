use serde::Deserialize;

/// Everything the repository detector needs from one remote repo, fetched in
/// a single [`crate::GithubClient::get_repo_state`] call.
#[derive(Debug, Clone)]
pub struct RepoState {
    /// SHA of the newest commit on the default branch, if any commits exist.
    pub commit_sha: Option<String>,
    /// Blob paths of the default-branch tree. May be incomplete if GitHub
    /// truncated the recursive listing.
    pub file_paths: Vec<String>,
    pub recent_commits: Vec<CommitInfo>,
    pub open_prs: Vec<PullRequestInfo>,
}

#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub sha: String,
    pub author: String,
    pub message: String,
    pub url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PullRequestInfo {
    pub number: u64,
    pub title: String,
    pub author: String,
    pub url: Option<String>,
    /// Logins of requested reviewers, carried as signal metadata.
    pub reviewers: Vec<String>,
}

// Wire types below mirror the GitHub REST v3 response shapes, trimmed to the
// fields we read.

#[derive(Debug, Deserialize)]
pub(crate) struct RepoInfoResponse {
    pub default_branch: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeResponse {
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    #[serde(default)]
    pub truncated: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitItem {
    pub sha: String,
    pub html_url: Option<String>,
    pub commit: CommitDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetail {
    #[serde(default)]
    pub message: String,
    pub author: Option<CommitAuthor>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitAuthor {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PullItem {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    pub html_url: Option<String>,
    pub user: Option<UserRef>,
    #[serde(default)]
    pub requested_reviewers: Vec<UserRef>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRef {
    pub login: String,
}
