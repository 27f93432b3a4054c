//! Repository detector: diffs the default-branch tree against the prior
//! snapshot for new localization files, and scans recent commits and open
//! PRs for localization keywords.

use std::collections::BTreeSet;

use lingowatch_core::rules;
use lingowatch_core::{Signal, SignalKind, SourceKind};
use lingowatch_github::RepoState;

use crate::snapshot::RepoSnapshot;

const SHORT_MESSAGE_LEN: usize = 100;
const PR_TITLE_LEN: usize = 80;

/// Diff one repository's current state against its prior snapshot.
///
/// With no prior snapshot this is the baseline check: the snapshot is
/// established and no signals are emitted. Otherwise:
///
/// - a localization path present now but not in `known_file_paths`, with a
///   recognizable language code, emits `NEW_LANG_FILE`;
/// - commits newer than `last_commit_sha` from non-bot authors whose message
///   matches the keyword list emit `KEYWORD`;
/// - open PRs from non-bot authors whose title matches emit `OPEN_PR`.
///
/// The returned snapshot carries the newest commit SHA and the union of known
/// and discovered localization paths.
#[must_use]
pub fn diff_repo(
    company: &str,
    org: &str,
    repo: &str,
    state: &RepoState,
    prior: Option<&RepoSnapshot>,
) -> (Vec<Signal>, RepoSnapshot) {
    let discovered: BTreeSet<String> = state
        .file_paths
        .iter()
        .filter(|p| rules::is_localization_path(p))
        .cloned()
        .collect();

    let Some(prior) = prior else {
        return (
            Vec::new(),
            RepoSnapshot {
                last_commit_sha: state.commit_sha.clone(),
                known_file_paths: discovered,
            },
        );
    };

    let mut signals = Vec::new();

    for path in discovered.difference(&prior.known_file_paths) {
        let Some(code) = rules::extract_language_code(path) else {
            continue;
        };
        let filename = path.rsplit('/').next().unwrap_or(path);
        signals.push(Signal::new(
            SignalKind::NewLangFile,
            company,
            SourceKind::Github,
            format!("{org}/{repo}: {filename}"),
            format!("New localization file {path} (language: {code})"),
            vec![code.to_string()],
            Some(format!("https://github.com/{org}/{repo}/blob/HEAD/{path}")),
        ));
    }

    for commit in &state.recent_commits {
        if Some(commit.sha.as_str()) == prior.last_commit_sha.as_deref() {
            break;
        }
        if rules::is_bot_author(&commit.author) {
            continue;
        }
        let matched = rules::matched_keywords(&commit.message);
        if matched.is_empty() {
            continue;
        }
        let short_message: String = commit
            .message
            .lines()
            .next()
            .unwrap_or("")
            .chars()
            .take(SHORT_MESSAGE_LEN)
            .collect();
        signals.push(Signal::new(
            SignalKind::Keyword,
            company,
            SourceKind::Github,
            format!("{org}/{repo}: {short_message}"),
            format!("Commit by {}", commit.author),
            matched.iter().map(ToString::to_string).collect(),
            commit.url.clone(),
        ));
    }

    for pr in &state.open_prs {
        if rules::is_bot_author(&pr.author) {
            continue;
        }
        let matched = rules::matched_keywords(&pr.title);
        if matched.is_empty() {
            continue;
        }
        let title: String = pr.title.chars().take(PR_TITLE_LEN).collect();
        let reviewers = if pr.reviewers.is_empty() {
            "none".to_string()
        } else {
            pr.reviewers.join(", ")
        };
        signals.push(Signal::new(
            SignalKind::OpenPr,
            company,
            SourceKind::Github,
            format!("{org}/{repo}: PR #{}: {title}", pr.number),
            format!(
                "Open pull request by {} — early localization signal; reviewers: {reviewers}",
                pr.author
            ),
            matched.iter().map(ToString::to_string).collect(),
            pr.url.clone(),
        ));
    }

    let snapshot = RepoSnapshot {
        last_commit_sha: state
            .commit_sha
            .clone()
            .or_else(|| prior.last_commit_sha.clone()),
        known_file_paths: prior.known_file_paths.union(&discovered).cloned().collect(),
    };

    (signals, snapshot)
}

#[cfg(test)]
mod tests {
    use lingowatch_github::{CommitInfo, PullRequestInfo};

    use super::*;

    fn state(paths: &[&str]) -> RepoState {
        RepoState {
            commit_sha: Some("head".to_string()),
            file_paths: paths.iter().map(ToString::to_string).collect(),
            recent_commits: vec![],
            open_prs: vec![],
        }
    }

    fn snapshot(sha: Option<&str>, paths: &[&str]) -> RepoSnapshot {
        RepoSnapshot {
            last_commit_sha: sha.map(ToString::to_string),
            known_file_paths: paths.iter().map(ToString::to_string).collect(),
        }
    }

    fn commit(sha: &str, author: &str, message: &str) -> CommitInfo {
        CommitInfo {
            sha: sha.to_string(),
            author: author.to_string(),
            message: message.to_string(),
            url: Some(format!("https://github.com/acme/app/commit/{sha}")),
        }
    }

    #[test]
    fn new_french_file_emits_exactly_one_signal() {
        let prior = snapshot(Some("head"), &["locales/en.json"]);
        let current = state(&["locales/en.json", "locales/fr.json"]);

        let (signals, next) = diff_repo("Acme", "acme", "app", &current, Some(&prior));

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::NewLangFile);
        assert_eq!(signals[0].keywords, vec!["fr"]);
        assert!(next.known_file_paths.contains("locales/fr.json"));
        assert!(next.known_file_paths.contains("locales/en.json"));
    }

    #[test]
    fn second_run_with_unchanged_tree_is_silent() {
        let current = state(&["locales/en.json", "locales/fr.json"]);
        let prior = snapshot(Some("head"), &["locales/en.json"]);

        let (_, next) = diff_repo("Acme", "acme", "app", &current, Some(&prior));
        let (signals, again) = diff_repo("Acme", "acme", "app", &current, Some(&next));

        assert!(signals.is_empty(), "idempotence: no re-signaling");
        assert_eq!(again, next);
    }

    #[test]
    fn baseline_check_emits_nothing() {
        let current = state(&["locales/fr.json", "locales/de.json"]);
        let (signals, next) = diff_repo("Acme", "acme", "app", &current, None);
        assert!(signals.is_empty());
        assert_eq!(next.known_file_paths.len(), 2);
        assert_eq!(next.last_commit_sha.as_deref(), Some("head"));
    }

    #[test]
    fn non_localization_paths_are_ignored() {
        let prior = snapshot(Some("head"), &[]);
        let current = state(&["src/fr.json", "locales/README.md"]);
        let (signals, next) = diff_repo("Acme", "acme", "app", &current, Some(&prior));
        assert!(signals.is_empty());
        assert!(next.known_file_paths.is_empty());
    }

    #[test]
    fn removed_paths_stay_known() {
        let prior = snapshot(Some("head"), &["locales/fr.json"]);
        let current = state(&["locales/en.json"]);
        let (signals, next) = diff_repo("Acme", "acme", "app", &current, Some(&prior));
        assert!(signals.is_empty());
        assert!(next.known_file_paths.contains("locales/fr.json"));
    }

    #[test]
    fn commit_keyword_scan_stops_at_last_seen_sha() {
        let mut current = state(&[]);
        current.recent_commits = vec![
            commit("c3", "Jane Doe", "Add i18n support"),
            commit("c2", "Jane Doe", "Fix translation bug"),
            commit("c1", "Jane Doe", "Old localization work"),
        ];
        let prior = snapshot(Some("c2"), &[]);

        let (signals, next) = diff_repo("Acme", "acme", "app", &current, Some(&prior));

        // Only c3 is newer than the stored SHA.
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::Keyword);
        assert!(signals[0].title.contains("Add i18n support"));
        assert_eq!(next.last_commit_sha.as_deref(), Some("head"));
    }

    #[test]
    fn bot_commits_never_signal() {
        let mut current = state(&[]);
        current.recent_commits = vec![commit(
            "c9",
            "dependabot[bot]",
            "Update i18n translation packages",
        )];
        let prior = snapshot(Some("c0"), &[]);

        let (signals, _) = diff_repo("Acme", "acme", "app", &current, Some(&prior));
        assert!(signals.is_empty(), "bot filter must suppress keyword match");
    }

    #[test]
    fn non_keyword_commits_are_silent() {
        let mut current = state(&[]);
        current.recent_commits = vec![commit("c9", "Jane Doe", "Refactor request pipeline")];
        let prior = snapshot(Some("c0"), &[]);
        let (signals, _) = diff_repo("Acme", "acme", "app", &current, Some(&prior));
        assert!(signals.is_empty());
    }

    #[test]
    fn matching_open_pr_signals_with_reviewers() {
        let mut current = state(&[]);
        current.open_prs = vec![PullRequestInfo {
            number: 42,
            title: "Add Arabic localization".to_string(),
            author: "janedoe".to_string(),
            url: Some("https://github.com/acme/app/pull/42".to_string()),
            reviewers: vec!["l10n-lead".to_string(), "i18n-bot-reviewer".to_string()],
        }];
        let prior = snapshot(Some("head"), &[]);

        let (signals, _) = diff_repo("Acme", "acme", "app", &current, Some(&prior));

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].kind, SignalKind::OpenPr);
        assert!(signals[0].details.contains("l10n-lead"));
        assert!(signals[0].keywords.contains(&"arabic".to_string()));
    }

    #[test]
    fn bot_authored_pr_never_signals() {
        let mut current = state(&[]);
        current.open_prs = vec![PullRequestInfo {
            number: 7,
            title: "Automated translation sync".to_string(),
            author: "renovate[bot]".to_string(),
            url: None,
            reviewers: vec![],
        }];
        let prior = snapshot(Some("head"), &[]);

        let (signals, _) = diff_repo("Acme", "acme", "app", &current, Some(&prior));
        assert!(signals.is_empty());
    }

    #[test]
    fn empty_commit_list_keeps_prior_sha() {
        let mut current = state(&[]);
        current.commit_sha = None;
        let prior = snapshot(Some("c5"), &[]);
        let (_, next) = diff_repo("Acme", "acme", "app", &current, Some(&prior));
        assert_eq!(next.last_commit_sha.as_deref(), Some("c5"));
    }
}
