//! Persisted per-(company, source, unit) state used to compute deltas.
//!
//! A snapshot is monotonically replaced after each successful check — never
//! partially merged. On failure the prior snapshot is retained unchanged.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoSnapshot {
    pub last_commit_sha: Option<String>,
    /// Localization-relevant blob paths seen so far. Restricted to paths
    /// matching the localization patterns; whole trees are unbounded.
    #[serde(default)]
    pub known_file_paths: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    /// Grows monotonically: a language removed from the listing stays known
    /// so its return never re-signals.
    #[serde(default)]
    pub known_languages: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsSnapshot {
    pub content_hash: Option<String>,
    #[serde(default)]
    pub known_hreflang_locales: BTreeSet<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_snapshot_serde_roundtrip() {
        let snap = RepoSnapshot {
            last_commit_sha: Some("deadbeef".to_string()),
            known_file_paths: ["locales/fr.json".to_string()].into_iter().collect(),
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: RepoSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn docs_snapshot_tolerates_missing_fields() {
        let back: DocsSnapshot = serde_json::from_str("{\"content_hash\":null}").unwrap();
        assert!(back.content_hash.is_none());
        assert!(back.known_hreflang_locales.is_empty());
    }

    #[test]
    fn store_snapshot_defaults_empty() {
        let back: StoreSnapshot = serde_json::from_str("{}").unwrap();
        assert!(back.known_languages.is_empty());
    }
}
