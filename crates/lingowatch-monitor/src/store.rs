//! Snapshot persistence behind a swappable backend.
//!
//! The Postgres backend stores snapshots as JSONB rows; the file backend keeps
//! one JSON file per monitored unit under the configured data directory, so
//! the monitor can run without a database at all.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;

use lingowatch_db::SnapshotKey;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Db(#[from] lingowatch_db::DbError),
    #[error("snapshot file I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot payload could not be (de)serialized: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Where snapshots live. Selected at startup: Postgres when a database URL is
/// configured, the data directory otherwise.
#[derive(Debug, Clone)]
pub enum SnapshotBackend {
    Postgres(PgPool),
    File(PathBuf),
}

impl SnapshotBackend {
    /// Load the stored snapshot for a unit, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on query/file failure or if a stored payload
    /// does not decode into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &SnapshotKey,
    ) -> Result<Option<T>, StoreError> {
        match self {
            Self::Postgres(pool) => Ok(lingowatch_db::get_snapshot(pool, key).await?),
            Self::File(dir) => read_snapshot_file(&snapshot_path(dir, key)).await,
        }
    }

    /// Persist the snapshot for a unit, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] on query/file failure.
    pub async fn put<T: Serialize>(&self, key: &SnapshotKey, snapshot: &T) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pool) => Ok(lingowatch_db::put_snapshot(pool, key, snapshot).await?),
            Self::File(dir) => write_snapshot_file(dir, &snapshot_path(dir, key), snapshot).await,
        }
    }
}

fn snapshot_path(dir: &Path, key: &SnapshotKey) -> PathBuf {
    let name = format!(
        "{}__{}__{}.json",
        sanitize_component(&key.company_slug),
        key.source.as_str(),
        sanitize_component(&key.unit)
    );
    dir.join(name)
}

/// Flatten a key component into a filename-safe token. URLs and `org/repo`
/// pairs both pass through here.
fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

async fn read_snapshot_file<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

async fn write_snapshot_file<T: Serialize>(
    dir: &Path,
    path: &Path,
    snapshot: &T,
) -> Result<(), StoreError> {
    tokio::fs::create_dir_all(dir).await.map_err(|e| StoreError::Io {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let bytes = serde_json::to_vec_pretty(snapshot)?;

    // Write-then-rename so a crash mid-write never leaves a torn snapshot.
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes).await.map_err(|e| StoreError::Io {
        path: tmp.clone(),
        source: e,
    })?;
    tokio::fs::rename(&tmp, path).await.map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use lingowatch_core::SourceKind;
    use lingowatch_detect::StoreSnapshot;

    use super::*;

    fn temp_store(tag: &str) -> SnapshotBackend {
        let dir = std::env::temp_dir().join(format!(
            "lingowatch-store-test-{tag}-{}",
            std::process::id()
        ));
        SnapshotBackend::File(dir)
    }

    #[test]
    fn sanitize_flattens_urls_and_repo_paths() {
        assert_eq!(sanitize_component("acme/app"), "acme_app");
        assert_eq!(
            sanitize_component("https://developer.acme.com/docs"),
            "https___developer.acme.com_docs"
        );
    }

    #[tokio::test]
    async fn missing_snapshot_reads_as_none() {
        let store = temp_store("missing");
        let key = SnapshotKey::new("acme", SourceKind::Github, "acme/app");
        let got: Option<StoreSnapshot> = store.get(&key).await.expect("get failed");
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn file_backend_roundtrips_snapshots() {
        let store = temp_store("roundtrip");
        let key = SnapshotKey::new("acme", SourceKind::PlayStore, "com.acme.app");
        let snapshot = StoreSnapshot {
            known_languages: ["en", "fr"]
                .iter()
                .map(ToString::to_string)
                .collect::<BTreeSet<String>>(),
        };

        store.put(&key, &snapshot).await.expect("put failed");
        let got: Option<StoreSnapshot> = store.get(&key).await.expect("get failed");
        assert_eq!(got, Some(snapshot.clone()));

        // Overwrite replaces in place.
        let grown = StoreSnapshot {
            known_languages: ["en", "fr", "ja"]
                .iter()
                .map(ToString::to_string)
                .collect::<BTreeSet<String>>(),
        };
        store.put(&key, &grown).await.expect("put failed");
        let got: Option<StoreSnapshot> = store.get(&key).await.expect("get failed");
        assert_eq!(got, Some(grown));
    }

    #[tokio::test]
    async fn distinct_units_do_not_collide() {
        let store = temp_store("collide");
        let a = SnapshotKey::new("acme", SourceKind::Docs, "https://acme.com/docs");
        let b = SnapshotKey::new("acme", SourceKind::Docs, "https://acme.com/help");

        let snap_a = lingowatch_detect::DocsSnapshot {
            content_hash: Some("aaa".to_string()),
            known_hreflang_locales: BTreeSet::new(),
        };
        let snap_b = lingowatch_detect::DocsSnapshot {
            content_hash: Some("bbb".to_string()),
            known_hreflang_locales: BTreeSet::new(),
        };
        store.put(&a, &snap_a).await.expect("put failed");
        store.put(&b, &snap_b).await.expect("put failed");

        let got_a: Option<lingowatch_detect::DocsSnapshot> =
            store.get(&a).await.expect("get failed");
        assert_eq!(got_a.and_then(|s| s.content_hash), Some("aaa".to_string()));
    }
}
