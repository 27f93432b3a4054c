//! Live integration tests for lingowatch-db using `#[sqlx::test]`.
//!
//! Each test gets a fresh, fully-migrated Postgres database spun up by the
//! sqlx test harness. The `migrations` path is relative to the crate root
//! (`crates/lingowatch-db/`), so `"../../migrations"` resolves to the
//! workspace migration directory.

use lingowatch_core::{Signal, SignalKind, SourceKind};
use lingowatch_db::{
    get_snapshot, insert_signal, list_companies_with_signals, list_signals, put_snapshot,
    SnapshotKey,
};
use lingowatch_detect::StoreSnapshot;

fn sample_signal(company: &str, kind: SignalKind, title: &str) -> Signal {
    Signal::new(
        kind,
        company,
        SourceKind::Github,
        title.to_string(),
        "details".to_string(),
        vec!["fr".to_string()],
        Some("https://github.com/acme/app".to_string()),
    )
}

#[sqlx::test(migrations = "../../migrations")]
async fn insert_and_list_signals_roundtrip(pool: sqlx::PgPool) {
    let signal = sample_signal("Acme", SignalKind::NewLangFile, "acme/app: fr.json");
    let id = insert_signal(&pool, &signal).await.expect("insert failed");
    assert!(id > 0);

    let rows = list_signals(&pool, None, None, None, 10)
        .await
        .expect("list failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].company, "Acme");
    assert_eq!(rows[0].kind, "NEW_LANG_FILE");
    assert_eq!(rows[0].keywords, vec!["fr"]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn same_day_redetection_does_not_duplicate(pool: sqlx::PgPool) {
    let signal = sample_signal("Acme", SignalKind::OpenPr, "acme/app: PR #42: Add Arabic");
    let first = insert_signal(&pool, &signal).await.expect("insert failed");
    let second = insert_signal(&pool, &signal).await.expect("re-insert failed");
    assert_eq!(first, second, "dedup key should collapse re-detections");

    let rows = list_signals(&pool, None, None, None, 10)
        .await
        .expect("list failed");
    assert_eq!(rows.len(), 1);
}

#[sqlx::test(migrations = "../../migrations")]
async fn list_signals_applies_filters(pool: sqlx::PgPool) {
    insert_signal(
        &pool,
        &sample_signal("Acme", SignalKind::NewLangFile, "acme/app: fr.json"),
    )
    .await
    .expect("insert failed");
    insert_signal(
        &pool,
        &sample_signal("Globex", SignalKind::Keyword, "globex/web: i18n work"),
    )
    .await
    .expect("insert failed");

    let acme_only = list_signals(&pool, Some("Acme"), None, None, 10)
        .await
        .expect("list failed");
    assert_eq!(acme_only.len(), 1);
    assert_eq!(acme_only[0].company, "Acme");

    let keyword_only = list_signals(&pool, None, None, Some("KEYWORD"), 10)
        .await
        .expect("list failed");
    assert_eq!(keyword_only.len(), 1);
    assert_eq!(keyword_only[0].company, "Globex");

    let companies = list_companies_with_signals(&pool).await.expect("list failed");
    assert_eq!(companies, vec!["Acme".to_string(), "Globex".to_string()]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn snapshot_upsert_and_fetch_roundtrip(pool: sqlx::PgPool) {
    let key = SnapshotKey::new("acme", SourceKind::PlayStore, "com.acme.app");

    let missing: Option<StoreSnapshot> = get_snapshot(&pool, &key).await.expect("get failed");
    assert!(missing.is_none());

    let snapshot = StoreSnapshot {
        known_languages: ["en", "fr"].iter().map(ToString::to_string).collect(),
    };
    put_snapshot(&pool, &key, &snapshot).await.expect("put failed");

    let stored: Option<StoreSnapshot> = get_snapshot(&pool, &key).await.expect("get failed");
    assert_eq!(stored, Some(snapshot));

    // Upsert replaces the value in place.
    let grown = StoreSnapshot {
        known_languages: ["en", "fr", "ja"].iter().map(ToString::to_string).collect(),
    };
    put_snapshot(&pool, &key, &grown).await.expect("put failed");
    let stored: Option<StoreSnapshot> = get_snapshot(&pool, &key).await.expect("get failed");
    assert_eq!(stored, Some(grown));
}
