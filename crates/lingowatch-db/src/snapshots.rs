// crates/lingowatch-db/src/snapshots.rs
use crate::DbError;
use lingowatch_core::SourceKind;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;

/// Identifies one monitored unit's snapshot.
///
/// `unit` is the per-source discriminator: `org/repo` for a repository,
/// the package ID for a store listing, the page URL for a docs page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotKey {
    pub company_slug: String,
    pub source: SourceKind,
    pub unit: String,
}

impl SnapshotKey {
    #[must_use]
    pub fn new(company_slug: impl Into<String>, source: SourceKind, unit: impl Into<String>) -> Self {
        Self {
            company_slug: company_slug.into(),
            source,
            unit: unit.into(),
        }
    }
}

/// Fetch and decode the stored snapshot for a unit, if one exists.
///
/// # Errors
///
/// Returns `DbError::Sqlx` on query failure or `DbError::SnapshotCodec` if the
/// stored JSON does not decode into `T`.
pub async fn get_snapshot<T: DeserializeOwned>(
    pool: &PgPool,
    key: &SnapshotKey,
) -> Result<Option<T>, DbError> {
    let value = sqlx::query_scalar::<_, serde_json::Value>(
        "SELECT value FROM snapshots \
         WHERE company_slug = $1 AND source = $2 AND unit = $3",
    )
    .bind(&key.company_slug)
    .bind(key.source.as_str())
    .bind(&key.unit)
    .fetch_optional(pool)
    .await?;

    match value {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Upsert the snapshot for a unit, replacing any prior value.
///
/// # Errors
///
/// Returns `DbError::Sqlx` on query failure or `DbError::SnapshotCodec` if the
/// snapshot cannot be encoded as JSON.
pub async fn put_snapshot<T: Serialize>(
    pool: &PgPool,
    key: &SnapshotKey,
    snapshot: &T,
) -> Result<(), DbError> {
    let value = serde_json::to_value(snapshot)?;
    sqlx::query(
        "INSERT INTO snapshots (company_slug, source, unit, value) \
         VALUES ($1, $2, $3, $4) \
         ON CONFLICT (company_slug, source, unit) DO UPDATE SET \
           value = EXCLUDED.value, \
           updated_at = NOW()",
    )
    .bind(&key.company_slug)
    .bind(key.source.as_str())
    .bind(&key.unit)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}
