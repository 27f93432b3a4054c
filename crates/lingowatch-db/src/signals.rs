// crates/lingowatch-db/src/signals.rs
use crate::DbError;
use chrono::{DateTime, Utc};
use lingowatch_core::Signal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SignalRow {
    pub id: i64,
    pub public_id: Uuid,
    pub company: String,
    pub source: String,
    pub kind: String,
    pub title: String,
    pub details: String,
    pub keywords: Vec<String>,
    pub url: Option<String>,
    pub detected_at: DateTime<Utc>,
}

/// Insert one detected signal. Returns the internal ID.
///
/// Dedup key: (`company`, `source`, `kind`, `title`, `detected_at::date`) — the
/// same finding re-detected within a day updates the existing row instead of
/// producing a duplicate.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn insert_signal(pool: &PgPool, signal: &Signal) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO signals (company, source, kind, title, details, keywords, url, detected_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         ON CONFLICT (company, source, kind, title, detected_on) DO UPDATE SET \
           details = EXCLUDED.details, \
           keywords = EXCLUDED.keywords, \
           url = COALESCE(EXCLUDED.url, signals.url) \
         RETURNING id",
    )
    .bind(&signal.company)
    .bind(signal.source.as_str())
    .bind(signal.kind.as_str())
    .bind(&signal.title)
    .bind(&signal.details)
    .bind(&signal.keywords)
    .bind(signal.url.as_deref())
    .bind(signal.detected_at)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// List recent signals, newest first, with optional filters.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn list_signals(
    pool: &PgPool,
    company_filter: Option<&str>,
    source_filter: Option<&str>,
    kind_filter: Option<&str>,
    limit: i64,
) -> Result<Vec<SignalRow>, DbError> {
    let rows = sqlx::query_as::<_, SignalRow>(
        "SELECT id, public_id, company, source, kind, title, details, keywords, url, detected_at \
         FROM signals \
         WHERE ($1::TEXT IS NULL OR company = $1) \
           AND ($2::TEXT IS NULL OR source = $2) \
           AND ($3::TEXT IS NULL OR kind = $3) \
         ORDER BY detected_at DESC, id DESC LIMIT $4",
    )
    .bind(company_filter)
    .bind(source_filter)
    .bind(kind_filter)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Distinct company names that have at least one stored signal.
///
/// # Errors
///
/// Returns `DbError` on database query failure.
pub async fn list_companies_with_signals(pool: &PgPool) -> Result<Vec<String>, DbError> {
    Ok(sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT company FROM signals ORDER BY company",
    )
    .fetch_all(pool)
    .await?)
}
