//! Delivery of detected signals.
//!
//! The database sink persists signals for later querying; the console sink
//! prints them, which is what a database-less run uses. Delivery failures are
//! the caller's problem to log — a failed alert never blocks snapshot
//! persistence.

use sqlx::PgPool;

use lingowatch_core::Signal;

#[derive(Debug, Clone)]
pub enum AlertSink {
    Database(PgPool),
    Console,
}

impl AlertSink {
    /// Deliver one signal.
    ///
    /// # Errors
    ///
    /// Returns [`lingowatch_db::DbError`] if the database insert fails. The
    /// console sink never fails.
    pub async fn deliver(&self, signal: &Signal) -> Result<(), lingowatch_db::DbError> {
        match self {
            Self::Database(pool) => {
                let id = lingowatch_db::insert_signal(pool, signal).await?;
                tracing::debug!(id, kind = %signal.kind, company = %signal.company, "signal stored");
                Ok(())
            }
            Self::Console => {
                let marker = if signal.kind.is_high_value() { "!" } else { " " };
                println!(
                    "[{marker}] {} {} {} — {}",
                    signal.detected_at.format("%Y-%m-%d %H:%M"),
                    signal.kind,
                    signal.company,
                    signal.title
                );
                if let Some(url) = &signal.url {
                    println!("      {url}");
                }
                Ok(())
            }
        }
    }
}
