//! Command handlers for the CLI.
//!
//! These are called from `main` after config and logging are established.
//! With a `DATABASE_URL` configured, snapshots live in Postgres and signals
//! are persisted; without one the monitor falls back to file snapshots and
//! console alerts so it can run standalone.

use std::sync::Arc;

use lingowatch_core::{AppConfig, SourceKind};
use lingowatch_detect::{PageFetcher, DEFAULT_PLAY_BASE_URL};
use lingowatch_github::GithubClient;
use lingowatch_monitor::{
    build_scheduler, plan_units, run_checks, AlertSink, CheckContext, SnapshotBackend,
};

/// Build the check context, connecting to Postgres when configured.
async fn build_context(config: &AppConfig) -> anyhow::Result<CheckContext> {
    let github = GithubClient::new(
        config.github_token.as_deref(),
        config.request_timeout_secs,
        &config.user_agent,
        config.max_retries,
        config.retry_backoff_base_ms,
    )
    .map_err(|e| anyhow::anyhow!("failed to build GitHub client: {e}"))?;

    let fetcher = PageFetcher::new(config.request_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build page fetcher: {e}"))?;

    let (store, sink) = if config.database_url.is_some() {
        let pool = lingowatch_db::connect_pool_from_config(config).await?;
        let applied = lingowatch_db::run_migrations(&pool).await?;
        if applied > 0 {
            tracing::info!(applied, "applied pending database migrations");
        }
        (
            SnapshotBackend::Postgres(pool.clone()),
            AlertSink::Database(pool),
        )
    } else {
        tracing::info!(
            data_dir = %config.data_dir.display(),
            "no DATABASE_URL configured; using file snapshots and console alerts"
        );
        (
            SnapshotBackend::File(config.data_dir.clone()),
            AlertSink::Console,
        )
    };

    Ok(CheckContext {
        github,
        fetcher,
        play_base_url: DEFAULT_PLAY_BASE_URL.to_string(),
        store,
        sink,
        max_concurrent: config.max_concurrent_checks,
    })
}

/// Run the recurring monitor until interrupted.
pub(crate) async fn run_daemon(config: &AppConfig) -> anyhow::Result<()> {
    let ctx = Arc::new(build_context(config).await?);

    let mut scheduler = build_scheduler(ctx, config)
        .await
        .map_err(|e| anyhow::anyhow!("failed to start scheduler: {e}"))?;

    tracing::info!(
        repo_interval_secs = config.repo_check_interval_secs,
        store_docs_interval_secs = config.store_docs_check_interval_secs,
        "monitor running; press ctrl-c to stop"
    );

    shutdown_signal().await;

    scheduler
        .shutdown()
        .await
        .map_err(|e| anyhow::anyhow!("scheduler shutdown failed: {e}"))?;
    Ok(())
}

/// Run a single check pass across the configured companies and exit.
///
/// # Errors
///
/// Returns an error if the company filter matches nothing or every planned
/// unit fails. Per-unit failures are logged and skipped, not propagated.
pub(crate) async fn run_check(
    config: &AppConfig,
    company_filter: Option<&str>,
    source: Option<SourceKind>,
) -> anyhow::Result<()> {
    let file = lingowatch_core::load_companies(&config.companies_path)?;

    let companies = match company_filter {
        Some(filter) => {
            let wanted: Vec<_> = file
                .companies
                .into_iter()
                .filter(|c| c.name.eq_ignore_ascii_case(filter) || c.slug() == filter)
                .collect();
            if wanted.is_empty() {
                anyhow::bail!("company '{filter}' not found in {}", config.companies_path.display());
            }
            wanted
        }
        None => file.companies,
    };

    let units = plan_units(&companies, source);
    if units.is_empty() {
        println!("nothing to check: no targets configured for the requested scope");
        return Ok(());
    }

    let ctx = build_context(config).await?;
    let summary = run_checks(&ctx, units).await;

    println!(
        "checked {} units: {} succeeded, {} failed, {} signals",
        summary.units, summary.succeeded, summary.failed, summary.signals
    );

    if summary.failed == summary.units {
        anyhow::bail!("all {} checks failed", summary.units);
    }
    Ok(())
}

/// List recently stored signals, newest first.
///
/// # Errors
///
/// Returns an error if no database is configured or the query fails.
pub(crate) async fn list_signals(
    config: &AppConfig,
    company: Option<&str>,
    source: Option<SourceKind>,
    kind: Option<&str>,
    limit: i64,
) -> anyhow::Result<()> {
    if config.database_url.is_none() {
        anyhow::bail!("the signals command requires DATABASE_URL to be set");
    }
    let pool = lingowatch_db::connect_pool_from_config(config).await?;

    let rows = lingowatch_db::list_signals(
        &pool,
        company,
        source.map(SourceKind::as_str),
        kind,
        limit,
    )
    .await?;

    if rows.is_empty() {
        println!("no signals recorded for the requested scope");
        return Ok(());
    }

    for row in &rows {
        println!(
            "{}  {:<13} {:<9} {}  {}",
            row.detected_at.format("%Y-%m-%d %H:%M"),
            row.kind,
            row.source,
            row.company,
            row.title
        );
        if let Some(url) = &row.url {
            println!("      {url}");
        }
    }
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
