//! Background job scheduler.
//!
//! Registers one recurring job per cadence: repository checks on the short
//! interval, store-listing and docs checks on the long one. The company file
//! is re-read at the start of every cycle so edits take effect without a
//! restart.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

use lingowatch_core::{AppConfig, SourceKind};

use crate::runner::{plan_units, run_checks, CheckContext};

/// Builds and starts the background job scheduler.
///
/// Returns the running [`JobScheduler`] handle, which must be kept alive
/// for the lifetime of the process — dropping it shuts down all jobs.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// a job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    ctx: Arc<CheckContext>,
    config: &AppConfig,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;

    register_source_job(
        &scheduler,
        Arc::clone(&ctx),
        config.companies_path.clone(),
        Duration::from_secs(config.repo_check_interval_secs),
        &[SourceKind::Github],
    )
    .await?;
    register_source_job(
        &scheduler,
        ctx,
        config.companies_path.clone(),
        Duration::from_secs(config.store_docs_check_interval_secs),
        &[SourceKind::PlayStore, SourceKind::Docs],
    )
    .await?;

    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_source_job(
    scheduler: &JobScheduler,
    ctx: Arc<CheckContext>,
    companies_path: PathBuf,
    interval: Duration,
    sources: &'static [SourceKind],
) -> Result<(), JobSchedulerError> {
    let companies_path = Arc::new(companies_path);

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let ctx = Arc::clone(&ctx);
        let companies_path = Arc::clone(&companies_path);

        Box::pin(async move {
            run_sources_cycle(&ctx, &companies_path, sources).await;
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}

/// One scheduled cycle: reload the company file, plan units for the given
/// sources, and run them. Config load failures skip the cycle rather than
/// crash the scheduler.
async fn run_sources_cycle(ctx: &CheckContext, companies_path: &Path, sources: &[SourceKind]) {
    let companies = match lingowatch_core::load_companies(companies_path) {
        Ok(file) => file.companies,
        Err(e) => {
            tracing::error!(
                path = %companies_path.display(),
                error = %e,
                "scheduler: failed to load company config; skipping cycle"
            );
            return;
        }
    };

    let mut units = Vec::new();
    for source in sources {
        units.extend(plan_units(&companies, Some(*source)));
    }

    if units.is_empty() {
        tracing::info!(?sources, "scheduler: no units configured; skipping cycle");
        return;
    }

    tracing::info!(?sources, units = units.len(), "scheduler: starting check cycle");
    let summary = run_checks(ctx, units).await;
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        signals = summary.signals,
        "scheduler: check cycle complete"
    );
}
