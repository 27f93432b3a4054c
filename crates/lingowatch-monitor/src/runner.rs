//! Check orchestration.
//!
//! A run expands the company config into per-source check units, processes
//! them through a bounded concurrent stream, and aggregates the outcomes.
//! Per-unit failures are logged and counted rather than propagated so one
//! broken repository or unreachable page never aborts the rest of the run.

use futures::stream::{self, StreamExt};

use lingowatch_core::{CompanyConfig, SourceKind};
use lingowatch_db::SnapshotKey;
use lingowatch_detect::{
    analyze_page, diff_doc, diff_repo, diff_store_languages, DocsSnapshot, PageFetcher,
    RepoSnapshot, StoreSnapshot,
};
use lingowatch_github::GithubClient;

use crate::sink::AlertSink;
use crate::store::SnapshotBackend;

/// Everything a run needs: clients, the snapshot backend, and the sink.
pub struct CheckContext {
    pub github: GithubClient,
    pub fetcher: PageFetcher,
    pub play_base_url: String,
    pub store: SnapshotBackend,
    pub sink: AlertSink,
    pub max_concurrent: usize,
}

/// One unit of work: a single (company, source, target) to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckUnit {
    Repo {
        company: String,
        slug: String,
        org: String,
        repo: String,
    },
    StoreListing {
        company: String,
        slug: String,
        package: String,
    },
    DocsPage {
        company: String,
        slug: String,
        url: String,
    },
}

impl CheckUnit {
    #[must_use]
    pub fn source(&self) -> SourceKind {
        match self {
            Self::Repo { .. } => SourceKind::Github,
            Self::StoreListing { .. } => SourceKind::PlayStore,
            Self::DocsPage { .. } => SourceKind::Docs,
        }
    }

    /// Per-source discriminator used as the snapshot key's `unit`.
    #[must_use]
    pub fn unit_id(&self) -> String {
        match self {
            Self::Repo { org, repo, .. } => format!("{org}/{repo}"),
            Self::StoreListing { package, .. } => package.clone(),
            Self::DocsPage { url, .. } => url.clone(),
        }
    }

    #[must_use]
    pub fn company(&self) -> &str {
        match self {
            Self::Repo { company, .. }
            | Self::StoreListing { company, .. }
            | Self::DocsPage { company, .. } => company,
        }
    }

    fn snapshot_key(&self) -> SnapshotKey {
        let slug = match self {
            Self::Repo { slug, .. }
            | Self::StoreListing { slug, .. }
            | Self::DocsPage { slug, .. } => slug.clone(),
        };
        SnapshotKey::new(slug, self.source(), self.unit_id())
    }
}

/// Aggregated result of one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub units: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub signals: usize,
}

enum UnitOutcome {
    Ok { signals: usize },
    Err(anyhow::Error),
}

/// Expand the company config into check units, optionally restricted to one
/// source. A company missing the config for a source simply contributes no
/// units for it.
#[must_use]
pub fn plan_units(companies: &[CompanyConfig], source: Option<SourceKind>) -> Vec<CheckUnit> {
    let wants = |s: SourceKind| source.is_none() || source == Some(s);
    let mut units = Vec::new();

    for company in companies {
        let slug = company.slug();

        if wants(SourceKind::Github) && company.has_github() {
            if let Some(org) = &company.github_org {
                for repo in &company.github_repos {
                    units.push(CheckUnit::Repo {
                        company: company.name.clone(),
                        slug: slug.clone(),
                        org: org.clone(),
                        repo: repo.clone(),
                    });
                }
            }
        }

        if wants(SourceKind::PlayStore) {
            if let Some(package) = &company.play_package {
                units.push(CheckUnit::StoreListing {
                    company: company.name.clone(),
                    slug: slug.clone(),
                    package: package.clone(),
                });
            }
        }

        if wants(SourceKind::Docs) {
            for url in &company.doc_urls {
                units.push(CheckUnit::DocsPage {
                    company: company.name.clone(),
                    slug: slug.clone(),
                    url: url.clone(),
                });
            }
        }
    }

    units
}

/// Run all units through the bounded worker pool and aggregate outcomes.
pub async fn run_checks(ctx: &CheckContext, units: Vec<CheckUnit>) -> RunSummary {
    let unit_count = units.len();
    let max_concurrent = ctx.max_concurrent.max(1);

    let results: Vec<(CheckUnit, UnitOutcome)> = stream::iter(units)
        .map(|unit| async move {
            let outcome = check_unit(ctx, &unit).await;
            (unit, outcome)
        })
        .buffer_unordered(max_concurrent)
        .collect()
        .await;

    let mut summary = RunSummary {
        units: unit_count,
        ..RunSummary::default()
    };

    for (unit, outcome) in &results {
        match outcome {
            UnitOutcome::Ok { signals } => {
                summary.succeeded += 1;
                summary.signals += signals;
            }
            UnitOutcome::Err(e) => {
                tracing::error!(
                    company = %unit.company(),
                    source = %unit.source(),
                    unit = %unit.unit_id(),
                    error = %e,
                    "check failed; continuing with remaining units"
                );
                summary.failed += 1;
            }
        }
    }

    if summary.failed > 0 {
        tracing::warn!(
            failed = summary.failed,
            total = summary.units,
            "some checks failed this run"
        );
    }

    summary
}

async fn check_unit(ctx: &CheckContext, unit: &CheckUnit) -> UnitOutcome {
    match run_detector(ctx, unit).await {
        Ok(signals) => UnitOutcome::Ok { signals },
        Err(e) => UnitOutcome::Err(e),
    }
}

/// Fetch-then-compare for one unit: load the prior snapshot, run the
/// detector, deliver signals, and persist the new snapshot. Sink failures are
/// logged and do not block the snapshot write — a lost alert is preferable to
/// re-alerting every cycle.
async fn run_detector(ctx: &CheckContext, unit: &CheckUnit) -> anyhow::Result<usize> {
    let key = unit.snapshot_key();

    let (signals, persist) = match unit {
        CheckUnit::Repo {
            company, org, repo, ..
        } => {
            let state = ctx.github.get_repo_state(org, repo).await?;
            let prior: Option<RepoSnapshot> = ctx.store.get(&key).await?;
            let (signals, next) = diff_repo(company, org, repo, &state, prior.as_ref());
            (signals, serde_json::to_value(&next)?)
        }
        CheckUnit::StoreListing {
            company, package, ..
        } => {
            let current = ctx
                .fetcher
                .fetch_store_languages(&ctx.play_base_url, package)
                .await?;
            let prior: Option<StoreSnapshot> = ctx.store.get(&key).await?;
            let (signals, next) = diff_store_languages(company, package, &current, prior.as_ref());
            (signals, serde_json::to_value(&next)?)
        }
        CheckUnit::DocsPage { company, url, .. } => {
            let html = ctx.fetcher.fetch_text(url).await?;
            let page = analyze_page(&html);
            let prior: Option<DocsSnapshot> = ctx.store.get(&key).await?;
            let (signals, next) = diff_doc(company, url, &page, prior.as_ref());
            (signals, serde_json::to_value(&next)?)
        }
    };

    let mut delivered = 0usize;
    for signal in &signals {
        match ctx.sink.deliver(signal).await {
            Ok(()) => delivered += 1,
            Err(e) => {
                tracing::error!(
                    company = %signal.company,
                    kind = %signal.kind,
                    error = %e,
                    "alert delivery failed; snapshot will still be persisted"
                );
            }
        }
    }

    ctx.store.put(&key, &persist).await?;

    if !signals.is_empty() {
        tracing::info!(
            company = %unit.company(),
            source = %unit.source(),
            unit = %unit.unit_id(),
            signals = signals.len(),
            delivered,
            "check produced signals"
        );
    }

    Ok(delivered)
}
