use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use lingowatch_core::SourceKind;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "lingowatch")]
#[command(about = "Localization-intent monitoring for public company surfaces")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the recurring monitor until interrupted
    Run,
    /// Run a single check pass and exit
    Check {
        /// Restrict the pass to one company (by name or slug)
        #[arg(long)]
        company: Option<String>,
        /// Restrict the pass to one source: github, playstore, or docs
        #[arg(long)]
        source: Option<SourceKind>,
    },
    /// List recently detected signals (requires a database)
    Signals {
        /// Filter by company name
        #[arg(long)]
        company: Option<String>,
        /// Filter by source: github, playstore, or docs
        #[arg(long)]
        source: Option<SourceKind>,
        /// Filter by signal kind (e.g. NEW_LANG_FILE)
        #[arg(long)]
        kind: Option<String>,
        /// Maximum number of signals to show
        #[arg(long, default_value = "20")]
        limit: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = lingowatch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run => commands::run_daemon(&config).await,
        Commands::Check { company, source } => {
            commands::run_check(&config, company.as_deref(), source).await
        }
        Commands::Signals {
            company,
            source,
            kind,
            limit,
        } => commands::list_signals(&config, company.as_deref(), source, kind.as_deref(), limit).await,
    }
}
