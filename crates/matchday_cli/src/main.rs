//! Matchday CLI - operator tool for the sitemap cache pipeline.

mod commands;
mod config;

use clap::{Parser, Subcommand, ValueEnum};
use matchday::sync::EntityKind;
use tracing_subscriber::EnvFilter;

use crate::commands::stats::OutputFormat;

#[derive(Parser)]
#[command(name = "matchday")]
#[command(version)]
#[command(about = "Sitemap cache pipeline for the matchday football statistics site")]
#[command(
    long_about = "Matchday pulls leagues, teams, players, coaches, and fixtures from the \
upstream sports-data API and keeps them in a local SQLite cache that sitemap \
generation reads from. The sync job respects per-entity hourly quotas and backs \
off into a cooldown after upstream failures."
)]
#[command(after_long_help = r#"EXAMPLES
    Sync everything (all five entity kinds):
        $ matchday sync

    Sync only teams, at most 10 pages:
        $ matchday sync team --max-pages 10

    Show per-table counts and store size:
        $ matchday stats

    Apply pending schema migrations:
        $ matchday migrate up

CONFIGURATION
    Matchday reads configuration from:
      1. ~/.config/matchday/config.toml (or $XDG_CONFIG_HOME/matchday/config.toml)
      2. ./matchday.toml
      3. Environment variables (MATCHDAY_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    MATCHDAY_DATABASE_URL    Cache store location (default: ~/.local/state/matchday/matchday.db)
    MATCHDAY_API_URL         Upstream API base URL
    MATCHDAY_API_TOKEN       Upstream API bearer token (required for sync)
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync entity data from the upstream API into the cache store
    Sync {
        /// Entity kind to sync; all five kinds when omitted
        #[arg(value_enum)]
        entity: Option<EntityArg>,

        /// Maximum pages to fetch per entity this run (default from config or 50)
        #[arg(short = 'p', long)]
        max_pages: Option<u32>,
    },
    /// Print per-table row counts and approximate store size
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum MigrateAction {
    /// Apply all pending migrations
    Up,
    /// Rollback the last migration
    Down,
    /// Show migration status
    Status,
    /// Fresh install - drop all tables and reapply migrations
    Fresh,
}

/// Entity kind selector for the sync command.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum EntityArg {
    League,
    Team,
    Player,
    Fixture,
    Coach,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::League => EntityKind::League,
            EntityArg::Team => EntityKind::Team,
            EntityArg::Player => EntityKind::Player,
            EntityArg::Fixture => EntityKind::Fixture,
            EntityArg::Coach => EntityKind::Coach,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("matchday=info,matchday_cli=info"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = config::Config::load();

    let cli = Cli::parse();

    let database_url = config
        .database_url()
        .ok_or("could not determine a database location")?;

    // Ensure the database directory exists for SQLite.
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        // Strip query parameters (e.g. ?mode=rwc) before path operations.
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    match cli.command {
        Commands::Sync { entity, max_pages } => {
            commands::sync::handle_sync(entity.map(Into::into), max_pages, &config, &database_url)
                .await?;
        }
        Commands::Stats { output } => {
            commands::stats::handle_stats(output, &database_url).await?;
        }
        Commands::Migrate { action } => {
            commands::migrate::handle_migrate(action, &database_url).await?;
        }
    }

    Ok(())
}
