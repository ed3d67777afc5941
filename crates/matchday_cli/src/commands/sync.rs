//! The sync command: run the ingestion pipeline and report per-entity results.

use std::time::Duration;

use console::style;
use tabled::{Table, Tabled};

use matchday::http::ReqwestTransport;
use matchday::sync::{EntityKind, SyncEngine, SyncOptions, SyncReport};
use matchday::upstream::UpstreamClient;
use matchday::{connect_and_migrate, store};

use crate::config::Config;

/// One row of the per-entity summary table.
#[derive(Tabled)]
struct EntityRow {
    #[tabled(rename = "Entity")]
    entity: String,
    #[tabled(rename = "Pages")]
    pages: u32,
    #[tabled(rename = "Rows")]
    rows: u64,
    #[tabled(rename = "Outcome")]
    outcome: String,
}

/// Handle `matchday sync`.
///
/// A missing API token is fatal here - unlike stats and migrate, sync cannot
/// do anything useful without upstream access. Individual entity failures are
/// reported in the summary but do not fail the process.
pub async fn handle_sync(
    entity: Option<EntityKind>,
    max_pages: Option<u32>,
    config: &Config,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let token = config.api_token().ok_or(
        "missing API token: set MATCHDAY_API_TOKEN or [api] token in the config file",
    )?;

    let db = connect_and_migrate(database_url).await?;

    let transport =
        ReqwestTransport::with_timeout(Duration::from_secs(config.sync.request_timeout_secs))?;
    let client = UpstreamClient::new(transport, config.api_url(), token);

    let options = SyncOptions {
        max_pages: max_pages.unwrap_or(config.sync.max_pages),
        hourly_quota: config.sync.hourly_quota,
        panic_cooldown: chrono::Duration::seconds(config.sync.panic_cooldown_secs as i64),
        page_delay: Duration::from_millis(config.sync.page_delay_ms),
    };

    let kinds: Vec<EntityKind> = match entity {
        Some(kind) => vec![kind],
        None => EntityKind::ALL.to_vec(),
    };

    let engine = SyncEngine::new(&db, &client, options);
    let report = engine.run(&kinds).await;

    print_report(&report);

    // Final per-table counts, so operators see the store state the sitemap
    // generators will read.
    let stats = store::stats(&db).await?;
    println!();
    println!(
        "{} {} leagues, {} teams, {} players, {} coaches, {} fixtures",
        style("Store:").bold(),
        stats.leagues,
        stats.teams,
        stats.players,
        stats.coaches,
        stats.fixtures
    );

    Ok(())
}

fn print_report(report: &SyncReport) {
    let rows: Vec<EntityRow> = report
        .entities
        .iter()
        .map(|e| EntityRow {
            entity: e.kind.to_string(),
            pages: e.pages,
            rows: e.rows,
            outcome: e.outcome.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    println!();

    if report.has_failures() {
        println!(
            "{} synced {} rows; some entity passes failed (see above)",
            style("Done with failures:").yellow().bold(),
            report.total_rows()
        );
    } else {
        println!(
            "{} synced {} rows",
            style("Done:").green().bold(),
            report.total_rows()
        );
    }
}
