//! The stats command: per-table counts and approximate store size.
//!
//! Stats only reads the local store, so it runs without an API credential.

use clap::ValueEnum;
use console::style;
use tabled::{Table, Tabled};

use matchday::connect_and_migrate;
use matchday::store;

/// Output format for the stats display.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Display as a formatted table (default)
    #[default]
    Table,
    /// Display as JSON
    Json,
}

#[derive(Tabled)]
struct TableRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Rows")]
    rows: u64,
}

/// Handle `matchday stats`.
pub async fn handle_stats(
    output: OutputFormat,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect_and_migrate(database_url).await?;
    let stats = store::stats(&db).await?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Table => {
            let rows = vec![
                TableRow {
                    table: "leagues".to_string(),
                    rows: stats.leagues,
                },
                TableRow {
                    table: "teams".to_string(),
                    rows: stats.teams,
                },
                TableRow {
                    table: "players".to_string(),
                    rows: stats.players,
                },
                TableRow {
                    table: "coaches".to_string(),
                    rows: stats.coaches,
                },
                TableRow {
                    table: "fixtures".to_string(),
                    rows: stats.fixtures,
                },
            ];
            println!("{}", Table::new(rows));
            println!();
            println!(
                "{} {} rows, {}",
                style("Total:").bold(),
                stats.total_rows(),
                stats
                    .disk_bytes
                    .map(format_bytes)
                    .unwrap_or_else(|| "unknown size".to_string())
            );
        }
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_sensible_units() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }
}
