//! Operational visibility: per-table counts and approximate on-disk size.

use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use serde::Serialize;

use crate::entity::prelude::{Coach, Fixture, League, Player, Team};

use super::errors::Result;
use super::query::count_rows;

/// Row counts per entity table plus the approximate store size on disk.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub leagues: u64,
    pub teams: u64,
    pub players: u64,
    pub coaches: u64,
    pub fixtures: u64,
    /// `page_count * page_size`; `None` when the backend does not report it.
    pub disk_bytes: Option<u64>,
}

impl StoreStats {
    pub fn total_rows(&self) -> u64 {
        self.leagues + self.teams + self.players + self.coaches + self.fixtures
    }
}

/// Gather store statistics.
pub async fn stats(db: &DatabaseConnection) -> Result<StoreStats> {
    Ok(StoreStats {
        leagues: count_rows::<League>(db).await?,
        teams: count_rows::<Team>(db).await?,
        players: count_rows::<Player>(db).await?,
        coaches: count_rows::<Coach>(db).await?,
        fixtures: count_rows::<Fixture>(db).await?,
        disk_bytes: disk_bytes(db).await?,
    })
}

async fn disk_bytes(db: &DatabaseConnection) -> Result<Option<u64>> {
    let page_count = pragma_value(db, "PRAGMA page_count").await?;
    let page_size = pragma_value(db, "PRAGMA page_size").await?;
    Ok(match (page_count, page_size) {
        (Some(count), Some(size)) => Some(count.saturating_mul(size)),
        _ => None,
    })
}

async fn pragma_value(db: &DatabaseConnection, pragma: &str) -> Result<Option<u64>> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            pragma.to_string(),
        ))
        .await?;
    Ok(row
        .and_then(|r| r.try_get_by_index::<i64>(0).ok())
        .map(|v| v.max(0) as u64))
}
