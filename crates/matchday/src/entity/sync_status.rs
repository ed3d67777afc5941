//! Per-entity sync status - the durable checkpoint.
//!
//! One row per entity kind, keyed by the kind's name. Holds the pagination
//! checkpoint and the guard's counters, so neither correctness nor quota
//! accounting depends on process lifetime.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sync_status")]
pub struct Model {
    /// Entity kind name ("league", "team", ...).
    #[sea_orm(primary_key, auto_increment = false)]
    pub entity: String,
    /// Last page whose rows were durably stored.
    pub last_page: i32,
    /// Whether the last pass reached the end of the upstream catalog.
    pub completed: bool,
    /// When a pass last completed.
    pub last_synced_at: Option<DateTimeUtc>,
    /// Start of the current rolling quota window.
    pub window_started_at: DateTimeUtc,
    /// Requests spent in the current window.
    pub requests_in_window: i32,
    /// Panic-mode deadline; requests are denied until this passes.
    pub panic_until: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
