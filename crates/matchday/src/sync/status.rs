//! Durable per-entity sync status.
//!
//! The checkpoint row keeps pagination progress and the guard's counters, so
//! an interrupted pass resumes where it stopped and quota accounting survives
//! restarts.

use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use crate::entity::sync_status::{ActiveModel, Column, Entity as SyncStatus, Model};
use crate::store::Result;

use super::types::EntityKind;

/// Load the persisted status row for an entity kind, if any.
pub async fn load(db: &DatabaseConnection, kind: EntityKind) -> Result<Option<Model>> {
    SyncStatus::find_by_id(kind.as_str().to_string())
        .one(db)
        .await
        .map_err(Into::into)
}

/// Persist a status row, inserting or updating by entity kind.
pub async fn save(db: &DatabaseConnection, model: Model) -> Result<()> {
    let active = ActiveModel {
        entity: Set(model.entity),
        last_page: Set(model.last_page),
        completed: Set(model.completed),
        last_synced_at: Set(model.last_synced_at),
        window_started_at: Set(model.window_started_at),
        requests_in_window: Set(model.requests_in_window),
        panic_until: Set(model.panic_until),
    };

    SyncStatus::insert(active)
        .on_conflict(
            OnConflict::column(Column::Entity)
                .update_columns([
                    Column::LastPage,
                    Column::Completed,
                    Column::LastSyncedAt,
                    Column::WindowStartedAt,
                    Column::RequestsInWindow,
                    Column::PanicUntil,
                ])
                .to_owned(),
        )
        .exec_without_returning(db)
        .await?;
    Ok(())
}
