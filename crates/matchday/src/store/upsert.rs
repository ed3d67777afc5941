//! Idempotent batch upsert, keyed by the stable upstream identifier.
//!
//! A batch is issued as a single `INSERT ... ON CONFLICT DO UPDATE` statement,
//! so it is atomic: a failure leaves no partial page visible to readers.

use sea_orm::sea_query::{Alias, Cond, Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel};

use crate::entity::SitemapEntity;

use super::errors::Result;

/// Upsert a batch of rows in one atomic statement.
///
/// Conflict target is the upstream identifier. On conflict:
/// - content columns (and slug, `updated_at`) are overwritten,
/// - parent references keep an existing non-null value when the incoming one
///   is null (merge-by-coalesce),
/// - `include_in_sitemap` is force-set: a successful re-sync implicitly
///   un-excludes a previously soft-deleted row,
/// - `last_modified` advances only when a content column actually changed
///   (null-safe comparison).
///
/// Returns the number of rows submitted.
///
/// # Errors
/// Returns `StoreError::Database` if the statement fails; the whole batch
/// rolls back.
pub async fn upsert_batch<A>(db: &DatabaseConnection, models: Vec<A>) -> Result<u64>
where
    A: ActiveModelTrait + Send,
    <A as ActiveModelTrait>::Entity: SitemapEntity,
    <<A as ActiveModelTrait>::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    if models.is_empty() {
        return Ok(0);
    }

    let count = models.len() as u64;
    <A::Entity as EntityTrait>::insert_many(models)
        .on_conflict(upsert_on_conflict::<A::Entity>())
        .exec_without_returning(db)
        .await?;
    Ok(count)
}

/// Upsert a single row. Same semantics as [`upsert_batch`].
pub async fn upsert<A>(db: &DatabaseConnection, model: A) -> Result<u64>
where
    A: ActiveModelTrait + Send,
    <A as ActiveModelTrait>::Entity: SitemapEntity,
    <<A as ActiveModelTrait>::Entity as EntityTrait>::Model: IntoActiveModel<A>,
{
    upsert_batch(db, vec![model]).await
}

/// Build the ON CONFLICT clause for an entity table.
fn upsert_on_conflict<E: SitemapEntity>() -> OnConflict {
    let excluded = Alias::new("excluded");

    let mut on_conflict = OnConflict::column(E::id_column());
    on_conflict.update_columns(E::overwrite_columns());

    // An existing non-null parent wins over an incoming null.
    for col in E::parent_columns() {
        let coalesced = Func::coalesce([
            Expr::col((excluded.clone(), col)).into(),
            Expr::col((E::default(), col)).into(),
        ]);
        on_conflict.value(col, coalesced);
    }

    on_conflict.value(E::visibility_column(), Expr::value(true));
    on_conflict.value(E::last_modified_column(), last_modified_expr::<E>());

    on_conflict
}

/// `CASE WHEN <content changed> THEN excluded.last_modified ELSE
/// <table>.last_modified END`.
///
/// Comparisons use SQLite's null-safe `IS NOT`; parent references compare
/// their post-coalesce value, so an incoming null next to a known parent does
/// not count as a change.
fn last_modified_expr<E: SitemapEntity>() -> SimpleExpr {
    let excluded = Alias::new("excluded");

    let mut changed = Cond::any();
    for col in E::content_columns() {
        changed = changed.add(Expr::cust_with_exprs(
            "$1 IS NOT $2",
            [
                Expr::col((E::default(), col)).into(),
                Expr::col((excluded.clone(), col)).into(),
            ],
        ));
    }
    for col in E::parent_columns() {
        changed = changed.add(Expr::cust_with_exprs(
            "COALESCE($1, $2) IS NOT $3",
            [
                Expr::col((excluded.clone(), col)).into(),
                Expr::col((E::default(), col)).into(),
                Expr::col((E::default(), col)).into(),
            ],
        ));
    }

    Expr::case(
        changed,
        Expr::col((excluded.clone(), E::last_modified_column())),
    )
    .finally(Expr::col((E::default(), E::last_modified_column())))
    .into()
}
