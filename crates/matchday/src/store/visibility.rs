//! Soft delete: flipping the sitemap-visibility flag without touching content.

use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::entity::SitemapEntity;

use super::errors::Result;

/// Exclude a row from sitemap queries. No content mutation.
///
/// Returns whether a row was affected.
pub async fn exclude<E: SitemapEntity>(db: &DatabaseConnection, id: i64) -> Result<bool> {
    set_visibility::<E>(db, id, false).await
}

/// Restore a previously excluded row to sitemap visibility.
///
/// A later upsert also restores visibility implicitly; this is the explicit
/// operator-facing path.
pub async fn include<E: SitemapEntity>(db: &DatabaseConnection, id: i64) -> Result<bool> {
    set_visibility::<E>(db, id, true).await
}

async fn set_visibility<E: SitemapEntity>(
    db: &DatabaseConnection,
    id: i64,
    visible: bool,
) -> Result<bool> {
    let result = E::update_many()
        .col_expr(E::visibility_column(), Expr::value(visible))
        .filter(E::id_column().eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
