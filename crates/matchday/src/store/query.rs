//! Paginated read queries for sitemap generation.
//!
//! These are the only paths the public site uses: visible rows only,
//! deterministic ordering, bounded page sizes.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::entity::{SitemapEntity, fixture};

use super::errors::Result;

/// Upper bound on rows per sitemap page. Sitemap files cap at 50k URLs;
/// staying well under keeps individual files small.
pub const SITEMAP_PAGE_CEILING: u64 = 10_000;

/// Fetch one page of sitemap-visible rows, ordered by the entity's sitemap
/// ordering column (identifier, or kickoff for fixtures). `page` is 0-based;
/// `per_page` is clamped to [`SITEMAP_PAGE_CEILING`].
pub async fn visible_page<E>(
    db: &DatabaseConnection,
    page: u64,
    per_page: u64,
) -> Result<Vec<E::Model>>
where
    E: SitemapEntity,
    E::Model: FromQueryResult + Sized + Send + Sync,
{
    let per_page = per_page.clamp(1, SITEMAP_PAGE_CEILING);
    E::find()
        .filter(E::visibility_column().eq(true))
        .order_by_asc(E::order_column())
        .paginate(db, per_page)
        .fetch_page(page)
        .await
        .map_err(Into::into)
}

/// Count sitemap-visible rows for an entity table.
pub async fn visible_count<E>(db: &DatabaseConnection) -> Result<u64>
where
    E: SitemapEntity,
    E::Model: FromQueryResult + Sized + Send + Sync,
{
    E::find()
        .filter(E::visibility_column().eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Count all rows (visible or excluded) for an entity table.
pub async fn count_rows<E>(db: &DatabaseConnection) -> Result<u64>
where
    E: EntityTrait,
    E::Model: FromQueryResult + Sized + Send + Sync,
{
    E::find().count(db).await.map_err(Into::into)
}

/// Fetch visible fixtures kicking off within `[from, to)`, ordered by
/// kickoff - the windowed query match sitemaps are built from.
pub async fn fixtures_between(
    db: &DatabaseConnection,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    page: u64,
    per_page: u64,
) -> Result<Vec<fixture::Model>> {
    let per_page = per_page.clamp(1, SITEMAP_PAGE_CEILING);
    fixture::Entity::find()
        .filter(fixture::Column::IncludeInSitemap.eq(true))
        .filter(fixture::Column::KickoffAt.gte(from))
        .filter(fixture::Column::KickoffAt.lt(to))
        .order_by_asc(fixture::Column::KickoffAt)
        .paginate(db, per_page)
        .fetch_page(page)
        .await
        .map_err(Into::into)
}
