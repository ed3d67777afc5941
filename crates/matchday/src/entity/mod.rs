//! SeaORM entity definitions for the matchday cache schema.

pub mod coach;
pub mod fixture;
pub mod league;
pub mod player;
pub mod prelude;
pub mod sync_status;
pub mod team;

use sea_orm::EntityTrait;

/// Cross-cutting capability of every sitemap-backed cache table.
///
/// Each entity kind stores its rows in its own table, but the pipeline treats
/// them uniformly: upsert keyed by the upstream identifier, soft delete via
/// the visibility flag, deterministic ordering for sitemap pagination. This
/// trait names the columns those generic operations need, so adding an entity
/// kind later is one impl block, not five new store functions.
pub trait SitemapEntity: EntityTrait {
    /// Stable upstream identifier; the upsert conflict target.
    fn id_column() -> Self::Column;

    /// The soft-delete flag (`include_in_sitemap`).
    fn visibility_column() -> Self::Column;

    /// Timestamp advanced only when content actually changed.
    fn last_modified_column() -> Self::Column;

    /// Deterministic sitemap ordering (identifier, or kickoff for fixtures).
    fn order_column() -> Self::Column;

    /// Columns compared (null-safely) to decide whether content changed.
    fn content_columns() -> Vec<Self::Column>;

    /// Columns overwritten wholesale on every upsert.
    fn overwrite_columns() -> Vec<Self::Column>;

    /// Optional parent references merged by coalesce: an existing non-null
    /// parent wins over an incoming null.
    fn parent_columns() -> Vec<Self::Column>;
}
