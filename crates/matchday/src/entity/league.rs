//! League entity - top-level competition rows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::SitemapEntity;

/// League model. One row per competition known to the upstream API.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "leagues")]
pub struct Model {
    /// Upstream numeric identifier; never regenerated.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Competition name as reported upstream; `None` when unknown.
    pub name: Option<String>,
    /// URL-safe slug, recomputed from the name on every write.
    pub slug: String,
    pub country: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo_url: Option<String>,
    /// Advanced only when a content column changed.
    pub last_modified: DateTimeUtc,
    /// Housekeeping timestamp, advanced on every upsert.
    pub updated_at: DateTimeUtc,
    /// Soft-delete flag; sitemap queries only see rows where this is set.
    pub include_in_sitemap: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::team::Entity")]
    Team,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl SitemapEntity for Entity {
    fn id_column() -> Column {
        Column::Id
    }

    fn visibility_column() -> Column {
        Column::IncludeInSitemap
    }

    fn last_modified_column() -> Column {
        Column::LastModified
    }

    fn order_column() -> Column {
        Column::Id
    }

    fn content_columns() -> Vec<Column> {
        vec![Column::Name, Column::Country, Column::LogoUrl]
    }

    fn overwrite_columns() -> Vec<Column> {
        vec![
            Column::Name,
            Column::Slug,
            Column::Country,
            Column::LogoUrl,
            Column::UpdatedAt,
        ]
    }

    fn parent_columns() -> Vec<Column> {
        Vec::new()
    }
}
