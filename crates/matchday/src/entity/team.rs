//! Team entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::SitemapEntity;

/// Team model. The parent league reference is merged by coalesce: once a team
/// is known to belong to a league, a later sync that omits the relation will
/// not erase it.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// Upstream numeric identifier; never regenerated.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: Option<String>,
    /// URL-safe slug, recomputed from the name on every write.
    pub slug: String,
    pub league_id: Option<i64>,
    pub country: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub logo_url: Option<String>,
    pub last_modified: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub include_in_sitemap: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::league::Entity",
        from = "Column::LeagueId",
        to = "super::league::Column::Id"
    )]
    League,
    #[sea_orm(has_many = "super::player::Entity")]
    Player,
    #[sea_orm(has_many = "super::coach::Entity")]
    Coach,
}

impl Related<super::league::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::League.def()
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
        vec![Column::LeagueId]
    }
}
