//! Player entity.
//!
//! Players are not directly listable upstream; rows are derived from the
//! squad relation of team pages (see `extract::players_from_teams`).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::SitemapEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// Upstream numeric identifier; never regenerated.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: Option<String>,
    pub slug: String,
    /// Owning team, attributed at extraction time; merged by coalesce.
    pub team_id: Option<i64>,
    pub country: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub image_url: Option<String>,
    pub last_modified: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub include_in_sitemap: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
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
        vec![Column::Name, Column::Country, Column::ImageUrl]
    }

    fn overwrite_columns() -> Vec<Column> {
        vec![
            Column::Name,
            Column::Slug,
            Column::Country,
            Column::ImageUrl,
            Column::UpdatedAt,
        ]
    }

    fn parent_columns() -> Vec<Column> {
        vec![Column::TeamId]
    }
}
