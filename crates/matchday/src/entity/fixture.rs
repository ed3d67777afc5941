//! Fixture (match) entity.
//!
//! Fixtures carry both participant names instead of a single name field, and
//! are keyed by kickoff time for sitemap windowing. Participant names are
//! typed optionals - a genuinely unknown side is `NULL` in the store and only
//! rendered as "Unknown" at display time.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::SitemapEntity;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fixtures")]
pub struct Model {
    /// Upstream numeric identifier; never regenerated.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    /// `<home>-vs-<away>` slug, recomputed on every write.
    pub slug: String,
    pub league_id: Option<i64>,
    /// Sitemap windowing key.
    pub kickoff_at: DateTimeUtc,
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
}

impl Related<super::league::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::League.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Human-readable title with the display-time fallback for unknown sides.
    pub fn display_title(&self) -> String {
        let home = self.home_team.as_deref().unwrap_or("Unknown");
        let away = self.away_team.as_deref().unwrap_or("Unknown");
        format!("{home} vs {away}")
    }
}

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
        Column::KickoffAt
    }

    fn content_columns() -> Vec<Column> {
        vec![Column::HomeTeam, Column::AwayTeam, Column::KickoffAt]
    }

    fn overwrite_columns() -> Vec<Column> {
        vec![
            Column::HomeTeam,
            Column::AwayTeam,
            Column::Slug,
            Column::KickoffAt,
            Column::UpdatedAt,
        ]
    }

    fn parent_columns() -> Vec<Column> {
        vec![Column::LeagueId]
    }
}
