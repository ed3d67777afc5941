//! Initial migration to create the matchday cache schema.
//!
//! One table per entity kind plus the sync-status table. Every entity table
//! carries an index on the soft-delete flag so sitemap queries stay cheap;
//! fixtures get an additional kickoff index for windowed match sitemaps.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        self.create_leagues(manager).await?;
        self.create_teams(manager).await?;
        self.create_players(manager).await?;
        self.create_coaches(manager).await?;
        self.create_fixtures(manager).await?;
        self.create_sync_status(manager).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SyncStatus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Fixtures::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Coaches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leagues::Table).to_owned())
            .await?;
        Ok(())
    }
}

impl Migration {
    async fn create_leagues(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leagues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leagues::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Leagues::Name).string().null())
                    .col(ColumnDef::new(Leagues::Slug).string().not_null())
                    .col(ColumnDef::new(Leagues::Country).string().null())
                    .col(ColumnDef::new(Leagues::LogoUrl).text().null())
                    .col(
                        ColumnDef::new(Leagues::LastModified)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Leagues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Leagues::IncludeInSitemap)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leagues_sitemap")
                    .table(Leagues::Table)
                    .col(Leagues::IncludeInSitemap)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_teams(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::Name).string().null())
                    .col(ColumnDef::new(Teams::Slug).string().not_null())
                    .col(ColumnDef::new(Teams::LeagueId).big_integer().null())
                    .col(ColumnDef::new(Teams::Country).string().null())
                    .col(ColumnDef::new(Teams::LogoUrl).text().null())
                    .col(
                        ColumnDef::new(Teams::LastModified)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Teams::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Teams::IncludeInSitemap)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_teams_sitemap")
                    .table(Teams::Table)
                    .col(Teams::IncludeInSitemap)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_players(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::Name).string().null())
                    .col(ColumnDef::new(Players::Slug).string().not_null())
                    .col(ColumnDef::new(Players::TeamId).big_integer().null())
                    .col(ColumnDef::new(Players::Country).string().null())
                    .col(ColumnDef::new(Players::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(Players::LastModified)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::IncludeInSitemap)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_players_sitemap")
                    .table(Players::Table)
                    .col(Players::IncludeInSitemap)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_coaches(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coaches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Coaches::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Coaches::Name).string().null())
                    .col(ColumnDef::new(Coaches::Slug).string().not_null())
                    .col(ColumnDef::new(Coaches::TeamId).big_integer().null())
                    .col(ColumnDef::new(Coaches::Country).string().null())
                    .col(ColumnDef::new(Coaches::ImageUrl).text().null())
                    .col(
                        ColumnDef::new(Coaches::LastModified)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Coaches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Coaches::IncludeInSitemap)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coaches_sitemap")
                    .table(Coaches::Table)
                    .col(Coaches::IncludeInSitemap)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_fixtures(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fixtures::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Fixtures::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Fixtures::HomeTeam).string().null())
                    .col(ColumnDef::new(Fixtures::AwayTeam).string().null())
                    .col(ColumnDef::new(Fixtures::Slug).string().not_null())
                    .col(ColumnDef::new(Fixtures::LeagueId).big_integer().null())
                    .col(
                        ColumnDef::new(Fixtures::KickoffAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Fixtures::LastModified)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Fixtures::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Fixtures::IncludeInSitemap)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_fixtures_sitemap")
                    .table(Fixtures::Table)
                    .col(Fixtures::IncludeInSitemap)
                    .to_owned(),
            )
            .await?;

        // Match sitemaps are windowed by kickoff time.
        manager
            .create_index(
                Index::create()
                    .name("idx_fixtures_kickoff")
                    .table(Fixtures::Table)
                    .col(Fixtures::KickoffAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn create_sync_status(&self, manager: &SchemaManager<'_>) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SyncStatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SyncStatus::Entity)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SyncStatus::LastPage)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SyncStatus::Completed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(SyncStatus::LastSyncedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(SyncStatus::WindowStartedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SyncStatus::RequestsInWindow)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SyncStatus::PanicUntil)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
#[sea_orm(iden = "leagues")]
enum Leagues {
    Table,
    Id,
    Name,
    Slug,
    Country,
    LogoUrl,
    LastModified,
    UpdatedAt,
    IncludeInSitemap,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "teams")]
enum Teams {
    Table,
    Id,
    Name,
    Slug,
    LeagueId,
    Country,
    LogoUrl,
    LastModified,
    UpdatedAt,
    IncludeInSitemap,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "players")]
enum Players {
    Table,
    Id,
    Name,
    Slug,
    TeamId,
    Country,
    ImageUrl,
    LastModified,
    UpdatedAt,
    IncludeInSitemap,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "coaches")]
enum Coaches {
    Table,
    Id,
    Name,
    Slug,
    TeamId,
    Country,
    ImageUrl,
    LastModified,
    UpdatedAt,
    IncludeInSitemap,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "fixtures")]
enum Fixtures {
    Table,
    Id,
    HomeTeam,
    AwayTeam,
    Slug,
    LeagueId,
    KickoffAt,
    LastModified,
    UpdatedAt,
    IncludeInSitemap,
}

#[derive(DeriveIden)]
#[sea_orm(iden = "sync_status")]
enum SyncStatus {
    Table,
    Entity,
    LastPage,
    Completed,
    LastSyncedAt,
    WindowStartedAt,
    RequestsInWindow,
    PanicUntil,
}
