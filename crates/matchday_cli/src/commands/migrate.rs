//! The migrate command: schema management for the cache store.
//!
//! Like stats, migrations only touch the local store and run without an API
//! credential.

use console::style;
use sea_orm_migration::MigratorTrait;

use matchday::connect;
use matchday::migration::Migrator;

use crate::MigrateAction;

/// Handle `matchday migrate`.
pub async fn handle_migrate(
    action: MigrateAction,
    database_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect(database_url).await?;

    match action {
        MigrateAction::Up => {
            Migrator::up(&db, None).await?;
            println!("{} migrations applied", style("Done:").green().bold());
        }
        MigrateAction::Down => {
            Migrator::down(&db, Some(1)).await?;
            println!("{} rolled back one migration", style("Done:").green().bold());
        }
        MigrateAction::Status => {
            Migrator::status(&db).await?;
        }
        MigrateAction::Fresh => {
            Migrator::fresh(&db).await?;
            println!(
                "{} dropped all tables and reapplied migrations",
                style("Done:").green().bold()
            );
        }
    }

    Ok(())
}
