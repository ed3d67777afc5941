//! Re-exports of all entities under their table names.

pub use super::coach::Entity as Coach;
pub use super::fixture::Entity as Fixture;
pub use super::league::Entity as League;
pub use super::player::Entity as Player;
pub use super::sync_status::Entity as SyncStatus;
pub use super::team::Entity as Team;
