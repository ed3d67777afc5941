//! Shared sync types and constants.

use chrono::Duration;

use crate::guard::DenyReason;

/// Default maximum pages fetched per entity per run.
pub const DEFAULT_PAGE_CAP: u32 = 50;

/// Default per-entity requests permitted per rolling hour.
pub const DEFAULT_HOURLY_QUOTA: u32 = 90;

/// Default panic-mode cooldown in seconds.
pub const DEFAULT_PANIC_COOLDOWN_SECS: u64 = 900;

/// Default pacing delay between page fetches in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 250;

/// The five sync targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    League,
    Team,
    Player,
    Fixture,
    Coach,
}

impl EntityKind {
    /// All kinds, in sync order. Teams run before the team-derived kinds so
    /// a fresh store picks up parent rows first.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::League,
        EntityKind::Team,
        EntityKind::Player,
        EntityKind::Fixture,
        EntityKind::Coach,
    ];

    /// Stable name; also the sync-status primary key.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::League => "league",
            EntityKind::Team => "team",
            EntityKind::Player => "player",
            EntityKind::Fixture => "fixture",
            EntityKind::Coach => "coach",
        }
    }

    /// Upstream list endpoint. Players and coaches have no listable endpoint
    /// of their own - they ride on team pages and are extracted from
    /// relations.
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            EntityKind::League => "/leagues",
            EntityKind::Team | EntityKind::Player | EntityKind::Coach => "/teams",
            EntityKind::Fixture => "/fixtures",
        }
    }

    /// Relation include specifier for derived kinds.
    #[must_use]
    pub fn include(self) -> Option<&'static str> {
        match self {
            EntityKind::Player => Some("squad"),
            EntityKind::Coach => Some("staff"),
            _ => None,
        }
    }

    /// Page size per kind. Team pages carrying relations are heavier, so the
    /// derived kinds fetch smaller pages.
    #[must_use]
    pub fn page_size(self) -> u32 {
        match self {
            EntityKind::Player | EntityKind::Coach => 25,
            _ => 100,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Maximum pages fetched per entity per run.
    pub max_pages: u32,
    /// Per-entity requests permitted per rolling hour.
    pub hourly_quota: u32,
    /// Panic-mode cooldown.
    pub panic_cooldown: Duration,
    /// Pacing delay between page fetches.
    pub page_delay: std::time::Duration,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_PAGE_CAP,
            hourly_quota: DEFAULT_HOURLY_QUOTA,
            panic_cooldown: Duration::seconds(DEFAULT_PANIC_COOLDOWN_SECS as i64),
            page_delay: std::time::Duration::from_millis(DEFAULT_PAGE_DELAY_MS),
        }
    }
}

/// Result of one run across entity kinds.
#[derive(Debug, Default)]
pub struct SyncReport {
    pub entities: Vec<EntityReport>,
}

impl SyncReport {
    #[must_use]
    pub fn total_rows(&self) -> u64 {
        self.entities.iter().map(|e| e.rows).sum()
    }

    /// Whether any entity pass ended in a failure (as opposed to completing,
    /// hitting the page cap, or being denied by the guard).
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.entities.iter().any(|e| e.outcome.is_failure())
    }
}

/// Result of one entity kind's pass.
#[derive(Debug)]
pub struct EntityReport {
    pub kind: EntityKind,
    /// Pages fetched this run.
    pub pages: u32,
    /// Rows written this run.
    pub rows: u64,
    pub outcome: SyncOutcome,
}

/// Why an entity pass stopped.
#[derive(Debug)]
pub enum SyncOutcome {
    /// Upstream reported no further pages.
    Completed,
    /// The per-run page cap stopped the pass; the checkpoint resumes it.
    PageCapReached,
    /// The guard denied the next request before any network call.
    Denied(DenyReason),
    /// A page fetch failed past the retry ceiling.
    UpstreamFailed { transient: bool, message: String },
    /// A batch write (or checkpoint write) failed; the batch rolled back.
    StoreFailed { message: String },
}

impl SyncOutcome {
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            SyncOutcome::UpstreamFailed { .. } | SyncOutcome::StoreFailed { .. }
        )
    }
}

impl std::fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncOutcome::Completed => f.write_str("completed"),
            SyncOutcome::PageCapReached => f.write_str("page cap reached"),
            SyncOutcome::Denied(reason) => write!(f, "denied: {reason}"),
            SyncOutcome::UpstreamFailed { message, .. } => {
                write!(f, "upstream failure: {message}")
            }
            SyncOutcome::StoreFailed { message } => write!(f, "store failure: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_kinds_ride_on_team_pages() {
        assert_eq!(EntityKind::Player.endpoint(), "/teams");
        assert_eq!(EntityKind::Player.include(), Some("squad"));
        assert_eq!(EntityKind::Coach.endpoint(), "/teams");
        assert_eq!(EntityKind::Coach.include(), Some("staff"));
        assert_eq!(EntityKind::Team.include(), None);
    }

    #[test]
    fn sync_options_default_matches_constants() {
        let options = SyncOptions::default();
        assert_eq!(options.max_pages, DEFAULT_PAGE_CAP);
        assert_eq!(options.hourly_quota, DEFAULT_HOURLY_QUOTA);
        assert_eq!(
            options.panic_cooldown.num_seconds() as u64,
            DEFAULT_PANIC_COOLDOWN_SECS
        );
    }

    #[test]
    fn report_failure_classification() {
        let report = SyncReport {
            entities: vec![
                EntityReport {
                    kind: EntityKind::League,
                    pages: 2,
                    rows: 20,
                    outcome: SyncOutcome::Completed,
                },
                EntityReport {
                    kind: EntityKind::Team,
                    pages: 0,
                    rows: 0,
                    outcome: SyncOutcome::UpstreamFailed {
                        transient: true,
                        message: "HTTP 503".to_string(),
                    },
                },
            ],
        };

        assert!(report.has_failures());
        assert_eq!(report.total_rows(), 20);
    }
}
