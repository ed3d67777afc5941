//! Raw wire records as the upstream API returns them.
//!
//! Every field the pipeline does not strictly need for an identifier is
//! optional with a serde default, so a sparse record deserializes instead of
//! failing the page.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One page of raw records plus the upstream pagination flag.
#[derive(Debug, Clone)]
pub struct Page<R> {
    pub rows: Vec<R>,
    pub has_more: bool,
}

/// Raw league record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLeague {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
}

/// Raw team record, optionally carrying the squad/staff relations when the
/// request asked for them via `include`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub league_id: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub squad: Vec<RawSquadMember>,
    #[serde(default)]
    pub staff: Vec<RawStaffMember>,
}

/// Member of a team's current roster.
#[derive(Debug, Clone, Deserialize)]
pub struct RawSquadMember {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Member of a team's staff. Only entries marked active produce coach rows.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStaffMember {
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub active: bool,
}

/// Raw fixture record.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFixture {
    pub id: Option<i64>,
    #[serde(default)]
    pub home_team: Option<String>,
    #[serde(default)]
    pub away_team: Option<String>,
    #[serde(default)]
    pub league_id: Option<i64>,
    #[serde(default)]
    pub kickoff_at: Option<DateTime<Utc>>,
}

/// Response envelope shared by all list endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<R> {
    #[serde(default = "Vec::new")]
    pub data: Vec<R>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Pagination {
    #[serde(default)]
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_tolerates_missing_pagination_and_data() {
        let envelope: Envelope<RawLeague> = serde_json::from_str("{}").expect("empty envelope");
        assert!(envelope.data.is_empty());
        assert!(!envelope.pagination.has_more);
    }

    #[test]
    fn sparse_team_record_deserializes() {
        let team: RawTeam = serde_json::from_str(r#"{"id": 7}"#).expect("sparse team");
        assert_eq!(team.id, Some(7));
        assert!(team.name.is_none());
        assert!(team.squad.is_empty());
        assert!(team.staff.is_empty());
    }

    #[test]
    fn fixture_parses_rfc3339_kickoff() {
        let fixture: RawFixture = serde_json::from_str(
            r#"{"id": 1, "home_team": "A", "away_team": "B", "kickoff_at": "2026-08-01T15:00:00Z"}"#,
        )
        .expect("fixture");
        assert!(fixture.kickoff_at.is_some());
    }
}
