//! Pure extractors: one page of raw upstream records in, normalized cache
//! rows out.
//!
//! Direct entities (leagues, teams, fixtures) map one record to one row.
//! Players and coaches have no listable endpoint upstream - they are derived
//! by walking the squad/staff relations of a *team* page, which keeps the
//! coupling (player/coach sync requires teams-shaped pages) visible in the
//! function signatures.
//!
//! Extractors never fail on missing optional fields. A record that lacks the
//! fields required to form a usable primary identifier is skipped, never
//! failing the page.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use sea_orm::Set;

use crate::entity::{coach, fixture, league, player, team};
use crate::slug;
use crate::upstream::{RawFixture, RawLeague, RawTeam};

/// Normalize one page of league records.
pub fn leagues(rows: &[RawLeague], now: DateTime<Utc>) -> Vec<league::ActiveModel> {
    rows.iter()
        .filter_map(|raw| {
            let Some(id) = raw.id else {
                tracing::debug!("skipping league record without identifier");
                return None;
            };
            Some(league::ActiveModel {
                id: Set(id),
                name: Set(raw.name.clone()),
                slug: Set(slug::entity_slug("league", id, raw.name.as_deref())),
                country: Set(raw.country.clone()),
                logo_url: Set(raw.logo.clone()),
                last_modified: Set(now),
                updated_at: Set(now),
                include_in_sitemap: Set(true),
            })
        })
        .collect()
}

/// Normalize one page of team records.
pub fn teams(rows: &[RawTeam], now: DateTime<Utc>) -> Vec<team::ActiveModel> {
    rows.iter()
        .filter_map(|raw| {
            let Some(id) = raw.id else {
                tracing::debug!("skipping team record without identifier");
                return None;
            };
            Some(team::ActiveModel {
                id: Set(id),
                name: Set(raw.name.clone()),
                slug: Set(slug::entity_slug("team", id, raw.name.as_deref())),
                league_id: Set(raw.league_id),
                country: Set(raw.country.clone()),
                logo_url: Set(raw.logo.clone()),
                last_modified: Set(now),
                updated_at: Set(now),
                include_in_sitemap: Set(true),
            })
        })
        .collect()
}

/// Normalize one page of fixture records.
///
/// A fixture without a kickoff timestamp is skipped along with the
/// identifier-less ones: kickoff is the sitemap windowing key, so a row
/// without it is unusable downstream.
pub fn fixtures(rows: &[RawFixture], now: DateTime<Utc>) -> Vec<fixture::ActiveModel> {
    rows.iter()
        .filter_map(|raw| {
            let Some(id) = raw.id else {
                tracing::debug!("skipping fixture record without identifier");
                return None;
            };
            let Some(kickoff_at) = raw.kickoff_at else {
                tracing::debug!(fixture_id = id, "skipping fixture record without kickoff");
                return None;
            };
            Some(fixture::ActiveModel {
                id: Set(id),
                home_team: Set(raw.home_team.clone()),
                away_team: Set(raw.away_team.clone()),
                slug: Set(slug::fixture_slug(
                    id,
                    raw.home_team.as_deref(),
                    raw.away_team.as_deref(),
                )),
                league_id: Set(raw.league_id),
                kickoff_at: Set(kickoff_at),
                last_modified: Set(now),
                updated_at: Set(now),
                include_in_sitemap: Set(true),
            })
        })
        .collect()
}

/// Derive player rows from the squad relations of a team page.
///
/// Emits one row per unique person, attributed to the owning team.
pub fn players_from_teams(rows: &[RawTeam], now: DateTime<Utc>) -> Vec<player::ActiveModel> {
    let mut seen = HashSet::new();
    let mut models = Vec::new();

    for raw_team in rows {
        let team_id = raw_team.id;
        for member in &raw_team.squad {
            let Some(id) = member.id else {
                tracing::debug!("skipping squad member without identifier");
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            models.push(player::ActiveModel {
                id: Set(id),
                name: Set(member.name.clone()),
                slug: Set(slug::entity_slug("player", id, member.name.as_deref())),
                team_id: Set(team_id),
                country: Set(member.country.clone()),
                image_url: Set(member.image.clone()),
                last_modified: Set(now),
                updated_at: Set(now),
                include_in_sitemap: Set(true),
            });
        }
    }

    models
}

/// Derive coach rows from the staff relations of a team page.
///
/// Only staff entries marked active are taken - a team with no active entry
/// contributes no coach row this page.
pub fn coaches_from_teams(rows: &[RawTeam], now: DateTime<Utc>) -> Vec<coach::ActiveModel> {
    let mut seen = HashSet::new();
    let mut models = Vec::new();

    for raw_team in rows {
        let team_id = raw_team.id;
        for member in raw_team.staff.iter().filter(|m| m.active) {
            let Some(id) = member.id else {
                tracing::debug!("skipping staff member without identifier");
                continue;
            };
            if !seen.insert(id) {
                continue;
            }
            models.push(coach::ActiveModel {
                id: Set(id),
                name: Set(member.name.clone()),
                slug: Set(slug::entity_slug("coach", id, member.name.as_deref())),
                team_id: Set(team_id),
                country: Set(member.country.clone()),
                image_url: Set(member.image.clone()),
                last_modified: Set(now),
                updated_at: Set(now),
                include_in_sitemap: Set(true),
            });
        }
    }

    models
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::upstream::{RawSquadMember, RawStaffMember};

    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-08-01T12:00:00Z".parse().expect("valid timestamp")
    }

    fn raw_team(id: Option<i64>) -> RawTeam {
        RawTeam {
            id,
            name: Some("Arsenal".to_string()),
            league_id: Some(8),
            country: Some("England".to_string()),
            logo: None,
            squad: Vec::new(),
            staff: Vec::new(),
        }
    }

    #[test]
    fn leagues_skips_records_without_identifier() {
        let rows: Vec<RawLeague> = serde_json::from_value(json!([
            {"id": 1, "name": "Premier League"},
            {"name": "orphan"},
        ]))
        .expect("raw leagues");

        let models = leagues(&rows, now());
        assert_eq!(models.len(), 1);
    }

    #[test]
    fn teams_coerces_missing_name_to_id_slug() {
        let rows: Vec<RawTeam> =
            serde_json::from_value(json!([{"id": 42}])).expect("raw teams");

        let models = teams(&rows, now());
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].slug, Set("team-42".to_string()));
        assert_eq!(models[0].name, Set(None));
    }

    #[test]
    fn fixtures_requires_id_and_kickoff() {
        let rows: Vec<RawFixture> = serde_json::from_value(json!([
            {"id": 1, "home_team": "A", "away_team": "B", "kickoff_at": "2026-08-01T15:00:00Z"},
            {"id": 2, "home_team": "C", "away_team": "D"},
            {"home_team": "E", "away_team": "F", "kickoff_at": "2026-08-01T15:00:00Z"},
        ]))
        .expect("raw fixtures");

        let models = fixtures(&rows, now());
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, Set(1));
    }

    #[test]
    fn fixtures_keeps_unknown_sides_as_none() {
        let rows: Vec<RawFixture> = serde_json::from_value(json!([
            {"id": 3, "home_team": "Arsenal", "kickoff_at": "2026-08-01T15:00:00Z"},
        ]))
        .expect("raw fixtures");

        let models = fixtures(&rows, now());
        assert_eq!(models[0].away_team, Set(None));
        assert_eq!(models[0].slug, Set("fixture-3".to_string()));
    }

    #[test]
    fn players_flatten_squads_and_attribute_owning_team() {
        let mut team_a = raw_team(Some(1));
        team_a.squad = vec![
            RawSquadMember {
                id: Some(100),
                name: Some("Bukayo Saka".to_string()),
                country: Some("England".to_string()),
                image: None,
            },
            RawSquadMember {
                id: None,
                name: Some("Trialist".to_string()),
                country: None,
                image: None,
            },
        ];
        let mut team_b = raw_team(Some(2));
        team_b.squad = vec![RawSquadMember {
            id: Some(100), // duplicate person across teams in one page
            name: Some("Bukayo Saka".to_string()),
            country: None,
            image: None,
        }];

        let models = players_from_teams(&[team_a, team_b], now());
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].team_id, Set(Some(1)));
        assert_eq!(models[0].slug, Set("bukayo-saka".to_string()));
    }

    #[test]
    fn coaches_take_only_active_staff_entries() {
        let mut team = raw_team(Some(1));
        team.staff = vec![
            RawStaffMember {
                id: Some(200),
                name: Some("Former Coach".to_string()),
                country: None,
                image: None,
                active: false,
            },
            RawStaffMember {
                id: Some(201),
                name: Some("Mikel Arteta".to_string()),
                country: Some("Spain".to_string()),
                image: None,
                active: true,
            },
        ];

        let models = coaches_from_teams(&[team], now());
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].id, Set(201));
    }

    #[test]
    fn team_without_active_staff_contributes_no_coach() {
        let mut team = raw_team(Some(1));
        team.staff = vec![RawStaffMember {
            id: Some(200),
            name: Some("Former Coach".to_string()),
            country: None,
            image: None,
            active: false,
        }];

        assert!(coaches_from_teams(&[team], now()).is_empty());
    }

    #[test]
    fn fully_malformed_page_yields_zero_rows() {
        let rows: Vec<RawLeague> =
            serde_json::from_value(json!([{"name": "a"}, {"name": "b"}])).expect("raw leagues");
        assert!(leagues(&rows, now()).is_empty());
    }
}
