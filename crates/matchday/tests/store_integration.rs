//! Integration tests for the cache store.
//!
//! Exercises the observable store contract against an in-memory SQLite
//! database: upsert idempotence, coalesce merge of parent references,
//! soft-delete round trips, and the visible-page queries sitemap generation
//! depends on.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, EntityTrait, Set};

use matchday::connect_and_migrate;
use matchday::entity::{fixture, player, team};
use matchday::store;

fn ts(s: &str) -> DateTime<Utc> {
    s.parse().expect("valid timestamp")
}

async fn setup_db() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:")
        .await
        .expect("in-memory database should migrate")
}

fn team_model(
    id: i64,
    name: &str,
    league_id: Option<i64>,
    stamp: DateTime<Utc>,
) -> team::ActiveModel {
    team::ActiveModel {
        id: Set(id),
        name: Set(Some(name.to_string())),
        slug: Set(matchday::slug::entity_slug("team", id, Some(name))),
        league_id: Set(league_id),
        country: Set(Some("England".to_string())),
        logo_url: Set(None),
        last_modified: Set(stamp),
        updated_at: Set(stamp),
        include_in_sitemap: Set(true),
    }
}

fn player_model(id: i64, name: &str, team_id: Option<i64>, stamp: DateTime<Utc>) -> player::ActiveModel {
    player::ActiveModel {
        id: Set(id),
        name: Set(Some(name.to_string())),
        slug: Set(matchday::slug::entity_slug("player", id, Some(name))),
        team_id: Set(team_id),
        country: Set(None),
        image_url: Set(None),
        last_modified: Set(stamp),
        updated_at: Set(stamp),
        include_in_sitemap: Set(true),
    }
}

fn fixture_model(id: i64, kickoff: DateTime<Utc>, stamp: DateTime<Utc>) -> fixture::ActiveModel {
    fixture::ActiveModel {
        id: Set(id),
        home_team: Set(Some("Home".to_string())),
        away_team: Set(Some("Away".to_string())),
        slug: Set("home-vs-away".to_string()),
        league_id: Set(None),
        kickoff_at: Set(kickoff),
        last_modified: Set(stamp),
        updated_at: Set(stamp),
        include_in_sitemap: Set(true),
    }
}

// ─── Idempotence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn upserting_identical_content_twice_changes_only_housekeeping() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");
    let t2 = ts("2026-08-01T11:00:00Z");

    store::upsert(&db, team_model(1, "Arsenal", Some(8), t1))
        .await
        .expect("first upsert");
    store::upsert(&db, team_model(1, "Arsenal", Some(8), t2))
        .await
        .expect("second upsert");

    let rows = team::Entity::find().all(&db).await.expect("query");
    assert_eq!(rows.len(), 1, "row count must not change");

    let stored = &rows[0];
    assert_eq!(stored.name.as_deref(), Some("Arsenal"));
    assert_eq!(stored.league_id, Some(8));
    assert_eq!(
        stored.last_modified, t1,
        "identical content must not advance last_modified"
    );
    assert_eq!(
        stored.updated_at, t2,
        "housekeeping timestamp advances on every upsert"
    );
}

#[tokio::test]
async fn content_change_advances_last_modified() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");
    let t2 = ts("2026-08-01T11:00:00Z");

    store::upsert(&db, team_model(1, "Arsenal", None, t1))
        .await
        .expect("first upsert");
    store::upsert(&db, team_model(1, "Arsenal FC", None, t2))
        .await
        .expect("second upsert");

    let stored = team::Entity::find()
        .one(&db)
        .await
        .expect("query")
        .expect("row exists");
    assert_eq!(stored.name.as_deref(), Some("Arsenal FC"));
    assert_eq!(stored.slug, "arsenal-fc", "slug is regenerated from the name");
    assert_eq!(stored.last_modified, t2);
}

// ─── Coalesce merge ──────────────────────────────────────────────────────────

#[tokio::test]
async fn null_parent_does_not_erase_known_parent() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");
    let t2 = ts("2026-08-01T11:00:00Z");

    store::upsert(&db, team_model(1, "Arsenal", Some(8), t1))
        .await
        .expect("first upsert");
    store::upsert(&db, team_model(1, "Arsenal", None, t2))
        .await
        .expect("second upsert");

    let stored = team::Entity::find()
        .one(&db)
        .await
        .expect("query")
        .expect("row exists");
    assert_eq!(stored.league_id, Some(8), "known parent must be retained");
    assert_eq!(
        stored.last_modified, t1,
        "a coalesced-away null is not a content change"
    );
}

#[tokio::test]
async fn incoming_parent_strengthens_unknown_parent() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");
    let t2 = ts("2026-08-01T11:00:00Z");

    store::upsert(&db, player_model(100, "Bukayo Saka", None, t1))
        .await
        .expect("first upsert");
    store::upsert(&db, player_model(100, "Bukayo Saka", Some(1), t2))
        .await
        .expect("second upsert");

    let stored = player::Entity::find()
        .one(&db)
        .await
        .expect("query")
        .expect("row exists");
    assert_eq!(stored.team_id, Some(1));
    assert_eq!(stored.last_modified, t2, "gaining a parent is a content change");
}

// ─── Soft delete ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn exclude_then_include_round_trips_without_content_loss() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");

    store::upsert(&db, team_model(1, "Arsenal", Some(8), t1))
        .await
        .expect("upsert");

    assert!(store::exclude::<team::Entity>(&db, 1).await.expect("exclude"));
    assert!(
        store::visible_page::<team::Entity>(&db, 0, 100)
            .await
            .expect("query")
            .is_empty()
    );
    // The row itself is not removed.
    assert_eq!(store::count_rows::<team::Entity>(&db).await.expect("count"), 1);

    assert!(store::include::<team::Entity>(&db, 1).await.expect("include"));
    let visible = store::visible_page::<team::Entity>(&db, 0, 100)
        .await
        .expect("query");
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name.as_deref(), Some("Arsenal"));
    assert_eq!(visible[0].league_id, Some(8));
}

#[tokio::test]
async fn re_upsert_alone_restores_visibility() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");
    let t2 = ts("2026-08-01T11:00:00Z");

    store::upsert(&db, team_model(1, "Arsenal", None, t1))
        .await
        .expect("upsert");
    store::exclude::<team::Entity>(&db, 1).await.expect("exclude");

    store::upsert(&db, team_model(1, "Arsenal", None, t2))
        .await
        .expect("re-upsert");

    let visible = store::visible_page::<team::Entity>(&db, 0, 100)
        .await
        .expect("query");
    assert_eq!(visible.len(), 1, "a successful re-sync implicitly un-excludes");
}

#[tokio::test]
async fn exclude_returns_false_for_unknown_identifier() {
    let db = setup_db().await;
    assert!(!store::exclude::<team::Entity>(&db, 999).await.expect("exclude"));
}

// ─── Sitemap queries ─────────────────────────────────────────────────────────

#[tokio::test]
async fn visible_page_orders_by_identifier() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");

    store::upsert_batch(
        &db,
        vec![
            team_model(3, "Gamma", None, t1),
            team_model(1, "Alpha", None, t1),
            team_model(2, "Beta", None, t1),
        ],
    )
    .await
    .expect("batch upsert");

    let page = store::visible_page::<team::Entity>(&db, 0, 100)
        .await
        .expect("query");
    let ids: Vec<i64> = page.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn visible_page_windows_by_page_size() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");

    let models: Vec<_> = (1..=5)
        .map(|id| team_model(id, &format!("Team {id}"), None, t1))
        .collect();
    store::upsert_batch(&db, models).await.expect("batch upsert");

    let first = store::visible_page::<team::Entity>(&db, 0, 2)
        .await
        .expect("query");
    let second = store::visible_page::<team::Entity>(&db, 1, 2)
        .await
        .expect("query");
    assert_eq!(first.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(second.iter().map(|t| t.id).collect::<Vec<_>>(), vec![3, 4]);
}

#[tokio::test]
async fn fixtures_between_windows_by_kickoff() {
    let db = setup_db().await;
    let stamp = ts("2026-08-01T10:00:00Z");

    store::upsert_batch(
        &db,
        vec![
            fixture_model(1, ts("2026-08-01T12:00:00Z"), stamp),
            fixture_model(2, ts("2026-08-02T12:00:00Z"), stamp),
            fixture_model(3, ts("2026-08-03T12:00:00Z"), stamp),
        ],
    )
    .await
    .expect("batch upsert");

    let window = store::fixtures_between(
        &db,
        ts("2026-08-02T00:00:00Z"),
        ts("2026-08-03T00:00:00Z"),
        0,
        100,
    )
    .await
    .expect("query");

    assert_eq!(window.len(), 1);
    assert_eq!(window[0].id, 2);
}

#[tokio::test]
async fn stats_counts_every_table() {
    let db = setup_db().await;
    let t1 = ts("2026-08-01T10:00:00Z");

    store::upsert_batch(
        &db,
        vec![team_model(1, "Arsenal", None, t1), team_model(2, "Chelsea", None, t1)],
    )
    .await
    .expect("teams");
    store::upsert(&db, player_model(100, "Bukayo Saka", Some(1), t1))
        .await
        .expect("player");

    let stats = store::stats(&db).await.expect("stats");
    assert_eq!(stats.teams, 2);
    assert_eq!(stats.players, 1);
    assert_eq!(stats.leagues, 0);
    assert_eq!(stats.total_rows(), 3);
}
