//! The sync orchestrator.
//!
//! Drives the per-entity pagination loop: guard permission, page fetch,
//! extraction, one atomic batch upsert per page, durable checkpoint, pacing.
//! Entity kinds are processed strictly one at a time with one in-flight
//! request - that is what keeps the hourly quota accounting exact.
//!
//! A failure on one entity kind never blocks the others: each pass is
//! captured in its own [`EntityReport`] and the run continues.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel};
use serde::de::DeserializeOwned;

use crate::entity::{SitemapEntity, sync_status};
use crate::extract;
use crate::guard::{Permission, QuotaGuard};
use crate::http::HttpTransport;
use crate::store;
use crate::upstream::{PageQuery, RawFixture, RawLeague, RawTeam, UpstreamClient};

use super::status;
use super::types::{EntityKind, EntityReport, SyncOptions, SyncOutcome, SyncReport};

/// Orchestrates sync passes over the cache store.
pub struct SyncEngine<'a, T: HttpTransport> {
    db: &'a DatabaseConnection,
    client: &'a UpstreamClient<T>,
    options: SyncOptions,
}

impl<'a, T: HttpTransport> SyncEngine<'a, T> {
    pub fn new(
        db: &'a DatabaseConnection,
        client: &'a UpstreamClient<T>,
        options: SyncOptions,
    ) -> Self {
        Self {
            db,
            client,
            options,
        }
    }

    /// Run a pass for each requested entity kind, in order.
    pub async fn run(&self, kinds: &[EntityKind]) -> SyncReport {
        let mut entities = Vec::with_capacity(kinds.len());

        for &kind in kinds {
            let report = self.sync_entity(kind).await;
            match &report.outcome {
                SyncOutcome::Completed => tracing::info!(
                    entity = kind.as_str(),
                    pages = report.pages,
                    rows = report.rows,
                    "entity pass complete"
                ),
                outcome => tracing::warn!(
                    entity = kind.as_str(),
                    pages = report.pages,
                    rows = report.rows,
                    outcome = %outcome,
                    "entity pass stopped early"
                ),
            }
            entities.push(report);
        }

        SyncReport { entities }
    }

    async fn sync_entity(&self, kind: EntityKind) -> EntityReport {
        match kind {
            EntityKind::League => {
                self.paginate(kind, |rows: &[RawLeague], now| extract::leagues(rows, now))
                    .await
            }
            EntityKind::Team => {
                self.paginate(kind, |rows: &[RawTeam], now| extract::teams(rows, now))
                    .await
            }
            EntityKind::Player => {
                self.paginate(kind, |rows: &[RawTeam], now| {
                    extract::players_from_teams(rows, now)
                })
                .await
            }
            EntityKind::Fixture => {
                self.paginate(kind, |rows: &[RawFixture], now| {
                    extract::fixtures(rows, now)
                })
                .await
            }
            EntityKind::Coach => {
                self.paginate(kind, |rows: &[RawTeam], now| {
                    extract::coaches_from_teams(rows, now)
                })
                .await
            }
        }
    }

    /// The per-entity pagination loop.
    async fn paginate<R, A, F>(&self, kind: EntityKind, extract_page: F) -> EntityReport
    where
        R: DeserializeOwned,
        A: ActiveModelTrait + Send,
        <A as ActiveModelTrait>::Entity: SitemapEntity,
        <<A as ActiveModelTrait>::Entity as EntityTrait>::Model: IntoActiveModel<A>,
        F: Fn(&[R], DateTime<Utc>) -> Vec<A>,
    {
        let mut report = EntityReport {
            kind,
            pages: 0,
            rows: 0,
            outcome: SyncOutcome::Completed,
        };

        let previous = match status::load(self.db, kind).await {
            Ok(row) => row,
            Err(e) => {
                report.outcome = SyncOutcome::StoreFailed {
                    message: e.to_string(),
                };
                return report;
            }
        };

        let mut guard = match &previous {
            Some(row) => QuotaGuard::from_parts(
                self.options.hourly_quota,
                self.options.panic_cooldown,
                row.window_started_at,
                row.requests_in_window.max(0) as u32,
                row.panic_until,
            ),
            None => QuotaGuard::new(self.options.hourly_quota, self.options.panic_cooldown),
        };

        let mut completed = previous.as_ref().is_some_and(|row| row.completed);
        let mut last_page = previous.as_ref().map_or(0, |row| row.last_page);
        let mut last_synced_at = previous.as_ref().and_then(|row| row.last_synced_at);

        // A completed pass restarts from page one; an interrupted one resumes
        // after the last durably stored page.
        let mut page: u32 = if completed || last_page <= 0 {
            1
        } else {
            last_page as u32 + 1
        };
        if page > 1 {
            tracing::info!(entity = kind.as_str(), page, "resuming interrupted pass");
        }

        loop {
            match guard.permit() {
                Permission::Granted => {}
                Permission::Denied(reason) => {
                    tracing::warn!(
                        entity = kind.as_str(),
                        reason = %reason,
                        remaining_quota = guard.remaining(),
                        "guard denied request"
                    );
                    report.outcome = SyncOutcome::Denied(reason);
                    break;
                }
            }

            let query = PageQuery {
                page,
                per_page: kind.page_size(),
                include: kind.include(),
            };
            let fetched = match self.client.fetch_page::<R>(kind.endpoint(), &query).await {
                Ok(fetched) => fetched,
                Err(err) => {
                    let transient = err.is_transient();
                    if transient {
                        guard.enter_panic();
                    }
                    tracing::error!(
                        entity = kind.as_str(),
                        page,
                        error = %err,
                        transient,
                        "abandoning entity pass after fetch failure"
                    );
                    report.outcome = SyncOutcome::UpstreamFailed {
                        transient,
                        message: err.to_string(),
                    };
                    break;
                }
            };
            report.pages += 1;

            let now = Utc::now();
            let models = extract_page(&fetched.rows, now);
            if !models.is_empty() {
                match store::upsert_batch(self.db, models).await {
                    Ok(written) => {
                        report.rows += written;
                        tracing::info!(
                            entity = kind.as_str(),
                            page,
                            rows = written,
                            "stored page"
                        );
                    }
                    Err(e) => {
                        tracing::error!(
                            entity = kind.as_str(),
                            page,
                            error = %e,
                            "batch upsert failed, abandoning entity pass"
                        );
                        report.outcome = SyncOutcome::StoreFailed {
                            message: e.to_string(),
                        };
                        break;
                    }
                }
            }

            last_page = page as i32;
            completed = !fetched.has_more;
            if completed {
                last_synced_at = Some(now);
            }

            if let Err(e) = self
                .checkpoint(kind, last_page, completed, last_synced_at, &guard)
                .await
            {
                report.outcome = SyncOutcome::StoreFailed {
                    message: e.to_string(),
                };
                break;
            }

            if completed {
                report.outcome = SyncOutcome::Completed;
                break;
            }
            if report.pages >= self.options.max_pages {
                tracing::warn!(
                    entity = kind.as_str(),
                    pages = report.pages,
                    "page cap reached, pass will resume next run"
                );
                report.outcome = SyncOutcome::PageCapReached;
                break;
            }

            tokio::time::sleep(self.options.page_delay).await;
            page += 1;
        }

        // Persist guard counters (and a possible panic deadline) even when
        // the pass stopped before storing a page.
        if let Err(e) = self
            .checkpoint(kind, last_page, completed, last_synced_at, &guard)
            .await
        {
            tracing::error!(
                entity = kind.as_str(),
                error = %e,
                "failed to persist sync status"
            );
        }

        report
    }

    async fn checkpoint(
        &self,
        kind: EntityKind,
        last_page: i32,
        completed: bool,
        last_synced_at: Option<DateTime<Utc>>,
        guard: &QuotaGuard,
    ) -> store::Result<()> {
        status::save(
            self.db,
            sync_status::Model {
                entity: kind.as_str().to_string(),
                last_page,
                completed,
                last_synced_at,
                window_started_at: guard.window_started(),
                requests_in_window: guard.requests() as i32,
                panic_until: guard.panic_until(),
            },
        )
        .await
    }
}
