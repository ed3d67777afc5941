//! Sync orchestration: the per-entity pagination loop and its durable status.
//!
//! # Module Structure
//!
//! - [`types`] - `EntityKind`, `SyncOptions`, `SyncReport`, constants
//! - [`status`] - persisted per-entity checkpoint + guard counters
//! - [`engine`] - the orchestrator: [`SyncEngine::run`]
//!
//! # Example
//!
//! ```ignore
//! use matchday::http::ReqwestTransport;
//! use matchday::sync::{EntityKind, SyncEngine, SyncOptions};
//! use matchday::upstream::UpstreamClient;
//!
//! let transport = ReqwestTransport::with_timeout(std::time::Duration::from_secs(20))?;
//! let client = UpstreamClient::new(transport, "https://api.example.com/v1", token);
//! let engine = SyncEngine::new(&db, &client, SyncOptions::default());
//! let report = engine.run(&EntityKind::ALL).await;
//! ```

pub mod engine;
pub mod status;
mod types;

pub use engine::SyncEngine;
pub use types::{
    DEFAULT_HOURLY_QUOTA, DEFAULT_PAGE_CAP, DEFAULT_PAGE_DELAY_MS, DEFAULT_PANIC_COOLDOWN_SECS,
    EntityKind, EntityReport, SyncOptions, SyncOutcome, SyncReport,
};
