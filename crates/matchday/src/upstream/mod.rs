//! Upstream sports-data API client.
//!
//! The client speaks the API's paginated list endpoints through the
//! [`HttpTransport`](crate::http::HttpTransport) seam and retries transient
//! failures with bounded exponential backoff. It performs no caching - that is
//! the orchestrator's job.

mod client;
mod error;
mod types;

pub use client::{PageQuery, UpstreamClient};
pub use error::{Result, UpstreamError};
pub use types::{Page, RawFixture, RawLeague, RawSquadMember, RawStaffMember, RawTeam};
