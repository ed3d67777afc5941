//! Per-entity request guard: hourly quota plus panic-mode cooldown.
//!
//! The guard is an explicit state object - no global state - constructed from
//! and persisted to the sync-status table, so quota accounting survives
//! restarts and the state machine is testable with an injected clock.
//!
//! Three logical states:
//! - **Normal**: the request counter for the current rolling hour is under
//!   quota; requests are permitted and counted.
//! - **Quota-exceeded**: the counter reached quota; requests are denied until
//!   the hour boundary, where counter and window start reset together.
//! - **Panic**: entered after a rate-limit, server-error, or network failure;
//!   all requests are denied until a fixed cooldown elapses, regardless of
//!   quota state.
//!
//! The guard is advisory: it returns a typed permission and never errors.

use chrono::{DateTime, Duration, Utc};

/// Length of the rolling quota window.
fn window() -> Duration {
    Duration::hours(1)
}

/// Outcome of a permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied(DenyReason),
}

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// Panic mode is active; `remaining` is the time left in the cooldown.
    CoolingDown { remaining: Duration },
    /// The hourly quota is spent; `resets_in` is the time to the boundary.
    QuotaExhausted { resets_in: Duration },
}

impl std::fmt::Display for DenyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DenyReason::CoolingDown { remaining } => {
                write!(f, "cooling down for {}s", remaining.num_seconds())
            }
            DenyReason::QuotaExhausted { resets_in } => {
                write!(f, "hourly quota spent, resets in {}s", resets_in.num_seconds())
            }
        }
    }
}

/// Quota and panic-mode guard for one entity kind.
#[derive(Debug, Clone)]
pub struct QuotaGuard {
    quota: u32,
    cooldown: Duration,
    window_started: DateTime<Utc>,
    requests: u32,
    panic_until: Option<DateTime<Utc>>,
}

impl QuotaGuard {
    /// Fresh guard with an empty window starting now.
    #[must_use]
    pub fn new(quota: u32, cooldown: Duration) -> Self {
        Self::from_parts(quota, cooldown, Utc::now(), 0, None)
    }

    /// Rebuild a guard from persisted counters.
    #[must_use]
    pub fn from_parts(
        quota: u32,
        cooldown: Duration,
        window_started: DateTime<Utc>,
        requests: u32,
        panic_until: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            quota,
            cooldown,
            window_started,
            requests,
            panic_until,
        }
    }

    /// Check permission for one outbound request, counting it if granted.
    pub fn permit(&mut self) -> Permission {
        self.permit_at(Utc::now())
    }

    /// Clock-injected variant of [`permit`](Self::permit).
    ///
    /// A stale window resets counter and window start together and clears
    /// panic as a side effect, before quota is evaluated. Panic takes
    /// priority over quota exhaustion.
    pub fn permit_at(&mut self, now: DateTime<Utc>) -> Permission {
        if now - self.window_started >= window() {
            self.window_started = now;
            self.requests = 0;
            self.panic_until = None;
        }

        if let Some(until) = self.panic_until {
            if now < until {
                return Permission::Denied(DenyReason::CoolingDown {
                    remaining: until - now,
                });
            }
            // Cooldown elapsed: back to Normal with a fresh window.
            self.panic_until = None;
            self.window_started = now;
            self.requests = 0;
        }

        if self.requests >= self.quota {
            return Permission::Denied(DenyReason::QuotaExhausted {
                resets_in: self.window_started + window() - now,
            });
        }

        self.requests += 1;
        Permission::Granted
    }

    /// Enter panic mode: deny everything for the configured cooldown.
    pub fn enter_panic(&mut self) {
        self.enter_panic_at(Utc::now());
    }

    /// Clock-injected variant of [`enter_panic`](Self::enter_panic).
    pub fn enter_panic_at(&mut self, now: DateTime<Utc>) {
        self.panic_until = Some(now + self.cooldown);
        tracing::warn!(
            cooldown_secs = self.cooldown.num_seconds(),
            "entering panic mode"
        );
    }

    /// Requests still permitted in the current window.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.quota.saturating_sub(self.requests)
    }

    // Accessors for checkpoint persistence.

    #[must_use]
    pub fn window_started(&self) -> DateTime<Utc> {
        self.window_started
    }

    #[must_use]
    pub fn requests(&self) -> u32 {
        self.requests
    }

    #[must_use]
    pub fn panic_until(&self) -> Option<DateTime<Utc>> {
        self.panic_until
    }
}
