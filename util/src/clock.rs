//! Time source abstraction for response timestamps.
//!
//! Handlers never read the wall clock directly; they go through a `Clock`
//! held in `AppState`, so tests can pin time and compare whole payloads.

use chrono::{DateTime, Utc};

/// A source of "now". Implementations must be cheap to call per request.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a single instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
