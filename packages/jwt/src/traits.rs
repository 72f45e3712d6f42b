//! Capabilities the token provider depends on.
//!
//! Both are injectable so tests can pin token ids and time without
//! weakening the production implementations.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Source of unique token ids (`jti`).
///
/// Implementations must be thread-safe (Send + Sync) and must never
/// return the same id twice within the lifetime of a secret.
pub trait TokenIdSource: Send + Sync {
    /// Next unique id.
    fn next_id(&self) -> String;
}

/// Current time as Unix seconds.
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> i64;
}

/// Random v4 UUIDs from the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Source;

impl TokenIdSource for UuidV4Source {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> TokenIdSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// A clock stopped at a fixed instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now(&self) -> i64 {
        self.0
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> i64 {
        (**self).now()
    }
}
