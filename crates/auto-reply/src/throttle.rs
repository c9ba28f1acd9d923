//! Per-user token-bucket throttle for paid completion calls.

use std::{
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::{Duration, Instant},
};

use dashmap::{DashMap, mapref::entry::Entry};

const CLEANUP_EVERY_CHECKS: u64 = 512;

/// Token-bucket parameters: a burst of `capacity` calls, refilling linearly
/// from empty to full over `refill_period`.
#[derive(Debug, Clone, Copy)]
pub struct UserRateLimit {
    pub capacity: f64,
    pub refill_period: Duration,
}

impl Default for UserRateLimit {
    fn default() -> Self {
        Self {
            capacity: 3.0,
            refill_period: Duration::from_secs(20),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

/// Outcome of one throttle check. Denial is a normal decision, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThrottleDecision {
    Allowed,
    Denied { retry_after: Duration },
}

/// Shared per-user throttle.
///
/// Buckets are created lazily (full) on first sight of a user. The map entry
/// is the critical section: concurrent checks for one user serialize on it,
/// so two simultaneous requests can never both observe sufficient tokens.
#[derive(Clone)]
pub struct RequestThrottle {
    limit: UserRateLimit,
    buckets: Arc<DashMap<String, BucketState>>,
    checks_seen: Arc<AtomicU64>,
}

impl RequestThrottle {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limit(UserRateLimit::default())
    }

    #[must_use]
    pub fn with_limit(limit: UserRateLimit) -> Self {
        Self {
            limit,
            buckets: Arc::new(DashMap::new()),
            checks_seen: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Refill-then-consume for `user_id`, one token per allowed call.
    pub fn check(&self, user_id: &str) -> ThrottleDecision {
        self.check_at(user_id, Instant::now())
    }

    /// Like [`check`](Self::check) with an explicit clock reading. The
    /// timestamp is taken once per call; all arithmetic for this check uses
    /// the same instant.
    pub fn check_at(&self, user_id: &str, now: Instant) -> ThrottleDecision {
        let decision = match self.buckets.entry(user_id.to_string()) {
            Entry::Occupied(mut occupied) => {
                let state = occupied.get_mut();
                let refilled = self.refilled_tokens(state, now);
                if refilled >= 1.0 {
                    *state = BucketState {
                        tokens: refilled - 1.0,
                        last_refill: now,
                    };
                    ThrottleDecision::Allowed
                } else {
                    *state = BucketState {
                        tokens: refilled,
                        last_refill: now,
                    };
                    ThrottleDecision::Denied {
                        retry_after: self.time_until_one_token(refilled),
                    }
                }
            },
            // First-ever call: bucket starts full, so it always succeeds.
            Entry::Vacant(vacant) => {
                vacant.insert(BucketState {
                    tokens: self.limit.capacity - 1.0,
                    last_refill: now,
                });
                ThrottleDecision::Allowed
            },
        };

        self.cleanup_if_needed(now);
        decision
    }

    /// Continuous linear refill, clamped to capacity.
    fn refilled_tokens(&self, state: &BucketState, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(state.last_refill);
        let gained = elapsed.as_secs_f64() / self.limit.refill_period.as_secs_f64()
            * self.limit.capacity;
        (state.tokens + gained).min(self.limit.capacity)
    }

    fn time_until_one_token(&self, tokens: f64) -> Duration {
        let missing = (1.0 - tokens).max(0.0);
        Duration::from_secs_f64(
            missing / self.limit.capacity * self.limit.refill_period.as_secs_f64(),
        )
    }

    /// A bucket untouched for a full refill period would refill to capacity,
    /// which is indistinguishable from an absent bucket. Sweep such entries
    /// periodically so the map stays bounded.
    fn cleanup_if_needed(&self, now: Instant) {
        let seen = self.checks_seen.fetch_add(1, Ordering::Relaxed) + 1;
        if !seen.is_multiple_of(CLEANUP_EVERY_CHECKS) {
            return;
        }
        let period = self.limit.refill_period;
        self.buckets
            .retain(|_, state| now.saturating_duration_since(state.last_refill) < period);
    }
}

impl Default for RequestThrottle {
    fn default() -> Self {
        Self::new()
    }
}
