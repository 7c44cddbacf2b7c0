//! Process-local sliding-window throttle.
//!
//! Each (scope, user) pair keeps a log of recent request instants. A request is
//! allowed while fewer than `num_requests` entries fall inside the window.
//! Limits are not shared across replicas.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::application::ports::rate_limiter::{
    RateLimitDecision, RateLimiter, ThrottleRate, ThrottleScope,
};

/// Logs are swept once the map holds this many keys, then again each time it
/// doubles from what survived.
const SWEEP_MIN_KEYS: usize = 1024;

#[derive(Debug)]
pub struct InMemoryRateLimiter {
    rates: HashMap<&'static str, ThrottleRate>,
    history: Mutex<History>,
}

#[derive(Debug)]
struct History {
    logs: HashMap<String, VecDeque<Instant>>,
    sweep_at: usize,
}

impl History {
    /// Drops every log whose newest entry has aged out of `longest`, the
    /// widest window of any scope.
    fn sweep(&mut self, now: Instant, longest: Duration) {
        self.logs.retain(|_, log| {
            log.front()
                .is_some_and(|newest| now.saturating_duration_since(*newest) < longest)
        });
        self.sweep_at = (self.logs.len() * 2).max(SWEEP_MIN_KEYS);
    }
}

impl InMemoryRateLimiter {
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
            history: Mutex::new(History {
                logs: HashMap::new(),
                sweep_at: SWEEP_MIN_KEYS,
            }),
        }
    }

    #[must_use]
    pub fn with_rate(mut self, scope: ThrottleScope, rate: ThrottleRate) -> Self {
        self.rates.insert(scope.as_str(), rate);
        self
    }

    fn longest_period(&self) -> Duration {
        self.rates
            .values()
            .map(|r| r.period)
            .max()
            .unwrap_or_default()
    }

    pub(crate) fn tracked_keys(&self) -> usize {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .logs
            .len()
    }

    pub(crate) fn check_at(
        &self,
        key: String,
        scope: ThrottleScope,
        now: Instant,
    ) -> RateLimitDecision {
        let Some(rate) = self.rates.get(scope.as_str()).copied() else {
            return RateLimitDecision::Allowed;
        };
        let mut history = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if history.logs.len() >= history.sweep_at {
            history.sweep(now, self.longest_period());
        }
        let mut log = history.logs.remove(&key).unwrap_or_default();
        while log
            .back()
            .is_some_and(|oldest| now.saturating_duration_since(*oldest) >= rate.period)
        {
            log.pop_back();
        }
        if log.len() >= rate.num_requests as usize {
            let retry_after = match log.back() {
                Some(oldest) => rate
                    .period
                    .saturating_sub(now.saturating_duration_since(*oldest)),
                None => rate.period,
            };
            if !log.is_empty() {
                history.logs.insert(key, log);
            }
            return RateLimitDecision::Limited { retry_after };
        }
        log.push_front(now);
        history.logs.insert(key, log);
        RateLimitDecision::Allowed
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter for InMemoryRateLimiter {
    fn check_user(&self, user_id: i64, scope: ThrottleScope) -> RateLimitDecision {
        let key = format!("throttle_{}_{}", scope.as_str(), user_id);
        self.check_at(key, scope, Instant::now())
    }
}

/// Whole seconds to report in a `Retry-After` header (never zero).
pub fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}
