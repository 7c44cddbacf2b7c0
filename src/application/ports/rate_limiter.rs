//! Request throttling primitives.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// `num_requests` allowed per `period`, written as `<n>/<period>` where the
/// period's first letter selects seconds, minutes, hours or days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThrottleRate {
    pub num_requests: u32,
    pub period: Duration,
}

impl FromStr for ThrottleRate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (num, period) = s
            .trim()
            .split_once('/')
            .ok_or_else(|| anyhow::anyhow!("throttle rate '{}' must look like 3/minute", s))?;
        let num_requests: u32 = num
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid request count in throttle rate '{}'", s))?;
        let secs = match period.trim().chars().next() {
            Some('s') => 1,
            Some('m') => 60,
            Some('h') => 60 * 60,
            Some('d') => 24 * 60 * 60,
            _ => anyhow::bail!("invalid period in throttle rate '{}'", s),
        };
        Ok(Self {
            num_requests,
            period: Duration::from_secs(secs),
        })
    }
}

impl fmt::Display for ThrottleRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}s", self.num_requests, self.period.as_secs())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThrottleScope {
    FriendRequests,
}

impl ThrottleScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThrottleScope::FriendRequests => "friend_requests",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed,
    /// Rejected; the caller may retry after the given delay.
    Limited { retry_after: Duration },
}

pub trait RateLimiter: Send + Sync {
    /// Records an attempt by `user_id` in `scope` and decides whether it may proceed.
    fn check_user(&self, user_id: i64, scope: ThrottleScope) -> RateLimitDecision;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rates_by_period_initial() {
        let rate: ThrottleRate = "3/minute".parse().unwrap();
        assert_eq!(rate.num_requests, 3);
        assert_eq!(rate.period, Duration::from_secs(60));

        let rate: ThrottleRate = "100/day".parse().unwrap();
        assert_eq!(rate.period, Duration::from_secs(86_400));

        let rate: ThrottleRate = "5/s".parse().unwrap();
        assert_eq!(rate.period, Duration::from_secs(1));
    }

    #[test]
    fn rejects_malformed_rates() {
        assert!("three/minute".parse::<ThrottleRate>().is_err());
        assert!("3/week".parse::<ThrottleRate>().is_err());
        assert!("3".parse::<ThrottleRate>().is_err());
    }
}
