use chrono::{DateTime, Utc};

const SECONDS_PER_DAY: i64 = 86_400;

/// Source of the current instant. Conversions read it once per document.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Whole days from `now` until `not_after`, rounded toward negative infinity.
pub fn days_to_expiry(not_after: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    (*not_after - *now).num_seconds().div_euclid(SECONDS_PER_DAY)
}
