use std::sync::{Arc, PoisonError, RwLock};

use time::{Duration, OffsetDateTime};

use kernel::interface::clock::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<RwLock<OffsetDateTime>>);

impl ManualClock {
    pub fn new(start: OffsetDateTime) -> Self {
        Self(Arc::new(RwLock::new(start)))
    }

    pub fn set(&self, time: OffsetDateTime) {
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = time;
    }

    pub fn advance(&self, duration: Duration) {
        let mut now = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.0.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod test {
    use time::{Duration, OffsetDateTime};

    use kernel::interface::clock::Clock;

    use crate::clock::ManualClock;

    #[test]
    fn clones_share_time() {
        let start = OffsetDateTime::UNIX_EPOCH;
        let clock = ManualClock::new(start);
        let other = clock.clone();

        clock.advance(Duration::days(20));
        assert_eq!(other.now(), start + Duration::days(20));

        other.set(start);
        assert_eq!(clock.now(), start);
    }
}
