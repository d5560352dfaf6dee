//! Clock abstraction
//!
//! TTL expiry in production is enforced by the cache backend itself; the
//! clock exists so the in-memory cache used in tests can expire records
//! deterministically without real sleeps.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually advanced clock for tests
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Start the clock at the given instant
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward by `seconds`
    pub fn advance_seconds(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += Duration::seconds(seconds);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(Utc::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::default();
        let start = clock.now();
        clock.advance_seconds(181);
        assert_eq!(clock.now() - start, Duration::seconds(181));
    }

    #[test]
    fn test_manual_clock_survives_poisoned_lock() {
        let clock = std::sync::Arc::new(ManualClock::default());
        let start = clock.now();

        let poisoner = clock.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.now.lock().unwrap();
            panic!("poison the clock mutex");
        })
        .join();

        clock.advance_seconds(5);
        assert_eq!(clock.now() - start, Duration::seconds(5));
    }
}
