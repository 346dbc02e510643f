//! Clock abstraction for the signing timestamp.
//!
//! The vendor expects a millisecond-granularity Unix timestamp in the
//! authentication block, but only ever with second resolution. The clock is
//! injected rather than read from the wall directly so that signing is
//! deterministic in tests.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current Unix time.
pub trait Clock: Send + Sync {
    /// Current Unix time in whole seconds.
    fn unix_seconds(&self) -> i64;

    /// Current Unix time in milliseconds, truncated to second resolution.
    ///
    /// This is the value that goes into the auth block. Sub-second precision
    /// is deliberately lost to match the vendor's expectation.
    fn unix_millis(&self) -> i64 {
        self.unix_seconds() * 1000
    }
}

/// Wall-clock implementation of [`Clock`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_seconds(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock(i64);

    impl Clock for FixedClock {
        fn unix_seconds(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn test_millis_are_second_resolution() {
        let clock = FixedClock(1_700_000_000);
        assert_eq!(clock.unix_millis(), 1_700_000_000_000);
        assert_eq!(clock.unix_millis() % 1000, 0);
    }

    #[test]
    fn test_system_clock_is_past_2020() {
        // 2020-01-01T00:00:00Z
        assert!(SystemClock.unix_seconds() > 1_577_836_800);
    }
}
