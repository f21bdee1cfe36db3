use std::time::Duration;

use super::{saturating_from_nanos, Backoff};

/// A backoff strategy driven by exponential back-off.
///
/// The delay doubles with every attempt: `delay(n) = base * 2^n`. Growth is
/// unbounded; callers cap it by stopping once the yielded delay is too large.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exponential {
    base: Duration,
}

impl Exponential {
    pub fn new(base: Duration) -> Exponential {
        Exponential { base }
    }

    /// Constructs a new exponential back-off strategy,
    /// given a base duration in milliseconds.
    pub fn from_millis(base: u64) -> Exponential {
        Exponential::new(Duration::from_millis(base))
    }
}

impl Backoff for Exponential {
    fn delay(&self, attempt: u32) -> Duration {
        let nanos = self.base.as_nanos();
        if nanos == 0 {
            return Duration::ZERO;
        }
        if attempt >= nanos.leading_zeros() {
            return Duration::MAX;
        }
        saturating_from_nanos(nanos << attempt)
    }
}

#[test]
fn doubles_every_attempt() {
    let s = Exponential::from_millis(10);

    assert_eq!(s.delay(0), Duration::from_millis(10));
    assert_eq!(s.delay(1), Duration::from_millis(20));
    assert_eq!(s.delay(2), Duration::from_millis(40));
    assert_eq!(s.delay(10), Duration::from_millis(10 * 1024));
}

#[test]
fn zero_base_stays_zero() {
    let s = Exponential::new(Duration::ZERO);

    assert_eq!(s.delay(0), Duration::ZERO);
    assert_eq!(s.delay(200), Duration::ZERO);
}

#[test]
fn saturates_at_maximum_value() {
    let s = Exponential::from_millis(u64::MAX - 1);

    assert_eq!(s.delay(0), Duration::from_millis(u64::MAX - 1));
    assert_eq!(s.delay(64), Duration::MAX);
    assert_eq!(s.delay(u32::MAX), Duration::MAX);
}

#[test]
fn can_express_seconds() {
    let s = Exponential::new(Duration::from_secs(3));

    assert_eq!(s.delay(3), Duration::from_secs(24));
}

#[test]
fn doubles_quickcheck() {
    fn base_shifted_by_attempt(nanos: u64, attempt: u8) -> bool {
        let attempt = attempt as u32 % 64;
        let s = Exponential::new(Duration::from_nanos(nanos));
        let shifted = (nanos as u128) << attempt;
        let secs = shifted / 1_000_000_000;
        let expected = if secs > u64::MAX as u128 {
            Duration::MAX
        } else {
            Duration::new(secs as u64, (shifted % 1_000_000_000) as u32)
        };

        s.delay(attempt) == expected && s.delay(attempt) == s.delay(attempt)
    }

    quickcheck::quickcheck(base_shifted_by_attempt as fn(u64, u8) -> bool)
}
