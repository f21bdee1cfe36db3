use std::time::Duration;

use super::Backoff;

/// A backoff strategy driven by a fixed interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    duration: Duration,
}

impl Constant {
    /// Constructs a new fixed interval strategy.
    pub fn new(duration: Duration) -> Constant {
        Constant { duration }
    }

    /// Constructs a new fixed interval strategy,
    /// given a duration in milliseconds.
    pub fn from_millis(millis: u64) -> Constant {
        Constant::new(Duration::from_millis(millis))
    }
}

impl Backoff for Constant {
    fn delay(&self, _attempt: u32) -> Duration {
        self.duration
    }
}

#[test]
fn returns_fixed_for_every_attempt() {
    let s = Constant::from_millis(123);

    assert_eq!(s.delay(0), Duration::from_millis(123));
    assert_eq!(s.delay(1), Duration::from_millis(123));
    assert_eq!(s.delay(u32::MAX), Duration::from_millis(123));
}

#[test]
fn zero_interval_stays_zero() {
    let s = Constant::new(Duration::ZERO);

    assert_eq!(s.delay(7), Duration::ZERO);
}

#[test]
fn returns_fixed_quickcheck() {
    fn same_for_every_attempt(nanos: u64, attempt: u32) -> bool {
        let d = Duration::from_nanos(nanos);
        let s = Constant::new(d);

        s.delay(attempt) == d && s.delay(attempt) == s.delay(attempt)
    }

    quickcheck::quickcheck(same_for_every_attempt as fn(u64, u32) -> bool)
}
