use std::time::Duration;

use super::Backoff;

/// A backoff strategy that grows the delay by a fixed step every attempt.
///
/// The first attempt already waits one full step: `delay(n) = step * (n + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Linear {
    step: Duration,
}

impl Linear {
    pub fn new(step: Duration) -> Linear {
        Linear { step }
    }

    /// Constructs a new linear strategy, given a step in milliseconds.
    pub fn from_millis(millis: u64) -> Linear {
        Linear::new(Duration::from_millis(millis))
    }
}

impl Backoff for Linear {
    fn delay(&self, attempt: u32) -> Duration {
        match attempt.checked_add(1) {
            Some(factor) => self.step.saturating_mul(factor),
            // u32::MAX + 1 does not fit the multiplier; add one more step by hand.
            None => self
                .step
                .saturating_mul(u32::MAX)
                .saturating_add(self.step),
        }
    }
}

#[test]
fn first_attempt_waits_one_step() {
    let s = Linear::from_millis(100);

    assert_eq!(s.delay(0), Duration::from_millis(100));
}

#[test]
fn grows_by_one_step_per_attempt() {
    let s = Linear::from_millis(100);
    let delays: Vec<Duration> = (0..5).map(|n| s.delay(n)).collect();

    assert_eq!(
        delays,
        vec![
            Duration::from_millis(100),
            Duration::from_millis(200),
            Duration::from_millis(300),
            Duration::from_millis(400),
            Duration::from_millis(500),
        ]
    );
}

#[test]
fn saturates_at_maximum_value() {
    let s = Linear::new(Duration::MAX / 2);

    assert_eq!(s.delay(2), Duration::MAX);
    assert_eq!(s.delay(u32::MAX), Duration::MAX);
}

#[test]
fn handles_last_attempt_index() {
    let s = Linear::new(Duration::from_nanos(1));

    assert_eq!(s.delay(u32::MAX), Duration::from_nanos(u32::MAX as u64 + 1));
}

#[test]
fn grows_linearly_quickcheck() {
    fn one_step_per_attempt(nanos: u64, attempt: u32) -> bool {
        let step = Duration::from_nanos(nanos);
        let s = Linear::new(step);
        let total = nanos as u128 * (attempt as u128 + 1);
        let secs = total / 1_000_000_000;
        let expected = if secs > u64::MAX as u128 {
            Duration::MAX
        } else {
            Duration::new(secs as u64, (total % 1_000_000_000) as u32)
        };

        s.delay(attempt) == expected && s.delay(attempt) == s.delay(attempt)
    }

    quickcheck::quickcheck(one_step_per_attempt as fn(u64, u32) -> bool)
}
