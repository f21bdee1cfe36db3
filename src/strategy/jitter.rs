use std::time::Duration;

use rand::Rng;

use super::{saturating_from_nanos, Backoff};

/// A decorator adding centered random jitter to another strategy.
///
/// Each call draws `j` uniformly from `[0, spread)` and returns
/// `inner.delay(n) + j - spread/2`, i.e. the inner delay perturbed by up to
/// `±spread/2`.
///
/// A zero inner delay passes through unjittered, so the inner strategy can
/// still end an attempt schedule. Any other result that would fall to or
/// below zero is floored at one nanosecond: jitter never ends a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jitter<B> {
    spread: Duration,
    inner: B,
}

impl<B: Backoff> Jitter<B> {
    pub fn new(spread: Duration, inner: B) -> Jitter<B> {
        Jitter { spread, inner }
    }

    pub fn spread(&self) -> Duration {
        self.spread
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

/// Smallest delay a jittered non-zero delay can shrink to.
const FLOOR: Duration = Duration::from_nanos(1);

fn apply_jitter(delay: Duration, spread: Duration, draw: u128) -> Duration {
    if delay.is_zero() {
        return delay;
    }
    let offset = draw as i128 - (spread.as_nanos() / 2) as i128;
    let nanos = delay.as_nanos() as i128 + offset;
    if nanos <= 0 {
        FLOOR
    } else {
        saturating_from_nanos(nanos as u128)
    }
}

impl<B: Backoff> Backoff for Jitter<B> {
    fn delay(&self, attempt: u32) -> Duration {
        let delay = self.inner.delay(attempt);
        let spread = self.spread.as_nanos();
        if spread == 0 {
            return delay;
        }
        let draw = rand::thread_rng().gen_range(0..spread);
        apply_jitter(delay, self.spread, draw)
    }
}
