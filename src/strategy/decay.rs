use std::time::Duration;

use super::{saturating_from_nanos, Backoff};
use crate::error::{Error, Result};

/// A backoff strategy modelling exponential decay toward zero.
///
/// The delay starts at `initial` and halves every `half_life` attempts:
/// `delay(n) = initial >> (n / half_life)`. The value is piecewise constant,
/// holding for `half_life` consecutive attempts before it halves, and
/// eventually reaches zero, which ends an attempt schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decay {
    initial: Duration,
    half_life: u32,
}

impl Decay {
    /// Constructs a decay strategy.
    ///
    /// Fails with [`Error::ZeroHalfLife`] when `half_life` is zero.
    pub fn new(initial: Duration, half_life: u32) -> Result<Decay> {
        if half_life == 0 {
            return Err(Error::ZeroHalfLife);
        }
        Ok(Decay { initial, half_life })
    }

    pub fn initial(&self) -> Duration {
        self.initial
    }

    pub fn half_life(&self) -> u32 {
        self.half_life
    }
}

impl Backoff for Decay {
    fn delay(&self, attempt: u32) -> Duration {
        let halvings = attempt / self.half_life;
        match self.initial.as_nanos().checked_shr(halvings) {
            Some(nanos) => saturating_from_nanos(nanos),
            None => Duration::ZERO,
        }
    }
}
