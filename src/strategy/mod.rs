use std::sync::Arc;
use std::time::Duration;

mod constant;
mod decay;
mod exponential;
mod from_fn;
mod jitter;
mod linear;

pub use self::constant::Constant;
pub use self::decay::Decay;
pub use self::exponential::Exponential;
pub use self::from_fn::{from_fn, FromFn};
pub use self::jitter::Jitter;
pub use self::linear::Linear;

/// A backoff strategy maps a zero-based attempt index to the delay that
/// should pass before the next attempt.
///
/// Implementations must be pure: calling `delay` twice with the same index
/// yields the same duration. [`Jitter`] is the one deliberate exception,
/// drawing fresh randomness on each call.
pub trait Backoff {
    /// Returns the delay following attempt `attempt`.
    ///
    /// Never panics; arithmetic saturates at [`Duration::MAX`].
    fn delay(&self, attempt: u32) -> Duration;
}

impl<B: Backoff + ?Sized> Backoff for &B {
    fn delay(&self, attempt: u32) -> Duration {
        (**self).delay(attempt)
    }
}

impl<B: Backoff + ?Sized> Backoff for Box<B> {
    fn delay(&self, attempt: u32) -> Duration {
        (**self).delay(attempt)
    }
}

impl<B: Backoff + ?Sized> Backoff for Arc<B> {
    fn delay(&self, attempt: u32) -> Duration {
        (**self).delay(attempt)
    }
}

/// Combinators available on every [`Backoff`].
pub trait BackoffExt: Backoff {
    /// Perturbs every delay of this strategy by up to `±spread/2`.
    fn jitter(self, spread: Duration) -> Jitter<Self>
    where
        Self: Sized,
    {
        Jitter::new(spread, self)
    }
}

impl<B> BackoffExt for B where B: Backoff {}

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Builds a duration from a nanosecond count, saturating at `Duration::MAX`.
pub(crate) fn saturating_from_nanos(nanos: u128) -> Duration {
    let secs = nanos / NANOS_PER_SEC;
    if secs > u64::MAX as u128 {
        return Duration::MAX;
    }
    Duration::new(secs as u64, (nanos % NANOS_PER_SEC) as u32)
}
