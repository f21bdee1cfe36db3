use std::fmt;
use std::time::Duration;

use super::Backoff;

/// A backoff strategy backed by a closure.
///
/// The closure must behave like the built-in strategies: a pure function of
/// the attempt index.
///
/// Example:
///
/// ```
/// use std::time::Duration;
/// use tokio_attempt::strategy::{from_fn, Backoff};
///
/// let capped = from_fn(|n| Duration::from_millis(100).saturating_mul(n + 1).min(Duration::from_secs(1)));
///
/// assert_eq!(capped.delay(3), Duration::from_millis(400));
/// assert_eq!(capped.delay(50), Duration::from_secs(1));
/// ```
#[derive(Clone, Copy)]
pub struct FromFn<F> {
    f: F,
}

pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(u32) -> Duration,
{
    FromFn { f }
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

impl<F> Backoff for FromFn<F>
where
    F: Fn(u32) -> Duration,
{
    fn delay(&self, attempt: u32) -> Duration {
        (self.f)(attempt)
    }
}

#[test]
fn returns_from_closure() {
    let s = from_fn(|n| Duration::from_millis(10 * n as u64));

    assert_eq!(s.delay(0), Duration::ZERO);
    assert_eq!(s.delay(1), Duration::from_millis(10));
    assert_eq!(s.delay(3), Duration::from_millis(30));
}
