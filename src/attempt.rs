use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::{FusedStream, Stream};
use tokio::time::{sleep, Sleep};
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};
use tracing::{debug, trace};

use crate::strategy::Backoff;

enum AttemptState {
    /// Next poll checks cancellation and yields the next pair.
    Ready,
    /// A pair carrying this delay was yielded; the wait starts on the next poll.
    Pending(Duration),
    Sleeping(Pin<Box<Sleep>>),
    Done,
}

/// Stream of `(attempt, delay)` pairs produced by [`attempt`].
///
/// Between two pairs the stream waits out the previously yielded delay,
/// racing it against the cancellation token. It ends when the token is
/// cancelled, when a delay of zero has been yielded, or when the attempt
/// index is exhausted. Otherwise it never ends on its own.
#[must_use = "streams do nothing unless polled"]
pub struct Attempts<B> {
    strategy: B,
    token: CancellationToken,
    cancelled: Pin<Box<WaitForCancellationFutureOwned>>,
    state: AttemptState,
    attempt: u32,
}

/// Produces the attempt schedule for `strategy`, observing `token`.
///
/// The first pair is available immediately. Each following pair becomes
/// available once the delay carried by the previous one has elapsed, measured
/// from the moment the stream is polled again. The caller decides what an
/// attempt is and when to give up; dropping the stream stops it without any
/// further waiting.
///
/// ```
/// use futures::StreamExt;
/// use std::time::Duration;
/// use tokio_attempt::attempt;
/// use tokio_attempt::strategy::Linear;
/// use tokio_util::sync::CancellationToken;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let token = CancellationToken::new();
/// let mut attempts = attempt(token, Linear::from_millis(1));
///
/// while let Some((n, delay)) = attempts.next().await {
///     if n == 2 || delay > Duration::from_secs(1) {
///         break;
///     }
/// }
/// # }
/// ```
pub fn attempt<B: Backoff>(token: CancellationToken, strategy: B) -> Attempts<B> {
    Attempts {
        strategy,
        cancelled: Box::pin(token.clone().cancelled_owned()),
        token,
        state: AttemptState::Ready,
        attempt: 0,
    }
}

impl<B> Attempts<B> {
    /// The strategy driving this schedule.
    pub fn strategy(&self) -> &B {
        &self.strategy
    }
}

// `strategy` is never pinned, every other field is `Unpin`.
impl<B> Unpin for Attempts<B> {}

impl<B: Backoff> Stream for Attempts<B> {
    type Item = (u32, Duration);

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match this.state {
                AttemptState::Done => return Poll::Ready(None),
                AttemptState::Pending(delay) => {
                    this.state = AttemptState::Sleeping(Box::pin(sleep(delay)));
                }
                AttemptState::Sleeping(ref mut timer) => {
                    if this.cancelled.as_mut().poll(cx).is_ready() {
                        debug!(attempt = this.attempt, "cancelled while waiting");
                        this.state = AttemptState::Done;
                        return Poll::Ready(None);
                    }
                    if timer.as_mut().poll(cx).is_pending() {
                        return Poll::Pending;
                    }
                    match this.attempt.checked_add(1) {
                        Some(next) => {
                            this.attempt = next;
                            this.state = AttemptState::Ready;
                        }
                        None => {
                            debug!("attempt index exhausted");
                            this.state = AttemptState::Done;
                            return Poll::Ready(None);
                        }
                    }
                }
                AttemptState::Ready => {
                    if this.token.is_cancelled() {
                        debug!(attempt = this.attempt, "cancelled before attempt");
                        this.state = AttemptState::Done;
                        return Poll::Ready(None);
                    }
                    let delay = this.strategy.delay(this.attempt);
                    trace!(attempt = this.attempt, ?delay, "attempt scheduled");
                    this.state = if delay.is_zero() {
                        debug!(attempt = this.attempt, "zero delay, no further attempts");
                        AttemptState::Done
                    } else {
                        AttemptState::Pending(delay)
                    };
                    return Poll::Ready(Some((this.attempt, delay)));
                }
            }
        }
    }
}

impl<B: Backoff> FusedStream for Attempts<B> {
    fn is_terminated(&self) -> bool {
        matches!(self.state, AttemptState::Done)
    }
}
