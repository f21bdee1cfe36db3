use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use futures::stream::{FusedStream, StreamExt};
use tokio::time::Instant;
use tokio_attempt::attempt;
use tokio_attempt::strategy::{from_fn, BackoffExt, Constant, Decay, Linear};
use tokio_util::sync::CancellationToken;

#[tokio::test(start_paused = true)]
async fn zero_delay_yields_exactly_once() {
    let pairs: Vec<_> = attempt(CancellationToken::new(), Constant::new(Duration::ZERO))
        .collect()
        .await;

    assert_eq!(pairs, vec![(0, Duration::ZERO)]);
}

#[tokio::test]
async fn counts_attempts_without_gaps() {
    let delay = Duration::from_micros(10);
    let pairs: Vec<_> = attempt(CancellationToken::new(), Constant::new(delay))
        .take(10)
        .collect()
        .await;

    let expected: Vec<_> = (0..10).map(|n| (n, delay)).collect();
    assert_eq!(pairs, expected);
}

#[tokio::test(start_paused = true)]
async fn cancellation_preempts_a_wait() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(3)).await;
        canceller.cancel();
    });

    let start = Instant::now();
    let pairs: Vec<_> = attempt(token, Constant::from_millis(2000)).collect().await;

    assert_eq!(
        pairs,
        vec![(0, Duration::from_secs(2)), (1, Duration::from_secs(2))]
    );
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(3) && elapsed < Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn cancellation_on_a_wait_boundary() {
    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        canceller.cancel();
    });

    let start = Instant::now();
    let pairs: Vec<_> = attempt(token, Constant::from_millis(2000)).collect().await;

    // The timer and the cancel fire at the same instant; either may win.
    assert!((1..=2).contains(&pairs.len()), "{pairs:?}");
    for (n, (attempt, delay)) in pairs.iter().enumerate() {
        assert_eq!((*attempt, *delay), (n as u32, Duration::from_secs(2)));
    }
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn cancelled_token_yields_nothing() {
    let token = CancellationToken::new();
    token.cancel();

    let mut attempts = attempt(token, Constant::from_millis(10));

    assert_eq!(attempts.next().await, None);
    assert!(attempts.is_terminated());
}

#[tokio::test(start_paused = true)]
async fn cancellation_between_pulls_ends_stream() {
    let token = CancellationToken::new();
    let mut attempts = attempt(token.clone(), Constant::from_millis(10));

    assert_eq!(attempts.next().await, Some((0, Duration::from_millis(10))));
    token.cancel();
    let start = Instant::now();

    assert_eq!(attempts.next().await, None);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn waits_only_between_pulled_pairs() {
    let start = Instant::now();
    let pairs: Vec<_> = attempt(CancellationToken::new(), Constant::from_millis(1000))
        .take(3)
        .collect()
        .await;

    assert_eq!(pairs.len(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(2));
}

#[tokio::test(start_paused = true)]
async fn wait_starts_when_polled_again() {
    let mut attempts = attempt(CancellationToken::new(), Linear::from_millis(100));

    assert_eq!(attempts.next().await, Some((0, Duration::from_millis(100))));
    tokio::time::sleep(Duration::from_millis(500)).await;

    let resumed = Instant::now();
    assert_eq!(attempts.next().await, Some((1, Duration::from_millis(200))));
    assert_eq!(resumed.elapsed(), Duration::from_millis(100));
}

#[tokio::test(start_paused = true)]
async fn decay_ends_once_it_reaches_zero() {
    let strategy = Decay::new(Duration::from_nanos(4), 1).unwrap();
    let pairs: Vec<_> = attempt(CancellationToken::new(), strategy).collect().await;

    assert_eq!(
        pairs,
        vec![
            (0, Duration::from_nanos(4)),
            (1, Duration::from_nanos(2)),
            (2, Duration::from_nanos(1)),
            (3, Duration::ZERO),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn stream_stays_terminated() {
    let mut attempts = attempt(CancellationToken::new(), Constant::new(Duration::ZERO));

    assert_eq!(attempts.next().await, Some((0, Duration::ZERO)));
    assert!(attempts.is_terminated());
    assert_eq!(attempts.next().await, None);
    assert_eq!(attempts.next().await, None);
}

#[tokio::test(start_paused = true)]
async fn attempts_until_success() {
    let counter = Arc::new(AtomicUsize::new(0));
    let mut attempts = attempt(CancellationToken::new(), Constant::from_millis(100));

    let mut result = Err(0);
    while attempts.next().await.is_some() {
        let previous = counter.fetch_add(1, Ordering::SeqCst);
        result = if previous < 3 { Err(previous) } else { Ok(()) };
        if result.is_ok() {
            break;
        }
    }

    assert_eq!(result, Ok(()));
    assert_eq!(counter.load(Ordering::SeqCst), 4);
}

#[tokio::test(start_paused = true)]
async fn strategy_is_queried_once_per_attempt() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = calls.clone();
    let strategy = from_fn(move |n| {
        seen.fetch_add(1, Ordering::SeqCst);
        Duration::from_millis(n as u64 + 1)
    });

    let pairs: Vec<_> = attempt(CancellationToken::new(), strategy).take(5).collect().await;

    assert_eq!(pairs.last(), Some(&(4, Duration::from_millis(5))));
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[tokio::test(start_paused = true)]
async fn independent_streams_share_nothing() {
    let token = CancellationToken::new();
    let strategy = Arc::new(Linear::from_millis(10));

    let mut first = attempt(token.clone(), strategy.clone());
    let mut second = attempt(token.child_token(), strategy);

    assert_eq!(first.next().await, Some((0, Duration::from_millis(10))));
    assert_eq!(first.next().await, Some((1, Duration::from_millis(20))));
    assert_eq!(second.next().await, Some((0, Duration::from_millis(10))));
}

#[tokio::test(start_paused = true)]
async fn wide_jitter_does_not_end_schedule() {
    let strategy = Constant::from_millis(10).jitter(Duration::from_millis(100));

    for _ in 0..20 {
        let pairs: Vec<_> = attempt(CancellationToken::new(), &strategy)
            .take(10)
            .collect()
            .await;

        assert_eq!(pairs.len(), 10, "{pairs:?}");
        assert!(pairs.iter().all(|(_, delay)| !delay.is_zero()));
        assert!(pairs.iter().map(|(n, _)| *n).eq(0..10));
    }
}

#[tokio::test(start_paused = true)]
async fn jitter_keeps_inner_zero_as_stop() {
    let strategy = Constant::new(Duration::ZERO).jitter(Duration::from_millis(100));
    let pairs: Vec<_> = attempt(CancellationToken::new(), strategy).collect().await;

    assert_eq!(pairs, vec![(0, Duration::ZERO)]);
}
