use std::time::{Duration, Instant};

use futures::StreamExt;
use tokio_attempt::attempt;
use tokio_attempt::strategy::{BackoffExt, Exponential};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    let token = CancellationToken::new();
    let strategy = Exponential::from_millis(10).jitter(Duration::from_millis(10));

    let mut last_instant = Instant::now();
    let mut attempts = attempt(token, strategy);

    while let Some((n, delay)) = attempts.next().await {
        let this_instant = Instant::now();
        let actual = this_instant.duration_since(last_instant);
        last_instant = this_instant;

        println!("attempt {n}: actual {actual:?}, next delay {delay:?}");
        if n == 3 {
            break;
        }
    }
}
