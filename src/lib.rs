//! This library provides cancellable attempt schedules driven by
//! pluggable backoff strategies, for use with [`tokio`](https://tokio.rs/).
//!
//! Unlike a retry combinator, nothing here runs your operation. [`attempt`]
//! hands out `(attempt, delay)` pairs as a [`Stream`](futures::Stream); the
//! caller performs the work for each pair, inspects the outcome, and decides
//! when to stop. Between pairs the stream sleeps for the yielded delay unless
//! the [`CancellationToken`](tokio_util::sync::CancellationToken) fires first.
//!
//! # Installation
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! tokio-attempt = "*"
//! ```
//!
//! Loading strategies from configuration relies on `serde`, which is enabled
//! by default and can be turned off via cargo feature flags:
//!
//! ```toml
//! [dependencies.tokio-attempt]
//! version = "*"
//! default-features = false
//! ```
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//! use futures::StreamExt;
//! use tokio_attempt::attempt;
//! use tokio_attempt::strategy::{BackoffExt, Exponential};
//! use tokio_util::sync::CancellationToken;
//!
//! fn action() -> Result<u64, ()> {
//!     // do some real-world stuff here...
//!     Ok(42)
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let token = CancellationToken::new();
//!     let strategy = Exponential::from_millis(10).jitter(Duration::from_millis(10));
//!     let mut attempts = attempt(token, strategy);
//!
//!     let mut result = Err(());
//!     while let Some((n, _delay)) = attempts.next().await {
//!         result = action();
//!         if result.is_ok() || n >= 3 {
//!             break;
//!         }
//!     }
//!
//!     assert_eq!(result, Ok(42));
//! }
//! ```

mod attempt;
#[cfg(feature = "serde")]
pub mod config;
mod error;
/// Backoff strategies: constant, linear, exponential, decay and jitter.
pub mod strategy;

pub use attempt::{attempt, Attempts};
pub use error::{Error, Result};
pub use strategy::{Backoff, BackoffExt};
