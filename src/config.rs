//! Serializable descriptions of backoff strategies.
//!
//! Durations are expressed in milliseconds, mirroring how schedules are
//! usually written in configuration files:
//!
//! ```
//! use std::time::Duration;
//! use tokio_attempt::config::BackoffConfig;
//! use tokio_attempt::Backoff;
//!
//! let config: BackoffConfig = serde_json::from_str(
//!     r#"{"kind": "jitter", "spread_ms": 50, "inner": {"kind": "linear", "delay_ms": 100}}"#,
//! ).unwrap();
//! let strategy = config.build().unwrap();
//!
//! let d = strategy.delay(0);
//! assert!(d >= Duration::from_millis(75) && d < Duration::from_millis(125));
//! ```
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::strategy::{Backoff, Constant, Decay, Exponential, Jitter, Linear};

/// A backoff strategy that can be stored, sent and shared across tasks.
pub type BoxBackoff = Box<dyn Backoff + Send + Sync>;

/// Model-level description of a backoff strategy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BackoffConfig {
    Constant { delay_ms: u64 },
    Linear { delay_ms: u64 },
    Exponential { delay_ms: u64 },
    Decay { initial_ms: u64, half_life: u32 },
    Jitter { spread_ms: u64, inner: Box<BackoffConfig> },
}

impl BackoffConfig {
    pub fn kind(&self) -> BackoffKind {
        match self {
            BackoffConfig::Constant { .. } => BackoffKind::Constant,
            BackoffConfig::Linear { .. } => BackoffKind::Linear,
            BackoffConfig::Exponential { .. } => BackoffKind::Exponential,
            BackoffConfig::Decay { .. } => BackoffKind::Decay,
            BackoffConfig::Jitter { .. } => BackoffKind::Jitter,
        }
    }

    /// Validates the description and builds the runtime strategy.
    pub fn build(&self) -> Result<BoxBackoff> {
        let strategy: BoxBackoff = match self {
            BackoffConfig::Constant { delay_ms } => Box::new(Constant::from_millis(*delay_ms)),
            BackoffConfig::Linear { delay_ms } => Box::new(Linear::from_millis(*delay_ms)),
            BackoffConfig::Exponential { delay_ms } => {
                Box::new(Exponential::from_millis(*delay_ms))
            }
            BackoffConfig::Decay {
                initial_ms,
                half_life,
            } => Box::new(Decay::new(Duration::from_millis(*initial_ms), *half_life)?),
            BackoffConfig::Jitter { spread_ms, inner } => Box::new(Jitter::new(
                Duration::from_millis(*spread_ms),
                inner.build()?,
            )),
        };
        Ok(strategy)
    }
}

/// Name of a backoff strategy, as used in the `kind` tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BackoffKind {
    Constant,
    Linear,
    Exponential,
    Decay,
    Jitter,
}

impl BackoffKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackoffKind::Constant => "constant",
            BackoffKind::Linear => "linear",
            BackoffKind::Exponential => "exponential",
            BackoffKind::Decay => "decay",
            BackoffKind::Jitter => "jitter",
        }
    }
}

impl fmt::Display for BackoffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackoffKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "constant" | "fixed" => Ok(BackoffKind::Constant),
            "linear" => Ok(BackoffKind::Linear),
            "exponential" => Ok(BackoffKind::Exponential),
            "decay" => Ok(BackoffKind::Decay),
            "jitter" => Ok(BackoffKind::Jitter),
            other => Err(Error::UnknownStrategy(other.to_string())),
        }
    }
}
