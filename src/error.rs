use thiserror::Error;

/// Errors raised while constructing a backoff strategy.
///
/// Driving an attempt schedule never fails; these only surface when a
/// strategy is built from invalid parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("decay half-life must be at least one attempt")]
    ZeroHalfLife,

    #[error("unknown backoff strategy: {0}")]
    UnknownStrategy(String),
}

pub type Result<T> = std::result::Result<T, Error>;
