//! Cache error types

use thiserror::Error;

/// Failure talking to a cache backend.
///
/// These never leave the cache layer: selection skips a driver that fails
/// to connect, and the coordinator turns runtime failures into misses.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connect(String),

    #[error("Cache operation timed out: {0}")]
    Timeout(String),

    /// The server answered with an error or the connection dropped mid-call
    #[error("Cache backend error: {0}")]
    Backend(String),

    /// A stored value that is not valid UTF-8 text
    #[error("Invalid cached value: {0}")]
    InvalidValue(String),
}

pub type CacheResult<T> = Result<T, CacheError>;
