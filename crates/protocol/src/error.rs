//! Protocol error types

use thiserror::Error;

/// Errors raised while interpreting hub class responses
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// The hub returned fewer bytes than the request asked for
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },
}

/// Type alias for protocol results
pub type Result<T> = std::result::Result<T, ProtocolError>;
