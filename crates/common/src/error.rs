//! Common error types

use protocol::ProtocolError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("USB error: {0}")]
    Usb(String),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_conversion() {
        let err: Error = ProtocolError::ShortRead {
            expected: 4,
            actual: 0,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Protocol error: Short read: expected 4 bytes, got 0"
        );
    }
}
