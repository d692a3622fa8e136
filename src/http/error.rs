/*
[INPUT]:  Error sources (HTTP transport, exchange responses, local validation)
[OUTPUT]: Structured error types with context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the Bittrex adapter
#[derive(Error, Debug)]
pub enum BittrexError {
    /// Network-level failure, passed through from the transport unmodified
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The exchange rejected the request; `code` is its error code verbatim
    #[error("exchange error (HTTP {status}): {code}")]
    Exchange { status: StatusCode, code: String },

    /// A required argument is missing or outside its allowed values
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// An authenticated endpoint was called on a client without credentials
    #[error("API credentials are required for this endpoint")]
    MissingCredentials,

    /// Serialization/deserialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

impl BittrexError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        BittrexError::InvalidArgument(message.into())
    }

    /// Exchange error code, when this is an exchange-side failure
    pub fn exchange_code(&self) -> Option<&str> {
        match self {
            BittrexError::Exchange { code, .. } => Some(code),
            _ => None,
        }
    }

    /// True when retrying cannot help (the request itself is wrong)
    pub fn is_client_fault(&self) -> bool {
        matches!(
            self,
            BittrexError::InvalidArgument(_) | BittrexError::MissingCredentials
        )
    }
}

/// Result type alias for Bittrex operations
pub type Result<T> = std::result::Result<T, BittrexError>;
