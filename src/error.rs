//! Error types for the catalog SDK
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

use crate::http::TransportError;

// == Config Error Enum ==
/// Errors raised while building or updating the SDK configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL was empty
    #[error("Base URL cannot be empty")]
    EmptyBaseUrl,

    /// License key was empty
    #[error("License key cannot be empty")]
    EmptyLicenseKey,

    /// Base URL could not be parsed
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

// == SDK Error Enum ==
/// Unified error type returned by the resource services.
#[derive(Error, Debug)]
pub enum SdkError {
    /// The API answered with a non-success status code
    #[error("Server error: {0}")]
    Server(u16),

    /// No response was received (DNS, timeout, connection reset)
    #[error("Network error: {0}")]
    Network(String),

    /// The API answered but the body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A caller-supplied value cannot be sent to the API
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration problem
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SdkError {
    // == Status Code ==
    /// Returns the HTTP status for server errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Server(status) => Some(*status),
            _ => None,
        }
    }

    /// Returns true if no response was received.
    pub fn is_network(&self) -> bool {
        matches!(self, SdkError::Network(_))
    }
}

// == Transport Classification ==
impl From<TransportError> for SdkError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Status(status) => SdkError::Server(status),
            TransportError::Network(msg) => SdkError::Network(msg),
            TransportError::Decode(msg) => SdkError::InvalidResponse(msg),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the SDK.
pub type Result<T> = std::result::Result<T, SdkError>;
