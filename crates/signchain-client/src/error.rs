//! Error types for the client library.

use signchain_common::ConfigError;
use thiserror::Error;

/// Errors that can occur when interacting with the vault API.
///
/// The variants fall into four families: transport failures, server
/// rejections, undecodable responses and entropy failures. The `is_*`
/// helpers classify an error without matching on individual variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Network or HTTP request failure.
    ///
    /// Indicates issues like DNS resolution, connection failures, or socket errors.
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// The request did not complete before its deadline.
    #[error("Timeout error")]
    TimeoutError,

    /// The vault rejected the call.
    ///
    /// Displays exactly the message the vault put in the envelope's `error`.
    #[error("{message}")]
    ServerError {
        /// HTTP status of the response.
        status: u16,
        /// The envelope's `error` message.
        message: String,
    },

    /// The response body was not valid JSON or did not match the envelope shape.
    #[error("Failed to decode response (HTTP {status}): {source}")]
    DecodeError {
        /// HTTP status of the response.
        status: u16,
        /// The underlying parse failure.
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but broke the envelope contract.
    ///
    /// For example a failed call without an error message, or a successful
    /// call without data where data is required.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The request body could not be encoded as JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The operating system could not supply secure random bytes for a nonce.
    #[error("Entropy error: {0}")]
    EntropyError(#[from] rand_core::Error),

    /// A signed request was made without a configured secret key.
    #[error("Request signing requires an auth secret key, but none is configured")]
    MissingSecretKey,

    /// A signature token could not be decoded.
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Client configuration issue.
    ///
    /// Invalid base URL, missing required fields, or incompatible settings.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<ConfigError> for ClientError {
    fn from(err: ConfigError) -> Self {
        Self::ConfigurationError(err.to_string())
    }
}

impl ClientError {
    /// Builds a transport error, distinguishing timeouts from other failures.
    pub(crate) fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::TimeoutError
        } else {
            Self::NetworkError(err)
        }
    }

    /// Check if the request never produced a usable HTTP response.
    pub const fn is_transport_failure(&self) -> bool {
        matches!(self, Self::NetworkError(_) | Self::TimeoutError)
    }

    /// Check if the vault answered with an error message.
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError { .. })
    }

    /// Check if the vault answered with a body that could not be understood.
    pub const fn is_decode_failure(&self) -> bool {
        matches!(self, Self::DecodeError { .. } | Self::InvalidResponse(_))
    }

    /// Check if this is a timeout.
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutError)
    }

    /// Get the HTTP status of the response that caused this error, if any.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } | Self::DecodeError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
