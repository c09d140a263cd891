use thiserror::Error;

/// Errors produced when parsing an [`Address`](crate::Address).
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum AddressError {
    /// The hex body was not exactly 40 characters long.
    #[error("Invalid address length: expected 40 hex digits, got {0}")]
    InvalidLength(usize),

    /// The hex body contained a non-hex character.
    #[error("Invalid address hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Errors produced by [`ClientConfig::validate`](crate::ClientConfig::validate).
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The bearer API key was empty.
    #[error("API key is required")]
    MissingApiKey,

    /// The vault identifier was empty.
    #[error("Vault ID is required")]
    MissingVaultId,

    /// The vault identifier contains characters that would change the request path.
    #[error("Invalid vault ID '{0}': must not contain '/', '\\', '?', '#', '%' or whitespace")]
    InvalidVaultId(String),

    /// A secret key was configured but is empty.
    #[error("Auth secret key must not be empty")]
    EmptySecretKey,

    /// The base URL could not be parsed.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },
}
