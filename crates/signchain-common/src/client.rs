use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Base URL used when a configuration does not name one.
pub const DEFAULT_BASE_URL: &str = "https://signchain.net";

/// Environment variable consulted by [`ClientConfig::with_auth_secret_key_from_env`].
pub const VAULT_AUTH_SECRET_KEY_ENV: &str = "VAULT_AUTH_SECRET_KEY";

/// The uniform wrapper around every vault API response.
///
/// Only one of `data` and `error` is meaningful for a given `success` value:
/// `data` when the call succeeded, `error` when it did not.
///
/// # Examples
///
/// ```
/// use signchain_common::ApiResponse;
///
/// let body = r#"{"success":false,"error":"wallet not found"}"#;
/// let response: ApiResponse<serde_json::Value> = serde_json::from_str(body)?;
/// assert!(!response.success);
/// assert_eq!(response.error.as_deref(), Some("wallet not found"));
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the vault accepted the call.
    pub success: bool,
    /// The payload of a successful call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// The failure message of an unsuccessful call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Builds a successful envelope around `data`.
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Builds a failed envelope carrying `message`.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Configuration for a vault client.
///
/// The bearer API key and the signing secret are stored as `SecretString`,
/// are never serialized and are redacted from `Debug` output. Build the
/// value once, then hand it to a client, which keeps it immutable for its
/// whole lifetime.
///
/// # Examples
///
/// ```
/// use signchain_common::{ClientConfig, DEFAULT_BASE_URL};
///
/// let config = ClientConfig::new("api-key", "vault-id").with_timeout(30);
/// assert_eq!(config.base_url(), DEFAULT_BASE_URL);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Optional custom base URL. [`DEFAULT_BASE_URL`] is used when unset.
    pub base_url: Option<String>,
    /// Bearer credential sent in the `Authorization` header.
    #[serde(skip_serializing, default)]
    pub api_key: Option<SecretString>,
    /// Identifier of the vault every request is addressed to.
    pub vault_id: String,
    /// Shared secret that keys request signatures.
    #[serde(skip_serializing, default)]
    pub auth_secret_key: Option<SecretString>,
    /// Request timeout in seconds. `None` leaves requests unbounded.
    pub timeout_seconds: Option<u64>,
}

impl ClientConfig {
    /// Creates a configuration for `vault_id` authenticated by `api_key`.
    pub fn new(api_key: impl Into<String>, vault_id: impl Into<String>) -> Self {
        Self {
            base_url: None,
            api_key: Some(SecretString::new(api_key.into().into())),
            vault_id: vault_id.into(),
            auth_secret_key: None,
            timeout_seconds: None,
        }
    }

    /// Sets a custom base URL for API requests.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Replaces the bearer API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::new(api_key.into().into()));
        self
    }

    /// Sets the shared secret used to sign requests.
    #[must_use]
    pub fn with_auth_secret_key(mut self, secret: impl Into<String>) -> Self {
        self.auth_secret_key = Some(SecretString::new(secret.into().into()));
        self
    }

    /// Sets the signing secret if one is given, leaving the current value otherwise.
    #[must_use]
    pub fn with_optional_auth_secret_key(self, secret: Option<String>) -> Self {
        match secret {
            Some(secret) => self.with_auth_secret_key(secret),
            None => self,
        }
    }

    /// Reads the signing secret from `VAULT_AUTH_SECRET_KEY`.
    ///
    /// The configuration is left unchanged when the variable is not set.
    #[must_use]
    pub fn with_auth_secret_key_from_env(self) -> Self {
        let secret = std::env::var(VAULT_AUTH_SECRET_KEY_ENV).ok();
        if secret.is_none() {
            log::debug!("{VAULT_AUTH_SECRET_KEY_ENV} is not set, requests will not be signed");
        }
        self.with_optional_auth_secret_key(secret)
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Returns the effective base URL, falling back to [`DEFAULT_BASE_URL`].
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Returns the request timeout as a `Duration`, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Whether a signing secret is configured.
    #[must_use]
    pub const fn has_auth_secret_key(&self) -> bool {
        self.auth_secret_key.is_some()
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API key is missing or empty
    /// - The vault ID is empty or is not a single URL path segment
    /// - A signing secret is configured but empty
    /// - The base URL cannot be parsed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .api_key
            .as_ref()
            .is_none_or(|key| key.expose_secret().is_empty())
        {
            return Err(ConfigError::MissingApiKey);
        }

        if self.vault_id.trim().is_empty() {
            return Err(ConfigError::MissingVaultId);
        }

        // The id is spliced into request paths unescaped
        if self.vault_id.chars().any(|c| {
            matches!(c, '/' | '\\' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
        }) {
            return Err(ConfigError::InvalidVaultId(self.vault_id.clone()));
        }

        if self
            .auth_secret_key
            .as_ref()
            .is_some_and(|key| key.expose_secret().is_empty())
        {
            return Err(ConfigError::EmptySecretKey);
        }

        let base_url = self.base_url();
        url::Url::parse(base_url).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(())
    }
}
