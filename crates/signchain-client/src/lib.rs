//! # signchain-client
//!
//! Client library for the Signchain custodial signing vault.
//!
//! This crate provides the [`VaultApi`] trait and its HTTP implementation,
//! [`VaultClient`]. Supported operations:
//! - Requesting signatures over contract calls (signed requests)
//! - Creating, listing, renaming, expiring and unexpiring wallets
//! - Reading vault status
//!
//! ## Example
//!
//! ```no_run
//! use signchain_client::{VaultApi, VaultClient};
//! use signchain_common::{CreateWalletRequest, ClientConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! // Create a client configuration
//! let config = ClientConfig::new("your-api-key", "your-vault-id")
//!     .with_auth_secret_key_from_env();
//!
//! // Initialize the client
//! let client = VaultClient::new(config)?;
//!
//! // Create a wallet
//! if let Some(wallet) = client
//!     .create_wallet(&CreateWalletRequest::new("treasury"))
//!     .await?
//! {
//!     println!("Created {} at {}", wallet.name, wallet.address);
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

use signchain_common::{
    Address, ClientConfig, CreateWalletRequest, ListWalletsOptions, ListWalletsResult,
    SignRequest, SignResult, UpdateWalletRequest, VaultStatus, Wallet,
};

pub mod auth;
pub mod client;
pub mod error;

pub use auth::{AuthSecretKey, AuthSignature, SIGNATURE_HEADER};
pub use client::VaultClient;
pub use error::ClientError;

/// Trait for vault client implementations.
///
/// Implementations must support async operations and be thread-safe
/// (Send + Sync). Every operation is a single attempt; nothing is retried.
#[must_use = "VaultApi must be used to make requests"]
#[async_trait]
pub trait VaultApi: Send + Sync {
    /// Get the client's configuration.
    fn config(&self) -> &ClientConfig;

    /// Ask the vault to sign a contract call.
    ///
    /// The request body is authenticated with the configured auth secret key.
    /// Returns `None` when the vault accepts the call without a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingSecretKey`] without contacting the vault
    /// if no auth secret key is configured, or any error the vault call
    /// produces.
    async fn sign(&self, request: &SignRequest) -> Result<Option<SignResult>, ClientError>;

    /// Create a new wallet in the vault.
    ///
    /// Returns `None` when the vault accepts the call without a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the vault rejects it.
    async fn create_wallet(
        &self,
        request: &CreateWalletRequest,
    ) -> Result<Option<Wallet>, ClientError>;

    /// Fetch a single wallet by address.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ServerError`] if the wallet does not exist, or
    /// any other error the call produces.
    async fn get_wallet(&self, address: Address) -> Result<Wallet, ClientError>;

    /// List one page of wallets.
    ///
    /// Unset paging options are left to the vault's defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the vault rejects it.
    async fn list_wallets(
        &self,
        options: &ListWalletsOptions,
    ) -> Result<ListWalletsResult, ClientError>;

    /// Rename a wallet.
    ///
    /// Returns the updated wallet, or `None` when the vault acknowledges the
    /// change without a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the vault rejects it.
    async fn update_wallet(
        &self,
        address: Address,
        request: &UpdateWalletRequest,
    ) -> Result<Option<Wallet>, ClientError>;

    /// Mark a wallet as expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the vault rejects it.
    async fn expire_wallet(&self, address: Address) -> Result<Option<Wallet>, ClientError>;

    /// Clear a wallet's expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the vault rejects it.
    async fn unexpire_wallet(&self, address: Address) -> Result<Option<Wallet>, ClientError>;

    /// Read the vault's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or the vault rejects it.
    async fn vault_status(&self) -> Result<VaultStatus, ClientError>;

    /// Check if the client can make signed requests.
    ///
    /// Returns `true` when an auth secret key is configured.
    fn supports_signing(&self) -> bool {
        self.config().has_auth_secret_key()
    }
}
