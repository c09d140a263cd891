//! # signchain-common
//!
//! Common types and data structures for the Signchain vault API.
//!
//! This crate provides the plain data shared by every Signchain client:
//! - Client configuration with secure credential storage
//! - EVM addresses and supported chains
//! - Wallet, signing and vault status models
//! - The `{success, data, error}` response envelope
//!
//! ## Example
//!
//! ```
//! use signchain_common::{Address, Chain, ClientConfig, SignRequest};
//!
//! let config = ClientConfig::new("api-key", "vault-id")
//!     .with_auth_secret_key("shared-secret");
//! assert!(config.validate().is_ok());
//!
//! let contract: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse()?;
//! let request = SignRequest::builder()
//!     .chain(Chain::Sepolia)
//!     .contract(contract)
//!     .sender(contract)
//!     .args(vec![serde_json::json!("0x01")])
//!     .build();
//! assert_eq!(request.chain, Chain::Sepolia);
//! # Ok::<(), signchain_common::AddressError>(())
//! ```

/// EVM account addresses.
pub mod address;
/// Client configuration and the API response envelope.
pub mod client;
mod de;
/// Error types for address parsing and configuration validation.
pub mod error;
/// Signing requests, results and supported chains.
pub mod sign;
/// Vault status reporting.
pub mod vault;
/// Wallet models and the options for managing them.
pub mod wallet;

pub use address::Address;
pub use client::{ApiResponse, ClientConfig, DEFAULT_BASE_URL, VAULT_AUTH_SECRET_KEY_ENV};
pub use error::{AddressError, ConfigError};
pub use sign::{Chain, SignRequest, SignResult};
pub use vault::VaultStatus;
pub use wallet::{
    CreateWalletRequest, ListWalletsOptions, ListWalletsResult, UpdateWalletRequest, Wallet,
};
