//! # signchain
//!
//! Rust bindings for the Signchain custodial signing vault.
//!
//! This crate re-exports the client and data model so applications only
//! need a single dependency.
//!
//! ## Quick Start
//!
//! ```no_run
//! use signchain::prelude::*;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ClientConfig::new("your-api-key", "your-vault-id")
//!     .with_auth_secret_key_from_env();
//! let client = VaultClient::new(config)?;
//!
//! let address: Address = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".parse()?;
//! let request = SignRequest::builder()
//!     .chain(Chain::Sepolia)
//!     .contract(address)
//!     .sender(address)
//!     .build();
//!
//! if let Some(result) = client.sign(&request).await? {
//!     println!("Submitted as {}", result.submission_hash);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Features
//!
//! - **Signing**: Request signatures over contract calls, authenticated with a shared secret
//! - **Wallets**: Create, list, rename, expire and unexpire custodial wallets
//! - **Vault Status**: Check that a vault is online and see what it holds

pub use signchain_client::*;
pub use signchain_common::*;

/// The types needed by most applications.
pub mod prelude {
    pub use signchain_client::{ClientError, VaultApi, VaultClient};
    pub use signchain_common::{
        Address, Chain, ClientConfig, CreateWalletRequest, ListWalletsOptions, ListWalletsResult,
        SignRequest, SignResult, UpdateWalletRequest, VaultStatus, Wallet,
    };
}
