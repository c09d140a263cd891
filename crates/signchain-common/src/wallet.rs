use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// A custodial wallet held by a vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Unique wallet identifier.
    pub id: String,
    /// Account that owns the wallet.
    pub account: String,
    /// Vault holding the wallet's key.
    pub vault: String,
    /// Human-readable wallet name.
    pub name: String,
    /// On-chain address of the wallet.
    pub address: Address,
    /// When the wallet was created.
    pub created: DateTime<Utc>,
    /// When the wallet was last modified.
    pub updated: DateTime<Utc>,
    /// When the wallet expires, if it has been expired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<DateTime<Utc>>,
}

impl Wallet {
    /// Whether the wallet has an expiry at or before `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// Body of a create-wallet call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    /// Name for the new wallet.
    pub name: String,
}

impl CreateWalletRequest {
    /// Creates a request for a wallet called `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Body of an update-wallet call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateWalletRequest {
    /// New name for the wallet.
    pub name: String,
}

impl UpdateWalletRequest {
    /// Creates a request renaming a wallet to `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Pagination for listing wallets.
///
/// Unset fields are left out of the query string entirely so the vault
/// applies its own defaults.
///
/// # Examples
///
/// ```
/// use signchain_common::ListWalletsOptions;
///
/// let options = ListWalletsOptions::new().with_offset(10).with_count(5);
/// assert_eq!(options.query_string(), "offset=10&count=5");
/// assert_eq!(ListWalletsOptions::new().query_string(), "");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWalletsOptions {
    /// Number of wallets to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Maximum number of wallets to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
}

impl ListWalletsOptions {
    /// Creates options with nothing set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: None,
            count: None,
        }
    }

    /// Sets the number of wallets to skip.
    #[must_use]
    pub const fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    /// Encodes the set fields as an `application/x-www-form-urlencoded` query.
    ///
    /// Returns an empty string when neither field is set.
    #[must_use]
    pub fn query_string(&self) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        if let Some(offset) = self.offset {
            query.append_pair("offset", &offset.to_string());
        }
        if let Some(count) = self.count {
            query.append_pair("count", &count.to_string());
        }
        query.finish()
    }
}

/// One page of wallets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListWalletsResult {
    /// Total number of wallets in the vault.
    pub count: i64,
    /// The wallets on this page.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub page: Vec<Wallet>,
}
