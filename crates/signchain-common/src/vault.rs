use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Health and inventory report for a vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultStatus {
    /// When the vault produced this report.
    pub timestamp: DateTime<Utc>,
    /// Whether the vault is reachable and able to sign.
    pub online: bool,
    /// Number of signing keys loaded in the vault.
    pub vault_keys: i64,
    /// Number of wallets the vault manages.
    pub wallets: i64,
    /// Vault software version.
    pub version: String,
}
