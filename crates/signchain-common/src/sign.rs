use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::address::Address;

/// Chains the vault can submit signed transactions to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Chain {
    /// A local development chain.
    Local,
    /// Ethereum mainnet.
    Ethereum,
    /// Ethereum Sepolia testnet.
    Sepolia,
    /// BNB Smart Chain.
    Bsc,
    /// BNB Smart Chain testnet.
    BscTestnet,
    /// Polygon `PoS`.
    Polygon,
    /// Polygon Amoy testnet.
    Amoy,
    /// Avalanche C-Chain.
    Avalanche,
    /// Avalanche Fuji testnet.
    Fuji,
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Ethereum => write!(f, "ethereum"),
            Self::Sepolia => write!(f, "sepolia"),
            Self::Bsc => write!(f, "bsc"),
            Self::BscTestnet => write!(f, "bsc-testnet"),
            Self::Polygon => write!(f, "polygon"),
            Self::Amoy => write!(f, "amoy"),
            Self::Avalanche => write!(f, "avalanche"),
            Self::Fuji => write!(f, "fuji"),
        }
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(Self::Local),
            "ethereum" => Ok(Self::Ethereum),
            "sepolia" => Ok(Self::Sepolia),
            "bsc" => Ok(Self::Bsc),
            "bsc-testnet" => Ok(Self::BscTestnet),
            "polygon" => Ok(Self::Polygon),
            "amoy" => Ok(Self::Amoy),
            "avalanche" => Ok(Self::Avalanche),
            "fuji" => Ok(Self::Fuji),
            _ => Err(format!("Unknown chain: {s}")),
        }
    }
}

/// A request for the vault to sign a contract call.
///
/// # Examples
///
/// ```
/// use signchain_common::{Address, Chain, SignRequest};
///
/// let contract = Address::new([0x11; 20]);
/// let request = SignRequest::builder()
///     .chain(Chain::Polygon)
///     .contract(contract)
///     .sender(Address::new([0x22; 20]))
///     .uniq(vec![1, 2, 3])
///     .build();
///
/// let json = serde_json::to_value(&request)?;
/// assert_eq!(json["chain"], "polygon");
/// assert_eq!(json["uniq"], "AQID");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct SignRequest {
    /// Chain the signed call targets.
    pub chain: Chain,
    /// Contract being called.
    pub contract: Address,
    /// Account submitting the transaction.
    pub sender: Address,
    /// Caller-chosen uniqueness bytes, base64 encoded on the wire.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_bytes")]
    pub uniq: Option<Vec<u8>>,
    /// Vault key to sign with; the vault chooses when unset.
    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<Address>,
    /// ABI fragment describing the called function.
    #[builder(default)]
    pub abi: serde_json::Map<String, serde_json::Value>,
    /// Call arguments in ABI order.
    #[builder(default)]
    pub args: Vec<serde_json::Value>,
}

/// The vault's answer to a [`SignRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignResult {
    /// Hash identifying the submission.
    pub submission_hash: String,
    /// Arguments as the vault encoded them, including the produced signature.
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub args: Vec<serde_json::Value>,
}

mod base64_bytes {
    use base64::prelude::*;
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_str(&BASE64_STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| BASE64_STANDARD.decode(s).map_err(serde::de::Error::custom))
            .transpose()
    }
}
