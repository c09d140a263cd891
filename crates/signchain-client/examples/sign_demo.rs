//! Sign Demo
//!
//! Asks the vault to sign a contract call. The request body is
//! authenticated with the auth secret key shared with the vault.
//!
//! # Usage
//!
//! ```bash
//! VAULT_AUTH_SECRET_KEY=... cargo run --example sign_demo -- \
//!     --api-key ... --vault-id ... \
//!     --contract 0x... --sender 0x... --args '["0x...", 1]'
//! ```

use anyhow::{Context, Result};
use clap::Parser;

use signchain_client::{VaultApi, VaultClient};
use signchain_common::{
    Address, Chain, ClientConfig, DEFAULT_BASE_URL, SignRequest, VAULT_AUTH_SECRET_KEY_ENV,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Signchain Sign Demo")]
struct Args {
    /// Base URL of the Signchain API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// API key for authentication
    #[arg(long, env = "SIGNCHAIN_API_KEY")]
    api_key: String,

    /// Vault holding the signing wallet
    #[arg(long, env = "SIGNCHAIN_VAULT_ID")]
    vault_id: String,

    /// Shared secret used to authenticate the request
    #[arg(long, env = VAULT_AUTH_SECRET_KEY_ENV, hide_env_values = true)]
    auth_secret_key: String,

    /// Chain the contract lives on
    #[arg(long, default_value = "sepolia")]
    chain: Chain,

    /// Contract to call
    #[arg(long)]
    contract: Address,

    /// Wallet submitting the call
    #[arg(long)]
    sender: Address,

    /// Wallet signing the call, when it differs from the sender
    #[arg(long)]
    signer: Option<Address>,

    /// Contract ABI fragment as a JSON object
    #[arg(long, default_value = "{}")]
    abi: String,

    /// Call arguments as a JSON array
    #[arg(long, default_value = "[]")]
    args: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Signchain Sign Demo");
    println!("===================");
    println!("Base URL: {}", args.base_url);
    println!("Vault: {}", args.vault_id);
    println!("Chain: {}", args.chain);
    println!("Contract: {}", args.contract);
    println!();

    let abi: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&args.abi).context("--abi must be a JSON object")?;
    let call_args: Vec<serde_json::Value> =
        serde_json::from_str(&args.args).context("--args must be a JSON array")?;

    let config = ClientConfig::new(&args.api_key, &args.vault_id)
        .with_base_url(&args.base_url)
        .with_auth_secret_key(&args.auth_secret_key);
    let client = VaultClient::new(config)?;

    let request = SignRequest::builder()
        .chain(args.chain)
        .contract(args.contract)
        .sender(args.sender)
        .abi(abi)
        .args(call_args)
        .build();
    let request = SignRequest {
        signer: args.signer,
        ..request
    };

    let Some(result) = client.sign(&request).await? else {
        println!("Vault accepted the request without returning a result");
        return Ok(());
    };

    println!("Submission hash: {}", result.submission_hash);
    println!("Arguments:");
    for arg in &result.args {
        println!("  {arg}");
    }

    Ok(())
}
