//! Vault Status Demo
//!
//! Reads the status of a vault and prints it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example vault_status_demo -- \
//!     --api-key ... --vault-id ...
//!
//! # Against a local vault
//! cargo run --example vault_status_demo -- \
//!     --base-url http://localhost:8080 --api-key ... --vault-id ...
//! ```

use anyhow::Result;
use clap::Parser;

use signchain_client::{VaultApi, VaultClient};
use signchain_common::{ClientConfig, DEFAULT_BASE_URL};

#[derive(Parser, Debug)]
#[command(author, version, about = "Signchain Vault Status Demo")]
struct Args {
    /// Base URL of the Signchain API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// API key for authentication
    #[arg(long, env = "SIGNCHAIN_API_KEY")]
    api_key: String,

    /// Vault to query
    #[arg(long, env = "SIGNCHAIN_VAULT_ID")]
    vault_id: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Signchain Vault Status");
    println!("======================");
    println!("Base URL: {}", args.base_url);
    println!("Vault: {}", args.vault_id);
    println!();

    let config = ClientConfig::new(&args.api_key, &args.vault_id)
        .with_base_url(&args.base_url)
        .with_timeout(args.timeout);

    let client = VaultClient::new(config)?;
    let status = client.vault_status().await?;

    println!("Online:     {}", status.online);
    println!("Version:    {}", status.version);
    println!("Vault keys: {}", status.vault_keys);
    println!("Wallets:    {}", status.wallets);
    println!("Timestamp:  {}", status.timestamp);

    Ok(())
}
