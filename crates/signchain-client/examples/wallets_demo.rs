//! Wallets Demo
//!
//! Walks through the wallet lifecycle: create a wallet, rename it, expire
//! it, unexpire it, then page through every wallet in the vault.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example wallets_demo -- \
//!     --api-key ... --vault-id ... --name treasury
//!
//! # Only list wallets, 50 per page
//! cargo run --example wallets_demo -- \
//!     --api-key ... --vault-id ... --list-only --page-size 50
//! ```

use anyhow::{Context, Result};
use clap::Parser;

use signchain_client::{VaultApi, VaultClient};
use signchain_common::{
    ClientConfig, CreateWalletRequest, DEFAULT_BASE_URL, ListWalletsOptions, UpdateWalletRequest,
    Wallet,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Signchain Wallets Demo")]
struct Args {
    /// Base URL of the Signchain API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// API key for authentication
    #[arg(long, env = "SIGNCHAIN_API_KEY")]
    api_key: String,

    /// Vault holding the wallets
    #[arg(long, env = "SIGNCHAIN_VAULT_ID")]
    vault_id: String,

    /// Name for the new wallet
    #[arg(long, default_value = "demo-wallet")]
    name: String,

    /// Skip the lifecycle steps and only list wallets
    #[arg(long)]
    list_only: bool,

    /// Number of wallets to request per page
    #[arg(long, default_value_t = 20)]
    page_size: i64,
}

fn print_wallet(label: &str, wallet: &Wallet) {
    let expires = wallet
        .expires
        .map_or_else(|| "never".to_string(), |t| t.to_rfc3339());
    println!(
        "{label:<10} {} {:<20} (id: {}, expires: {expires})",
        wallet.address, wallet.name, wallet.id
    );
}

fn print_acknowledged(label: &str, wallet: Option<&Wallet>) {
    match wallet {
        Some(wallet) => print_wallet(label, wallet),
        None => println!("{label:<10} (acknowledged without a body)"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    println!("Signchain Wallets Demo");
    println!("======================");
    println!("Base URL: {}", args.base_url);
    println!("Vault: {}", args.vault_id);
    println!();

    let config = ClientConfig::new(&args.api_key, &args.vault_id).with_base_url(&args.base_url);
    let client = VaultClient::new(config)?;

    if !args.list_only {
        let wallet = client
            .create_wallet(&CreateWalletRequest::new(&args.name))
            .await?
            .context("vault created the wallet without returning it")?;
        print_wallet("created", &wallet);

        let renamed = client
            .update_wallet(
                wallet.address,
                &UpdateWalletRequest::new(format!("{}-renamed", args.name)),
            )
            .await?;
        print_acknowledged("renamed", renamed.as_ref());

        let expired = client.expire_wallet(wallet.address).await?;
        print_acknowledged("expired", expired.as_ref());

        let restored = client.unexpire_wallet(wallet.address).await?;
        print_acknowledged("restored", restored.as_ref());

        let fetched = client.get_wallet(wallet.address).await?;
        print_wallet("fetched", &fetched);
        println!();
    }

    let mut offset = 0;
    loop {
        let options = ListWalletsOptions::new()
            .with_offset(offset)
            .with_count(args.page_size);
        let result = client.list_wallets(&options).await?;

        for wallet in &result.page {
            print_wallet("listed", wallet);
        }

        offset += i64::try_from(result.page.len())?;
        if result.page.is_empty() || offset >= result.count {
            println!();
            println!("{} wallet(s) in vault", result.count);
            break;
        }
    }

    Ok(())
}
