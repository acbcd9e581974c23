use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use std::path::PathBuf;

use pow_ledger::{Blockchain, KeyPair, LedgerConfig, Transaction, Wallet};

/// Runs a short demo: two wallets mine and pay each other
#[derive(Debug, Parser)]
#[command(name = "pow-ledger", version)]
struct Args {
    /// TOML file with ledger parameters
    #[arg(long)]
    config: Option<PathBuf>,

    /// Hex private key of the first wallet (random when omitted)
    #[arg(long)]
    sender_key: Option<String>,

    /// Hex private key of the second wallet (random when omitted)
    #[arg(long)]
    recipient_key: Option<String>,

    /// Skip printing the chain as JSON
    #[arg(long)]
    quiet: bool,
}

fn load_wallet(private_key: Option<&str>) -> Result<Wallet> {
    match private_key {
        Some(key) => Wallet::from_private_key_hex(key).context("invalid private key"),
        None => Ok(Wallet::generate()),
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => LedgerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => LedgerConfig::default(),
    };

    let blockchain = Blockchain::with_config(&config)?;

    let alice = load_wallet(args.sender_key.as_deref())?;
    let bob = load_wallet(args.recipient_key.as_deref())?;

    info!("Wallet A: {}", alice.address());
    info!("Wallet B: {}", bob.address());

    blockchain.mine_pending_transactions(&alice.address())?;

    let mut tx1 = Transaction::new(alice.address(), bob.address(), 50.0);
    tx1.sign(&alice)?;
    blockchain.add_transaction(tx1)?;

    blockchain.mine_pending_transactions(&bob.address())?;

    let mut tx2 = Transaction::new(bob.address(), alice.address(), 20.0);
    tx2.sign(&bob)?;
    blockchain.add_transaction(tx2)?;

    blockchain.mine_pending_transactions(&alice.address())?;

    println!();
    println!("Balance of A is: {}", blockchain.balance_of(&alice.address()));
    println!("Balance of B is: {}", blockchain.balance_of(&bob.address()));

    println!();
    match blockchain.verify_chain() {
        Ok(()) => println!("Blockchain valid? Yes"),
        Err(err) => println!("Blockchain valid? No ({})", err),
    }

    if !args.quiet {
        println!();
        println!("{}", blockchain.to_json()?);
    }

    Ok(())
}
