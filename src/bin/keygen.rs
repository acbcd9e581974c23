use clap::Parser;

use pow_ledger::{KeyPair, Wallet};

/// Generates a key pair for use as a ledger address
#[derive(Debug, Parser)]
#[command(name = "keygen", version)]
struct Args {
    /// Print only the two keys, one per line
    #[arg(long)]
    plain: bool,
}

fn main() {
    let args = Args::parse();
    let wallet = Wallet::generate();

    if args.plain {
        println!("{}", wallet.address());
        println!("{}", wallet.private_key_hex());
        return;
    }

    println!();
    println!("Your public key (wallet address):");
    println!("{}", wallet.address());

    println!();
    println!("Your private key (keep it secret, used to sign transactions):");
    println!("{}", wallet.private_key_hex());
}
