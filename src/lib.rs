//! A single-process proof-of-work ledger.
//!
//! Signed transfers are queued in a pending pool and sealed into hash-linked
//! blocks by mining. Balances and chain validity are computed by replaying
//! the chain.

pub mod blockchain;
pub mod config;

pub use blockchain::{
    Address, Block, Blockchain, BlockchainError, ChainError, KeyPair, Transaction, Wallet,
};
pub use config::LedgerConfig;
