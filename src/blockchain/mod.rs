// Blockchain module
//
// This module contains the core ledger implementation including:
// - Transaction structure
// - Block structure and proof of work
// - Mining control (cancellation, progress, limits)
// - Blockchain structure
// - Cryptography utilities

pub mod block;
pub mod chain;
pub mod crypto;
pub mod mining;
pub mod transaction;

// Re-export main components for easier access
pub use block::Block;
pub use chain::{Blockchain, BlockchainError, ChainError, MinerHandle};
pub use crypto::{Address, Curve, DigitalSignature, KeyPair, Wallet};
pub use mining::{CancellationToken, MiningControl, MiningError, MiningLimits};
pub use transaction::{Transaction, TransactionError};
