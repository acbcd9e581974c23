use log::{debug, warn};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::crypto::Curve;
use super::mining::{meets_difficulty, MiningControl, MiningError};
use super::transaction::Transaction;

/// Timestamp of the genesis block: 2022-01-01T00:00:00Z in Unix milliseconds
pub const GENESIS_TIMESTAMP: i64 = 1_640_995_200_000;

/// Previous hash recorded by the genesis block
pub const GENESIS_PREVIOUS_HASH: &str = "0";

/// Represents a block in the blockchain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Hash of the previous block
    pub previous_hash: String,

    /// Creation time in Unix milliseconds
    pub timestamp: i64,

    /// Transactions in the order they left the pending pool
    pub transactions: Vec<Transaction>,

    /// Proof of work nonce
    pub seed: u64,

    /// Hash of this block as of the last seed change
    pub hash: String,
}

impl Block {
    /// Creates a new block with seed 0 and its hash already computed
    pub fn new(timestamp: i64, transactions: Vec<Transaction>, previous_hash: String) -> Self {
        let mut block = Block {
            previous_hash,
            timestamp,
            transactions,
            seed: 0,
            hash: String::new(),
        };

        block.hash = block.calculate_hash();
        block
    }

    /// The canonical first block every chain starts from
    pub fn genesis() -> Self {
        Block::new(GENESIS_TIMESTAMP, Vec::new(), GENESIS_PREVIOUS_HASH.to_string())
    }

    /// Calculates the hash of the block from its current fields
    pub fn calculate_hash(&self) -> String {
        Self::hash_with_seed(self.hash_prefix(), self.seed)
    }

    /// Hasher fed with everything but the seed, so mining can reuse it
    fn hash_prefix(&self) -> Sha256 {
        let mut hasher = Sha256::new();
        hasher.update(self.previous_hash.as_bytes());
        hasher.update(self.timestamp.to_string().as_bytes());
        hasher.update(self.canonical_transactions().as_bytes());
        hasher
    }

    fn hash_with_seed(mut prefix: Sha256, seed: u64) -> String {
        prefix.update(seed.to_string().as_bytes());
        hex::encode(prefix.finalize())
    }

    /// JSON array of the transactions with fixed field order.
    fn canonical_transactions(&self) -> String {
        // plain structs with string keys always serialize
        serde_json::to_string(&self.transactions).unwrap_or_default()
    }

    /// Searches for a seed whose hash starts with `difficulty` zeros.
    ///
    /// The current hash is checked first, so an already valid block is left
    /// untouched. Returns the number of seeds tried. When the control stops
    /// the search the block keeps the last seed it tried.
    pub fn mine(&mut self, difficulty: usize, control: &MiningControl) -> Result<u64, MiningError> {
        let prefix = self.hash_prefix();
        let mut run = control.start();

        while !meets_difficulty(&self.hash, difficulty) {
            if let Err(err) = run.attempt() {
                warn!("Stopped mining block at seed {}: {}", self.seed, err);
                return Err(err);
            }

            self.seed = self.seed.wrapping_add(1);
            self.hash = Self::hash_with_seed(prefix.clone(), self.seed);
        }

        let attempts = run.finish();
        debug!("Block mined: {} (seed {}, {} attempts)", self.hash, self.seed, attempts);

        Ok(attempts)
    }

    /// Whether every transaction in the block verifies.
    ///
    /// A transaction whose check errors (missing signature, malformed
    /// sender) counts as invalid.
    pub fn has_valid_transactions(&self, curve: &Curve) -> bool {
        self.transactions
            .iter()
            .all(|tx| matches!(tx.is_valid(curve), Ok(true)))
    }

    pub fn is_genesis(&self) -> bool {
        *self == Block::genesis()
    }
}
