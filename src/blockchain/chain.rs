use chrono::Utc;
use log::{debug, info, warn};
use thiserror::Error;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use super::block::Block;
use super::crypto::{Address, Curve};
use super::mining::{CancellationToken, MiningControl, MiningError, MiningLimits, MiningProgress};
use super::transaction::{Transaction, TransactionError};
use crate::config::{ConfigError, LedgerConfig};

/// Errors that can occur during blockchain operations
#[derive(Debug, Error)]
pub enum BlockchainError {
    #[error("Transaction error: {0}")]
    TransactionError(#[from] TransactionError),

    #[error("Invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("Cannot add a transaction with an invalid signature")]
    InvalidSignature,

    #[error("Transaction amount must be greater than 0, got {0}")]
    InvalidAmount(f64),

    #[error("Insufficient funds: required {required} (of which {pending} already pending), available {available}")]
    InsufficientFunds {
        required: f64,
        pending: f64,
        available: f64,
    },

    #[error("Mining error: {0}")]
    MiningError(#[from] MiningError),

    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Miner thread panicked")]
    MinerPanicked,
}

/// The first invariant a chain was found to break
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("Genesis block does not match the canonical genesis")]
    GenesisMismatch,

    #[error("Block {index} does not link to the hash of its predecessor")]
    BrokenLink { index: usize },

    #[error("Block {index} contains an invalid transaction")]
    InvalidTransactions { index: usize },

    #[error("Block {index} has a stored hash that does not match its contents")]
    HashMismatch { index: usize },
}

/// Blocks and the pending pool, guarded together by one lock
#[derive(Debug)]
struct LedgerState {
    chain: Vec<Block>,
    pending_transactions: Vec<Transaction>,
}

impl LedgerState {
    fn latest_block(&self) -> &Block {
        // the chain always holds at least the genesis block
        &self.chain[self.chain.len() - 1]
    }

    fn transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.chain.iter().flat_map(|block| block.transactions.iter())
    }

    fn balance_of(&self, address: &Address) -> f64 {
        let mut balance = 0.0;

        for transaction in self.transactions() {
            if transaction.from_address.as_ref() == Some(address) {
                balance -= transaction.amount;
            }

            if transaction.to_address == *address {
                balance += transaction.amount;
            }
        }

        balance
    }

    fn pending_spend_of(&self, address: &Address) -> f64 {
        self.pending_transactions
            .iter()
            .filter(|tx| tx.from_address.as_ref() == Some(address))
            .map(|tx| tx.amount)
            .sum()
    }
}

/// Represents the blockchain.
///
/// Cloning gives another handle onto the same ledger. Every operation,
/// mining included, runs under a single lock, so submissions and mining are
/// applied one at a time.
#[derive(Debug, Clone)]
pub struct Blockchain {
    /// The chain of blocks and the pending pool
    state: Arc<Mutex<LedgerState>>,

    /// Mining difficulty (number of leading zeros required in hash)
    difficulty: usize,

    /// Mining reward
    mining_reward: f64,

    /// Bounds applied to every proof-of-work search
    mining_limits: MiningLimits,

    /// Verification context for transaction signatures
    curve: Curve,
}

impl Default for Blockchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Blockchain {
    /// Creates a new blockchain holding only the genesis block, with
    /// difficulty 3 and a mining reward of 100
    pub fn new() -> Self {
        Self::from_config(&LedgerConfig::default())
    }

    /// Creates a new blockchain with the given parameters
    pub fn with_config(config: &LedgerConfig) -> Result<Self, BlockchainError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: &LedgerConfig) -> Self {
        let state = LedgerState {
            chain: vec![Block::genesis()],
            pending_transactions: Vec::new(),
        };

        Blockchain {
            state: Arc::new(Mutex::new(state)),
            difficulty: config.difficulty,
            mining_reward: config.mining_reward,
            mining_limits: config.mining,
            curve: config.curve(),
        }
    }

    fn state(&self) -> MutexGuard<'_, LedgerState> {
        // every mutation is a single push or clear, so a panicking holder
        // cannot leave the state half-written
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn mining_reward(&self) -> f64 {
        self.mining_reward
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }

    /// Gets the last block in the chain
    pub fn latest_block(&self) -> Block {
        self.state().latest_block().clone()
    }

    /// Number of blocks, genesis included
    pub fn len(&self) -> usize {
        self.state().chain.len()
    }

    /// Always false: the genesis block is created with the chain
    pub fn is_empty(&self) -> bool {
        self.state().chain.is_empty()
    }

    /// Gets the entire blockchain
    pub fn chain(&self) -> Vec<Block> {
        self.state().chain.clone()
    }

    /// Gets all pending transactions
    pub fn pending_transactions(&self) -> Vec<Transaction> {
        self.state().pending_transactions.clone()
    }

    /// Validates a transaction and queues it for the next block.
    ///
    /// Checks, in order: both addresses present, signature valid, amount
    /// positive, sender balance covers the amount, and sender balance covers
    /// the amount plus everything the sender already has pending. A rejected
    /// transaction leaves the ledger untouched.
    ///
    /// # Returns
    ///
    /// The index of the block that will include the transaction
    pub fn add_transaction(&self, transaction: Transaction) -> Result<usize, BlockchainError> {
        let from = match &transaction.from_address {
            Some(from) if !from.is_empty() && !transaction.to_address.is_empty() => from.clone(),
            _ => {
                return Err(BlockchainError::InvalidTransaction(
                    "Transaction must include from and to address".to_string(),
                ));
            }
        };

        if !transaction.is_valid(&self.curve)? {
            return Err(BlockchainError::InvalidSignature);
        }

        // written this way round so NaN is rejected too
        if !(transaction.amount > 0.0) {
            return Err(BlockchainError::InvalidAmount(transaction.amount));
        }

        let mut state = self.state();

        let balance = state.balance_of(&from);
        if balance < transaction.amount {
            return Err(BlockchainError::InsufficientFunds {
                required: transaction.amount,
                pending: 0.0,
                available: balance,
            });
        }

        let pending = state.pending_spend_of(&from);
        if pending + transaction.amount > balance {
            return Err(BlockchainError::InsufficientFunds {
                required: pending + transaction.amount,
                pending,
                available: balance,
            });
        }

        info!(
            "Transaction added: {} -> {} ({})",
            from, transaction.to_address, transaction.amount
        );
        state.pending_transactions.push(transaction);

        Ok(state.chain.len())
    }

    /// Mines the pending transactions into a new block using the configured
    /// mining limits
    ///
    /// # Arguments
    ///
    /// * `reward_address` - The address paid the mining reward
    ///
    /// # Returns
    ///
    /// Result with the newly mined block
    pub fn mine_pending_transactions(&self, reward_address: &Address) -> Result<Block, BlockchainError> {
        let control = MiningControl::new(self.mining_limits);
        self.mine_pending_transactions_with(reward_address, &control)
    }

    /// Mines the pending transactions under an explicit mining control.
    ///
    /// The reward transaction is appended after the pending pool and is not
    /// subject to the admission checks. If the search is stopped nothing is
    /// appended and the pool is kept as it was.
    pub fn mine_pending_transactions_with(
        &self,
        reward_address: &Address,
        control: &MiningControl,
    ) -> Result<Block, BlockchainError> {
        let mut state = self.state();

        let mut transactions = state.pending_transactions.clone();
        transactions.push(Transaction::reward(reward_address.clone(), self.mining_reward));

        let mut block = Block::new(
            Utc::now().timestamp_millis(),
            transactions,
            state.latest_block().hash.clone(),
        );

        let attempts = block.mine(self.difficulty, control)?;

        info!(
            "Block {} mined with {} transactions after {} attempts: {}",
            state.chain.len(),
            block.transactions.len(),
            attempts,
            block.hash
        );

        state.chain.push(block.clone());
        state.pending_transactions.clear();

        Ok(block)
    }

    /// Mines the pending transactions on a worker thread.
    ///
    /// The worker holds the ledger lock for the whole search; other calls
    /// wait until it finishes. The returned handle can cancel the search
    /// and report its progress without taking the lock.
    pub fn spawn_miner(&self, reward_address: Address) -> MinerHandle {
        let control = MiningControl::new(self.mining_limits);
        let token = control.token.clone();
        let progress = control.progress.clone();
        let blockchain = self.clone();

        let handle = thread::spawn(move || {
            blockchain.mine_pending_transactions_with(&reward_address, &control)
        });

        MinerHandle {
            token,
            progress,
            handle,
        }
    }

    /// Returns the balance of an address by replaying the whole chain
    pub fn balance_of(&self, address: &Address) -> f64 {
        let balance = self.state().balance_of(address);
        debug!("Balance of {}: {}", address, balance);
        balance
    }

    /// Returns every mined transaction sent or received by `address`
    pub fn transactions_for(&self, address: &Address) -> Vec<Transaction> {
        let state = self.state();

        let transactions: Vec<Transaction> = state
            .transactions()
            .filter(|tx| tx.from_address.as_ref() == Some(address) || tx.to_address == *address)
            .cloned()
            .collect();

        debug!("Found {} transactions for {}", transactions.len(), address);
        transactions
    }

    /// Validates the blockchain
    ///
    /// # Returns
    ///
    /// true if the blockchain is valid, false otherwise
    pub fn is_chain_valid(&self) -> bool {
        match self.verify_chain() {
            Ok(()) => true,
            Err(err) => {
                warn!("Chain validation failed: {}", err);
                false
            }
        }
    }

    /// Validates the blockchain and reports the first broken invariant
    pub fn verify_chain(&self) -> Result<(), ChainError> {
        let state = self.state();
        let chain = &state.chain;

        if chain.first() != Some(&Block::genesis()) {
            return Err(ChainError::GenesisMismatch);
        }

        for (index, pair) in chain.windows(2).enumerate() {
            let (previous_block, current_block) = (&pair[0], &pair[1]);
            let index = index + 1;

            if current_block.previous_hash != previous_block.hash {
                return Err(ChainError::BrokenLink { index });
            }

            if !current_block.has_valid_transactions(&self.curve) {
                return Err(ChainError::InvalidTransactions { index });
            }

            if current_block.hash != current_block.calculate_hash() {
                return Err(ChainError::HashMismatch { index });
            }
        }

        Ok(())
    }

    /// Pretty printed JSON of the whole chain
    pub fn to_json(&self) -> Result<String, BlockchainError> {
        Ok(serde_json::to_string_pretty(&self.state().chain)?)
    }
}

/// Handle onto a mining run started by [`Blockchain::spawn_miner`]
#[derive(Debug)]
pub struct MinerHandle {
    token: CancellationToken,
    progress: MiningProgress,
    handle: JoinHandle<Result<Block, BlockchainError>>,
}

impl MinerHandle {
    /// Asks the worker to stop; `join` then reports `Cancelled`
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Hash attempts made so far
    pub fn attempts(&self) -> u64 {
        self.progress.attempts()
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the worker and returns the mined block
    pub fn join(self) -> Result<Block, BlockchainError> {
        self.handle.join().map_err(|_| BlockchainError::MinerPanicked)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::crypto::{DigitalSignature, KeyPair, Wallet};
    use crate::blockchain::mining::meets_difficulty;

    fn test_chain() -> Blockchain {
        Blockchain::with_config(&LedgerConfig {
            difficulty: 1,
            ..LedgerConfig::default()
        })
        .unwrap()
    }

    fn signed(from: &Wallet, to: &Address, amount: f64) -> Transaction {
        let mut transaction = Transaction::new(from.address(), to.clone(), amount);
        transaction.sign(from).unwrap();
        transaction
    }

    #[test]
    fn test_new_blockchain() {
        let blockchain = Blockchain::new();
        let chain = blockchain.chain();

        assert_eq!(chain.len(), 1);
        assert_eq!(chain[0], Block::genesis());
        assert_eq!(blockchain.difficulty(), 3);
        assert_eq!(blockchain.mining_reward(), 100.0);
        assert!(blockchain.pending_transactions().is_empty());
        assert!(blockchain.is_chain_valid());
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let result = Blockchain::with_config(&LedgerConfig {
            difficulty: 100,
            ..LedgerConfig::default()
        });

        assert!(matches!(result, Err(BlockchainError::ConfigError(_))));
    }

    #[test]
    fn test_balance_on_genesis_chain_is_zero() {
        let blockchain = test_chain();
        assert_eq!(blockchain.balance_of(&Wallet::generate().address()), 0.0);
    }

    #[test]
    fn test_mine_block() {
        let blockchain = Blockchain::new();
        let miner = Wallet::generate();

        let block = blockchain.mine_pending_transactions(&miner.address()).unwrap();

        assert_eq!(blockchain.len(), 2);
        assert!(meets_difficulty(&block.hash, 3));
        assert_eq!(block.hash, block.calculate_hash());
        assert_eq!(block.previous_hash, Block::genesis().hash);
        assert_eq!(block.transactions.len(), 1);
        assert!(block.transactions[0].is_reward());
        assert_eq!(blockchain.latest_block(), block);
        assert_eq!(blockchain.balance_of(&miner.address()), 100.0);
    }

    #[test]
    fn test_add_transaction() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let recipient = Wallet::generate();

        blockchain.mine_pending_transactions(&sender.address()).unwrap();

        let block_index = blockchain
            .add_transaction(signed(&sender, &recipient.address(), 10.0))
            .unwrap();
        assert_eq!(block_index, 2);

        let pending = blockchain.pending_transactions();
        assert_eq!(pending.len(), 1);

        // pending transfers do not move balances yet
        assert_eq!(blockchain.balance_of(&recipient.address()), 0.0);

        let block = blockchain.mine_pending_transactions(&sender.address()).unwrap();
        assert_eq!(block.transactions.len(), 2);
        assert!(block.transactions[1].is_reward());
        assert!(blockchain.pending_transactions().is_empty());
        assert_eq!(blockchain.balance_of(&recipient.address()), 10.0);
        assert_eq!(blockchain.balance_of(&sender.address()), 190.0);
    }

    #[test]
    fn test_rejects_reward_submission() {
        let blockchain = test_chain();
        let reward = Transaction::reward(Wallet::generate().address(), 100.0);

        assert!(matches!(
            blockchain.add_transaction(reward),
            Err(BlockchainError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_rejects_missing_recipient() {
        let blockchain = test_chain();
        let sender = Wallet::generate();

        let transaction = signed(&sender, &Address(String::new()), 1.0);
        assert!(matches!(
            blockchain.add_transaction(transaction),
            Err(BlockchainError::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_rejects_unsigned_transaction() {
        let blockchain = test_chain();
        let transaction =
            Transaction::new(Wallet::generate().address(), Wallet::generate().address(), 1.0);

        assert!(matches!(
            blockchain.add_transaction(transaction),
            Err(BlockchainError::TransactionError(TransactionError::MissingSignature(_)))
        ));
    }

    #[test]
    fn test_rejects_forged_signature() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let forger = Wallet::generate();
        blockchain.mine_pending_transactions(&sender.address()).unwrap();

        let mut transaction = Transaction::new(sender.address(), forger.address(), 10.0);
        transaction.signature = Some(forger.sign(&transaction.digest()));

        assert!(matches!(
            blockchain.add_transaction(transaction),
            Err(BlockchainError::InvalidSignature)
        ));

        let mut transaction = Transaction::new(sender.address(), forger.address(), 10.0);
        transaction.signature = Some(DigitalSignature("00".repeat(64)));
        assert!(matches!(
            blockchain.add_transaction(transaction),
            Err(BlockchainError::InvalidSignature)
        ));
        assert!(blockchain.pending_transactions().is_empty());
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let recipient = Wallet::generate().address();
        blockchain.mine_pending_transactions(&sender.address()).unwrap();

        for amount in [0.0, -5.0, f64::NAN] {
            let result = blockchain.add_transaction(signed(&sender, &recipient, amount));
            assert!(matches!(result, Err(BlockchainError::InvalidAmount(_))));
        }
    }

    #[test]
    fn test_rejects_insufficient_funds() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let recipient = Wallet::generate().address();

        let result = blockchain.add_transaction(signed(&sender, &recipient, 1.0));
        assert!(matches!(
            result,
            Err(BlockchainError::InsufficientFunds { available, .. }) if available == 0.0
        ));

        blockchain.mine_pending_transactions(&sender.address()).unwrap();
        let result = blockchain.add_transaction(signed(&sender, &recipient, 100.5));
        assert!(matches!(result, Err(BlockchainError::InsufficientFunds { .. })));

        blockchain.add_transaction(signed(&sender, &recipient, 100.0)).unwrap();
    }

    #[test]
    fn test_rejects_pending_double_spend() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let recipient = Wallet::generate().address();
        blockchain.mine_pending_transactions(&sender.address()).unwrap();

        blockchain.add_transaction(signed(&sender, &recipient, 60.0)).unwrap();

        let result = blockchain.add_transaction(signed(&sender, &recipient, 50.0));
        assert!(matches!(
            result,
            Err(BlockchainError::InsufficientFunds { required, pending, available })
                if required == 110.0 && pending == 60.0 && available == 100.0
        ));

        blockchain.add_transaction(signed(&sender, &recipient, 40.0)).unwrap();
        assert_eq!(blockchain.pending_transactions().len(), 2);
    }

    #[test]
    fn test_duplicate_transactions_are_allowed() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let recipient = Wallet::generate().address();
        blockchain.mine_pending_transactions(&sender.address()).unwrap();

        let transaction = signed(&sender, &recipient, 10.0);
        blockchain.add_transaction(transaction.clone()).unwrap();
        blockchain.add_transaction(transaction).unwrap();

        assert_eq!(blockchain.pending_transactions().len(), 2);
    }

    #[test]
    fn test_transactions_for() {
        let blockchain = test_chain();
        let alice = Wallet::generate();
        let bob = Wallet::generate();
        let carol = Wallet::generate();

        blockchain.mine_pending_transactions(&alice.address()).unwrap();
        blockchain.add_transaction(signed(&alice, &bob.address(), 30.0)).unwrap();
        blockchain.mine_pending_transactions(&carol.address()).unwrap();

        let history = blockchain.transactions_for(&alice.address());
        assert_eq!(history.len(), 2);
        assert!(history[0].is_reward());
        assert_eq!(history[1].to_address, bob.address());

        assert_eq!(blockchain.transactions_for(&bob.address()).len(), 1);
        assert!(blockchain.transactions_for(&Wallet::generate().address()).is_empty());
    }

    #[test]
    fn test_blockchain_validity() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let recipient = Wallet::generate();

        blockchain.mine_pending_transactions(&sender.address()).unwrap();
        blockchain.add_transaction(signed(&sender, &recipient.address(), 10.0)).unwrap();
        blockchain.mine_pending_transactions(&recipient.address()).unwrap();

        assert!(blockchain.is_chain_valid());

        let chain = blockchain.chain();
        for i in 1..chain.len() {
            assert_eq!(chain[i].previous_hash, chain[i - 1].hash);
        }
    }

    #[test]
    fn test_tampered_hash_is_detected() {
        let blockchain = test_chain();
        let miner = Wallet::generate();
        blockchain.mine_pending_transactions(&miner.address()).unwrap();
        blockchain.mine_pending_transactions(&miner.address()).unwrap();

        blockchain.state().chain[2].hash = "0".repeat(64);

        assert!(!blockchain.is_chain_valid());
        assert_eq!(blockchain.verify_chain(), Err(ChainError::HashMismatch { index: 2 }));
    }

    #[test]
    fn test_tampered_link_is_detected() {
        let blockchain = test_chain();
        let miner = Wallet::generate();
        blockchain.mine_pending_transactions(&miner.address()).unwrap();
        blockchain.mine_pending_transactions(&miner.address()).unwrap();

        blockchain.state().chain[2].previous_hash = "0".repeat(64);

        assert_eq!(blockchain.verify_chain(), Err(ChainError::BrokenLink { index: 2 }));
    }

    #[test]
    fn test_tampered_transaction_is_detected() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let recipient = Wallet::generate();
        blockchain.mine_pending_transactions(&sender.address()).unwrap();
        blockchain.add_transaction(signed(&sender, &recipient.address(), 10.0)).unwrap();
        blockchain.mine_pending_transactions(&sender.address()).unwrap();

        {
            let mut state = blockchain.state();
            let block = &mut state.chain[2];
            block.transactions[0].amount = 1_000.0;
            block.hash = block.calculate_hash();
        }

        assert_eq!(
            blockchain.verify_chain(),
            Err(ChainError::InvalidTransactions { index: 2 })
        );
    }

    #[test]
    fn test_tampered_genesis_is_detected() {
        let blockchain = test_chain();
        blockchain.state().chain[0].timestamp += 1;

        assert_eq!(blockchain.verify_chain(), Err(ChainError::GenesisMismatch));
    }

    #[test]
    fn test_failed_mining_leaves_state_untouched() {
        let blockchain = Blockchain::with_config(&LedgerConfig {
            difficulty: 64,
            mining: MiningLimits {
                max_attempts: Some(50),
                timeout_secs: None,
            },
            ..LedgerConfig::default()
        })
        .unwrap();
        let miner = Wallet::generate();

        let result = blockchain.mine_pending_transactions(&miner.address());

        assert!(matches!(
            result,
            Err(BlockchainError::MiningError(MiningError::AttemptLimitReached { attempts: 50 }))
        ));
        assert_eq!(blockchain.len(), 1);
        assert!(blockchain.pending_transactions().is_empty());
        assert_eq!(blockchain.balance_of(&miner.address()), 0.0);
    }

    #[test]
    fn test_spawned_miner_completes() {
        let blockchain = test_chain();
        let miner = Wallet::generate();

        let handle = blockchain.spawn_miner(miner.address());
        let block = handle.join().unwrap();

        assert_eq!(blockchain.latest_block(), block);
        assert_eq!(blockchain.balance_of(&miner.address()), 100.0);
    }

    #[test]
    fn test_spawned_miner_can_be_cancelled() {
        let blockchain = Blockchain::with_config(&LedgerConfig {
            difficulty: 64,
            ..LedgerConfig::default()
        })
        .unwrap();

        let handle = blockchain.spawn_miner(Wallet::generate().address());
        handle.cancel();

        let result = handle.join();
        assert!(matches!(
            result,
            Err(BlockchainError::MiningError(MiningError::Cancelled { .. }))
        ));
        assert_eq!(blockchain.len(), 1);
    }

    #[test]
    fn test_concurrent_submissions_are_serialized() {
        let blockchain = test_chain();
        let sender = Wallet::generate();
        let recipient = Wallet::generate().address();
        blockchain.mine_pending_transactions(&sender.address()).unwrap();

        // twenty submissions of 10 against a balance of 100: exactly ten fit
        let workers: Vec<_> = (0..20)
            .map(|_| {
                let blockchain = blockchain.clone();
                let transaction = signed(&sender, &recipient, 10.0);
                thread::spawn(move || blockchain.add_transaction(transaction).is_ok())
            })
            .collect();

        let accepted = workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .filter(|ok| *ok)
            .count();

        assert_eq!(accepted, 10);
        assert_eq!(blockchain.pending_transactions().len(), 10);
    }

    #[test]
    fn test_to_json() {
        let blockchain = test_chain();
        blockchain.mine_pending_transactions(&Wallet::generate().address()).unwrap();

        let json = blockchain.to_json().unwrap();
        let blocks: Vec<Block> = serde_json::from_str(&json).unwrap();

        assert_eq!(blocks, blockchain.chain());
        assert!(json.contains("\"previousHash\""));
        assert!(json.contains("\"fromAddress\": null"));
    }
}
