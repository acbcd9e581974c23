use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::crypto::{Address, CryptoError, Curve, DigitalSignature, KeyPair};

/// Errors that can occur during transaction operations
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Signing key {signer} does not belong to sender {sender}")]
    Authorization { signer: Address, sender: String },

    #[error("No signature found on transaction {0}")]
    MissingSignature(String),

    #[error("Crypto error: {0}")]
    CryptoError(#[from] CryptoError),
}

/// A transfer of `amount` from one address to another.
///
/// A transaction without a sender is a mining reward and mints new supply.
/// Field order is part of the block hash: blocks serialize their
/// transactions as JSON in exactly this order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Sender's address, `None` for a reward
    pub from_address: Option<Address>,

    /// Recipient's address
    pub to_address: Address,

    /// Amount being transferred
    pub amount: f64,

    /// Creation time in Unix milliseconds
    pub timestamp: i64,

    /// Signature over the transaction hash, present once signed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signature: Option<DigitalSignature>,
}

impl Transaction {
    /// Creates a new unsigned transaction stamped with the current time.
    ///
    /// Nothing is validated here; the ledger checks the transaction when it
    /// is submitted.
    pub fn new(from_address: Address, to_address: Address, amount: f64) -> Self {
        Transaction {
            from_address: Some(from_address),
            to_address,
            amount,
            timestamp: Utc::now().timestamp_millis(),
            signature: None,
        }
    }

    /// Creates a reward transaction paying `amount` to `to_address`
    pub fn reward(to_address: Address, amount: f64) -> Self {
        Transaction {
            from_address: None,
            to_address,
            amount,
            timestamp: Utc::now().timestamp_millis(),
            signature: None,
        }
    }

    pub fn is_reward(&self) -> bool {
        self.from_address.is_none()
    }

    /// SHA-256 over sender, recipient, amount and timestamp.
    ///
    /// The fields are concatenated without separators. An absent sender
    /// contributes nothing.
    pub fn digest(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();

        if let Some(from) = &self.from_address {
            hasher.update(from.as_str().as_bytes());
        }
        hasher.update(self.to_address.as_str().as_bytes());
        hasher.update(self.amount.to_string().as_bytes());
        hasher.update(self.timestamp.to_string().as_bytes());

        hasher.finalize().into()
    }

    /// Hex form of [`Transaction::digest`]
    pub fn calculate_hash(&self) -> String {
        hex::encode(self.digest())
    }

    /// Signs the transaction hash with `key` and stores the signature.
    ///
    /// Fails if the key is not the sender's. Signing again replaces the
    /// previous signature.
    pub fn sign<K: KeyPair + ?Sized>(&mut self, key: &K) -> Result<(), TransactionError> {
        let signer = key.address();

        match &self.from_address {
            Some(from) if *from == signer => {}
            other => {
                return Err(TransactionError::Authorization {
                    signer,
                    sender: other
                        .as_ref()
                        .map(|a| a.to_string())
                        .unwrap_or_else(|| "<reward>".to_string()),
                });
            }
        }

        self.signature = Some(key.sign(&self.digest()));

        Ok(())
    }

    /// Checks the sender's signature.
    ///
    /// Rewards are always valid. A sender without a signature is an error,
    /// not merely invalid.
    pub fn is_valid(&self, curve: &Curve) -> Result<bool, TransactionError> {
        let from = match &self.from_address {
            Some(from) => from,
            None => return Ok(true),
        };

        let signature = match &self.signature {
            Some(sig) if !sig.is_empty() => sig,
            _ => return Err(TransactionError::MissingSignature(self.calculate_hash())),
        };

        Ok(curve.verify(from, &self.digest(), signature)?)
    }
}
