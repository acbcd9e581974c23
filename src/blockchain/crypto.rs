use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::fmt;
use std::str::FromStr;

/// Errors that can occur during cryptographic operations
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

/// A wallet address: the hex encoded public key of its owner
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    /// Creates an address from a public key
    pub fn from_public_key(public_key: &VerifyingKey) -> Self {
        Address(hex::encode(public_key.as_bytes()))
    }

    /// Reconstructs the public key this address stands for
    pub fn to_public_key(&self) -> Result<VerifyingKey, CryptoError> {
        let bytes = hex::decode(&self.0).map_err(|e| CryptoError::DecodingError(e.to_string()))?;

        let bytes: [u8; 32] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidPublicKey("Invalid public key length".to_string())
        })?;

        VerifyingKey::from_bytes(&bytes).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s).map_err(|e| CryptoError::DecodingError(e.to_string()))?;

        Ok(Address(s.to_lowercase()))
    }
}

/// A hex encoded signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigitalSignature(pub String);

impl DigitalSignature {
    pub fn from_signature(signature: &Signature) -> Self {
        DigitalSignature(hex::encode(signature.to_bytes()))
    }

    pub fn to_signature(&self) -> Result<Signature, CryptoError> {
        let bytes = hex::decode(&self.0).map_err(|e| CryptoError::DecodingError(e.to_string()))?;

        Signature::from_slice(&bytes).map_err(|e| CryptoError::InvalidSignature(e.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Shared verification parameters for the ledger's signature scheme.
///
/// Passed explicitly to every verification call instead of living in a
/// global. `strict` selects `verify_strict`, which additionally rejects weak
/// public keys and non-canonical signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Curve {
    pub strict: bool,
}

impl Default for Curve {
    fn default() -> Self {
        Curve { strict: true }
    }
}

impl Curve {
    pub fn new(strict: bool) -> Self {
        Curve { strict }
    }

    /// Verifies `signature` over `digest` against the key behind `address`.
    ///
    /// A malformed address is an error; a signature that cannot be decoded
    /// simply does not verify.
    pub fn verify(
        &self,
        address: &Address,
        digest: &[u8],
        signature: &DigitalSignature,
    ) -> Result<bool, CryptoError> {
        let public_key = address.to_public_key()?;
        Ok(self.verify_with_key(&public_key, digest, signature))
    }

    fn verify_with_key(
        &self,
        public_key: &VerifyingKey,
        digest: &[u8],
        signature: &DigitalSignature,
    ) -> bool {
        let signature = match signature.to_signature() {
            Ok(sig) => sig,
            Err(_) => return false,
        };

        let result = if self.strict {
            public_key.verify_strict(digest, &signature)
        } else {
            public_key.verify(digest, &signature)
        };

        result.is_ok()
    }
}

/// Capability of a key pair as seen by the ledger
pub trait KeyPair {
    /// The public identifier transactions name as their sender
    fn address(&self) -> Address;

    /// Signs a digest with the private half
    fn sign(&self, digest: &[u8]) -> DigitalSignature;

    /// Checks a signature over a digest against the public half
    fn verify(&self, curve: &Curve, digest: &[u8], signature: &DigitalSignature) -> bool;
}

/// An Ed25519 key pair
#[derive(Debug, Clone)]
pub struct Wallet {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
    address: Address,
}

impl Wallet {
    /// Creates a new wallet with a random keypair
    pub fn generate() -> Self {
        let mut csprng = OsRng;
        let signing_key = SigningKey::generate(&mut csprng);
        Self::from_signing_key(signing_key)
    }

    /// Creates a wallet from an existing 32 byte secret key
    pub fn from_secret_key(secret_key_bytes: &[u8]) -> Result<Self, CryptoError> {
        let bytes_array: [u8; 32] = secret_key_bytes.try_into().map_err(|_| {
            CryptoError::InvalidPrivateKey("Invalid private key length".to_string())
        })?;

        Ok(Self::from_signing_key(SigningKey::from_bytes(&bytes_array)))
    }

    /// Creates a wallet from a hex encoded secret key
    pub fn from_private_key_hex(private_key: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(private_key.trim())
            .map_err(|e| CryptoError::InvalidPrivateKey(e.to_string()))?;
        Self::from_secret_key(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        let address = Address::from_public_key(&verifying_key);

        Wallet {
            signing_key,
            verifying_key,
            address,
        }
    }

    pub fn public_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Exports the secret key as hex
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.signing_key.to_bytes())
    }
}

impl KeyPair for Wallet {
    fn address(&self) -> Address {
        self.address.clone()
    }

    fn sign(&self, digest: &[u8]) -> DigitalSignature {
        let signature = self.signing_key.sign(digest);
        DigitalSignature::from_signature(&signature)
    }

    fn verify(&self, curve: &Curve, digest: &[u8], signature: &DigitalSignature) -> bool {
        curve.verify_with_key(&self.verifying_key, digest, signature)
    }
}
