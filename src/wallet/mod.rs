use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::types::AnchorReference;

/// Ledger receiving address, carried as opaque text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Single value-bearing transaction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    pub address: Address,
    pub lovelace: u64,
}

/// Label-keyed transaction metadata map
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionMetadata(BTreeMap<u64, Value>);

impl TransactionMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: u64, value: Value) {
        self.0.insert(label, value);
    }

    pub fn get(&self, label: u64) -> Option<&Value> {
        self.0.get(&label)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u64, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Serialized transaction awaiting signatures, opaque to the core
#[derive(Debug, Clone)]
pub struct UnsignedTx(String);

impl UnsignedTx {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fully signed transaction ready for broadcast
#[derive(Debug, Clone)]
pub struct SignedTx(String);

impl SignedTx {
    pub fn new(payload: impl Into<String>) -> Self {
        Self(payload.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Wallet-provider capability consumed by the issue path.
///
/// Implementations own key custody entirely; the core never sees key
/// material and never retries a call on its own. Failures must surface as
/// the matching error variants - `BuildFailure`, `SigningRejected`,
/// `SubmissionFailure` - so callers can tell "you declined" from an
/// infrastructure fault. A wallet must not receive a second signing
/// request while one is outstanding; that is the caller's job to enforce.
#[async_trait]
pub trait WalletCapability: Send + Sync {
    /// Resolve the wallet's own receiving (change) address
    async fn receiving_address(&self) -> Result<Address>;

    /// Build an unsigned transaction with fee and input selection applied
    async fn build_unsigned(
        &self,
        outputs: &[TxOutput],
        metadata: &TransactionMetadata,
    ) -> Result<UnsignedTx>;

    /// Request a signature over the built transaction
    async fn sign(&self, unsigned: &UnsignedTx) -> Result<SignedTx>;

    /// Broadcast the signed transaction and return its ledger reference
    async fn submit(&self, signed: &SignedTx) -> Result<AnchorReference>;
}
