mod client;

pub use client::BlockfrostClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::AnchorReference;

/// Single labeled metadata entry attached to a transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Metadata label, returned by the query service as decimal text
    pub label: String,
    pub json_metadata: Value,
}

/// Ledger query service consumed by the verify path.
///
/// The ledger is an external append-only keyed store reachable only by
/// reference lookup; every verification is a fresh round trip. "Reference
/// does not exist" must surface as `InvalidReference` and every other
/// failure as `LedgerService` - the two must never be conflated.
#[async_trait]
pub trait LedgerQueryService: Send + Sync {
    /// Fetch every metadata entry attached under the given reference
    async fn transaction_metadata(
        &self,
        reference: &AnchorReference,
    ) -> Result<Vec<MetadataEntry>>;
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::error::ChainSealError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory ledger for exercising the verify path
    #[derive(Default)]
    pub(crate) struct MemoryLedger {
        entries: Mutex<HashMap<String, Vec<MetadataEntry>>>,
    }

    impl MemoryLedger {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, reference: &str, label: &str, json_metadata: Value) {
            self.entries
                .lock()
                .unwrap()
                .entry(reference.to_string())
                .or_default()
                .push(MetadataEntry {
                    label: label.to_string(),
                    json_metadata,
                });
        }
    }

    #[async_trait]
    impl LedgerQueryService for MemoryLedger {
        async fn transaction_metadata(
            &self,
            reference: &AnchorReference,
        ) -> Result<Vec<MetadataEntry>> {
            self.entries
                .lock()
                .unwrap()
                .get(reference.as_str())
                .cloned()
                .ok_or_else(|| {
                    ChainSealError::invalid_reference(
                        reference.as_str(),
                        "no transaction metadata found on the ledger",
                    )
                })
        }
    }
}
