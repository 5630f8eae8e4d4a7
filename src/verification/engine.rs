use std::sync::Arc;
use tracing::{info, warn};

use crate::anchor::{AnchorMetadata, RESERVED_METADATA_LABEL};
use crate::error::{ChainSealError, Result};
use crate::fingerprint::FingerprintEngine;
use crate::ledger::{LedgerQueryService, MetadataEntry};
use crate::types::{AnchorReference, VerificationVerdict};

/// Re-verifies candidate documents against anchored fingerprints.
pub struct VerificationEngine {
    ledger: Arc<dyn LedgerQueryService>,
}

impl VerificationEngine {
    pub fn new(ledger: Arc<dyn LedgerQueryService>) -> Self {
        Self { ledger }
    }

    /// Main verification entry point
    ///
    /// Pipeline:
    /// 1. Recompute the candidate fingerprint and query the ledger, concurrently
    /// 2. Take the first metadata entry under the reserved label
    /// 3. Extract the recorded `certificate.hash`
    /// 4. Compare case-insensitively but otherwise exactly
    ///
    /// An unknown reference (or one carrying nothing under the reserved
    /// label) is `InvalidReference`; a mismatch is a `valid=false` verdict.
    /// The two are never conflated.
    pub async fn verify(
        &self,
        document: Vec<u8>,
        reference: &AnchorReference,
    ) -> Result<VerificationVerdict> {
        info!("Starting verification for {}", reference);

        let recompute =
            tokio::task::spawn_blocking(move || FingerprintEngine::fingerprint(&document));
        let (recomputed, entries) =
            tokio::join!(recompute, self.ledger.transaction_metadata(reference));

        let recomputed = recomputed
            .map_err(|e| ChainSealError::read(format!("fingerprint recompute aborted: {}", e)))?;
        let entries = entries?;

        let recorded = self.recorded_fingerprint(reference, &entries)?;

        let verdict = VerificationVerdict::new(reference.clone(), recorded, recomputed);
        if verdict.valid {
            info!("✓ Verification complete: fingerprints match");
        } else {
            warn!(
                "Fingerprint mismatch: recorded={} recomputed={}",
                verdict.recorded_fingerprint, verdict.recomputed_fingerprint
            );
        }

        Ok(verdict)
    }

    /// First entry under the reserved label wins; later ones are ignored
    /// without error.
    fn recorded_fingerprint(
        &self,
        reference: &AnchorReference,
        entries: &[MetadataEntry],
    ) -> Result<String> {
        let label = RESERVED_METADATA_LABEL.to_string();

        let entry = entries.iter().find(|e| e.label == label).ok_or_else(|| {
            ChainSealError::invalid_reference(
                reference.as_str(),
                format!("no metadata entry under label {}", label),
            )
        })?;

        AnchorMetadata::recorded_hash(&entry.json_metadata).ok_or_else(|| {
            ChainSealError::invalid_reference(
                reference.as_str(),
                "metadata entry carries no certificate hash",
            )
        })
    }
}
