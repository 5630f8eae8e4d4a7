use tracing::{debug, info};

use crate::error::{ChainSealError, Result};
use crate::types::{AnchorReference, DocumentFingerprint};
use crate::wallet::{Address, TransactionMetadata, TxOutput, WalletCapability};

use super::metadata::{AnchorMetadata, RESERVED_METADATA_LABEL};

/// Receipt of a successful anchoring submission
#[derive(Debug, Clone)]
pub struct AnchorReceipt {
    pub reference: AnchorReference,
    /// Receiving address the transfer went back to
    pub submitter: Address,
}

/// Shapes the anchoring transaction and delegates build, signing and
/// broadcast to the wallet capability.
pub struct AnchorBuilder {
    output_lovelace: u64,
}

impl AnchorBuilder {
    pub fn new(output_lovelace: u64) -> Self {
        Self { output_lovelace }
    }

    /// Anchor a fingerprint on the ledger.
    ///
    /// Pipeline:
    /// 1. Resolve the submitter's own receiving address
    /// 2. Shape a minimum-value transfer back to that same address
    /// 3. Attach the certificate metadata under the reserved label
    /// 4. Delegate build (fee/input selection), signing and broadcast
    /// 5. Return the resulting ledger reference
    ///
    /// No step is retried here. A rejected signature must never be
    /// re-requested automatically, and a failed broadcast may only be
    /// retried by the caller with a fresh build - resubmitting the same
    /// signed payload risks duplicate-spend ambiguity.
    pub async fn anchor(
        &self,
        fingerprint: &DocumentFingerprint,
        wallet: Option<&dyn WalletCapability>,
    ) -> Result<AnchorReceipt> {
        let wallet = wallet.ok_or(ChainSealError::NoWalletConnected)?;

        info!("Anchoring fingerprint {}", fingerprint);

        // Step 1
        let submitter = wallet.receiving_address().await?;
        debug!("Submitter address resolved");

        // Step 2: the ledger mandates that every transaction move value,
        // so send the minimum back to the submitter
        let outputs = [TxOutput {
            address: submitter.clone(),
            lovelace: self.output_lovelace,
        }];

        // Step 3
        let mut metadata = TransactionMetadata::new();
        metadata.insert(
            RESERVED_METADATA_LABEL,
            AnchorMetadata::new(fingerprint).to_value()?,
        );

        // Step 4
        let unsigned = wallet.build_unsigned(&outputs, &metadata).await?;
        debug!("Transaction built, requesting signature");
        let signed = wallet.sign(&unsigned).await?;
        let reference = wallet.submit(&signed).await?;

        info!("✓ Fingerprint anchored under {}", reference);

        // Step 5
        Ok(AnchorReceipt {
            reference,
            submitter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::FingerprintEngine;
    use crate::wallet::testing::MockWallet;
    use serde_json::json;

    fn builder() -> AnchorBuilder {
        AnchorBuilder::new(1_000_000)
    }

    #[tokio::test]
    async fn test_anchor_transfers_minimum_back_to_submitter() {
        let wallet = MockWallet::new("abc123");
        let fp = FingerprintEngine::fingerprint(b"hello-doc");

        let receipt = builder().anchor(&fp, Some(&wallet)).await.unwrap();

        assert_eq!(receipt.reference.as_str(), "abc123");
        assert_eq!(receipt.submitter, wallet.address);

        let (outputs, _) = wallet.built.lock().unwrap().clone().unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].address, wallet.address);
        assert_eq!(outputs[0].lovelace, 1_000_000);
    }

    #[tokio::test]
    async fn test_anchor_attaches_metadata_under_reserved_label() {
        let wallet = MockWallet::new("abc123");
        let fp = FingerprintEngine::fingerprint(b"hello-doc");

        builder().anchor(&fp, Some(&wallet)).await.unwrap();

        let metadata = wallet.built_metadata().unwrap();
        assert_eq!(metadata.len(), 1);
        assert_eq!(
            metadata.get(RESERVED_METADATA_LABEL),
            Some(&json!({"certificate": {"hash": fp.as_hex()}}))
        );
    }

    #[tokio::test]
    async fn test_no_wallet_fails_before_building() {
        let fp = FingerprintEngine::fingerprint(b"hello-doc");
        let result = builder().anchor(&fp, None).await;
        assert!(matches!(result, Err(ChainSealError::NoWalletConnected)));
    }

    #[tokio::test]
    async fn test_build_failure_propagates_verbatim() {
        let mut wallet = MockWallet::new("abc123");
        wallet.fail_build = true;
        let fp = FingerprintEngine::fingerprint(b"hello-doc");

        let result = builder().anchor(&fp, Some(&wallet)).await;
        assert!(matches!(result, Err(ChainSealError::BuildFailure(_))));
        assert_eq!(wallet.calls(), vec!["receiving_address", "build_unsigned"]);
    }

    #[tokio::test]
    async fn test_signing_rejection_is_never_retried() {
        let mut wallet = MockWallet::new("abc123");
        wallet.reject_signing = true;
        let fp = FingerprintEngine::fingerprint(b"hello-doc");

        let result = builder().anchor(&fp, Some(&wallet)).await;
        assert!(matches!(result, Err(ChainSealError::SigningRejected(_))));
        // one signing request, no broadcast
        assert_eq!(
            wallet.calls(),
            vec!["receiving_address", "build_unsigned", "sign"]
        );
    }

    #[tokio::test]
    async fn test_submission_failure_propagates() {
        let mut wallet = MockWallet::new("abc123");
        wallet.fail_submit = true;
        let fp = FingerprintEngine::fingerprint(b"hello-doc");

        let result = builder().anchor(&fp, Some(&wallet)).await;
        assert!(matches!(result, Err(ChainSealError::SubmissionFailure(_))));
        assert_eq!(
            wallet.calls(),
            vec!["receiving_address", "build_unsigned", "sign", "submit"]
        );
    }
}
