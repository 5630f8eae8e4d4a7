use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use crate::anchor::AnchorBuilder;
use crate::certificate::{CertificateData, CertificateIssuer};
use crate::config::Config;
use crate::error::{ChainSealError, Result};
use crate::fingerprint::FingerprintEngine;
use crate::ledger::{BlockfrostClient, LedgerQueryService};
use crate::types::{AnchorReference, DocumentFingerprint, VerificationVerdict};
use crate::verification::VerificationEngine;
use crate::wallet::WalletCapability;

/// Issue request: document bytes plus the fields bound into the certificate
#[derive(Debug, Clone)]
pub struct IssueRequest {
    pub document: Vec<u8>,
    pub title: String,
    pub document_type: String,
    pub original_filename: String,
}

/// Outcome of a successful issue operation
pub struct IssueOutcome {
    pub fingerprint: DocumentFingerprint,
    pub anchor_reference: AnchorReference,
    pub certificate_pdf: Vec<u8>,
}

/// Wires the fingerprint, anchoring, certificate and verification
/// components together. Stateless per operation: each issue or verify call
/// is an independent unit of work.
pub struct NotaryService {
    config: Arc<Config>,
    anchor_builder: AnchorBuilder,
    issuer: CertificateIssuer,
    engine: VerificationEngine,
}

impl NotaryService {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let ledger: Arc<dyn LedgerQueryService> = Arc::new(BlockfrostClient::new(&config.ledger)?);
        Self::with_ledger(config, ledger)
    }

    /// Construct with an injected ledger query service
    pub fn with_ledger(config: Config, ledger: Arc<dyn LedgerQueryService>) -> Result<Self> {
        config.validate()?;

        let anchor_builder = AnchorBuilder::new(config.anchor.output_lovelace);
        let issuer = CertificateIssuer::from_config(&config.certificate);
        let engine = VerificationEngine::new(ledger);

        Ok(Self {
            config: Arc::new(config),
            anchor_builder,
            issuer,
            engine,
        })
    }

    /// Issue path: fingerprint, anchor, certificate.
    ///
    /// Input validation rejects pre-hash. The certificate is rendered only
    /// once submission has returned a reference; on failure nothing is
    /// persisted and the caller keeps its input for correction.
    pub async fn issue(
        &self,
        request: IssueRequest,
        wallet: Option<&dyn WalletCapability>,
    ) -> Result<IssueOutcome> {
        Self::validate_request(&request)?;

        let fingerprint = FingerprintEngine::fingerprint(&request.document);
        debug!("Document fingerprint: {}", fingerprint);

        let receipt = self.anchor_builder.anchor(&fingerprint, wallet).await?;

        let data = CertificateData {
            title: request.title,
            document_type: request.document_type,
            original_filename: request.original_filename,
            fingerprint: fingerprint.clone(),
            anchor_reference: receipt.reference.clone(),
            submitter_address_fingerprint: FingerprintEngine::fingerprint(
                receipt.submitter.as_str().as_bytes(),
            )
            .as_hex()
            .to_string(),
            timestamp: Utc::now(),
        };
        let certificate_pdf = self.issuer.issue(&data)?;

        info!(
            "✓ Issued certificate \"{}\" under {}",
            data.title, receipt.reference
        );

        Ok(IssueOutcome {
            fingerprint,
            anchor_reference: receipt.reference,
            certificate_pdf,
        })
    }

    /// Verify path: recompute and ledger lookup, verdict out.
    pub async fn verify(
        &self,
        document: Vec<u8>,
        reference: &AnchorReference,
    ) -> Result<VerificationVerdict> {
        if document.is_empty() {
            return Err(ChainSealError::input("candidate document is empty"));
        }
        self.engine.verify(document, reference).await
    }

    pub fn network(&self) -> crate::config::Network {
        self.config.network
    }

    fn validate_request(request: &IssueRequest) -> Result<()> {
        if request.document.is_empty() {
            return Err(ChainSealError::input("document is empty"));
        }
        if request.title.trim().is_empty() {
            return Err(ChainSealError::input("title is required"));
        }
        if request.document_type.trim().is_empty() {
            return Err(ChainSealError::input("document type is required"));
        }
        if request.original_filename.trim().is_empty() {
            return Err(ChainSealError::input("original filename is required"));
        }
        Ok(())
    }
}
