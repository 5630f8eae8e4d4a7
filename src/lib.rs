pub mod anchor;
pub mod api;
pub mod certificate;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod ledger;
pub mod service;
pub mod types;
pub mod verification;
pub mod wallet;

// Re-exports
pub use anchor::{AnchorBuilder, AnchorMetadata, AnchorReceipt, RESERVED_METADATA_LABEL};
pub use api::{create_router, ApiState};
pub use certificate::{CertificateData, CertificateIssuer};
pub use config::{Config, Network};
pub use error::{ChainSealError, Result};
pub use fingerprint::FingerprintEngine;
pub use ledger::{BlockfrostClient, LedgerQueryService, MetadataEntry};
pub use service::{IssueOutcome, IssueRequest, NotaryService};
pub use types::{AnchorReference, DocumentFingerprint, VerificationVerdict};
pub use verification::VerificationEngine;
pub use wallet::{Address, SignedTx, TransactionMetadata, TxOutput, UnsignedTx, WalletCapability};
