use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::anchor::AnchorReference;
use super::document::DocumentFingerprint;

/// Outcome of comparing an anchored fingerprint against a freshly
/// recomputed one. A mismatch is a valid negative result, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationVerdict {
    pub reference: AnchorReference,
    pub valid: bool,
    /// The fingerprint as it was recorded on the ledger, verbatim
    pub recorded_fingerprint: String,
    pub recomputed_fingerprint: DocumentFingerprint,
    pub timestamp: DateTime<Utc>,
}

impl VerificationVerdict {
    /// Valid iff the two fingerprints are exactly equal after case
    /// normalization.
    pub fn new(
        reference: AnchorReference,
        recorded: String,
        recomputed: DocumentFingerprint,
    ) -> Self {
        let valid = recomputed.matches(&recorded);
        Self {
            reference,
            valid,
            recorded_fingerprint: recorded,
            recomputed_fingerprint: recomputed,
            timestamp: Utc::now(),
        }
    }
}
