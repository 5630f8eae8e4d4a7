use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::types::DocumentFingerprint;

/// Application-reserved numeric label the certificate payload is keyed
/// under in the transaction metadata map. Fixed: changing it orphans every
/// previously anchored fingerprint.
pub const RESERVED_METADATA_LABEL: u64 = 721;

/// Payload anchored on-chain under the reserved label.
///
/// Wire form is bit-exact `{"certificate":{"hash":"<lowercase-hex>"}}` and
/// must round-trip unchanged through the ledger query service. Immutable
/// once submitted; created once per issue operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorMetadata {
    pub certificate: CertificateClaim,
}

/// Inner claim carrying the document fingerprint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateClaim {
    pub hash: String,
}

impl AnchorMetadata {
    pub fn new(fingerprint: &DocumentFingerprint) -> Self {
        Self {
            certificate: CertificateClaim {
                hash: fingerprint.as_hex().to_string(),
            },
        }
    }

    /// Wire form attached under the reserved label
    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Extract the recorded hash from a queried metadata value.
    ///
    /// Reads only `certificate.hash`; no other keys are read. Returns None
    /// when the value does not carry that shape.
    pub fn recorded_hash(value: &Value) -> Option<String> {
        value
            .get("certificate")?
            .get("hash")?
            .as_str()
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::FingerprintEngine;
    use serde_json::json;

    #[test]
    fn test_wire_schema_is_exact() {
        let fp = FingerprintEngine::fingerprint(b"hello-doc");
        let value = AnchorMetadata::new(&fp).to_value().unwrap();
        assert_eq!(
            value,
            json!({
                "certificate": {
                    "hash": "d1c627ff5ecb73c384b004462aa74f8940918a1b39a704e35e46c2526c010640"
                }
            })
        );
    }

    #[test]
    fn test_recorded_hash_ignores_extra_keys() {
        let value = json!({
            "certificate": { "hash": "cafe", "issuer": "somebody" },
            "version": 2
        });
        assert_eq!(AnchorMetadata::recorded_hash(&value), Some("cafe".to_string()));
    }

    #[test]
    fn test_recorded_hash_absent_on_wrong_shape() {
        assert_eq!(AnchorMetadata::recorded_hash(&json!({})), None);
        assert_eq!(
            AnchorMetadata::recorded_hash(&json!({"certificate": {}})),
            None
        );
        assert_eq!(
            AnchorMetadata::recorded_hash(&json!({"certificate": {"hash": 42}})),
            None
        );
    }
}
