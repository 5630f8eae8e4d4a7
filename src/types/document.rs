use serde::{Deserialize, Serialize};

use crate::error::{ChainSealError, Result};

/// Hex length of a SHA-256 digest
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Fixed-width lowercase-hex digest identifying a document's exact bytes.
///
/// Computed fresh at issue time and at every verify time; never persisted
/// by the core.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentFingerprint(String);

impl DocumentFingerprint {
    pub(crate) fn from_digest(digest: [u8; 32]) -> Self {
        Self(hex::encode(digest))
    }

    /// Parse a fingerprint from hex text, normalizing case
    pub fn parse(text: &str) -> Result<Self> {
        let normalized = text.trim().to_ascii_lowercase();
        if normalized.len() != FINGERPRINT_HEX_LEN
            || !normalized.bytes().all(|b| b.is_ascii_hexdigit())
        {
            return Err(ChainSealError::input(format!(
                "not a {}-character hex digest: {:?}",
                FINGERPRINT_HEX_LEN, text
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_hex(&self) -> &str {
        &self.0
    }

    /// Case-insensitive but otherwise exact comparison against a recorded
    /// value. No fuzzy or partial matching.
    pub fn matches(&self, recorded: &str) -> bool {
        self.0.eq_ignore_ascii_case(recorded)
    }
}

impl std::fmt::Display for DocumentFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_normalizes_case() {
        let upper = "D1C627FF5ECB73C384B004462AA74F8940918A1B39A704E35E46C2526C010640";
        let fp = DocumentFingerprint::parse(upper).unwrap();
        assert_eq!(fp.as_hex(), upper.to_ascii_lowercase());
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(DocumentFingerprint::parse("abc123").is_err());
        assert!(DocumentFingerprint::parse(&"g".repeat(64)).is_err());
        assert!(DocumentFingerprint::parse("").is_err());
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let fp = DocumentFingerprint::parse(&"ab".repeat(32)).unwrap();
        assert!(fp.matches(&"AB".repeat(32)));
        assert!(fp.matches(&"ab".repeat(32)));
        assert!(!fp.matches(&"ba".repeat(32)));
    }
}
