use serde::{Deserialize, Serialize};

/// Opaque transaction identifier returned by the ledger after a successful
/// submission. Unique per submission and the sole lookup key for
/// verification; produced once, never regenerated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnchorReference(String);

impl AnchorReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AnchorReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
