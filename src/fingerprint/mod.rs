use sha2::{Digest, Sha256};
use std::io::Read;

use crate::error::{ChainSealError, Result};
use crate::types::DocumentFingerprint;

/// Deterministic content fingerprinting over exact document bytes.
///
/// The digest is SHA-256 of the raw bytes as given - no re-encoding,
/// truncation, or text transformation first.
pub struct FingerprintEngine;

impl FingerprintEngine {
    /// Hash an in-memory byte sequence. Pure function, no I/O; the same
    /// bytes always produce the same digest.
    pub fn fingerprint(bytes: &[u8]) -> DocumentFingerprint {
        let digest = Sha256::digest(bytes);
        DocumentFingerprint::from_digest(digest.into())
    }

    /// Hash a streaming source in fixed-size chunks.
    ///
    /// Fails if the source cannot be read to the end; a partial buffer is
    /// never hashed.
    pub fn fingerprint_reader<R: Read>(mut source: R) -> Result<DocumentFingerprint> {
        let mut hasher = Sha256::new();
        let mut buf = [0u8; 8192];
        loop {
            let n = source
                .read(&mut buf)
                .map_err(|e| ChainSealError::read(e.to_string()))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(DocumentFingerprint::from_digest(hasher.finalize().into()))
    }
}
