pub mod anchor;
pub mod document;
pub mod verdict;

// Re-export commonly used types
pub use anchor::AnchorReference;
pub use document::DocumentFingerprint;
pub use verdict::VerificationVerdict;
