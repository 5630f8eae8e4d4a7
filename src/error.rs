use thiserror::Error;

/// All possible errors in the ChainSeal system
#[derive(Debug, Error)]
pub enum ChainSealError {
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Document read failed: {0}")]
    Read(String),

    #[error("No wallet connected")]
    NoWalletConnected,

    #[error("Transaction build failed: {0}")]
    BuildFailure(String),

    #[error("Signing rejected: {0}")]
    SigningRejected(String),

    #[error("Transaction submission failed: {0}")]
    SubmissionFailure(String),

    #[error("Invalid anchor reference {reference}: {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("Ledger query service error: {0}")]
    LedgerService(String),

    #[error("Certificate render failed: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ChainSealError>;

impl ChainSealError {
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    pub fn build_failure(msg: impl Into<String>) -> Self {
        Self::BuildFailure(msg.into())
    }

    pub fn signing_rejected(msg: impl Into<String>) -> Self {
        Self::SigningRejected(msg.into())
    }

    pub fn submission_failure(msg: impl Into<String>) -> Self {
        Self::SubmissionFailure(msg.into())
    }

    pub fn invalid_reference(reference: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidReference {
            reference: reference.into(),
            reason: reason.into(),
        }
    }

    pub fn ledger_service(msg: impl Into<String>) -> Self {
        Self::LedgerService(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True when the failure is the holder declining to sign, as opposed
    /// to an infrastructure fault. Callers must never auto-retry these.
    pub fn is_user_declined(&self) -> bool {
        matches!(self, Self::SigningRejected(_))
    }
}
