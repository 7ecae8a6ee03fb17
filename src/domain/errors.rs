use thiserror::Error;

/// Error kinds surfaced by the ledger.
///
/// All variants are recoverable by the caller. Validation, not-found and
/// format failures are raised before any mutation, so they leave the store
/// untouched. A storage failure is reported after the in-memory mutation has
/// committed; the in-memory state remains authoritative and usable.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid backup format: {0}")]
    Format(String),

    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl LedgerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound(_))
    }
}

/// Convenience `Result` type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
