//! Error taxonomy for the ledger clients.
//!
//! The split matters to the caller: the finality waiter retries
//! [`FetchError::NotFound`] and [`FetchError::Transient`] within its
//! budget, while everything else aborts the run immediately.

use std::fmt;

/// Submission failure. Fatal per run; never retried automatically since
/// re-submission can double-submit.
#[derive(Debug)]
pub enum SubmitError {
    /// The node or the CLI rejected the call (bad arguments, missing
    /// capability, insufficient gas).
    Rejected(String),

    /// Transport-level failure; the call may or may not have landed.
    Network(String),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::Rejected(msg) => write!(f, "submission rejected: {}", msg),
            SubmitError::Network(msg) => write!(f, "submission network error: {}", msg),
        }
    }
}

impl std::error::Error for SubmitError {}

/// Effects query failure.
#[derive(Debug)]
pub enum FetchError {
    /// The node does not know the transaction yet. Retryable: finality
    /// lags the submission acknowledgment.
    NotFound,

    /// Transport-level failure (timeout, connection reset, 5xx).
    /// Retryable.
    Transient(String),

    /// The node answered with a non-retryable error.
    Rpc(String),
}

impl FetchError {
    /// Whether the finality waiter may poll again after this error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::NotFound | FetchError::Transient(_))
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::NotFound => write!(f, "transaction not yet queryable"),
            FetchError::Transient(msg) => write!(f, "transient fetch error: {}", msg),
            FetchError::Rpc(msg) => write!(f, "rpc error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(FetchError::NotFound.is_retryable());
        assert!(FetchError::Transient("timeout".into()).is_retryable());
        assert!(!FetchError::Rpc("invalid params".into()).is_retryable());
    }
}
