//! Pipeline error taxonomy.
//!
//! Every variant is fatal for the current run. Retry decisions across
//! runs belong to the operator, not to this core.

use std::fmt;
use std::time::Duration;

use localcoin_client::{FetchError, SubmitError};
use localcoin_env::EnvError;
use localcoin_types::{BuildError, TransactionDigest};

use crate::discover::DiscoveryError;

#[derive(Debug)]
pub enum PipelineError {
    /// Malformed call descriptor; nothing was submitted.
    Build(BuildError),

    /// Submission failed. Not retried automatically: the call may have
    /// landed, and resubmitting can double-submit.
    Submission(SubmitError),

    /// The polling budget elapsed before effects became queryable. The
    /// digest is carried so the operator can investigate out-of-band.
    FinalityTimeout {
        digest: TransactionDigest,
        budget: Duration,
    },

    /// A fetch failed with a non-retryable error.
    Fetch(FetchError),

    /// The expected object type was not among the created records.
    Discovery(DiscoveryError),

    /// The config store rejected or failed the write.
    Persist(EnvError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Build(e) => write!(f, "build failed: {}", e),
            PipelineError::Submission(e) => write!(f, "{}", e),
            PipelineError::FinalityTimeout { digest, budget } => write!(
                f,
                "transaction {} not finalized within {:?}; inspect it on-chain before resubmitting",
                digest, budget
            ),
            PipelineError::Fetch(e) => write!(f, "effects fetch failed: {}", e),
            PipelineError::Discovery(e) => write!(f, "{}", e),
            PipelineError::Persist(e) => write!(f, "persist failed: {}", e),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Build(e) => Some(e),
            PipelineError::Submission(e) => Some(e),
            PipelineError::Fetch(e) => Some(e),
            PipelineError::Discovery(e) => Some(e),
            PipelineError::Persist(e) => Some(e),
            PipelineError::FinalityTimeout { .. } => None,
        }
    }
}

impl From<BuildError> for PipelineError {
    fn from(e: BuildError) -> Self {
        PipelineError::Build(e)
    }
}

impl From<SubmitError> for PipelineError {
    fn from(e: SubmitError) -> Self {
        PipelineError::Submission(e)
    }
}

impl From<FetchError> for PipelineError {
    fn from(e: FetchError) -> Self {
        PipelineError::Fetch(e)
    }
}

impl From<DiscoveryError> for PipelineError {
    fn from(e: DiscoveryError) -> Self {
        PipelineError::Discovery(e)
    }
}

impl From<EnvError> for PipelineError {
    fn from(e: EnvError) -> Self {
        PipelineError::Persist(e)
    }
}
