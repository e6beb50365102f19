//! Ledger clients for localcoin-ops.
//!
//! The pipeline core treats the chain as an opaque remote service behind
//! two seams:
//!
//! - [`SubmissionClient`]: signs and submits one call, returning the
//!   transaction digest. Submission is not idempotent; a resubmission
//!   after a timeout produces a new, independent transaction, so nothing
//!   here retries a submit automatically.
//! - [`EffectsFetcher`]: given a digest, returns the object changes the
//!   transaction produced, or reports that they are not queryable yet.
//!
//! Concrete implementations:
//!
//! - [`rpc::FullnodeClient`]: JSON-RPC effects fetcher over `ureq`
//! - [`cli::SuiCliSubmitter`]: submission via the `sui` client binary,
//!   which owns key material and signing

pub mod cli;
pub mod errors;
pub mod network;
pub mod rpc;

pub use cli::SuiCliSubmitter;
pub use errors::{FetchError, SubmitError};
pub use rpc::FullnodeClient;

use async_trait::async_trait;
use localcoin_types::{MoveCall, ObjectChange, TransactionDigest};

/// Signs and submits a single call.
#[async_trait]
pub trait SubmissionClient: Send + Sync {
    async fn submit(&self, call: &MoveCall) -> Result<TransactionDigest, SubmitError>;
}

/// Fetches the state-change records of a submitted transaction.
#[async_trait]
pub trait EffectsFetcher: Send + Sync {
    async fn object_changes(
        &self,
        digest: &TransactionDigest,
    ) -> Result<Vec<ObjectChange>, FetchError>;
}
