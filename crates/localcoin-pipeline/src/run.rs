//! One-shot pipeline orchestration.

use tracing::info;

use localcoin_client::{EffectsFetcher, SubmissionClient};
use localcoin_env::EnvFile;
use localcoin_types::{MoveCall, ObjectChange, TransactionDigest, TypeSignature};

use crate::discover::find_created;
use crate::error::PipelineError;
use crate::waiter::{Finality, FinalityWaiter};

/// Result of a finalized transaction: the digest plus its change records.
#[derive(Debug)]
pub struct TxOutcome {
    pub digest: TransactionDigest,
    pub changes: Vec<ObjectChange>,
}

/// Binds the collaborators of one run. Each operator script builds one
/// `Pipeline` and executes exactly one call through it.
pub struct Pipeline<'a, S: SubmissionClient + ?Sized, F: EffectsFetcher + ?Sized> {
    submitter: &'a S,
    fetcher: &'a F,
    waiter: FinalityWaiter,
}

impl<'a, S: SubmissionClient + ?Sized, F: EffectsFetcher + ?Sized> Pipeline<'a, S, F> {
    pub fn new(submitter: &'a S, fetcher: &'a F, waiter: FinalityWaiter) -> Self {
        Self {
            submitter,
            fetcher,
            waiter,
        }
    }

    /// Submit the call and wait for its effects.
    pub async fn execute(&self, call: MoveCall) -> Result<TxOutcome, PipelineError> {
        let target = call.target();
        let digest = self.submitter.submit(&call).await?;
        info!(%digest, %target, "awaiting finality");

        match self.waiter.wait(self.fetcher, &digest).await? {
            Finality::Ready(changes) => {
                info!(%digest, changes = changes.len(), "transaction finalized");
                Ok(TxOutcome { digest, changes })
            }
            Finality::TimedOut => Err(PipelineError::FinalityTimeout {
                digest,
                budget: self.waiter.config().budget,
            }),
        }
    }

    /// Wait for an already-submitted transaction (package publishes go
    /// through the CLI's publish path rather than [`execute`](Self::execute)).
    pub async fn await_submitted(
        &self,
        digest: TransactionDigest,
    ) -> Result<TxOutcome, PipelineError> {
        match self.waiter.wait(self.fetcher, &digest).await? {
            Finality::Ready(changes) => Ok(TxOutcome { digest, changes }),
            Finality::TimedOut => Err(PipelineError::FinalityTimeout {
                digest,
                budget: self.waiter.config().budget,
            }),
        }
    }
}

/// Discover the created object for each `(key, signature)` binding and
/// upsert it into the store, then persist the store once, atomically.
///
/// Fails before writing anything if any binding is undiscoverable or any
/// key is absent, leaving the on-disk store untouched.
pub fn persist_created(
    env: &mut EnvFile,
    outcome: &TxOutcome,
    bindings: &[(&str, TypeSignature)],
) -> Result<(), PipelineError> {
    for (key, signature) in bindings {
        let object_id = find_created(&outcome.changes, signature)?;
        env.upsert(key, &object_id)?;
        info!(key, %object_id, "discovered object persisted");
    }
    env.save()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use localcoin_client::{FetchError, SubmitError};
    use localcoin_types::CallArg;

    struct FakeLedger {
        changes: Vec<ObjectChange>,
    }

    #[async_trait]
    impl SubmissionClient for FakeLedger {
        async fn submit(&self, _call: &MoveCall) -> Result<TransactionDigest, SubmitError> {
            Ok(TransactionDigest::new("9V3x"))
        }
    }

    #[async_trait]
    impl EffectsFetcher for FakeLedger {
        async fn object_changes(
            &self,
            _digest: &TransactionDigest,
        ) -> Result<Vec<ObjectChange>, FetchError> {
            Ok(self.changes.clone())
        }
    }

    fn sample_call() -> MoveCall {
        MoveCall::new(
            "pkg::token::mint",
            vec![CallArg::pure_u64(1)],
            vec![],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_execute_returns_outcome() {
        let ledger = FakeLedger {
            changes: vec![ObjectChange::created("pkg::token::Token<pkg::x::X>", "0xAA")],
        };
        let pipeline = Pipeline::new(&ledger, &ledger, FinalityWaiter::default());

        let outcome = pipeline.execute(sample_call()).await.unwrap();
        assert_eq!(outcome.digest.as_str(), "9V3x");
        assert_eq!(outcome.changes.len(), 1);
    }

    #[tokio::test]
    async fn test_persist_failure_leaves_store_untouched() {
        let ledger = FakeLedger {
            changes: vec![ObjectChange::created("pkg::token::Token<pkg::x::X>", "0xAA")],
        };
        let pipeline = Pipeline::new(&ledger, &ledger, FinalityWaiter::default());
        let outcome = pipeline.execute(sample_call()).await.unwrap();

        let fixture = "TOKEN_ID='old'\n";
        let mut env = EnvFile::from_contents("/nonexistent/.env", fixture);

        // Discovery failure: stale package id in the expected signature.
        let stale = TypeSignature::new("0xstale", "token", "Token");
        let err = persist_created(&mut env, &outcome, &[("TOKEN_ID", stale)]).unwrap_err();
        assert!(matches!(err, PipelineError::Discovery(_)));
        assert_eq!(env.contents(), fixture);

        // Missing key: correct signature, no placeholder line.
        let sig = TypeSignature::new("pkg", "token", "Token")
            .with_type_param(TypeSignature::new("pkg", "x", "X"));
        let err = persist_created(&mut env, &outcome, &[("MISSING_KEY", sig)]).unwrap_err();
        assert!(matches!(err, PipelineError::Persist(_)));
        assert_eq!(env.contents(), fixture);
    }
}
