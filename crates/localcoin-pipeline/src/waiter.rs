//! Bounded polling for transaction finality.
//!
//! A submission acknowledgment does not guarantee the effects are
//! queryable yet, so the waiter polls the effects fetcher with
//! exponential backoff until the changes arrive or the budget runs out:
//!
//! ```text
//! Submitted -> Polling -> { Finalized | TimedOut }
//! ```
//!
//! Retryable fetch outcomes (`NotFound`, `Transient`) keep the loop
//! going; anything else propagates immediately as fatal.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use localcoin_client::{EffectsFetcher, FetchError};
use localcoin_types::{env_duration_secs_or, ObjectChange, TransactionDigest};

/// Polling schedule: start at `initial`, double up to `ceiling`, give up
/// after `budget` total elapsed time.
#[derive(Debug, Copy, Clone)]
pub struct PollConfig {
    pub initial: Duration,
    pub ceiling: Duration,
    pub budget: Duration,
}

impl PollConfig {
    pub fn new(initial: Duration, ceiling: Duration, budget: Duration) -> Self {
        Self {
            initial,
            ceiling,
            budget,
        }
    }

    /// Schedule with env overrides applied:
    /// `LOCALCOIN_FINALITY_BUDGET_SECS`, `LOCALCOIN_POLL_INITIAL_MS`,
    /// `LOCALCOIN_POLL_CEILING_MS`.
    pub fn from_env() -> Self {
        Self {
            initial: Duration::from_millis(localcoin_types::env_var_or(
                "LOCALCOIN_POLL_INITIAL_MS",
                500,
            )),
            ceiling: Duration::from_millis(localcoin_types::env_var_or(
                "LOCALCOIN_POLL_CEILING_MS",
                5_000,
            )),
            budget: env_duration_secs_or("LOCALCOIN_FINALITY_BUDGET_SECS", 60),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial: Duration::from_millis(500),
            ceiling: Duration::from_secs(5),
            budget: Duration::from_secs(60),
        }
    }
}

/// Terminal state of one wait.
#[derive(Debug)]
pub enum Finality {
    /// Effects are durably queryable; the change records are in hand.
    Ready(Vec<ObjectChange>),

    /// Budget elapsed without queryable effects.
    TimedOut,
}

/// Polls an [`EffectsFetcher`] until finality or budget exhaustion.
#[derive(Debug, Copy, Clone, Default)]
pub struct FinalityWaiter {
    config: PollConfig,
}

impl FinalityWaiter {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Wait for the transaction's effects, polling within the budget.
    ///
    /// The first poll is immediate; sleeps between polls never extend the
    /// total wait past the budget by more than one interval.
    pub async fn wait<F: EffectsFetcher + ?Sized>(
        &self,
        fetcher: &F,
        digest: &TransactionDigest,
    ) -> Result<Finality, FetchError> {
        let start = Instant::now();
        let mut interval = self.config.initial;
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match fetcher.object_changes(digest).await {
                Ok(changes) => {
                    debug!(%digest, attempt, elapsed = ?start.elapsed(), "effects queryable");
                    return Ok(Finality::Ready(changes));
                }
                Err(e) if e.is_retryable() => {
                    debug!(%digest, attempt, error = %e, "effects not ready");
                }
                Err(e) => return Err(e),
            }

            let elapsed = start.elapsed();
            if elapsed >= self.config.budget {
                warn!(%digest, attempt, ?elapsed, "finality budget exhausted");
                return Ok(Finality::TimedOut);
            }

            let remaining = self.config.budget - elapsed;
            tokio::time::sleep(interval.min(remaining)).await;
            interval = (interval * 2).min(self.config.ceiling);
        }
    }
}
