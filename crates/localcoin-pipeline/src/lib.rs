//! The reusable operator-script pipeline.
//!
//! Every operator action is one run of the same sequence:
//!
//! ```text
//! build -> submit -> await finality -> fetch effects -> discover objects -> persist ids
//! ```
//!
//! The run is sequential with exactly one outstanding network call at any
//! instant; the finality waiter is the only suspension point. Every error
//! aborts the run. There is no automatic cross-run retry: a timed-out run
//! surfaces its digest so the operator can investigate before deciding
//! whether to resubmit (resubmission creates an independent transaction).

pub mod discover;
pub mod error;
pub mod run;
pub mod waiter;

pub use discover::{find_created, find_published, DiscoveryError};
pub use error::PipelineError;
pub use run::{persist_created, Pipeline, TxOutcome};
pub use waiter::{Finality, FinalityWaiter, PollConfig};
