//! Shared types for the localcoin-ops workspace.
//!
//! This crate provides the foundational value types used across the
//! workspace crates:
//!
//! - [`call`]: Move call descriptors ([`MoveCall`](call::MoveCall), [`CallArg`](call::CallArg))
//! - [`changes`]: transaction effects ([`ObjectChange`](changes::ObjectChange), [`ChangeKind`](changes::ChangeKind))
//! - [`signature`]: on-chain type identity ([`TypeSignature`](signature::TypeSignature))
//! - [`env_utils`]: environment variable parsing helpers

pub mod call;
pub mod changes;
pub mod env_utils;
pub mod signature;

// Re-export commonly used types at crate root
pub use call::{BuildError, CallArg, MoveCall, TransactionDigest};
pub use changes::{ChangeKind, ObjectChange};
pub use env_utils::{env_duration_secs_or, env_var, env_var_or};
pub use signature::{normalize_address, TypeSignature};
