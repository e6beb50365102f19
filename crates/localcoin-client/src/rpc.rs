//! JSON-RPC effects fetcher for the Sui fullnode.
//!
//! Queries `sui_getTransactionBlock` with `showObjectChanges` and maps the
//! response into [`ObjectChange`] records. A digest the node does not know
//! yet maps to [`FetchError::NotFound`]; transport failures map to
//! [`FetchError::Transient`]; both are retried by the finality waiter.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use localcoin_types::{ObjectChange, TransactionDigest};

use crate::errors::FetchError;
use crate::EffectsFetcher;

/// JSON-RPC client for a Sui fullnode.
#[derive(Clone)]
pub struct FullnodeClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl FullnodeClient {
    /// Default request timeout in seconds (can be overridden by env).
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    fn default_timeouts() -> (Duration, Duration) {
        let timeout_secs = localcoin_types::env_var_or(
            "LOCALCOIN_RPC_TIMEOUT_SECS",
            Self::DEFAULT_TIMEOUT_SECS,
        );
        let connect_secs = localcoin_types::env_var_or(
            "LOCALCOIN_RPC_CONNECT_TIMEOUT_SECS",
            Self::DEFAULT_CONNECT_TIMEOUT_SECS,
        );
        (
            Duration::from_secs(timeout_secs),
            Duration::from_secs(connect_secs),
        )
    }

    /// Create a client with a custom endpoint.
    pub fn new(endpoint: &str) -> Self {
        let (timeout, connect_timeout) = Self::default_timeouts();
        Self::with_timeouts(endpoint, timeout, connect_timeout)
    }

    /// Create a client for the endpoint resolved from the environment.
    pub fn from_env() -> Self {
        Self::new(&crate::network::resolve_fullnode_endpoint())
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(endpoint: &str, timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .timeout_connect(connect_timeout)
                .build(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Blocking fetch of a transaction's object changes.
    pub fn get_object_changes(
        &self,
        digest: &TransactionDigest,
    ) -> Result<Vec<ObjectChange>, FetchError> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "sui_getTransactionBlock",
            "params": [
                digest.as_str(),
                {
                    "showEffects": true,
                    "showInput": false,
                    "showEvents": false,
                    "showObjectChanges": true,
                    "showBalanceChanges": false
                }
            ]
        });

        let response: Value = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(&body)
            .map_err(|e| match e {
                // The node answered; whether that is retryable depends on
                // the JSON-RPC payload, but status-level failures at this
                // layer are gateway hiccups.
                ureq::Error::Status(code, _) => {
                    FetchError::Transient(format!("http status {}", code))
                }
                ureq::Error::Transport(t) => FetchError::Transient(t.to_string()),
            })?
            .into_json()
            .map_err(|e| FetchError::Transient(format!("malformed rpc response: {}", e)))?;

        parse_transaction_response(&response)
    }
}

#[async_trait]
impl EffectsFetcher for FullnodeClient {
    async fn object_changes(
        &self,
        digest: &TransactionDigest,
    ) -> Result<Vec<ObjectChange>, FetchError> {
        let client = self.clone();
        let digest = digest.clone();
        tokio::task::spawn_blocking(move || client.get_object_changes(&digest))
            .await
            .map_err(|e| FetchError::Transient(format!("fetch task failed: {}", e)))?
    }
}

/// Map a `sui_getTransactionBlock` response body to object changes.
///
/// Kept as a pure function so the error mapping is testable without a
/// live node.
pub fn parse_transaction_response(response: &Value) -> Result<Vec<ObjectChange>, FetchError> {
    if let Some(error) = response.get("error") {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("unknown rpc error");
        // The fullnode reports an unknown digest as an error object, not
        // an empty result. That is the normal state between submission
        // acknowledgment and finality.
        if message.contains("Could not find") {
            return Err(FetchError::NotFound);
        }
        return Err(FetchError::Rpc(message.to_string()));
    }

    let Some(result) = response.get("result") else {
        return Err(FetchError::Transient("rpc response without result".into()));
    };

    let Some(changes) = result.get("objectChanges") else {
        // Acknowledged but effects not yet queryable.
        debug!("transaction found but objectChanges not yet present");
        return Err(FetchError::NotFound);
    };

    serde_json::from_value(changes.clone())
        .map_err(|e| FetchError::Rpc(format!("unparseable objectChanges: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use localcoin_types::ChangeKind;

    #[test]
    fn test_parse_object_changes() {
        let response = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": {
                "digest": "9V3xKM",
                "objectChanges": [
                    {
                        "type": "published",
                        "packageId": "0x00ab",
                        "version": "1",
                        "digest": "8Zz",
                        "modules": ["local_coin", "registry"]
                    },
                    {
                        "type": "created",
                        "sender": "0xe65f",
                        "objectType": "0xab::registry::SuperAdmin",
                        "objectId": "0x51",
                        "version": "2",
                        "digest": "7Yy"
                    },
                    {
                        "type": "mutated",
                        "objectType": "0x2::coin::Coin<0x2::sui::SUI>",
                        "objectId": "0x52"
                    }
                ]
            }
        });

        let changes = parse_transaction_response(&response).unwrap();
        assert_eq!(changes.len(), 3);
        assert_eq!(changes[0].kind, ChangeKind::Published);
        assert_eq!(changes[0].package_id.as_deref(), Some("0x00ab"));
        assert_eq!(changes[1].kind, ChangeKind::Created);
        assert_eq!(changes[1].object_id.as_deref(), Some("0x51"));
    }

    #[test]
    fn test_unknown_digest_is_not_found() {
        let response = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {
                "code": -32602,
                "message": "Could not find the referenced transaction [TransactionDigest(9V3xKM)]."
            }
        });
        let err = parse_transaction_response(&response).unwrap_err();
        assert!(matches!(err, FetchError::NotFound));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_other_rpc_error_is_fatal() {
        let response = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": -32602, "message": "Invalid params" }
        });
        let err = parse_transaction_response(&response).unwrap_err();
        assert!(matches!(err, FetchError::Rpc(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_result_without_changes_is_retryable() {
        let response = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": { "digest": "9V3xKM" }
        });
        let err = parse_transaction_response(&response).unwrap_err();
        assert!(matches!(err, FetchError::NotFound));
    }
}
