//! Submission via the `sui` client binary.
//!
//! Key material and signing stay with the operator's Sui keystore; this
//! module only assembles and runs the `sui client` invocation and reads
//! the digest back from its JSON output. Role selection is a keystore
//! address switch before the call.

use async_trait::async_trait;
use serde_json::Value;
use std::process::Command;
use tracing::{debug, info};

use localcoin_types::{CallArg, MoveCall, TransactionDigest};

use crate::errors::SubmitError;
use crate::SubmissionClient;

/// Default gas budget in MIST, matching the deployment scripts.
pub const DEFAULT_GAS_BUDGET: u64 = 100_000_000;

/// Submits calls through the `sui` CLI.
#[derive(Debug, Clone)]
pub struct SuiCliSubmitter {
    sui_bin: String,
    sender: Option<String>,
    gas_budget: u64,
}

/// Render one call argument the way `sui client call --args` expects it:
/// object ids and scalars verbatim, vectors as JSON text.
fn render_arg(arg: &CallArg) -> String {
    match arg {
        CallArg::Object { id } => id.clone(),
        CallArg::Pure { value } => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

impl SuiCliSubmitter {
    pub fn new(sui_bin: impl Into<String>) -> Self {
        Self {
            sui_bin: sui_bin.into(),
            sender: None,
            gas_budget: DEFAULT_GAS_BUDGET,
        }
    }

    /// Sign as this keystore address (switches the active address first).
    pub fn with_sender(mut self, sender: Option<String>) -> Self {
        self.sender = sender;
        self
    }

    pub fn with_gas_budget(mut self, gas_budget: u64) -> Self {
        self.gas_budget = gas_budget;
        self
    }

    /// The `sui client call` argument vector for a call, without the
    /// binary name.
    pub fn call_args(&self, call: &MoveCall) -> Vec<String> {
        let mut args = vec![
            "client".to_string(),
            "call".to_string(),
            "--package".to_string(),
            call.package.clone(),
            "--module".to_string(),
            call.module.clone(),
            "--function".to_string(),
            call.function.clone(),
        ];
        if !call.type_arguments.is_empty() {
            args.push("--type-args".to_string());
            args.extend(call.type_arguments.iter().cloned());
        }
        if !call.arguments.is_empty() {
            args.push("--args".to_string());
            args.extend(call.arguments.iter().map(render_arg));
        }
        args.push("--gas-budget".to_string());
        args.push(self.gas_budget.to_string());
        args.push("--json".to_string());
        args
    }

    fn run(&self, args: &[String]) -> Result<String, SubmitError> {
        debug!(bin = %self.sui_bin, ?args, "running sui client");
        let output = Command::new(&self.sui_bin)
            .args(args)
            .output()
            .map_err(|e| SubmitError::Network(format!("failed to run {}: {}", self.sui_bin, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SubmitError::Rejected(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn switch_sender(&self) -> Result<(), SubmitError> {
        if let Some(sender) = &self.sender {
            self.run(&[
                "client".to_string(),
                "switch".to_string(),
                "--address".to_string(),
                sender.clone(),
            ])?;
        }
        Ok(())
    }

    /// Blocking call submission; returns the digest reported by the CLI.
    pub fn submit_call(&self, call: &MoveCall) -> Result<TransactionDigest, SubmitError> {
        self.switch_sender()?;
        let stdout = self.run(&self.call_args(call))?;
        let digest = parse_digest(&stdout)?;
        info!(%digest, target = %call.target(), "call submitted");
        Ok(digest)
    }

    /// Publish a Move package and return the digest.
    pub fn publish_package(&self, package_path: &str) -> Result<TransactionDigest, SubmitError> {
        self.switch_sender()?;
        let args = vec![
            "client".to_string(),
            "publish".to_string(),
            package_path.to_string(),
            "--skip-fetch-latest-git-deps".to_string(),
            "--gas-budget".to_string(),
            self.gas_budget.to_string(),
            "--json".to_string(),
        ];
        let stdout = self.run(&args)?;
        let digest = parse_digest(&stdout)?;
        info!(%digest, package_path, "package published");
        Ok(digest)
    }
}

#[async_trait]
impl SubmissionClient for SuiCliSubmitter {
    async fn submit(&self, call: &MoveCall) -> Result<TransactionDigest, SubmitError> {
        let submitter = self.clone();
        let call = call.clone();
        tokio::task::spawn_blocking(move || submitter.submit_call(&call))
            .await
            .map_err(|e| SubmitError::Network(format!("submit task failed: {}", e)))?
    }
}

/// Pull the transaction digest out of the CLI's JSON output.
fn parse_digest(stdout: &str) -> Result<TransactionDigest, SubmitError> {
    let value: Value = serde_json::from_str(stdout.trim()).map_err(|e| {
        SubmitError::Rejected(format!("unparseable sui client output: {}", e))
    })?;
    value
        .get("digest")
        .and_then(|d| d.as_str())
        .map(TransactionDigest::new)
        .ok_or_else(|| SubmitError::Rejected("sui client output carried no digest".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use localcoin_types::MoveCall;

    #[test]
    fn test_call_args_rendering() {
        let call = MoveCall::new(
            "0xabc::local_coin::register_token",
            vec![CallArg::object("0xapp")],
            vec!["0x219d::usdc::USDC".to_string()],
        )
        .unwrap();

        let submitter = SuiCliSubmitter::new("sui").with_gas_budget(5_000_000);
        let args = submitter.call_args(&call);
        assert_eq!(
            args,
            vec![
                "client",
                "call",
                "--package",
                "0xabc",
                "--module",
                "local_coin",
                "--function",
                "register_token",
                "--type-args",
                "0x219d::usdc::USDC",
                "--args",
                "0xapp",
                "--gas-budget",
                "5000000",
                "--json",
            ]
        );
    }

    #[test]
    fn test_vector_args_render_as_json() {
        let arg = CallArg::pure_addresses(["0xaa", "0xbb"]);
        assert_eq!(render_arg(&arg), r#"["0xaa","0xbb"]"#);

        let arg = CallArg::pure_u64(100_000_000);
        assert_eq!(render_arg(&arg), "100000000");

        let arg = CallArg::pure_str("Campaign Name");
        assert_eq!(render_arg(&arg), "Campaign Name");
    }

    #[test]
    fn test_parse_digest() {
        let digest = parse_digest(r#"{"digest": "9V3xKM", "effects": {}}"#).unwrap();
        assert_eq!(digest.as_str(), "9V3xKM");

        assert!(parse_digest("not json").is_err());
        assert!(parse_digest(r#"{"effects": {}}"#).is_err());
    }
}
