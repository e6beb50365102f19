//! Move call descriptors.
//!
//! A [`MoveCall`] is the fully assembled description of one on-chain entry
//! point invocation: the target function, its positional arguments, and its
//! type arguments. It is built once, then handed to the submission client
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Transaction digest (base58 encoded in JSON).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionDigest(pub String);

impl TransactionDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A positional argument to a Move call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CallArg {
    /// On-chain object, referenced by id.
    Object { id: String },

    /// Pure value (string, integer, address, or vector thereof).
    Pure { value: Value },
}

impl CallArg {
    pub fn object(id: impl Into<String>) -> Self {
        CallArg::Object { id: id.into() }
    }

    pub fn pure_str(value: impl Into<String>) -> Self {
        CallArg::Pure {
            value: Value::String(value.into()),
        }
    }

    pub fn pure_u64(value: u64) -> Self {
        CallArg::Pure {
            value: Value::from(value),
        }
    }

    /// Address literal, passed through unmodified.
    pub fn pure_address(value: impl Into<String>) -> Self {
        Self::pure_str(value)
    }

    /// Vector of address literals.
    pub fn pure_addresses<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CallArg::Pure {
            value: Value::Array(
                values
                    .into_iter()
                    .map(|v| Value::String(v.into()))
                    .collect(),
            ),
        }
    }
}

/// Error building a [`MoveCall`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// Target was not of the form `package::module::function`.
    MalformedTarget(String),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MalformedTarget(target) => {
                write!(f, "malformed call target '{}': expected package::module::function", target)
            }
        }
    }
}

impl std::error::Error for BuildError {}

/// A fully assembled Move entry point invocation.
///
/// Construction performs no schema validation against the target function;
/// mistyped arguments surface when the submission client rejects the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveCall {
    pub package: String,
    pub module: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    /// Build a call from a `package::module::function` target string.
    pub fn new(
        target: &str,
        arguments: Vec<CallArg>,
        type_arguments: Vec<String>,
    ) -> Result<Self, BuildError> {
        let parts: Vec<&str> = target.split("::").collect();
        let [package, module, function] = parts.as_slice() else {
            return Err(BuildError::MalformedTarget(target.to_string()));
        };
        if package.is_empty() || module.is_empty() || function.is_empty() {
            return Err(BuildError::MalformedTarget(target.to_string()));
        }

        Ok(Self {
            package: package.to_string(),
            module: module.to_string(),
            function: function.to_string(),
            type_arguments,
            arguments,
        })
    }

    /// The `package::module::function` target this call was built from.
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package, self.module, self.function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_from_target() {
        let call = MoveCall::new(
            "0xabc::local_coin::register_token",
            vec![CallArg::object("0x1")],
            vec!["0x2::sui::SUI".to_string()],
        )
        .unwrap();

        assert_eq!(call.package, "0xabc");
        assert_eq!(call.module, "local_coin");
        assert_eq!(call.function, "register_token");
        assert_eq!(call.target(), "0xabc::local_coin::register_token");
    }

    #[test]
    fn test_build_is_deterministic() {
        let build = || {
            MoveCall::new(
                "0xabc::campaign_management::create_campaign",
                vec![
                    CallArg::pure_str("Campaign Name"),
                    CallArg::pure_u64(10),
                    CallArg::object("0x2"),
                ],
                vec![],
            )
            .unwrap()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_malformed_target_rejected() {
        let err = MoveCall::new("0xabc::local_coin", vec![], vec![]).unwrap_err();
        assert!(matches!(err, BuildError::MalformedTarget(_)));

        let err = MoveCall::new("0xabc::::register_token", vec![], vec![]).unwrap_err();
        assert!(matches!(err, BuildError::MalformedTarget(_)));
    }

    #[test]
    fn test_call_arg_json_shape() {
        let arg = CallArg::pure_addresses(["0xaa", "0xbb"]);
        let json = serde_json::to_value(&arg).unwrap();
        assert_eq!(json["type"], "Pure");
        assert_eq!(json["value"][0], "0xaa");
    }
}
