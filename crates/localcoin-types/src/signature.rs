//! On-chain type identity.
//!
//! Discovery compares the type reported for a created object against the
//! type the operator expects. Both sides are strings on the wire, and the
//! expected side embeds a package id that is only known after a previous
//! pipeline run persisted it. [`TypeSignature`] makes that construction
//! explicit: the signature is assembled from named components and rendered
//! once, so a stale or mistyped package id shows up as a clean
//! "no match, here is what was observed" failure instead of a silent
//! string mismatch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trim redundant leading zeros from a hex address, keeping the `0x` prefix.
///
/// The fullnode reports freshly published package ids zero-padded to 64 hex
/// characters; the short form is what gets persisted and interpolated into
/// later signatures, so both sides of a comparison must agree on it.
pub fn normalize_address(addr: &str) -> String {
    let addr = addr.trim();
    let hex = addr
        .strip_prefix("0x")
        .or_else(|| addr.strip_prefix("0X"))
        .unwrap_or(addr)
        .to_lowercase();
    let trimmed = hex.trim_start_matches('0');
    if trimmed.is_empty() {
        "0x0".to_string()
    } else {
        format!("0x{}", trimmed)
    }
}

/// Identity of an on-chain type, built from named components.
///
/// Renders as `package::module::Name` or `package::module::Name<Param>`.
/// Equality against an observed type string is exact equality of the
/// rendered form; no partial or structural matching is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeSignature {
    pub package: String,
    pub module: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_param: Option<Box<TypeSignature>>,
}

impl TypeSignature {
    pub fn new(
        package: impl Into<String>,
        module: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            module: module.into(),
            name: name.into(),
            type_param: None,
        }
    }

    /// Attach a single generic parameter, e.g. the token type of
    /// `0x2::token::TokenPolicy<T>`.
    pub fn with_type_param(mut self, param: TypeSignature) -> Self {
        self.type_param = Some(Box::new(param));
        self
    }

    /// Parse a rendered signature back into components.
    ///
    /// Accepts `pkg::module::Name` with at most one generic parameter,
    /// which is itself parsed recursively. Used for type strings carried
    /// in the config store (e.g. the settlement token type).
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        let (base, param) = match s.find('<') {
            Some(open) => {
                let inner = s[open..].strip_prefix('<')?.strip_suffix('>')?;
                (&s[..open], Some(Self::parse(inner)?))
            }
            None => (s, None),
        };

        let parts: Vec<&str> = base.split("::").collect();
        let [package, module, name] = parts.as_slice() else {
            return None;
        };
        if package.is_empty() || module.is_empty() || name.is_empty() {
            return None;
        }

        Some(Self {
            package: package.to_string(),
            module: module.to_string(),
            name: name.to_string(),
            type_param: param.map(Box::new),
        })
    }

    /// Exact-match comparison against an observed type string.
    pub fn matches(&self, observed: &str) -> bool {
        self.to_string() == observed
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}::{}", self.package, self.module, self.name)?;
        if let Some(param) = &self.type_param {
            write!(f, "<{}>", param)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let sig = TypeSignature::new("0xabc", "registry", "SuperAdmin");
        assert_eq!(sig.to_string(), "0xabc::registry::SuperAdmin");
    }

    #[test]
    fn test_render_with_param() {
        let sig = TypeSignature::new("0x2", "token", "TokenPolicy")
            .with_type_param(TypeSignature::new("0xabc", "local_coin", "LOCAL_COIN"));
        assert_eq!(
            sig.to_string(),
            "0x2::token::TokenPolicy<0xabc::local_coin::LOCAL_COIN>"
        );
    }

    #[test]
    fn test_parse_round_trip() {
        let rendered = "0x2::token::TokenPolicyCap<0xabc::local_coin::LOCAL_COIN>";
        let sig = TypeSignature::parse(rendered).unwrap();
        assert_eq!(sig.module, "token");
        assert_eq!(sig.type_param.as_ref().unwrap().name, "LOCAL_COIN");
        assert_eq!(sig.to_string(), rendered);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(TypeSignature::parse("usdc::USDC").is_none());
        assert!(TypeSignature::parse("0x2::token::TokenPolicy<unclosed").is_none());
        assert!(TypeSignature::parse("").is_none());
    }

    #[test]
    fn test_match_is_exact() {
        let sig = TypeSignature::new("0xabc", "local_coin", "LocalCoinApp");
        assert!(sig.matches("0xabc::local_coin::LocalCoinApp"));
        // A stale package id must not match.
        assert!(!sig.matches("0xdef::local_coin::LocalCoinApp"));
        // Neither does a differently padded rendering of the same address.
        assert!(!sig.matches("0x0abc::local_coin::LocalCoinApp"));
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address("0x000ab3"), "0xab3");
        assert_eq!(normalize_address("0xab3"), "0xab3");
        assert_eq!(normalize_address("0x0000"), "0x0");
    }
}
