//! Fullnode endpoint resolution.

const MAINNET_FULLNODE: &str = "https://fullnode.mainnet.sui.io:443";
const TESTNET_FULLNODE: &str = "https://fullnode.testnet.sui.io:443";
const DEVNET_FULLNODE: &str = "https://fullnode.devnet.sui.io:443";

/// Default fullnode endpoint for a named network.
pub fn default_fullnode_endpoint(network: &str) -> String {
    match network {
        "mainnet" => MAINNET_FULLNODE.to_string(),
        "devnet" => DEVNET_FULLNODE.to_string(),
        _ => TESTNET_FULLNODE.to_string(),
    }
}

/// Resolve the fullnode endpoint: explicit env override first, then the
/// named network's default. The deployment targets testnet, so that is
/// the fallback.
pub fn resolve_fullnode_endpoint() -> String {
    if let Ok(value) = std::env::var("LOCALCOIN_RPC_URL") {
        if !value.trim().is_empty() {
            return value;
        }
    }
    default_fullnode_endpoint(&std::env::var("LOCALCOIN_NETWORK").unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        assert_eq!(
            default_fullnode_endpoint("mainnet"),
            "https://fullnode.mainnet.sui.io:443"
        );
        // Unknown names fall back to testnet.
        assert_eq!(
            default_fullnode_endpoint(""),
            "https://fullnode.testnet.sui.io:443"
        );
    }
}
