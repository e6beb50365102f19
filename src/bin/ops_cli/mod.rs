//! Shared plumbing for the operator subcommands.

pub mod campaign;
pub mod publish;
pub mod registry;
pub mod token;

use anyhow::{bail, Result};
use clap::ValueEnum;

use localcoin_client::{FullnodeClient, SuiCliSubmitter};
use localcoin_env::EnvFile;
use localcoin_pipeline::{FinalityWaiter, Pipeline, PipelineError, PollConfig, TxOutcome};
use localcoin_types::{MoveCall, TypeSignature};

/// Config store keys written at bootstrap and updated by pipeline runs.
pub mod keys {
    pub const PACKAGE_ID: &str = "PACKAGE_ID";
    pub const UPGRADE_CAP: &str = "UPGRADE_CAP";
    pub const LOCAL_COIN_APP: &str = "LOCAL_COIN_APP";
    pub const SUPER_ADMIN: &str = "SUPER_ADMIN";
    pub const TOKEN_POLICY: &str = "TOKEN_POLICY";
    pub const TOKEN_POLICY_CAP: &str = "TOKEN_POLICY_CAP";
    pub const MERCHANT_REGISTRY: &str = "MERCHANT_REGISTRY";
    pub const CAMPAIGN: &str = "CAMPAIGN";
    pub const CAMPAIGN_DETAILS: &str = "CAMPAIGN_DETAILS";
    pub const USDC_TREASURY: &str = "USDC_TREASURY";
    pub const USDC_TYPE: &str = "USDC_TYPE";
    pub const RECIPIENT_ADDRESS: &str = "RECIPIENT_ADDRESS";
    pub const MERCHANT_ADDRESS: &str = "MERCHANT_ADDRESS";
    pub const SUPER_ADMIN_ADDRESS: &str = "SUPER_ADMIN_ADDRESS";
    pub const LC_TOKEN_RECIPIENT: &str = "LC_TOKEN_RECIPIENT";
}

/// Which keystore address signs the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Role {
    SuperAdmin,
    Merchant,
    Recipient,
}

impl Role {
    /// Config store key holding this role's address.
    pub fn address_key(self) -> &'static str {
        match self {
            Role::SuperAdmin => keys::SUPER_ADMIN_ADDRESS,
            Role::Merchant => keys::MERCHANT_ADDRESS,
            Role::Recipient => keys::RECIPIENT_ADDRESS,
        }
    }
}

/// Everything one subcommand needs: the loaded config store, the effects
/// fetcher, and the knobs for the CLI submitter.
pub struct OpsContext {
    pub env: EnvFile,
    pub fetcher: FullnodeClient,
    pub sui_bin: String,
    pub gas_budget: u64,
    pub role_override: Option<Role>,
}

impl OpsContext {
    pub fn load(
        env_path: &str,
        rpc_url: Option<&str>,
        sui_bin: &str,
        gas_budget: u64,
        role_override: Option<Role>,
    ) -> Result<Self> {
        let env = EnvFile::load(env_path)?;
        let fetcher = match rpc_url {
            Some(url) => FullnodeClient::new(url),
            None => FullnodeClient::from_env(),
        };
        Ok(Self {
            env,
            fetcher,
            sui_bin: sui_bin.to_string(),
            gas_budget,
            role_override,
        })
    }

    /// Deployed package id; fails if the store has none yet.
    pub fn package_id(&self) -> Result<String> {
        let pkg = self.env.get_or_empty(keys::PACKAGE_ID);
        if pkg.is_empty() {
            bail!("PACKAGE_ID is empty in {}; run `publish` first", self.env.path().display());
        }
        Ok(pkg)
    }

    /// Flag value if given, else the config store value (possibly empty;
    /// the node rejects empty arguments downstream).
    pub fn flag_or_key(&self, flag: &Option<String>, key: &str) -> String {
        flag.clone().unwrap_or_else(|| self.env.get_or_empty(key))
    }

    /// The submitter for a role, honoring a `--role` override. An empty
    /// address for the role falls back to the keystore's active address.
    pub fn submitter(&self, default_role: Role) -> SuiCliSubmitter {
        let role = self.role_override.unwrap_or(default_role);
        let sender = Some(self.env.get_or_empty(role.address_key())).filter(|s| !s.is_empty());
        SuiCliSubmitter::new(&self.sui_bin)
            .with_sender(sender)
            .with_gas_budget(self.gas_budget)
    }

    /// Submit one call as `role` and wait for its effects.
    pub async fn run_call(&self, role: Role, call: MoveCall) -> Result<TxOutcome, PipelineError> {
        let submitter = self.submitter(role);
        let waiter = FinalityWaiter::new(PollConfig::from_env());
        Pipeline::new(&submitter, &self.fetcher, waiter)
            .execute(call)
            .await
    }
}

/// The package's token type, `{pkg}::local_coin::LOCAL_COIN`.
pub fn local_coin_type(package_id: &str) -> TypeSignature {
    TypeSignature::new(package_id, "local_coin", "LOCAL_COIN")
}
