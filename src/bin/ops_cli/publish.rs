//! Package publish and deployment bootstrap.
//!
//! Publishing creates the whole singleton object set of the deployment in
//! one transaction; this command discovers every one of them and rewrites
//! the config store so the rest of the operator scripts can run.

use anyhow::Result;
use clap::Args;

use localcoin_pipeline::{find_published, persist_created, FinalityWaiter, Pipeline, PollConfig};
use localcoin_types::{normalize_address, TypeSignature};

use super::{keys, local_coin_type, OpsContext, Role};

#[derive(Debug, Args)]
pub struct PublishCmd {
    /// Path to the Move package to publish
    #[arg(long, default_value = ".")]
    package_path: String,
}

impl PublishCmd {
    pub async fn execute(self, ctx: &mut OpsContext) -> Result<()> {
        let submitter = ctx.submitter(Role::SuperAdmin);
        let digest = {
            let submitter = submitter.clone();
            let path = self.package_path.clone();
            tokio::task::spawn_blocking(move || submitter.publish_package(&path)).await??
        };
        println!("publish submitted: {}", digest);

        let waiter = FinalityWaiter::new(PollConfig::from_env());
        let pipeline = Pipeline::new(&submitter, &ctx.fetcher, waiter);
        let outcome = pipeline.await_submitted(digest).await?;

        // The raw reported id matches the objectType strings in the same
        // change set; the short form is what later scripts interpolate.
        let package_id = find_published(&outcome.changes)?;
        let lc = local_coin_type(&package_id);

        let bindings = vec![
            (
                keys::UPGRADE_CAP,
                TypeSignature::new("0x2", "package", "UpgradeCap"),
            ),
            (
                keys::LOCAL_COIN_APP,
                TypeSignature::new(&package_id, "local_coin", "LocalCoinApp"),
            ),
            (
                keys::SUPER_ADMIN,
                TypeSignature::new(&package_id, "registry", "SuperAdmin"),
            ),
            (
                keys::TOKEN_POLICY,
                TypeSignature::new("0x2", "token", "TokenPolicy").with_type_param(lc.clone()),
            ),
            (
                keys::TOKEN_POLICY_CAP,
                TypeSignature::new("0x2", "token", "TokenPolicyCap").with_type_param(lc),
            ),
            (
                keys::MERCHANT_REGISTRY,
                TypeSignature::new(&package_id, "registry", "MerchantRegistry"),
            ),
            (
                keys::CAMPAIGN,
                TypeSignature::new(&package_id, "campaign_management", "Campaigns"),
            ),
        ];

        ctx.env
            .upsert(keys::PACKAGE_ID, &normalize_address(&package_id))?;
        persist_created(&mut ctx.env, &outcome, &bindings)?;

        println!("deployment bootstrapped:");
        println!("  PACKAGE_ID = {}", normalize_address(&package_id));
        for (key, _) in &bindings {
            println!("  {} = {}", key, ctx.env.get_or_empty(key));
        }
        Ok(())
    }
}
