//! Merchant registry and token-policy allowlist operations.

use anyhow::Result;
use clap::Args;

use localcoin_types::{CallArg, MoveCall};

use super::{keys, local_coin_type, OpsContext, Role};

/// Register the calling merchant in the registry.
#[derive(Debug, Args)]
pub struct MerchantRegistrationCmd {
    #[arg(long)]
    name: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    store_name: String,

    #[arg(long)]
    location: String,
}

impl MerchantRegistrationCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;

        let call = MoveCall::new(
            &format!("{}::registry::merchant_registration", package_id),
            vec![
                CallArg::pure_str(self.name),
                CallArg::pure_str(self.phone),
                CallArg::pure_str(self.store_name),
                CallArg::pure_str(self.location),
                CallArg::object(ctx.env.get_or_empty(keys::MERCHANT_REGISTRY)),
            ],
            vec![],
        )?;

        let outcome = ctx.run_call(Role::Merchant, call).await?;
        println!("registration finalized: {}", outcome.digest);
        Ok(())
    }
}

/// Approve a registered merchant.
#[derive(Debug, Args)]
pub struct VerifyMerchantCmd {
    /// Merchant address (defaults to MERCHANT_ADDRESS)
    #[arg(long)]
    merchant: Option<String>,
}

impl VerifyMerchantCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;
        let merchant = ctx.flag_or_key(&self.merchant, keys::MERCHANT_ADDRESS);

        let call = MoveCall::new(
            &format!("{}::registry::verify_merchants", package_id),
            vec![
                CallArg::object(ctx.env.get_or_empty(keys::SUPER_ADMIN)),
                CallArg::object(ctx.env.get_or_empty(keys::MERCHANT_REGISTRY)),
                CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY)),
                CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY_CAP)),
                CallArg::pure_address(merchant),
            ],
            vec![],
        )?;

        let outcome = ctx.run_call(Role::SuperAdmin, call).await?;
        println!("merchant verification finalized: {}", outcome.digest);
        Ok(())
    }
}

/// Add addresses to the token policy allowlist rule.
#[derive(Debug, Args)]
pub struct AddAllowlistRecordsCmd {
    /// Addresses to allow (defaults to RECIPIENT_ADDRESS and
    /// MERCHANT_ADDRESS)
    #[arg(long)]
    address: Vec<String>,
}

impl AddAllowlistRecordsCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;
        let addresses = if self.address.is_empty() {
            vec![
                ctx.env.get_or_empty(keys::RECIPIENT_ADDRESS),
                ctx.env.get_or_empty(keys::MERCHANT_ADDRESS),
            ]
        } else {
            self.address
        };

        let call = MoveCall::new(
            &format!("{}::allowlist_rule::add_records", package_id),
            vec![
                CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY)),
                CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY_CAP)),
                CallArg::pure_addresses(addresses),
            ],
            vec![local_coin_type(&package_id).to_string()],
        )?;

        let outcome = ctx.run_call(Role::SuperAdmin, call).await?;
        println!("allowlist update finalized: {}", outcome.digest);
        Ok(())
    }
}
