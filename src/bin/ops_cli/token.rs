//! Token lifecycle operations of the `local_coin` module.

use anyhow::Result;
use clap::Args;

use localcoin_pipeline::persist_created;
use localcoin_types::{CallArg, MoveCall, TypeSignature};

use super::{keys, OpsContext, Role};

/// Register the settlement token and create its treasury.
#[derive(Debug, Args)]
pub struct RegisterTokenCmd {
    /// Full type of the settlement token, e.g. `0x219d..::usdc::USDC`
    /// (defaults to USDC_TYPE from the config store)
    #[arg(long)]
    usdc_type: Option<String>,
}

impl RegisterTokenCmd {
    pub async fn execute(self, ctx: &mut OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;
        let usdc_type = ctx.flag_or_key(&self.usdc_type, keys::USDC_TYPE);
        let app = ctx.env.get_or_empty(keys::LOCAL_COIN_APP);

        let call = MoveCall::new(
            &format!("{}::local_coin::register_token", package_id),
            vec![CallArg::object(app)],
            vec![usdc_type.clone()],
        )?;

        let outcome = ctx.run_call(Role::SuperAdmin, call).await?;

        let treasury = TypeSignature::new(&package_id, "local_coin", "UsdcTreasury")
            .with_type_param(
                TypeSignature::parse(&usdc_type)
                    .ok_or_else(|| anyhow::anyhow!("malformed token type '{}'", usdc_type))?,
            );
        persist_created(&mut ctx.env, &outcome, &[(keys::USDC_TREASURY, treasury)])?;

        println!("USDC_TREASURY = {}", ctx.env.get_or_empty(keys::USDC_TREASURY));
        Ok(())
    }
}

/// Mint and transfer tokens to a verified recipient.
#[derive(Debug, Args)]
pub struct TransferToRecipientsCmd {
    /// Amount in base units
    #[arg(long)]
    amount: u64,

    /// Recipient address (defaults to RECIPIENT_ADDRESS)
    #[arg(long)]
    recipient: Option<String>,

    /// Token object to draw from
    #[arg(long)]
    token: String,
}

impl TransferToRecipientsCmd {
    pub async fn execute(self, ctx: &mut OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;
        let recipient = ctx.flag_or_key(&self.recipient, keys::RECIPIENT_ADDRESS);

        let call = MoveCall::new(
            &format!("{}::local_coin::transfer_token_to_recipients", package_id),
            vec![
                CallArg::pure_u64(self.amount),
                CallArg::pure_address(recipient),
                CallArg::object(self.token),
                CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY)),
            ],
            vec![],
        )?;

        let outcome = ctx.run_call(Role::SuperAdmin, call).await?;
        println!("transfer finalized: {}", outcome.digest);
        Ok(())
    }
}

/// Spend a recipient's token balance at a merchant.
#[derive(Debug, Args)]
pub struct TransferToMerchantsCmd {
    /// Merchant address (defaults to MERCHANT_ADDRESS)
    #[arg(long)]
    merchant: Option<String>,

    /// Token object to spend (defaults to LC_TOKEN_RECIPIENT)
    #[arg(long)]
    token: Option<String>,
}

impl TransferToMerchantsCmd {
    pub async fn execute(self, ctx: &mut OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;
        let merchant = ctx.flag_or_key(&self.merchant, keys::MERCHANT_ADDRESS);
        let token = ctx.flag_or_key(&self.token, keys::LC_TOKEN_RECIPIENT);

        let call = MoveCall::new(
            &format!("{}::local_coin::transfer_token_to_merchants", package_id),
            vec![
                CallArg::pure_address(merchant),
                CallArg::object(token),
                CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY)),
            ],
            vec![],
        )?;

        let outcome = ctx.run_call(Role::Recipient, call).await?;
        println!("transfer finalized: {}", outcome.digest);
        Ok(())
    }
}

/// Shared shape of the three removal operations.
async fn remove_address(
    ctx: &OpsContext,
    function: &str,
    address: String,
) -> Result<()> {
    let package_id = ctx.package_id()?;
    let call = MoveCall::new(
        &format!("{}::local_coin::{}", package_id, function),
        vec![
            CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY)),
            CallArg::pure_address(address),
            CallArg::object(ctx.env.get_or_empty(keys::LOCAL_COIN_APP)),
        ],
        vec![],
    )?;

    let outcome = ctx.run_call(Role::SuperAdmin, call).await?;
    println!("{} finalized: {}", function, outcome.digest);
    Ok(())
}

/// Strip a recipient's verification.
#[derive(Debug, Args)]
pub struct RemoveRecipientCmd {
    /// Address to remove (defaults to RECIPIENT_ADDRESS)
    #[arg(long)]
    address: Option<String>,
}

impl RemoveRecipientCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let address = ctx.flag_or_key(&self.address, keys::RECIPIENT_ADDRESS);
        remove_address(ctx, "remove_recipient", address).await
    }
}

/// Strip a merchant's verification.
#[derive(Debug, Args)]
pub struct RemoveMerchantCmd {
    /// Address to remove (defaults to MERCHANT_ADDRESS)
    #[arg(long)]
    address: Option<String>,
}

impl RemoveMerchantCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let address = ctx.flag_or_key(&self.address, keys::MERCHANT_ADDRESS);
        remove_address(ctx, "remove_merchant", address).await
    }
}

/// Revoke a campaign creator.
#[derive(Debug, Args)]
pub struct RemoveCampaignCreatorCmd {
    /// Address to revoke (defaults to SUPER_ADMIN_ADDRESS)
    #[arg(long)]
    address: Option<String>,
}

impl RemoveCampaignCreatorCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let address = ctx.flag_or_key(&self.address, keys::SUPER_ADMIN_ADDRESS);
        remove_address(ctx, "remove_campaign_creator", address).await
    }
}
