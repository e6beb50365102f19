//! Campaign operations of the `campaign_management` module.

use anyhow::Result;
use clap::Args;

use localcoin_pipeline::persist_created;
use localcoin_types::{CallArg, MoveCall, TypeSignature};

use super::{keys, OpsContext, Role};

/// Create a campaign funded by a payment coin.
#[derive(Debug, Args)]
pub struct CreateCampaignCmd {
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: String,

    /// Number of recipients the campaign supports
    #[arg(long)]
    amount: u64,

    #[arg(long)]
    location: String,

    /// Coin object funding the campaign
    #[arg(long)]
    payment: String,
}

impl CreateCampaignCmd {
    pub async fn execute(self, ctx: &mut OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;

        let call = MoveCall::new(
            &format!("{}::campaign_management::create_campaign", package_id),
            vec![
                CallArg::pure_str(self.name),
                CallArg::pure_str(self.description),
                CallArg::pure_u64(self.amount),
                CallArg::pure_str(self.location),
                CallArg::object(self.payment),
                CallArg::object(ctx.env.get_or_empty(keys::LOCAL_COIN_APP)),
            ],
            vec![],
        )?;

        let outcome = ctx.run_call(Role::SuperAdmin, call).await?;

        let details = TypeSignature::new(&package_id, "campaign_management", "CampaignDetails");
        persist_created(&mut ctx.env, &outcome, &[(keys::CAMPAIGN_DETAILS, details)])?;

        println!(
            "CAMPAIGN_DETAILS = {}",
            ctx.env.get_or_empty(keys::CAMPAIGN_DETAILS)
        );
        Ok(())
    }
}

/// Join an existing campaign as a recipient.
#[derive(Debug, Args)]
pub struct JoinCampaignCmd {
    #[arg(long)]
    campaign_name: String,

    #[arg(long)]
    username: String,
}

impl JoinCampaignCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;

        let call = MoveCall::new(
            &format!("{}::campaign_management::join_campaign", package_id),
            vec![
                CallArg::object(ctx.env.get_or_empty(keys::CAMPAIGN)),
                CallArg::pure_str(self.campaign_name),
                CallArg::pure_str(self.username),
            ],
            vec![],
        )?;

        let outcome = ctx.run_call(Role::Recipient, call).await?;
        println!("join finalized: {}", outcome.digest);
        Ok(())
    }
}

/// Verify joined recipients of a campaign.
#[derive(Debug, Args)]
pub struct VerifyRecipientsCmd {
    #[arg(long)]
    campaign_name: String,

    /// Recipient addresses (defaults to RECIPIENT_ADDRESS)
    #[arg(long)]
    recipient: Vec<String>,
}

impl VerifyRecipientsCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;
        let recipients = if self.recipient.is_empty() {
            vec![ctx.env.get_or_empty(keys::RECIPIENT_ADDRESS)]
        } else {
            self.recipient
        };

        let call = MoveCall::new(
            &format!("{}::campaign_management::verify_recipients", package_id),
            vec![
                CallArg::object(ctx.env.get_or_empty(keys::CAMPAIGN)),
                CallArg::pure_str(self.campaign_name),
                CallArg::pure_addresses(recipients),
                CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY)),
                CallArg::object(ctx.env.get_or_empty(keys::LOCAL_COIN_APP)),
            ],
            vec![],
        )?;

        let outcome = ctx.run_call(Role::SuperAdmin, call).await?;
        println!("verification finalized: {}", outcome.digest);
        Ok(())
    }
}

/// Burn merchant tokens against the treasury for fiat settlement.
#[derive(Debug, Args)]
pub struct RequestSettlementCmd {
    /// Token object to settle (defaults to LC_TOKEN_RECIPIENT)
    #[arg(long)]
    token: Option<String>,
}

impl RequestSettlementCmd {
    pub async fn execute(self, ctx: &OpsContext) -> Result<()> {
        let package_id = ctx.package_id()?;
        let token = ctx.flag_or_key(&self.token, keys::LC_TOKEN_RECIPIENT);
        let usdc_type = ctx.env.get_or_empty(keys::USDC_TYPE);

        let call = MoveCall::new(
            &format!("{}::campaign_management::request_settlement", package_id),
            vec![
                CallArg::object(ctx.env.get_or_empty(keys::USDC_TREASURY)),
                CallArg::object(ctx.env.get_or_empty(keys::LOCAL_COIN_APP)),
                CallArg::object(token),
                CallArg::object(ctx.env.get_or_empty(keys::TOKEN_POLICY)),
            ],
            vec![usdc_type],
        )?;

        let outcome = ctx.run_call(Role::Merchant, call).await?;
        println!("settlement finalized: {}", outcome.digest);
        Ok(())
    }
}
