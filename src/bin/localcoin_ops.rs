//! localcoin-ops: operator CLI for the LocalCoin loyalty program on Sui.
//!
//! Every subcommand runs one pipeline: build the call, submit it through
//! the `sui` client, poll the fullnode until the effects are queryable,
//! extract newly created object ids, and write them back into the shared
//! `.env` config store for later subcommands to use.
//!
//! ## Example usage
//!
//! ```bash
//! # Publish the Move package and bootstrap the config store
//! localcoin-ops publish --package-path ./localcoin
//!
//! # Register the settlement token
//! localcoin-ops register-token --usdc-type 0x219d..::usdc::USDC
//!
//! # Campaign lifecycle
//! localcoin-ops create-campaign --name "Food Aid" --description "..." \
//!     --amount 10 --location "Springfield" --payment 0x3480..
//! localcoin-ops join-campaign --campaign-name "Food Aid" --username alice
//! localcoin-ops verify-recipients --campaign-name "Food Aid"
//!
//! # Merchant lifecycle
//! localcoin-ops merchant-registration --name "Bob" --phone 98191 \
//!     --store-name "Bob's" --location "Springfield"
//! localcoin-ops verify-merchant
//! localcoin-ops request-settlement
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};

mod ops_cli;

use ops_cli::{
    campaign::{CreateCampaignCmd, JoinCampaignCmd, RequestSettlementCmd, VerifyRecipientsCmd},
    publish::PublishCmd,
    registry::{AddAllowlistRecordsCmd, MerchantRegistrationCmd, VerifyMerchantCmd},
    token::{
        RegisterTokenCmd, RemoveCampaignCreatorCmd, RemoveMerchantCmd, RemoveRecipientCmd,
        TransferToMerchantsCmd, TransferToRecipientsCmd,
    },
    OpsContext, Role,
};

#[derive(Parser)]
#[command(
    name = "localcoin-ops",
    author,
    version,
    about = "Operator CLI for the LocalCoin loyalty program",
    long_about = "Builds, submits, and finalizes LocalCoin operator transactions,\n\
                  persisting discovered object ids into the shared .env config store."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config store path
    #[arg(long, global = true, default_value = ".env")]
    env_file: String,

    /// Fullnode RPC URL (default: testnet, or LOCALCOIN_RPC_URL)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Path to the sui client binary
    #[arg(long, global = true, default_value = "sui")]
    sui_bin: String,

    /// Gas budget in MIST
    #[arg(long, global = true, default_value_t = localcoin_client::cli::DEFAULT_GAS_BUDGET)]
    gas_budget: u64,

    /// Sign as this role instead of the subcommand's default
    #[arg(long, global = true, value_enum)]
    role: Option<Role>,
}

#[derive(Subcommand)]
enum Commands {
    /// Publish the Move package and bootstrap the config store
    Publish(PublishCmd),

    /// Register the settlement token and create its treasury
    RegisterToken(RegisterTokenCmd),

    /// Create a campaign funded by a payment coin
    CreateCampaign(CreateCampaignCmd),

    /// Join an existing campaign as a recipient
    JoinCampaign(JoinCampaignCmd),

    /// Verify joined recipients of a campaign
    VerifyRecipients(VerifyRecipientsCmd),

    /// Register the calling merchant in the registry
    MerchantRegistration(MerchantRegistrationCmd),

    /// Approve a registered merchant
    VerifyMerchant(VerifyMerchantCmd),

    /// Add addresses to the token policy allowlist
    AddAllowlistRecords(AddAllowlistRecordsCmd),

    /// Mint and transfer tokens to a verified recipient
    TransferToRecipients(TransferToRecipientsCmd),

    /// Spend a recipient's tokens at a merchant
    TransferToMerchants(TransferToMerchantsCmd),

    /// Burn merchant tokens against the treasury for settlement
    RequestSettlement(RequestSettlementCmd),

    /// Strip a recipient's verification
    RemoveRecipient(RemoveRecipientCmd),

    /// Strip a merchant's verification
    RemoveMerchant(RemoveMerchantCmd),

    /// Revoke a campaign creator
    RemoveCampaignCreator(RemoveCampaignCreatorCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        command,
        env_file,
        rpc_url,
        sui_bin,
        gas_budget,
        role,
    } = Cli::parse();

    let mut ctx = OpsContext::load(&env_file, rpc_url.as_deref(), &sui_bin, gas_budget, role)?;

    match command {
        Commands::Publish(cmd) => cmd.execute(&mut ctx).await,
        Commands::RegisterToken(cmd) => cmd.execute(&mut ctx).await,
        Commands::CreateCampaign(cmd) => cmd.execute(&mut ctx).await,
        Commands::JoinCampaign(cmd) => cmd.execute(&ctx).await,
        Commands::VerifyRecipients(cmd) => cmd.execute(&ctx).await,
        Commands::MerchantRegistration(cmd) => cmd.execute(&ctx).await,
        Commands::VerifyMerchant(cmd) => cmd.execute(&ctx).await,
        Commands::AddAllowlistRecords(cmd) => cmd.execute(&ctx).await,
        Commands::TransferToRecipients(cmd) => cmd.execute(&mut ctx).await,
        Commands::TransferToMerchants(cmd) => cmd.execute(&mut ctx).await,
        Commands::RequestSettlement(cmd) => cmd.execute(&ctx).await,
        Commands::RemoveRecipient(cmd) => cmd.execute(&ctx).await,
        Commands::RemoveMerchant(cmd) => cmd.execute(&ctx).await,
        Commands::RemoveCampaignCreator(cmd) => cmd.execute(&ctx).await,
    }
}
