/*
[INPUT]:  Command-line arguments and DIGIPAY_* environment variables
[OUTPUT]: Parsed global options and subcommand
[POS]:    CLI layer - argument definitions
[UPDATE]: When adding subcommands or flags
*/

use clap::{Args, Parser, Subcommand};
use digipay_client::{KeyEnvironment, SettlementStatus, TransactionStatus};

#[derive(Parser, Debug)]
#[command(name = "digipay", version, about = "DigiPay mobile-money payment API client")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Merchant API key
    #[arg(long, env = "DIGIPAY_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
    /// Session token from `login`; takes precedence over the API key
    #[arg(long, env = "DIGIPAY_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,
    /// Service root, e.g. https://digitalcertify.tech
    #[arg(long, env = "DIGIPAY_API_URL", value_name = "URL", global = true)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long, env = "DIGIPAY_TIMEOUT_SECS", value_name = "SECS", global = true)]
    pub timeout_secs: Option<u64>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merchant balance
    Balance,
    /// Push a payment request to a customer's phone
    Pay(PayArgs),
    /// Check the status of a payment
    Verify { transaction_id: String },
    /// Full payment detail
    Payment { transaction_id: String },
    /// List transactions
    Transactions(TransactionListArgs),
    /// Fetch one transaction from the history
    Transaction { transaction_id: String },
    /// Request a payout of the merchant balance
    Settle {
        amount: u64,
        /// Recipient phone; defaults to the merchant's settlement number
        #[arg(long)]
        phone: Option<String>,
    },
    /// List settlements
    Settlements(SettlementListArgs),
    /// Log in and print the session token
    Login {
        email: String,
        #[arg(long, env = "DIGIPAY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a merchant account
    Register(RegisterArgs),
    /// Show the merchant profile, or update it when any field is given
    Profile(ProfileArgs),
    /// Manage API keys
    #[command(subcommand)]
    Keys(KeysCommand),
    /// Daily volume and status distribution
    Analytics,
}

#[derive(Args, Debug)]
pub struct PayArgs {
    /// Amount in minor units
    pub amount: u64,
    pub phone: String,
    #[arg(long, default_value = digipay_client::DEFAULT_CURRENCY)]
    pub currency: String,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Arbitrary JSON object attached to the transaction
    #[arg(long, value_name = "JSON")]
    pub metadata: Option<String>,
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,
    /// Use the dashboard endpoint (session token required)
    #[arg(long, conflicts_with_all = ["email", "description", "metadata", "webhook_url"])]
    pub dashboard: bool,
}

#[derive(Args, Debug)]
pub struct TransactionListArgs {
    #[arg(long, default_value_t = digipay_client::DEFAULT_PAGE)]
    pub page: u32,
    #[arg(long, default_value_t = digipay_client::DEFAULT_LIMIT)]
    pub limit: u32,
    #[arg(long)]
    pub status: Option<TransactionStatus>,
    /// Match on transaction id or customer phone
    #[arg(long)]
    pub search: Option<String>,
}

#[derive(Args, Debug)]
pub struct SettlementListArgs {
    #[arg(long, default_value_t = digipay_client::DEFAULT_PAGE)]
    pub page: u32,
    #[arg(long, default_value_t = digipay_client::DEFAULT_LIMIT)]
    pub limit: u32,
    #[arg(long)]
    pub status: Option<SettlementStatus>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    pub email: String,
    #[arg(long, env = "DIGIPAY_PASSWORD", hide_env_values = true)]
    pub password: String,
    #[arg(long)]
    pub business_name: String,
    #[arg(long)]
    pub business_type: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[arg(long)]
    pub business_name: Option<String>,
    #[arg(long)]
    pub business_type: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    /// Who bears the commission: merchant or client
    #[arg(long)]
    pub fee_payer: Option<digipay_client::FeePayer>,
}

#[derive(Subcommand, Debug)]
pub enum KeysCommand {
    /// List API keys (secrets are not returned)
    List,
    /// Create a key; its secret is printed once
    Generate {
        name: String,
        #[arg(long, default_value = "test")]
        environment: KeyEnvironment,
    },
    /// Revoke a key by id
    Revoke { key_id: String },
}
