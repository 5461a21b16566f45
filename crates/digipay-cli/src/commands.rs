/*
[INPUT]:  Parsed subcommand and a configured DigipayClient
[OUTPUT]: JSON value of the API response to print
[POS]:    Command layer - maps subcommands onto client calls
[UPDATE]: When adding subcommands or client operations
*/

use anyhow::{Context, Result, bail};
use digipay_client::{
    DigipayClient, PaymentRequest, ProfileUpdate, RegisterRequest, SettlementQuery,
    TransactionQuery,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::cli::{
    Command, KeysCommand, PayArgs, ProfileArgs, RegisterArgs, SettlementListArgs,
    TransactionListArgs,
};

/// Run one subcommand and return the response as JSON
pub async fn execute(client: &DigipayClient, command: Command) -> Result<Value> {
    match command {
        Command::Balance => to_json(client.balance().await.context("fetch balance")?),
        Command::Pay(args) => pay(client, args).await,
        Command::Verify { transaction_id } => to_json(
            client
                .verify_payment(&transaction_id)
                .await
                .with_context(|| format!("verify payment {transaction_id}"))?,
        ),
        Command::Payment { transaction_id } => to_json(
            client
                .get_payment(&transaction_id)
                .await
                .with_context(|| format!("fetch payment {transaction_id}"))?,
        ),
        Command::Transactions(args) => list_transactions(client, args).await,
        Command::Transaction { transaction_id } => to_json(
            client
                .get_transaction(&transaction_id)
                .await
                .with_context(|| format!("fetch transaction {transaction_id}"))?,
        ),
        Command::Settle { amount, phone } => to_json(
            client
                .request_settlement(amount, phone.as_deref())
                .await
                .context("request settlement")?,
        ),
        Command::Settlements(args) => list_settlements(client, args).await,
        Command::Login { email, password } => {
            let response = client.login(&email, &password).await.context("log in")?;
            info!(mode = ?client.credential_mode(), "login complete");
            to_json(response)
        }
        Command::Register(args) => register(client, args).await,
        Command::Profile(args) => profile(client, args).await,
        Command::Keys(command) => keys(client, command).await,
        Command::Analytics => to_json(client.analytics().await.context("fetch analytics")?),
    }
}

async fn pay(client: &DigipayClient, args: PayArgs) -> Result<Value> {
    if args.dashboard {
        let response = client
            .initiate_dashboard_payment(args.amount, &args.phone)
            .await
            .context("initiate dashboard payment")?;
        return to_json(response);
    }

    let mut request = PaymentRequest::new(args.amount, args.phone).with_currency(args.currency);
    if let Some(email) = args.email {
        request = request.with_email(email);
    }
    if let Some(description) = args.description {
        request = request.with_description(description);
    }
    if let Some(raw) = args.metadata {
        let metadata: Value = serde_json::from_str(&raw).context("--metadata must be valid JSON")?;
        if !metadata.is_object() {
            bail!("--metadata must be a JSON object");
        }
        request = request.with_metadata(metadata);
    }
    if let Some(webhook_url) = args.webhook_url {
        request = request.with_webhook_url(webhook_url);
    }

    to_json(client.initiate_payment(&request).await.context("initiate payment")?)
}

async fn list_transactions(client: &DigipayClient, args: TransactionListArgs) -> Result<Value> {
    let mut query = TransactionQuery::default().page(args.page).limit(args.limit);
    if let Some(status) = args.status {
        query = query.status(status);
    }
    if let Some(search) = args.search {
        query = query.search(search);
    }
    to_json(client.list_transactions(&query).await.context("list transactions")?)
}

async fn list_settlements(client: &DigipayClient, args: SettlementListArgs) -> Result<Value> {
    let mut query = SettlementQuery::default().page(args.page).limit(args.limit);
    if let Some(status) = args.status {
        query = query.status(status);
    }
    to_json(client.list_settlements(&query).await.context("list settlements")?)
}

async fn register(client: &DigipayClient, args: RegisterArgs) -> Result<Value> {
    let mut request = RegisterRequest::new(args.email, args.password, args.business_name);
    request.business_type = args.business_type;
    request.country = args.country;
    request.phone = args.phone;
    to_json(client.register(&request).await.context("register merchant")?)
}

async fn profile(client: &DigipayClient, args: ProfileArgs) -> Result<Value> {
    let update = ProfileUpdate {
        business_name: args.business_name,
        business_type: args.business_type,
        phone: args.phone,
        country: args.country,
        fee_payer: args.fee_payer,
    };

    if update.is_empty() {
        to_json(client.profile().await.context("fetch profile")?)
    } else {
        to_json(client.update_profile(&update).await.context("update profile")?)
    }
}

async fn keys(client: &DigipayClient, command: KeysCommand) -> Result<Value> {
    match command {
        KeysCommand::List => to_json(client.list_api_keys().await.context("list API keys")?),
        KeysCommand::Generate { name, environment } => to_json(
            client
                .generate_api_key(&name, environment)
                .await
                .context("generate API key")?,
        ),
        KeysCommand::Revoke { key_id } => to_json(
            client
                .revoke_api_key(&key_id)
                .await
                .with_context(|| format!("revoke API key {key_id}"))?,
        ),
    }
}

fn to_json<T: Serialize>(response: T) -> Result<Value> {
    serde_json::to_value(response).context("serialize response")
}
