/*
[INPUT]:  CLI arguments, .env file, DIGIPAY_* environment variables
[OUTPUT]: Pretty-printed JSON response on stdout, errors on stderr
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use digipay_cli::{Cli, build_client, execute};

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap resolves env fallbacks
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    init_tracing(&args.global.log_level)?;

    let client = build_client(&args.global)?;
    debug!(
        base_url = %client.base_url(),
        mode = ?client.credential_mode(),
        "client ready"
    );

    let output = execute(&client, args.command).await?;
    let rendered = serde_json::to_string_pretty(&output).context("render response")?;
    println!("{rendered}");
    Ok(())
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
