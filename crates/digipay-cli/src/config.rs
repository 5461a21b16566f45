/*
[INPUT]:  Global CLI options (already merged with DIGIPAY_* env by clap)
[OUTPUT]: Configured DigipayClient
[POS]:    Configuration layer - client setup for one invocation
[UPDATE]: When adding connection or credential options
*/

use std::time::Duration;

use anyhow::{Context, Result};
use digipay_client::{ClientConfig, Credential, DigipayClient};

use crate::cli::GlobalArgs;

/// Pick the credential: a session token wins over an API key; blanks are ignored
pub fn resolve_credential(args: &GlobalArgs) -> Option<Credential> {
    let non_blank = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    non_blank(&args.token)
        .map(Credential::bearer)
        .or_else(|| non_blank(&args.api_key).map(Credential::api_key))
}

pub fn client_config(args: &GlobalArgs) -> Result<ClientConfig> {
    let mut config = ClientConfig::default();
    if let Some(base_url) = args.base_url.as_deref().filter(|url| !url.trim().is_empty()) {
        config = config.with_base_url(base_url).context("invalid --base-url")?;
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

pub fn build_client(args: &GlobalArgs) -> Result<DigipayClient> {
    let config = client_config(args)?;
    DigipayClient::with_config(config, resolve_credential(args)).context("create DigiPay client")
}
