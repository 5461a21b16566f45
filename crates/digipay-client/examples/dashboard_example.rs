/*
[INPUT]:  Merchant email/password, DIGIPAY_API_URL
[OUTPUT]: Session login, recent transactions and API key inventory
[POS]:    Examples - dashboard (session mode) flow
[UPDATE]: When auth or listing endpoints change
*/

use digipay_client::*;

/// Example: Dashboard session
///
/// Logs in with email/password; the returned token replaces any API key for
/// the rest of the session.
#[tokio::main]
async fn main() {
    println!("=== DigiPay Dashboard Example ===\n");

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {}", e);
            return;
        }
    };
    let client = match DigipayClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    let email = std::env::var("DIGIPAY_EMAIL").unwrap_or_else(|_| "merchant@example.com".to_string());
    let password = std::env::var("DIGIPAY_PASSWORD").unwrap_or_default();

    if let Err(e) = client.login(&email, &password).await {
        eprintln!("Login failed: {}", e);
        return;
    }
    println!(
        "✓ Logged in ({:?}), token expires at {:?}",
        client.credential_mode(),
        client.session().token_expires_at()
    );

    let query = TransactionQuery::default().limit(5).status(TransactionStatus::Success);
    match client.list_transactions(&query).await {
        Ok(response) => {
            if let Some(page) = response.data() {
                for transaction in &page.docs {
                    println!(
                        "  {:?} {:?} {:?}",
                        transaction.transaction_id,
                        transaction.status,
                        transaction.charged_amount()
                    );
                }
            }
        }
        Err(e) => eprintln!("Listing failed: {}", e),
    }

    match client.list_api_keys().await {
        Ok(response) => println!("✓ {} API key(s)", response.data().map(Vec::len).unwrap_or(0)),
        Err(e) => eprintln!("Key listing failed: {}", e),
    }

    client.clear_session();
    println!("\n✓ Dashboard example complete");
}
