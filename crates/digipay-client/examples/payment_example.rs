/*
[INPUT]:  DIGIPAY_API_KEY and DIGIPAY_API_URL from the environment
[OUTPUT]: Initiated payment, its verified status and the merchant balance
[POS]:    Examples - server-side payment flow with the SDK client
[UPDATE]: When SDK namespaces change
*/

use digipay_client::*;

/// Example: Collect a mobile-money payment
///
/// 1. Build the SDK client (fails immediately without an API key)
/// 2. Push a payment request to the customer's phone
/// 3. Check its status
/// 4. Read the merchant balance
#[tokio::main]
async fn main() {
    println!("=== DigiPay Payment Example ===\n");

    let sdk = match Digipay::builder().environment(Environment::Sandbox).build() {
        Ok(sdk) => sdk,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ SDK client created for {}", sdk.client().base_url());

    let request = PaymentRequest::new(5000, "237699000000")
        .with_description("Order #42")
        .with_metadata(serde_json::json!({"order_id": "ORDER_42"}));

    let transaction_id = match sdk.payments().create(&request).await {
        Ok(response) => {
            let initiated = response.data();
            println!(
                "✓ Payment initiated: {:?} ({:?})",
                initiated.and_then(|p| p.transaction_id.as_deref()),
                initiated.and_then(|p| p.status)
            );
            initiated.and_then(|p| p.transaction_id.clone())
        }
        Err(e) if e.is_api_error() => {
            eprintln!("Payment rejected ({:?}): {}", e.status_code(), e);
            return;
        }
        Err(e) => {
            eprintln!("Payment failed: {}", e);
            return;
        }
    };

    if let Some(id) = transaction_id {
        match sdk.payments().verify(&id).await {
            Ok(response) => println!("✓ Status: {:?}", response.data().and_then(|t| t.status)),
            Err(e) => eprintln!("Verification failed: {}", e),
        }
    }

    match sdk.settlements().balance().await {
        Ok(balance) => println!("✓ Balance: {:?}", balance.balance),
        Err(e) => eprintln!("Balance failed: {}", e),
    }

    println!("\n✓ Payment example complete");
}
