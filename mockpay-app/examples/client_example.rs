//! Client example demonstrating the payment and ledger flows against a running server.
//!
//! Run with: cargo run -p mockpay-app --example client_example

use mockpay_client::MockPayClient;
use mockpay_hex::{PaymentService, inbound::HttpServer};
use mockpay_store::{RandomIdGenerator, build_store, default_initial_balance};
use rust_decimal::Decimal;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Bind first so the client can't race the server
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let port = listener.local_addr()?.port();

    println!("🚀 Starting server on port {port}...");

    let store = build_store(default_initial_balance(), true)?;
    let service = PaymentService::new(store, RandomIdGenerator::default());
    let router = HttpServer::new(service).router();

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, router).await {
            eprintln!("server stopped: {err}");
        }
    });

    let client = MockPayClient::new(format!("http://127.0.0.1:{port}"));

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: card-style payment flow
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    let customer = client.create_customer("Ruff", "ruff@example.com").await?;
    println!("✅ Created customer: {} (id={})", customer.name, customer.id);

    let intent = client
        .create_payment_intent(1200, "thb", "pm_mock_visa", "Food delivery payment")
        .await?;
    println!(
        "✅ Created payment intent {} for {} {} ({})",
        intent.id, intent.amount, intent.currency, intent.status
    );

    let (intent, charges) = client.confirm_payment_intent(&intent.id).await?;
    println!("✅ Confirmed {} -> {}", intent.id, intent.status);
    for charge in &charges.data {
        println!("   Charge {}: {} {}", charge.id, charge.amount, charge.currency);
    }

    let again = client.confirm_payment_intent(&intent.id).await;
    println!("✅ Second confirmation refused: {}", again.is_err());

    let refund = client.create_refund(&intent.id, 600).await?;
    println!("✅ Recorded refund {} for {} {}", refund.id, refund.amount, refund.currency);

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: ledger flow
    // ─────────────────────────────────────────────────────────────────────────

    let paid = client
        .process_payment("cash", Decimal::new(200, 0), "ord_1")
        .await?;
    println!("✅ {} (tx={:?})", paid.message, paid.transaction_id);

    let refused = client
        .withdraw("creditcard", Decimal::new(6000, 0))
        .await?;
    println!("✅ Withdraw 6000 from creditcard: success={} ({})", refused.success, refused.message);

    let refunded = client
        .refund_to_account("cash", Decimal::new(50, 0), "ord_1")
        .await?;
    println!("✅ {} (tx={:?})", refunded.message, refunded.transaction_id);

    println!("\n📋 All accounts:");
    for account in client.list_accounts().await? {
        println!("   - {}: {}", account.payment_type, account.balance);
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
