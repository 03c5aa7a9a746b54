//! Mockpay CLI
//!
//! Command-line interface for the mock payment API.

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use mockpay_client::MockPayClient;

#[derive(Parser)]
#[command(name = "mockpay")]
#[command(author, version, about = "Mock payment provider CLI client", long_about = None)]
struct Cli {
    /// Base URL of the mock payment API
    #[arg(
        long,
        env = "MOCKPAY_API_URL",
        default_value = "http://localhost:50051"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API health
    Health,
    /// Customer operations
    Customer {
        #[command(subcommand)]
        action: CustomerCommands,
    },
    /// Payment intent operations
    Intent {
        #[command(subcommand)]
        action: IntentCommands,
    },
    /// Record a refund against a payment intent
    Refund {
        #[arg(long)]
        payment_intent: String,
        /// Amount in minor currency units
        #[arg(long)]
        amount: u64,
    },
    /// Ledger account operations
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
    /// Send a test webhook event
    Webhook {
        /// Event type, e.g. payment_intent.succeeded
        #[arg(long = "type", default_value = "payment_intent.succeeded")]
        event_type: String,
        #[arg(long, default_value = "{}")]
        data: String,
    },
    /// Run the sample flow: customer, intent, confirm, refund, webhook
    Demo,
}

#[derive(Subcommand)]
enum CustomerCommands {
    /// Create a customer
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Get a customer by id
    Get { id: String },
}

#[derive(Subcommand)]
enum IntentCommands {
    /// Create a payment intent
    Create {
        /// Amount in minor currency units
        #[arg(long)]
        amount: u64,
        #[arg(long, default_value = "thb")]
        currency: String,
        #[arg(long, default_value = "pm_mock_visa")]
        payment_method: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Get a payment intent by id
    Get { id: String },
    /// Confirm a payment intent
    Confirm { id: String },
}

#[derive(Subcommand)]
enum AccountCommands {
    /// Get one account (cash, mobilebanking, creditcard, meowth-wallet)
    Get { payment_type: String },
    /// List all accounts
    List,
    /// Deposit into an account
    Deposit {
        #[arg(long = "type")]
        payment_type: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Withdraw from an account
    Withdraw {
        #[arg(long = "type")]
        payment_type: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Credit an account back
    Refund {
        #[arg(long = "type")]
        payment_type: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "")]
        reference_id: String,
    },
    /// Pay an order from an account
    Pay {
        #[arg(long = "type")]
        payment_type: String,
        #[arg(long)]
        amount: Decimal,
        #[arg(long, default_value = "")]
        order_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = MockPayClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Customer { action } => match action {
            CustomerCommands::Create { name, email } => {
                let customer = client.create_customer(&name, &email).await?;
                println!("{}", serde_json::to_string_pretty(&customer)?);
            }
            CustomerCommands::Get { id } => {
                let customer = client.retrieve_customer(&id).await?;
                println!("{}", serde_json::to_string_pretty(&customer)?);
            }
        },

        Commands::Intent { action } => match action {
            IntentCommands::Create {
                amount,
                currency,
                payment_method,
                description,
            } => {
                let intent = client
                    .create_payment_intent(amount, &currency, &payment_method, &description)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&intent)?);
            }
            IntentCommands::Get { id } => {
                let intent = client.retrieve_payment_intent(&id).await?;
                println!("{}", serde_json::to_string_pretty(&intent)?);
            }
            IntentCommands::Confirm { id } => {
                let (intent, charges) = client.confirm_payment_intent(&id).await?;
                let body = serde_json::json!({
                    "payment_intent": intent,
                    "charges": charges,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            }
        },

        Commands::Refund {
            payment_intent,
            amount,
        } => {
            let refund = client.create_refund(&payment_intent, amount).await?;
            println!("{}", serde_json::to_string_pretty(&refund)?);
        }

        Commands::Account { action } => {
            let result = match action {
                AccountCommands::Get { payment_type } => {
                    let account = client.get_account(&payment_type).await?;
                    println!("{}", serde_json::to_string_pretty(&account)?);
                    return Ok(());
                }
                AccountCommands::List => {
                    let accounts = client.list_accounts().await?;
                    println!("{}", serde_json::to_string_pretty(&accounts)?);
                    return Ok(());
                }
                AccountCommands::Deposit {
                    payment_type,
                    amount,
                } => client.deposit(&payment_type, amount).await?,
                AccountCommands::Withdraw {
                    payment_type,
                    amount,
                } => client.withdraw(&payment_type, amount).await?,
                AccountCommands::Refund {
                    payment_type,
                    amount,
                    reference_id,
                } => {
                    client
                        .refund_to_account(&payment_type, amount, &reference_id)
                        .await?
                }
                AccountCommands::Pay {
                    payment_type,
                    amount,
                    order_id,
                } => {
                    client
                        .process_payment(&payment_type, amount, &order_id)
                        .await?
                }
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.success {
                std::process::exit(1);
            }
        }

        Commands::Webhook { event_type, data } => {
            let received = client.test_webhook(&event_type, &data).await?;
            println!("✓ Webhook received: {}", received);
        }

        Commands::Demo => run_demo(&client).await,
    }

    Ok(())
}

/// Walks the sample flow against the fixtures. A failing step is reported
/// and the next one still runs.
async fn run_demo(client: &MockPayClient) {
    match client.create_customer("Ruff", "ruff@example.com").await {
        Ok(c) => println!("✓ Created customer: {} ({})", c.name, c.id),
        Err(e) => println!("✗ CreateCustomer failed: {}", e),
    }

    match client.retrieve_customer("cus_mock_12345").await {
        Ok(c) => println!("✓ Retrieved customer: {} ({})", c.name, c.email),
        Err(e) => println!("✗ RetrieveCustomer failed: {}", e),
    }

    match client
        .create_payment_intent(1200, "thb", "pm_mock_visa", "Food delivery payment")
        .await
    {
        Ok(pi) => println!(
            "✓ Created payment intent: {}, amount: {} {}",
            pi.id, pi.amount, pi.currency
        ),
        Err(e) => println!("✗ CreatePaymentIntent failed: {}", e),
    }

    match client.confirm_payment_intent("pi_mock_98765").await {
        Ok((pi, charges)) => {
            println!("✓ Confirmed payment intent: {}, status: {}", pi.id, pi.status);
            if let Some(charge) = charges.data.first() {
                println!("  Charge: {}, amount: {}", charge.id, charge.amount);
            }
        }
        Err(e) => println!("✗ ConfirmPaymentIntent failed: {}", e),
    }

    match client.create_refund("pi_mock_98765", 600).await {
        Ok(r) => println!("✓ Created refund: {}, amount: {} {}", r.id, r.amount, r.currency),
        Err(e) => println!("✗ CreateRefund failed: {}", e),
    }

    match client
        .test_webhook("payment_intent.succeeded", r#"{"id":"pi_mock_98765"}"#)
        .await
    {
        Ok(received) => println!("✓ Webhook test received: {}", received),
        Err(e) => println!("✗ TestWebhook failed: {}", e),
    }
}
