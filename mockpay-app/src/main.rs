//! # Mockpay Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the in-memory store (accounts, optional fixtures)
//! - Create the payment service
//! - Start the HTTP server

mod config;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use config::{Config, LogFormat};
use mockpay_hex::{PaymentService, inbound::HttpServer};
use mockpay_store::{RandomIdGenerator, build_store};

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,mockpay_app=debug,mockpay_hex=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    tracing::info!("Starting mockpay server on port {}", config.port);
    tracing::info!(
        initial_balance = %config.initial_balance,
        seed_fixtures = config.seed_fixtures,
        "Building in-memory store"
    );

    let store = build_store(config.initial_balance, config.seed_fixtures)?;
    let service = PaymentService::new(store, RandomIdGenerator::default());

    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await
}
