//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use mockpay_types::EntityStore;

use super::handlers::{self, AppState};
use crate::PaymentService;

/// HTTP Server for the mock payment API.
pub struct HttpServer<S: EntityStore> {
    state: Arc<AppState<S>>,
}

impl<S: EntityStore> HttpServer<S> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentService<S>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/customers", post(handlers::create_customer::<S>))
            .route("/customers/{id}", get(handlers::get_customer::<S>))
            .route("/payment-intents", post(handlers::create_payment_intent::<S>))
            .route(
                "/payment-intents/confirm",
                post(handlers::confirm_payment_intent::<S>),
            )
            .route(
                "/payment-intents/{id}",
                get(handlers::get_payment_intent::<S>),
            )
            .route("/refunds", post(handlers::create_refund::<S>))
            .route("/webhooks/test", post(handlers::test_webhook))
            .route("/accounts", get(handlers::list_accounts::<S>))
            .route("/accounts/{payment_type}", get(handlers::get_account::<S>))
            .route("/accounts/deposit", post(handlers::deposit::<S>))
            .route("/accounts/withdraw", post(handlers::withdraw::<S>))
            .route("/accounts/refund", post(handlers::refund_to_account::<S>))
            .route(
                "/accounts/process-payment",
                post(handlers::process_payment::<S>),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
