//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use mockpay_types::domain::{
    Account, Charge, ChargeStatus, Charges, Customer, PaymentIntent, PaymentIntentStatus,
    PaymentMethodType, Refund, RefundStatus,
};
use mockpay_types::dto::{
    AccountListResponse, AccountResponse, ConfirmPaymentIntentRequest,
    ConfirmPaymentIntentResponse, CreateCustomerRequest, CreatePaymentIntentRequest,
    CreateRefundRequest, CustomerResponse, DepositRequest, LedgerResponse, PaymentIntentResponse,
    ProcessPaymentRequest, RefundResponse, RefundToAccountRequest, TestWebhookRequest,
    TestWebhookResponse, WithdrawRequest,
};
use utoipa::OpenApi;

// Documentation-only stand-ins for the real handlers

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Create a customer
#[utoipa::path(
    post,
    path = "/customers",
    tag = "customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerResponse)
    )
)]
async fn create_customer() {}

/// Retrieve a customer
#[utoipa::path(
    get,
    path = "/customers/{id}",
    tag = "customers",
    params(
        ("id" = String, Path, description = "Customer id, e.g. cus_mock_12345")
    ),
    responses(
        (status = 200, description = "Customer found", body = CustomerResponse),
        (status = 404, description = "Customer not found")
    )
)]
async fn get_customer() {}

/// Create a payment intent
#[utoipa::path(
    post,
    path = "/payment-intents",
    tag = "payment_intents",
    request_body = CreatePaymentIntentRequest,
    responses(
        (status = 201, description = "Intent created in requires_confirmation", body = PaymentIntentResponse)
    )
)]
async fn create_payment_intent() {}

/// Retrieve a payment intent
#[utoipa::path(
    get,
    path = "/payment-intents/{id}",
    tag = "payment_intents",
    params(
        ("id" = String, Path, description = "Payment intent id")
    ),
    responses(
        (status = 200, description = "Intent found", body = PaymentIntentResponse),
        (status = 404, description = "Intent not found")
    )
)]
async fn get_payment_intent() {}

/// Confirm a payment intent, producing exactly one charge
#[utoipa::path(
    post,
    path = "/payment-intents/confirm",
    tag = "payment_intents",
    request_body = ConfirmPaymentIntentRequest,
    responses(
        (status = 200, description = "Intent succeeded", body = ConfirmPaymentIntentResponse),
        (status = 404, description = "Intent not found"),
        (status = 409, description = "Intent already confirmed")
    )
)]
async fn confirm_payment_intent() {}

/// Record a refund against a payment intent (no balance change)
#[utoipa::path(
    post,
    path = "/refunds",
    tag = "refunds",
    request_body = CreateRefundRequest,
    responses(
        (status = 201, description = "Refund recorded", body = RefundResponse)
    )
)]
async fn create_refund() {}

/// Acknowledge a test webhook event
#[utoipa::path(
    post,
    path = "/webhooks/test",
    tag = "webhooks",
    request_body = TestWebhookRequest,
    responses(
        (status = 200, description = "Event acknowledged", body = TestWebhookResponse)
    )
)]
async fn test_webhook() {}

/// List every ledger account
#[utoipa::path(
    get,
    path = "/accounts",
    tag = "ledger",
    responses(
        (status = 200, description = "All accounts", body = AccountListResponse)
    )
)]
async fn list_accounts() {}

/// Get a ledger account by payment method token
#[utoipa::path(
    get,
    path = "/accounts/{payment_type}",
    tag = "ledger",
    params(
        ("payment_type" = PaymentMethodType, Path, description = "cash, mobilebanking, creditcard or meowth-wallet")
    ),
    responses(
        (status = 200, description = "Account found", body = AccountResponse),
        (status = 404, description = "Account not found")
    )
)]
async fn get_account() {}

/// Deposit into a ledger account
#[utoipa::path(
    post,
    path = "/accounts/deposit",
    tag = "ledger",
    request_body = DepositRequest,
    responses(
        (status = 200, description = "Deposit applied", body = LedgerResponse),
        (status = 400, description = "Rejected, nothing committed", body = LedgerResponse)
    )
)]
async fn deposit() {}

/// Withdraw from a ledger account
#[utoipa::path(
    post,
    path = "/accounts/withdraw",
    tag = "ledger",
    request_body = WithdrawRequest,
    responses(
        (status = 200, description = "Withdrawal applied", body = LedgerResponse),
        (status = 400, description = "Rejected, nothing committed", body = LedgerResponse)
    )
)]
async fn withdraw() {}

/// Credit a ledger account back
#[utoipa::path(
    post,
    path = "/accounts/refund",
    tag = "ledger",
    request_body = RefundToAccountRequest,
    responses(
        (status = 200, description = "Refund applied", body = LedgerResponse),
        (status = 400, description = "Rejected, nothing committed", body = LedgerResponse)
    )
)]
async fn refund_to_account() {}

/// Pay an order from a ledger account
#[utoipa::path(
    post,
    path = "/accounts/process-payment",
    tag = "ledger",
    request_body = ProcessPaymentRequest,
    responses(
        (status = 200, description = "Payment processed", body = LedgerResponse),
        (status = 400, description = "Rejected, nothing committed", body = LedgerResponse)
    )
)]
async fn process_payment() {}

/// OpenAPI documentation for the mock payment API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mockpay API",
        version = "1.0.0",
        description = "A mock payment provider for local development and tests.\n\nPayment intents, charges and refund records behave like a card processor; the ledger keeps one balance per payment method (`cash`, `mobilebanking`, `creditcard`, `meowth-wallet`). No money moves anywhere real.",
        license(name = "MIT"),
    ),
    paths(
        health,
        create_customer,
        get_customer,
        create_payment_intent,
        get_payment_intent,
        confirm_payment_intent,
        create_refund,
        test_webhook,
        list_accounts,
        get_account,
        deposit,
        withdraw,
        refund_to_account,
        process_payment,
    ),
    components(
        schemas(
            Customer,
            PaymentIntent,
            PaymentIntentStatus,
            Charge,
            ChargeStatus,
            Charges,
            Refund,
            RefundStatus,
            Account,
            PaymentMethodType,
            CreateCustomerRequest,
            CustomerResponse,
            CreatePaymentIntentRequest,
            PaymentIntentResponse,
            ConfirmPaymentIntentRequest,
            ConfirmPaymentIntentResponse,
            CreateRefundRequest,
            RefundResponse,
            TestWebhookRequest,
            TestWebhookResponse,
            DepositRequest,
            WithdrawRequest,
            RefundToAccountRequest,
            ProcessPaymentRequest,
            LedgerResponse,
            AccountResponse,
            AccountListResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "customers", description = "Customer records"),
        (name = "payment_intents", description = "Payment intent lifecycle"),
        (name = "refunds", description = "Refund records"),
        (name = "webhooks", description = "Webhook test stub"),
        (name = "ledger", description = "Per-payment-method balances"),
    )
)]
pub struct ApiDoc;
