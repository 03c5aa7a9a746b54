//! Error types for the mock payment provider.

use rust_decimal::Decimal;

/// Domain-level errors (invariant violations).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient balance")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Unsupported payment type: {0}")]
    UnsupportedPaymentType(String),

    #[error("Payment intent already confirmed: {0}")]
    IntentAlreadyConfirmed(String),

    #[error("Balance overflow")]
    BalanceOverflow,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Store-level errors.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Application-level errors handed to the transport layer.
///
/// `NotFound` means the entity is absent; every other variant except
/// `Internal` means the operation was rejected.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient balance")]
    InsufficientBalance {
        available: Decimal,
        requested: Decimal,
    },

    #[error("Unsupported payment type: {0}")]
    UnsupportedPaymentType(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidAmount => AppError::InvalidAmount,
            DomainError::InsufficientBalance {
                available,
                requested,
            } => AppError::InsufficientBalance {
                available,
                requested,
            },
            DomainError::UnsupportedPaymentType(token) => AppError::UnsupportedPaymentType(token),
            e @ DomainError::IntentAlreadyConfirmed(_) => AppError::Conflict(e.to_string()),
            e @ DomainError::BalanceOverflow => AppError::BadRequest(e.to_string()),
            DomainError::ValidationError(msg) => AppError::BadRequest(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => AppError::NotFound("Resource not found".into()),
            RepoError::Conflict(e) => AppError::Conflict(e),
            RepoError::Internal(e) => AppError::Internal(e),
        }
    }
}
