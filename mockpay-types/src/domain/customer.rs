//! Customer domain model.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A mock customer record.
///
/// Customers are created once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Customer {
    #[schema(example = "cus_mock_12345")]
    pub id: String,
    /// Always `"customer"`
    pub object: String,
    #[schema(example = "Ruff")]
    pub name: String,
    #[schema(example = "ruff@example.com")]
    pub email: String,
    /// Creation time in epoch seconds
    #[schema(example = 1734567890)]
    pub created: i64,
}

impl Customer {
    pub const OBJECT: &'static str = "customer";

    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        created: i64,
    ) -> Self {
        Self {
            id: id.into(),
            object: Self::OBJECT.to_string(),
            name: name.into(),
            email: email.into(),
            created,
        }
    }
}
