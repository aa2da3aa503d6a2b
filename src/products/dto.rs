use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::products::repo_types::NewProduct;

/// Request body for create and update. Fields are optional so that a missing
/// field is reported as 400 instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}

impl ProductPayload {
    /// Presence check only. Empty text is rejected, a zero price or stock is not.
    pub fn validate(self) -> Result<NewProduct, ApiError> {
        let name = self.name.filter(|s| !s.is_empty());
        let category = self.category.filter(|s| !s.is_empty());
        match (name, category, self.price, self.stock) {
            (Some(name), Some(category), Some(price), Some(stock)) => Ok(NewProduct {
                name,
                category,
                price,
                stock,
            }),
            _ => Err(ApiError::MissingFields),
        }
    }
}

/// Response for a successful create.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedProduct {
    pub message: String,
    pub id: i64,
}

/// Confirmation body for update and delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
